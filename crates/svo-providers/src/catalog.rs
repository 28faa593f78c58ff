//! Offline knowledge gateway over an in-memory catalog.
//!
//! Answers the same questions as the SPARQL endpoint from a JSON document,
//! so phrases can be matched without network access:
//!
//! ```json
//! {
//!   "classes": {"air": ["Matter"]},
//!   "variables": [
//!     {"id": "air%7Etemperature", "label": "air~temperature", "sub_labels": ["air", "temperature"]}
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;
use svo_core::{CatalogVariable, KnowledgeGateway, Result};

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    classes: HashMap<String, Vec<String>>,
    #[serde(default)]
    variables: Vec<VariableRecord>,
}

#[derive(Deserialize)]
struct VariableRecord {
    id: String,
    label: String,
    #[serde(default)]
    sub_labels: Vec<String>,
}

/// In-memory ontology classes and catalog variables with exact label matching.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    /// Classes keyed by entity label
    classes: HashMap<String, Vec<String>>,
    /// Variables with their sub-labels, in catalog order
    variables: Vec<(CatalogVariable, Vec<String>)>,
    /// Terms looked up so far, for verification
    lookups: Arc<Mutex<Vec<String>>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the classes of entities labelled `label`.
    #[must_use]
    pub fn with_classes<T: Into<String>>(mut self, label: T, classes: &[&str]) -> Self {
        let entry = self.classes.entry(label.into()).or_default();
        for class in classes {
            if !entry.iter().any(|existing| existing == class) {
                entry.push((*class).to_owned());
            }
        }
        self
    }

    /// Add a variable matched by each of `sub_labels`.
    #[must_use]
    pub fn with_variable<T: Into<String>, U: Into<String>>(
        mut self,
        id: T,
        label: U,
        sub_labels: &[&str],
    ) -> Self {
        self.variables.push((
            CatalogVariable::new(id, label),
            sub_labels.iter().map(|&sub_label| sub_label.to_owned()).collect(),
        ));
        self
    }

    /// Parses a catalog document.
    ///
    /// # Errors
    /// Returns a JSON error for malformed documents
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(contents)?;
        Ok(Self {
            classes: file.classes,
            variables: file
                .variables
                .into_iter()
                .map(|record| (CatalogVariable::new(record.id, record.label), record.sub_labels))
                .collect(),
            lookups: Arc::default(),
        })
    }

    /// Loads a catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let catalog = Self::from_json_str(&fs::read_to_string(path)?)?;
        tracing::info!(
            "Loaded catalog with {} labelled entities and {} variables from {:?}",
            catalog.classes.len(),
            catalog.variables.len(),
            path
        );
        Ok(catalog)
    }

    /// Terms passed to `variables_of` so far, in call order.
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl KnowledgeGateway for InMemoryCatalog {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn classes_of(&self, term: &str) -> Result<Vec<String>> {
        Ok(self.classes.get(term).cloned().unwrap_or_default())
    }

    async fn variables_of(&self, term: &str) -> Result<Vec<CatalogVariable>> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(term.to_owned());

        let mut found: Vec<CatalogVariable> = Vec::new();
        for (variable, sub_labels) in &self.variables {
            let matches = sub_labels.iter().any(|sub_label| sub_label == term);
            if matches && !found.iter().any(|existing| existing.id == variable.id) {
                found.push(variable.clone());
            }
        }
        Ok(found)
    }
}
