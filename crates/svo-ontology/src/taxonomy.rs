//! Taxonomy definitions: the built-in SVO taxonomy and TOML taxonomy files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use svo_core::{LexicalGateway, ResolutionMode, Result};

use crate::categorizer::Categorizer;
use crate::category::{Category, SenseSpec, UnresolvedSense};

/// Declaration of one category: its name and reference senses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDefinition {
    /// Category name
    pub name: String,
    /// Reference senses as `(term, indices)` entries
    pub senses: SenseSpec,
}

/// Ordered category declarations of a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    /// Taxonomy name
    pub name: String,
    /// Category declarations in evaluation order
    pub categories: Vec<CategoryDefinition>,
}

/// A categorizer built from a taxonomy plus the senses it had to drop.
pub struct BuiltTaxonomy {
    /// The constructed categorizer
    pub categorizer: Categorizer,
    /// Reference senses the lexical database could not resolve
    pub unresolved: Vec<UnresolvedSense>,
}

#[derive(Deserialize)]
struct TaxonomyFile {
    #[serde(default = "anonymous")]
    name: String,
    #[serde(default)]
    categories: Vec<CategoryEntry>,
}

#[derive(Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    senses: Value,
}

fn anonymous() -> String {
    "Anonymous".to_owned()
}

fn definition(name: &str, senses: Vec<(&str, Vec<usize>)>) -> CategoryDefinition {
    CategoryDefinition {
        name: name.to_owned(),
        senses: SenseSpec::new(senses),
    }
}

impl Taxonomy {
    /// The Scientific Variables Ontology taxonomy, keyed to WordNet sense indexes.
    pub fn reference() -> Self {
        Self {
            name: "svo".to_owned(),
            categories: vec![
                definition(
                    "process",
                    vec![
                        ("process", vec![1, 5]),
                        ("act", vec![1, 5, 6]),
                        ("action", vec![0, 1, 3, 4]),
                        ("event", vec![0]),
                    ],
                ),
                definition("property", vec![("property", vec![1, 3]), ("attribute", vec![0, 1])]),
                definition(
                    "quantity",
                    vec![
                        ("quantity", vec![0, 2]),
                        ("amount", vec![0, 2]),
                        ("ratio", vec![0]),
                        ("quantitative_relation", vec![0]),
                        ("distance", vec![0]),
                    ],
                ),
                definition(
                    "phenomenon",
                    vec![
                        ("object", vec![0, 2, 3, 4]),
                        ("system", vec![1, 4, 5]),
                        ("phenomenon", vec![0]),
                        ("body", vec![0, 3, 8]),
                        ("matter", vec![2]),
                        ("form", vec![2, 3, 5, 6]),
                        ("biological_group", vec![0]),
                        ("body_of_water", vec![0]),
                        ("part", vec![2]),
                    ],
                ),
                definition("state", vec![("condition", vec![0, 1, 2]), ("state", vec![1, 4])]),
                definition("attribute", Vec::new()),
            ],
        }
    }

    /// Parses a taxonomy from TOML.
    ///
    /// ```toml
    /// name = "svo"
    ///
    /// [[categories]]
    /// name = "state"
    /// senses = { condition = [0, 1, 2], state = [1, 4] }
    ///
    /// [[categories]]
    /// name = "process"
    /// senses = [["event", [0]], ["act", [1, 5, 6]]]
    /// ```
    ///
    /// # Errors
    /// Returns a TOML error for invalid syntax and `InvalidConfiguration` for
    /// senses that are neither a mapping nor a list of `[term, [indices]]`
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(contents)?;
        let categories = file
            .categories
            .iter()
            .map(|entry| {
                Ok(CategoryDefinition {
                    name: entry.name.clone(),
                    senses: SenseSpec::from_value(&entry.senses)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: file.name,
            categories,
        })
    }

    /// Loads a taxonomy TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let taxonomy = Self::from_toml_str(&fs::read_to_string(path)?)?;
        tracing::info!(
            "Loaded taxonomy '{}' with {} categories from {:?}",
            taxonomy.name,
            taxonomy.categories.len(),
            path
        );
        Ok(taxonomy)
    }

    /// Loads the taxonomy at `path`, or the reference taxonomy when `path` is `None`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_or_reference(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::reference()), Self::load)
    }

    /// Resolves every category against `lexicon` and assembles a categorizer.
    ///
    /// # Errors
    /// Returns `UnresolvedSense` in strict mode and `InvalidConfiguration`
    /// when two categories share a name
    pub fn build(
        &self,
        lexicon: Arc<dyn LexicalGateway>,
        mode: ResolutionMode,
    ) -> Result<BuiltTaxonomy> {
        let mut categorizer = Categorizer::new(self.name.clone(), Arc::clone(&lexicon));
        let mut unresolved = Vec::new();

        for definition in &self.categories {
            let resolved = Category::from_spec(
                definition.name.clone(),
                &definition.senses,
                lexicon.as_ref(),
                mode,
            )?;
            unresolved.extend(resolved.unresolved);
            categorizer.add_category(resolved.category)?;
        }

        if !unresolved.is_empty() {
            tracing::warn!(
                "Taxonomy '{}' dropped {} unresolvable reference senses",
                self.name,
                unresolved.len()
            );
        }

        Ok(BuiltTaxonomy {
            categorizer,
            unresolved,
        })
    }
}
