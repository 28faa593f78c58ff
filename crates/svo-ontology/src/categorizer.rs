//! Ordered collection of categories evaluated against a lexical database.

use std::sync::Arc;

use svo_core::{Error, LexicalGateway, Result, Sense};

use crate::category::Category;
use crate::classification::{ClassificationResult, Memberships};

/// Classifies senses and terms against an ordered set of categories.
///
/// Built once and read-only afterwards, so one instance can be shared by
/// concurrent requests.
pub struct Categorizer {
    name: String,
    categories: Vec<Category>,
    lexicon: Arc<dyn LexicalGateway>,
}

impl Categorizer {
    /// Creates a categorizer without categories.
    pub fn new<T: Into<String>>(name: T, lexicon: Arc<dyn LexicalGateway>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
            lexicon,
        }
    }

    /// Name of the taxonomy this categorizer implements.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lexical database used for lookups.
    pub fn lexicon(&self) -> &Arc<dyn LexicalGateway> {
        &self.lexicon
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in declaration order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(Category::name).collect()
    }

    /// Appends a category.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if a category with the same name exists
    pub fn add_category(&mut self, category: Category) -> Result<()> {
        if self.categories.iter().any(|existing| existing.name() == category.name()) {
            return Err(Error::InvalidConfiguration(format!(
                "category '{}' is already registered with '{}'",
                category.name(),
                self.name
            )));
        }
        self.categories.push(category);
        Ok(())
    }

    /// Removes a category by name.
    ///
    /// # Errors
    /// Returns `NotFound` if no category has that name
    pub fn remove_category(&mut self, name: &str) -> Result<Category> {
        let position = self
            .categories
            .iter()
            .position(|category| category.name() == name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))?;
        Ok(self.categories.remove(position))
    }

    /// Looks up a category by name.
    ///
    /// # Errors
    /// Returns `NotFound` if no category has that name
    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .iter()
            .find(|category| category.name() == name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    /// Returns the membership labels of `sense`.
    ///
    /// With `category` set only that category is evaluated; otherwise every
    /// category is, and their labels are concatenated in declaration order.
    pub fn categorize(&self, sense: &Sense, category: Option<&Category>) -> Vec<String> {
        let chain = self.lexicon.ancestors_of(sense).flatten();
        match category {
            Some(category) => category.is_member(&chain),
            None => self
                .categories
                .iter()
                .flat_map(|category| category.is_member(&chain))
                .collect(),
        }
    }

    /// True when `sense` belongs to the category named `category`.
    ///
    /// # Errors
    /// Returns `NotFound` if no category has that name
    pub fn is_member_of(&self, sense: &Sense, category: &str) -> Result<bool> {
        let category = self.category(category)?;
        Ok(!self.categorize(sense, Some(category)).is_empty())
    }

    /// Classifies every sense of `term` against every category.
    ///
    /// A term without senses yields no rows.
    pub fn classify_term(&self, term: &str) -> Vec<ClassificationResult> {
        self.classify_against(term, &self.categories.iter().collect::<Vec<_>>())
    }

    /// Classifies every sense of `term` against the category named `category` only.
    ///
    /// # Errors
    /// Returns `NotFound` if no category has that name
    pub fn classify_term_for(
        &self,
        term: &str,
        category: &str,
    ) -> Result<Vec<ClassificationResult>> {
        let category = self.category(category)?;
        Ok(self.classify_against(term, &[category]))
    }

    /// True when at least one sense of `term` belongs to `category`.
    ///
    /// # Errors
    /// Returns `NotFound` if no category has that name, whatever the term
    pub fn term_has_category(&self, term: &str, category: &str) -> Result<bool> {
        Ok(!self.senses_in_category(term, category)?.is_empty())
    }

    /// Indexes of the senses of `term` that belong to `category`.
    ///
    /// # Errors
    /// Returns `NotFound` if no category has that name
    pub fn senses_in_category(&self, term: &str, category: &str) -> Result<Vec<usize>> {
        let category = self.category(category)?;
        Ok(self
            .lexicon
            .senses_of(term)
            .iter()
            .enumerate()
            .filter(|(_, sense)| !self.categorize(sense, Some(category)).is_empty())
            .map(|(index, _)| index)
            .collect())
    }

    fn classify_against(&self, term: &str, categories: &[&Category]) -> Vec<ClassificationResult> {
        self.lexicon
            .senses_of(term)
            .iter()
            .enumerate()
            .map(|(sense_index, sense)| {
                let chain = self.lexicon.ancestors_of(sense).flatten();
                let mut matched = Vec::new();
                let mut memberships = Vec::with_capacity(categories.len());

                for category in categories {
                    let labels = category.is_member(&chain);
                    memberships.push((category.name().to_owned(), !labels.is_empty()));
                    matched.extend(labels);
                }

                ClassificationResult {
                    term: term.to_owned(),
                    sense_index,
                    definition: self.lexicon.definition_of(sense).unwrap_or_default(),
                    pos: self.lexicon.part_of_speech_of(sense),
                    memberships: Memberships::new(memberships),
                    matched,
                }
            })
            .collect()
    }
}
