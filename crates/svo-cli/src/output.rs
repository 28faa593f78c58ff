//! Text rendering of command results

use core::fmt::Write as _;

use serde::Serialize;
use svo_ontology::{Categorizer, ClassificationResult};

/// One category as listed by `svo categories`
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    /// Category name
    pub name: String,
    /// Reference senses as `<term>.<index>`
    pub senses: Vec<String>,
    /// `(term, definition)` of each reference sense, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Vec<(String, String)>>,
}

/// Collect the categories of `categorizer` in registration order
pub fn category_summaries(categorizer: &Categorizer, definitions: bool) -> Vec<CategorySummary> {
    categorizer
        .categories()
        .iter()
        .map(|category| CategorySummary {
            name: category.name().to_owned(),
            senses: category.senses().iter().map(|sense_ref| sense_ref.label()).collect(),
            definitions: definitions
                .then(|| category.definitions(categorizer.lexicon().as_ref())),
        })
        .collect()
}

/// Render every sense of `term` with the categories it belongs to
pub fn classification_report(term: &str, rows: &[ClassificationResult]) -> String {
    if rows.is_empty() {
        return format!("'{term}' is not in the lexicon");
    }

    let mut report = String::from(term);
    for row in rows {
        let categories: Vec<&str> = row.memberships.categories().collect();
        let categories = if categories.is_empty() {
            "none".to_owned()
        } else {
            categories.join(", ")
        };
        let _written = write!(
            report,
            "\n  [{}] {}  {}\n      categories: {}",
            row.sense_index, row.pos, row.definition, categories
        );
    }
    report
}

/// Render the senses of `term` that belong to `category`
pub fn membership_report(term: &str, category: &str, rows: &[ClassificationResult]) -> String {
    let members: Vec<&ClassificationResult> = rows.iter().filter(|row| row.is(category)).collect();
    if members.is_empty() {
        return format!("'{term}' has no sense in category '{category}'");
    }

    let mut report = format!("'{term}' is a {category}:");
    for row in members {
        let _written = write!(
            report,
            "\n  [{}] {}  {}",
            row.sense_index, row.pos, row.definition
        );
    }
    report
}

/// Render the category listing
pub fn categories_report(taxonomy: &str, summaries: &[CategorySummary]) -> String {
    let mut report = format!("Taxonomy '{taxonomy}'");
    for summary in summaries {
        let _name_written = write!(report, "\n  {}", summary.name);
        if !summary.senses.is_empty() {
            let _senses_written = write!(report, " ({})", summary.senses.join(", "));
        }
        for (term, definition) in summary.definitions.iter().flatten() {
            let _definition_written = write!(report, "\n      {term}: {definition}");
        }
    }
    report
}
