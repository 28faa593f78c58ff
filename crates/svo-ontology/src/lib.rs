//! Ontological categorization of word senses.
//!
//! A [`Category`] owns a set of reference senses; a sense belongs to the
//! category when its generalization chain touches one of them (or, for the
//! verb- and adjective-triggered categories, when the chain contains a sense
//! of that part of speech). A [`Categorizer`] holds the ordered categories of
//! a taxonomy and answers per-sense and per-term questions against a
//! lexical database.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Test allows"
    )
)]

pub mod categorizer;
pub mod category;
pub mod classification;
pub mod taxonomy;

pub use categorizer::Categorizer;
pub use category::{Category, ResolvedCategory, SenseRef, SenseSpec, UnresolvedSense};
pub use classification::{ClassificationResult, Memberships};
pub use taxonomy::{BuiltTaxonomy, CategoryDefinition, Taxonomy};

#[cfg(test)]
mod test_support;
