//! Gateway adapters for lexical databases and knowledge bases.
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

/// Offline variable catalog.
pub mod catalog;
/// JSON-backed lexical database.
pub mod lexicon;
/// SPARQL knowledge base client.
pub mod sparql;
/// Heuristic part-of-speech tagger.
pub mod tagger;

pub use catalog::InMemoryCatalog;
pub use lexicon::JsonLexicon;
pub use sparql::SparqlGateway;
pub use tagger::HeuristicTagger;
