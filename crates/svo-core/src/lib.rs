//! Core types and traits for SVO phrase matching.
//!
//! This crate provides the error type, the lexical and knowledge-base gateway
//! traits, the phrase-search tree types, and configuration shared by the
//! ontology, search, and provider crates.

/// Matching configuration loaded from TOML.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Gateway traits for the lexical database and the knowledge base.
pub mod traits;
/// Core data types for senses, search trees, and ranked matches.
pub mod types;

pub use config::{
    CatalogConfig, FactorMode, KnowledgeBaseConfig, LexiconConfig, MatchConfig, RankingConfig,
    ResolutionMode, SearchConfig, TaxonomyConfig,
};
pub use error::{Error, Result};
pub use traits::{KnowledgeGateway, LexicalGateway};
pub use types::{
    CatalogVariable, GeneralizationChain, HypernymTree, PartOfSpeech, Sense, TaggedToken,
    TermNode, VariableMatch,
};
