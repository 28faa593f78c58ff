//! Shared setup for the SVO criterion benchmarks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use svo_core::{KnowledgeGateway, LexicalGateway, MatchConfig, ResolutionMode};
use svo_ontology::{Categorizer, Taxonomy};
use svo_providers::{InMemoryCatalog, JsonLexicon};
use svo_search::PhraseMatcher;

/// Path of a file under the workspace `fixtures/` directory.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(name)
}

/// Reference taxonomy resolved against the fixture lexicon.
///
/// # Panics
/// Panics if the fixture lexicon cannot be loaded (benchmarks expect setup to succeed)
pub fn reference_categorizer() -> Arc<Categorizer> {
    let lexicon: Arc<dyn LexicalGateway> = Arc::new(
        JsonLexicon::load(&fixture("lexicon.json"))
            .unwrap_or_else(|err| panic!("Failed to load lexicon: {err}")),
    );
    let built = Taxonomy::reference()
        .build(lexicon, ResolutionMode::Strict)
        .unwrap_or_else(|err| panic!("Failed to build taxonomy: {err}"));
    Arc::new(built.categorizer)
}

/// Matcher over the reference taxonomy and the fixture catalog.
///
/// # Panics
/// Panics if a fixture cannot be loaded
pub fn fixture_matcher() -> PhraseMatcher {
    let catalog: Arc<dyn KnowledgeGateway> = Arc::new(
        InMemoryCatalog::load(&fixture("catalog.json"))
            .unwrap_or_else(|err| panic!("Failed to load catalog: {err}")),
    );
    PhraseMatcher::new(reference_categorizer(), catalog, &MatchConfig::default())
}
