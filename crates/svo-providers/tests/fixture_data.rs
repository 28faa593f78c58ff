//! Provider tests against the shared fixture files
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use std::path::PathBuf;

use svo_core::{KnowledgeGateway as _, LexicalGateway as _, TaggedToken};
use svo_providers::{InMemoryCatalog, JsonLexicon};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name)
}

#[test]
fn test_fixture_lexicon_chains() {
    let lexicon = JsonLexicon::load(&fixture("lexicon.json")).unwrap();
    let air = &lexicon.senses_of("air")[0];
    let chain: Vec<String> = lexicon
        .ancestors_of(air)
        .flatten()
        .iter()
        .map(|sense| sense.name().to_owned())
        .collect();

    assert_eq!(
        chain,
        vec![
            "air.n.01",
            "gas.n.02",
            "fluid.n.02",
            "matter.n.03",
            "physical_entity.n.01",
            "entity.n.01"
        ]
    );
}

#[test]
fn test_fixture_definition_nouns() {
    let lexicon = JsonLexicon::load(&fixture("lexicon.json")).unwrap();
    let drought = &lexicon.senses_of("drought")[0];
    let definition = lexicon.definition_of(drought).unwrap();

    let nouns: Vec<String> = lexicon
        .tokenize_and_tag(&definition)
        .into_iter()
        .filter(TaggedToken::is_noun)
        .map(|token| token.token)
        .collect();
    assert_eq!(nouns, vec!["shortage", "rainfall"]);
}

#[tokio::test]
async fn test_fixture_catalog() {
    let catalog = InMemoryCatalog::load(&fixture("catalog.json")).unwrap();

    assert_eq!(catalog.classes_of("wind").await.unwrap(), vec!["Phenomenon"]);
    let labels: Vec<String> = catalog
        .variables_of("temperature")
        .await
        .unwrap()
        .into_iter()
        .map(|variable| variable.label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "air~temperature",
            "land_surface_air~temperature",
            "river_water~temperature"
        ]
    );
}
