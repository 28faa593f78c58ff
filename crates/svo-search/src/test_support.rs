use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use svo_core::{
    CatalogVariable, Error, KnowledgeGateway, LexicalGateway, ResolutionMode, Result,
};
use svo_ontology::{Categorizer, Taxonomy};
use svo_providers::{InMemoryCatalog, JsonLexicon};
use tokio::time::sleep;

const LEXICON: &str = r#"{
    "senses": [
        {"id": "state.n.02", "lemmas": ["state"], "pos": "n", "definition": "the way something is with respect to its main attributes"},
        {"id": "condition.n.01", "lemmas": ["condition"], "pos": "n", "definition": "a mode of being", "hypernyms": ["state.n.02"]},
        {"id": "drought.n.01", "lemmas": ["drought"], "pos": "n", "definition": "a shortage of rainfall", "hypernyms": ["condition.n.01"]},
        {"id": "drought.n.02", "lemmas": ["drought"], "pos": "n", "definition": "a prolonged period without rainfall"},
        {"id": "humidity.n.01", "lemmas": ["humidity"], "pos": "n", "definition": "wetness in the air", "hypernyms": ["condition.n.01"]},
        {"id": "humidity.n.02", "lemmas": ["humidity"], "pos": "n", "definition": "the degree of wetness of air", "hypernyms": ["state.n.02"]},
        {"id": "loop.n.01", "lemmas": ["loop"], "pos": "n", "definition": "the loop", "hypernyms": ["condition.n.01"]},
        {"id": "shortage.n.01", "lemmas": ["shortage"], "pos": "n", "definition": "an insufficient amount"},
        {"id": "rainfall.n.01", "lemmas": ["rainfall"], "pos": "n", "definition": "water falling in drops"},
        {"id": "air.n.01", "lemmas": ["air"], "pos": "n", "definition": "a mixture of gases"},
        {"id": "temperature.n.01", "lemmas": ["temperature"], "pos": "n", "definition": "the degree of hotness"},
        {"id": "wetness.n.01", "lemmas": ["wetness"], "pos": "n", "definition": "the condition of containing liquid"}
    ]
}"#;

const TAXONOMY: &str = r#"
name = "search-test"

[[categories]]
name = "state"
senses = { condition = [0], state = [0] }

[[categories]]
name = "process"
"#;

pub fn lexicon() -> Arc<dyn LexicalGateway> {
    Arc::new(JsonLexicon::from_json_str(LEXICON).unwrap())
}

pub fn categorizer() -> Arc<Categorizer> {
    let built = Taxonomy::from_toml_str(TAXONOMY)
        .unwrap()
        .build(lexicon(), ResolutionMode::Strict)
        .unwrap();
    Arc::new(built.categorizer)
}

pub fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_classes("air", &["Matter"])
        .with_classes("rainfall", &["Phenomenon"])
        .with_variable(
            "air%7Etemperature",
            "air~temperature",
            &["air", "temperature"],
        )
        .with_variable("air%7Epressure", "air~pressure", &["air"])
        .with_variable(
            "atmosphere_water%7Erainfall_volume_flux",
            "atmosphere_water~rainfall_volume_flux",
            &["rainfall", "water"],
        )
        .with_variable(
            "soil_water%7Eshortage_of_rainfall_duration",
            "soil_water~shortage_of_rainfall_duration",
            &["shortage", "rainfall"],
        )
}

/// Fails the first `failures` class lookups with `error`, then delegates.
pub struct FlakyGateway {
    inner: InMemoryCatalog,
    failures: usize,
    calls: AtomicUsize,
    retryable: bool,
}

impl FlakyGateway {
    pub fn new(inner: InMemoryCatalog, failures: usize, retryable: bool) -> Self {
        Self {
            inner,
            failures,
            calls: AtomicUsize::new(0),
            retryable,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeGateway for FlakyGateway {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn classes_of(&self, term: &str) -> Result<Vec<String>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(if self.retryable {
                Error::Gateway("connection reset by peer".to_owned())
            } else {
                Error::InvalidInput(term.to_owned())
            });
        }
        self.inner.classes_of(term).await
    }

    async fn variables_of(&self, term: &str) -> Result<Vec<CatalogVariable>> {
        self.inner.variables_of(term).await
    }
}

/// Sleeps for `delay` before every class lookup, then delegates.
pub struct SlowGateway {
    inner: InMemoryCatalog,
    delay: Duration,
    calls: AtomicUsize,
}

impl SlowGateway {
    pub fn new(inner: InMemoryCatalog, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeGateway for SlowGateway {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn classes_of(&self, term: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.delay).await;
        self.inner.classes_of(term).await
    }

    async fn variables_of(&self, term: &str) -> Result<Vec<CatalogVariable>> {
        self.inner.variables_of(term).await
    }
}
