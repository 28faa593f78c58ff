use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use svo_core::{CatalogVariable, Error, KnowledgeBaseConfig, KnowledgeGateway, Result};

/// Media type of SPARQL JSON results.
const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
/// Characters with special meaning in a SPARQL regular expression.
const REGEX_METACHARACTERS: &[char] = &[
    '\\', '.', '^', '$', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// Knowledge gateway backed by a SPARQL endpoint serving the SVO ontology.
pub struct SparqlGateway {
    /// HTTP client for endpoint requests.
    client: Client,
    /// SPARQL endpoint URL.
    endpoint: String,
}

impl SparqlGateway {
    /// Creates a gateway for `endpoint` with the client's default timeouts.
    pub fn new<T: Into<String>>(endpoint: T) -> Self {
        Self {
            client: Client::default(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a gateway from configuration, bounding each request by its timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &KnowledgeBaseConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn select(&self, query: &str) -> Result<SparqlResults> {
        let start = Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .query(&[("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(Error::Gateway(format!(
                "SPARQL endpoint error {status}: {error_text}"
            )));
        }

        let body = response.text().await?;
        tracing::debug!(
            "SPARQL query answered in {}ms ({} bytes)",
            start.elapsed().as_millis(),
            body.len()
        );
        parse_results(&body)
    }
}

#[async_trait]
impl KnowledgeGateway for SparqlGateway {
    fn name(&self) -> &'static str {
        "sparql"
    }

    async fn classes_of(&self, term: &str) -> Result<Vec<String>> {
        let results = self.select(&class_query(term)).await?;
        parse_classes(&results)
    }

    async fn variables_of(&self, term: &str) -> Result<Vec<CatalogVariable>> {
        let results = self.select(&variable_query(term)).await?;
        parse_variables(&results)
    }
}

/// SPARQL JSON results document.
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    /// Result set.
    results: SparqlResults,
}

/// Result set of a SELECT query.
#[derive(Debug, Default, Deserialize)]
struct SparqlResults {
    /// One map per solution, keyed by variable name.
    #[serde(default)]
    bindings: Vec<HashMap<String, Binding>>,
}

/// A single bound RDF term.
#[derive(Debug, Deserialize)]
struct Binding {
    /// Lexical value of the term.
    value: String,
}

fn parse_results(body: &str) -> Result<SparqlResults> {
    let response: SparqlResponse = serde_json::from_str(body)
        .map_err(|err| Error::Gateway(format!("malformed SPARQL results: {err}")))?;
    Ok(response.results)
}

fn binding<'results>(
    solution: &'results HashMap<String, Binding>,
    variable: &str,
) -> Result<&'results str> {
    solution
        .get(variable)
        .map(|binding| binding.value.as_str())
        .ok_or_else(|| Error::Gateway(format!("SPARQL solution has no '{variable}' binding")))
}

/// The part of an IRI after `#`, or the whole IRI when it has no fragment.
fn fragment(iri: &str) -> &str {
    iri.split_once('#').map_or(iri, |(_, fragment)| fragment)
}

/// Escapes `term` into the body of an anchored regex inside a SPARQL string literal.
fn exact_label_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('^');
    for character in term.chars() {
        if REGEX_METACHARACTERS.contains(&character) {
            // One backslash for the regex, doubled for the string literal.
            pattern.push_str("\\\\");
            pattern.push(character);
        } else if character == '"' {
            pattern.push_str("\\\"");
        } else if character == '\n' {
            pattern.push_str("\\n");
        } else {
            pattern.push(character);
        }
    }
    pattern.push('$');
    pattern
}

fn class_query(term: &str) -> String {
    format!(
        r#"PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT ?entity ?class
WHERE {{ ?entity a ?class .
       ?entity rdfs:label ?label .
       FILTER regex(?label, "{}") . }}"#,
        exact_label_pattern(term)
    )
}

fn variable_query(term: &str) -> String {
    format!(
        r#"PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX svu: <http://www.geoscienceontology.org/svo/svu#>

SELECT ?variable ?label ?varlabel
WHERE {{ ?variable a svu:Variable .
       ?variable rdfs:label ?varlabel .
       ?variable svu:subLabel ?label .
       FILTER regex(?label, "{}") . }}"#,
        exact_label_pattern(term)
    )
}

/// Class fragments in first-seen order, without duplicates.
fn parse_classes(results: &SparqlResults) -> Result<Vec<String>> {
    let mut classes: Vec<String> = Vec::new();
    for solution in &results.bindings {
        let class = fragment(binding(solution, "class")?);
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_owned());
        }
    }
    Ok(classes)
}

/// Variables in first-seen order, deduplicated by id.
fn parse_variables(results: &SparqlResults) -> Result<Vec<CatalogVariable>> {
    let mut variables: Vec<CatalogVariable> = Vec::new();
    for solution in &results.bindings {
        let id = fragment(binding(solution, "variable")?);
        let label = binding(solution, "varlabel")?;
        if !variables.iter().any(|variable| variable.id == id) {
            variables.push(CatalogVariable::new(id, label));
        }
    }
    Ok(variables)
}
