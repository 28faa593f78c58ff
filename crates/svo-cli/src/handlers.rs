//! Command handlers for CLI operations

use std::io;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use svo_core::{KnowledgeGateway, LexicalGateway, MatchConfig};
use svo_ontology::Taxonomy;
use svo_providers::{InMemoryCatalog, JsonLexicon, SparqlGateway};
use svo_search::PhraseMatcher;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use crate::cli::Cli;
use crate::output;

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "svo_ontology=warn,svo_search=info,svo_providers=info";
/// Log filter used with `--verbose` when `RUST_LOG` is not set
const VERBOSE_FILTER: &str = "svo_ontology=debug,svo_search=debug,svo_providers=debug";

/// Install the stderr log subscriber
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .init();
}

/// Load the configuration and apply command-line overrides
///
/// # Errors
/// Returns an error if the configuration cannot be read or is invalid
pub fn load_config(cli: &Cli) -> Result<MatchConfig> {
    let mut config = MatchConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(lexicon) = &cli.lexicon {
        config.lexicon.path.clone_from(lexicon);
    }
    if let Some(taxonomy) = &cli.taxonomy {
        config.taxonomy.path = Some(taxonomy.clone());
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog.path = Some(catalog.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Build the lexicon, taxonomy and knowledge gateway described by `config`
///
/// # Errors
/// Returns an error if a data file cannot be loaded or the taxonomy cannot be built
pub fn build_matcher(config: &MatchConfig) -> Result<PhraseMatcher> {
    let lexicon: Arc<dyn LexicalGateway> = Arc::new(
        JsonLexicon::load(&config.lexicon.path).with_context(|| {
            format!("Failed to load lexicon {}", config.lexicon.path.display())
        })?,
    );

    let taxonomy = Taxonomy::load_or_reference(config.taxonomy.path.as_deref())
        .context("Failed to load taxonomy")?;
    let built = taxonomy.build(lexicon, config.taxonomy.resolution)?;

    let gateway: Arc<dyn KnowledgeGateway> = match &config.catalog.path {
        Some(path) => Arc::new(
            InMemoryCatalog::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        ),
        None => Arc::new(SparqlGateway::from_config(&config.knowledge_base)?),
    };
    tracing::debug!("Matching with the {} knowledge gateway", gateway.name());

    Ok(PhraseMatcher::new(Arc::new(built.categorizer), gateway, config))
}

/// Handle `svo classify`
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn handle_classify(matcher: &PhraseMatcher, term: &str, json: bool) -> Result<String> {
    let rows = matcher.classify(term);
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    Ok(output::classification_report(term, &rows))
}

/// Handle `svo is`
///
/// # Errors
/// Returns an error if the category does not exist
pub fn handle_is(
    matcher: &PhraseMatcher,
    term: &str,
    category: &str,
    json: bool,
) -> Result<String> {
    let rows = matcher.categorizer().classify_term_for(term, category)?;
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    Ok(output::membership_report(term, category, &rows))
}

/// Handle `svo search`
///
/// # Errors
/// Returns an error if the phrase is invalid or the knowledge base fails
pub async fn handle_search(matcher: &PhraseMatcher, phrase: &str) -> Result<String> {
    matcher.validate_phrase(phrase)?;
    let nodes = matcher.search(phrase).await?;
    Ok(serde_json::to_string_pretty(&nodes)?)
}

/// Handle `svo rank`
///
/// # Errors
/// Returns an error if the phrase is invalid or the knowledge base fails
pub async fn handle_rank(
    matcher: &PhraseMatcher,
    phrase: &str,
    max_results: Option<usize>,
) -> Result<String> {
    let ranked = matcher.rank(phrase, max_results).await?;
    Ok(serde_json::to_string_pretty(&ranked)?)
}

/// Handle `svo categories`
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn handle_categories(matcher: &PhraseMatcher, definitions: bool, json: bool) -> Result<String> {
    let summaries = output::category_summaries(matcher.categorizer(), definitions);
    if json {
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }
    Ok(output::categories_report(matcher.categorizer().name(), &summaries))
}
