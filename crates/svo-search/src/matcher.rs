//! Entry points for classifying terms and ranking phrases.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use svo_core::{Error, KnowledgeGateway, MatchConfig, Result, TermNode, VariableMatch};
use svo_ontology::{Categorizer, ClassificationResult};
use tokio::time::timeout;

use crate::phrase::PhraseSearchEngine;
use crate::ranking::RankingEngine;

/// Ranked variables of one phrase, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPhrase {
    /// Variables, highest score first
    pub results: Vec<VariableMatch>,
}

/// Classifies terms and matches phrases against the variable catalog.
///
/// Owns no per-request state; one matcher serves any number of concurrent calls.
pub struct PhraseMatcher {
    categorizer: Arc<Categorizer>,
    search: PhraseSearchEngine,
    ranking: RankingEngine,
    attempts: usize,
    phrase_timeout: Option<Duration>,
}

impl PhraseMatcher {
    /// Creates a matcher from a built categorizer, a knowledge gateway and configuration.
    pub fn new(
        categorizer: Arc<Categorizer>,
        gateway: Arc<dyn KnowledgeGateway>,
        config: &MatchConfig,
    ) -> Self {
        Self {
            search: PhraseSearchEngine::new(
                Arc::clone(&categorizer),
                gateway,
                config.search.separator,
            ),
            categorizer,
            ranking: RankingEngine::new(config.ranking.clone()),
            attempts: config.knowledge_base.attempts.max(1),
            phrase_timeout: config.search.phrase_timeout_seconds.map(Duration::from_secs),
        }
    }

    /// Replaces the per-attempt search timeout; `None` disables it.
    #[must_use]
    pub fn with_phrase_timeout(mut self, phrase_timeout: Option<Duration>) -> Self {
        self.phrase_timeout = phrase_timeout;
        self
    }

    /// The categorizer used for classification and expansion.
    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Classifies every sense of `term` against every category.
    pub fn classify(&self, term: &str) -> Vec<ClassificationResult> {
        self.categorizer.classify_term(term)
    }

    /// Accepts phrases made only of ASCII letters and the separator.
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the phrase otherwise
    pub fn validate_phrase(&self, phrase: &str) -> Result<()> {
        let separator = self.search.separator();
        if phrase
            .chars()
            .all(|character| character.is_ascii_alphabetic() || character == separator)
        {
            Ok(())
        } else {
            Err(Error::InvalidInput(format!(
                "'{phrase}' may only contain letters and '{separator}'"
            )))
        }
    }

    /// Searches `phrase`, retrying transient knowledge-base failures.
    ///
    /// Each attempt is bounded by the phrase timeout when one is configured.
    ///
    /// # Errors
    /// Returns the last error once attempts are exhausted, or the first
    /// error that is not retryable
    pub async fn search(&self, phrase: &str) -> Result<Vec<TermNode>> {
        for attempt in 1..=self.attempts {
            match self.search_once(phrase).await {
                Ok(nodes) => {
                    if attempt > 1 {
                        tracing::info!("Search for '{}' succeeded on attempt {}", phrase, attempt);
                    }
                    return Ok(nodes);
                }
                Err(err) if err.is_retryable() && attempt < self.attempts => {
                    tracing::warn!(
                        "Search for '{}' failed (attempt {}/{}): {}. Retrying.",
                        phrase,
                        attempt,
                        self.attempts,
                        err
                    );
                }
                Err(err) => {
                    tracing::error!("Search for '{}' failed: {}", phrase, err);
                    return Err(err);
                }
            }
        }

        Err(Error::Other(format!(
            "Search for '{phrase}' failed after {} attempts",
            self.attempts
        )))
    }

    async fn search_once(&self, phrase: &str) -> Result<Vec<TermNode>> {
        match self.phrase_timeout {
            Some(limit) => timeout(limit, self.search.search(phrase, 0))
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => self.search.search(phrase, 0).await,
        }
    }

    /// Validates, searches and ranks `phrase`.
    ///
    /// `max_results` defaults to the configured limit.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a malformed phrase and any search error
    pub async fn rank(&self, phrase: &str, max_results: Option<usize>) -> Result<RankedPhrase> {
        self.validate_phrase(phrase)?;
        let nodes = self.search(phrase).await?;
        let limit = max_results.unwrap_or(self.ranking.config().max_results);
        Ok(RankedPhrase {
            results: self.ranking.rank(&nodes, limit),
        })
    }
}
