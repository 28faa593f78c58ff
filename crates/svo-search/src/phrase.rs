//! Recursive decomposition of phrases into knowledge-base lookups.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::try_join;
use svo_core::{KnowledgeGateway, Result, TaggedToken, TermNode};
use svo_ontology::Categorizer;

type BoxFuture<'search, T> = Pin<Box<dyn Future<Output = T> + Send + 'search>>;

/// Depth at which state terms stop being expanded.
pub const MAX_DEPTH: usize = 2;

/// Category whose senses are expanded through their definitions.
const STATE_CATEGORY: &str = "state";

/// Searches phrases term by term and expands state terms through their definitions.
pub struct PhraseSearchEngine {
    categorizer: Arc<Categorizer>,
    gateway: Arc<dyn KnowledgeGateway>,
    separator: char,
}

impl PhraseSearchEngine {
    /// Creates an engine splitting phrases on `separator`.
    pub fn new(
        categorizer: Arc<Categorizer>,
        gateway: Arc<dyn KnowledgeGateway>,
        separator: char,
    ) -> Self {
        Self {
            categorizer,
            gateway,
            separator,
        }
    }

    /// Word separator of phrases.
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// The knowledge gateway queried for every term.
    pub fn gateway(&self) -> &Arc<dyn KnowledgeGateway> {
        &self.gateway
    }

    /// Searches every term of `phrase`, in order.
    ///
    /// Each term yields a [`TermNode::Match`]. Below [`MAX_DEPTH`], a term with
    /// senses in the `state` category is followed by a [`TermNode::Expansion`]
    /// holding one nested search per state sense, run on the nouns of that
    /// sense's definition. An empty phrase yields no nodes; empty segments
    /// inside a phrase are searched like any other term.
    ///
    /// # Errors
    /// Returns the first knowledge-base error; no partial result is kept
    pub fn search<'search>(
        &'search self,
        phrase: &'search str,
        depth: usize,
    ) -> BoxFuture<'search, Result<Vec<TermNode>>> {
        Box::pin(async move {
            let mut nodes = Vec::new();
            if phrase.is_empty() {
                return Ok(nodes);
            }

            for term in phrase.split(self.separator) {
                let (classes, variables) = try_join!(
                    self.gateway.classes_of(term),
                    self.gateway.variables_of(term)
                )?;
                tracing::debug!(
                    "'{}' at depth {}: {} classes, {} variables from {}",
                    term,
                    depth,
                    classes.len(),
                    variables.len(),
                    self.gateway.name()
                );
                nodes.push(TermNode::Match {
                    term: term.to_owned(),
                    classes,
                    variables,
                });

                if depth < MAX_DEPTH
                    && let Some(expansion) = self.expand(term, depth).await?
                {
                    nodes.push(expansion);
                }
            }

            Ok(nodes)
        })
    }

    /// Searches the definition nouns of every state sense of `term`.
    async fn expand(&self, term: &str, depth: usize) -> Result<Option<TermNode>> {
        if self.categorizer.category(STATE_CATEGORY).is_err() {
            return Ok(None);
        }
        let state_senses = self.categorizer.senses_in_category(term, STATE_CATEGORY)?;
        if state_senses.is_empty() {
            return Ok(None);
        }

        let lexicon = self.categorizer.lexicon();
        let senses = lexicon.senses_of(term);
        let mut expansions = Vec::with_capacity(state_senses.len());

        for index in state_senses {
            let definition = senses
                .get(index)
                .and_then(|sense| lexicon.definition_of(sense))
                .unwrap_or_default();
            let sub_phrase = self.definition_phrase(&definition);
            tracing::debug!(
                "Expanding state sense {} of '{}' into '{}'",
                index,
                term,
                sub_phrase
            );
            expansions.push(self.search(&sub_phrase, depth + 1).await?);
        }

        Ok(Some(TermNode::Expansion {
            term: term.to_owned(),
            expansions,
        }))
    }

    /// Joins the nouns of `definition` with the separator.
    pub fn definition_phrase(&self, definition: &str) -> String {
        let separator = self.separator.to_string();
        self.categorizer
            .lexicon()
            .tokenize_and_tag(definition)
            .into_iter()
            .filter(TaggedToken::is_noun)
            .map(|token| token.token)
            .collect::<Vec<_>>()
            .join(&separator)
    }
}
