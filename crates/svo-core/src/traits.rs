use async_trait::async_trait;

use crate::{CatalogVariable, HypernymTree, PartOfSpeech, Result, Sense, TaggedToken};

/// Read access to a lexical database such as WordNet.
///
/// Lookups are local and synchronous. Unknown terms and senses yield empty
/// results rather than errors.
pub trait LexicalGateway: Send + Sync {
    /// Returns the senses of `term`, ordered by sense index.
    fn senses_of(&self, term: &str) -> Vec<Sense>;

    /// Returns the direct hypernyms of `sense`.
    fn hypernyms_of(&self, sense: &Sense) -> Vec<Sense>;

    /// Returns the gloss of `sense`, if the database knows it.
    fn definition_of(&self, sense: &Sense) -> Option<String>;

    /// Splits free text into tokens tagged with Penn Treebank tags.
    fn tokenize_and_tag(&self, text: &str) -> Vec<TaggedToken>;

    /// Returns the part of speech of `sense`.
    fn part_of_speech_of(&self, sense: &Sense) -> PartOfSpeech {
        sense.pos()
    }

    /// Builds the generalization tree of `sense`, rooted at the sense itself.
    ///
    /// Every hypernym path is followed. A sense already on the current path is
    /// not entered again, so cyclic data terminates.
    fn ancestors_of(&self, sense: &Sense) -> HypernymTree {
        let mut path = Vec::new();
        build_tree(self, sense, &mut path)
    }
}

fn build_tree<G: LexicalGateway + ?Sized>(
    gateway: &G,
    sense: &Sense,
    path: &mut Vec<Sense>,
) -> HypernymTree {
    path.push(sense.clone());
    let mut parents = Vec::new();
    for parent in gateway.hypernyms_of(sense) {
        if !path.contains(&parent) {
            parents.push(build_tree(gateway, &parent, path));
        }
    }
    path.pop();

    HypernymTree {
        sense: sense.clone(),
        parents,
    }
}

/// Read access to the remote ontology and variable catalog.
#[async_trait]
pub trait KnowledgeGateway: Send + Sync {
    /// Returns the identifier of this gateway for logs.
    fn name(&self) -> &'static str;

    /// Returns the ontology classes of every entity whose label is exactly `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the knowledge base cannot be reached or answers with
    /// a malformed payload.
    async fn classes_of(&self, term: &str) -> Result<Vec<String>>;

    /// Returns the catalog variables with a sub-label exactly equal to `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the knowledge base cannot be reached or answers with
    /// a malformed payload.
    async fn variables_of(&self, term: &str) -> Result<Vec<CatalogVariable>>;
}
