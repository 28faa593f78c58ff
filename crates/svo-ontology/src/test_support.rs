//! In-memory lexicon for unit tests.

use std::collections::HashMap;
use svo_core::{LexicalGateway, PartOfSpeech, Sense, TaggedToken};

#[derive(Default)]
pub struct FixtureLexicon {
    senses: HashMap<String, Vec<Sense>>,
    parents: HashMap<String, Vec<Sense>>,
    definitions: HashMap<String, String>,
    by_name: HashMap<String, Sense>,
}

impl FixtureLexicon {
    /// Appends a sense of `term`; `parents` name senses registered earlier.
    pub fn with_sense(
        mut self,
        term: &str,
        name: &str,
        pos: PartOfSpeech,
        definition: &str,
        parents: &[&str],
    ) -> Self {
        let sense = self
            .by_name
            .get(name)
            .cloned()
            .unwrap_or_else(|| Sense::new(name, pos));
        let parent_senses = parents
            .iter()
            .map(|parent| {
                self.by_name
                    .get(*parent)
                    .cloned()
                    .unwrap_or_else(|| Sense::new(*parent, PartOfSpeech::Noun))
            })
            .collect();

        self.senses.entry(term.to_owned()).or_default().push(sense.clone());
        self.parents.insert(name.to_owned(), parent_senses);
        self.definitions.insert(name.to_owned(), definition.to_owned());
        self.by_name.insert(name.to_owned(), sense);
        self
    }
}

impl LexicalGateway for FixtureLexicon {
    fn senses_of(&self, term: &str) -> Vec<Sense> {
        self.senses.get(term).cloned().unwrap_or_default()
    }

    fn hypernyms_of(&self, sense: &Sense) -> Vec<Sense> {
        self.parents.get(sense.name()).cloned().unwrap_or_default()
    }

    fn definition_of(&self, sense: &Sense) -> Option<String> {
        self.definitions.get(sense.name()).cloned()
    }

    fn tokenize_and_tag(&self, text: &str) -> Vec<TaggedToken> {
        text.split_whitespace()
            .map(|word| TaggedToken::new(word, "NN"))
            .collect()
    }
}
