//! A WordNet-style lexical database loaded from JSON.
//!
//! ```json
//! {
//!   "senses": [
//!     {"id": "drought.n.01", "lemmas": ["drought", "drouth"], "pos": "n",
//!      "definition": "a shortage of rainfall", "hypernyms": ["shortage.n.01"]}
//!   ]
//! }
//! ```
//!
//! A sense's index for a lemma is its position among the senses listing that
//! lemma, in file order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use svo_core::{Error, LexicalGateway, PartOfSpeech, Result, Sense, TaggedToken};

use crate::tagger::HeuristicTagger;

#[derive(Deserialize)]
struct LexiconFile {
    #[serde(default)]
    senses: Vec<SenseRecord>,
}

#[derive(Deserialize)]
struct SenseRecord {
    id: String,
    #[serde(default)]
    lemmas: Vec<String>,
    pos: PartOfSpeech,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    hypernyms: Vec<String>,
}

struct SenseEntry {
    sense: Sense,
    definition: Option<String>,
    hypernyms: Vec<usize>,
}

/// In-memory lexical database with hypernym links and glosses.
pub struct JsonLexicon {
    entries: Vec<SenseEntry>,
    by_id: HashMap<String, usize>,
    by_lemma: HashMap<String, Vec<usize>>,
    tagger: HeuristicTagger,
}

/// Lowercases a term and joins its words with `_`, WordNet's lemma form.
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

impl JsonLexicon {
    /// Parses a lexicon document.
    ///
    /// # Errors
    /// Returns a JSON error for malformed documents and `InvalidConfiguration`
    /// when two senses share an id
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(contents)?;

        let mut by_id = HashMap::with_capacity(file.senses.len());
        for (position, record) in file.senses.iter().enumerate() {
            if by_id.insert(record.id.clone(), position).is_some() {
                return Err(Error::InvalidConfiguration(format!(
                    "sense '{}' is defined more than once",
                    record.id
                )));
            }
        }

        let mut by_lemma: HashMap<String, Vec<usize>> = HashMap::new();
        let mut entries = Vec::with_capacity(file.senses.len());
        for (position, record) in file.senses.into_iter().enumerate() {
            for lemma in &record.lemmas {
                let positions = by_lemma.entry(normalize_term(lemma)).or_default();
                if !positions.contains(&position) {
                    positions.push(position);
                }
            }

            let hypernyms = record
                .hypernyms
                .iter()
                .filter_map(|hypernym| {
                    let found = by_id.get(hypernym).copied();
                    if found.is_none() {
                        tracing::warn!(
                            "Dropping unknown hypernym '{}' of sense '{}'",
                            hypernym,
                            record.id
                        );
                    }
                    found
                })
                .collect();

            entries.push(SenseEntry {
                sense: Sense::new(record.id, record.pos),
                definition: record.definition,
                hypernyms,
            });
        }

        Ok(Self {
            entries,
            by_id,
            by_lemma,
            tagger: HeuristicTagger::new(),
        })
    }

    /// Loads a lexicon file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let lexicon = Self::from_json_str(&fs::read_to_string(path)?)?;
        tracing::info!(
            "Loaded {} senses for {} lemmas from {:?}",
            lexicon.len(),
            lexicon.by_lemma.len(),
            path
        );
        Ok(lexicon)
    }

    /// Number of senses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the lexicon holds no senses.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, sense: &Sense) -> Option<&SenseEntry> {
        self.by_id.get(sense.name()).map(|&position| &self.entries[position])
    }

    fn first_pos(&self, lemma: &str) -> Option<PartOfSpeech> {
        self.by_lemma
            .get(lemma)
            .and_then(|positions| positions.first())
            .map(|&position| self.entries[position].sense.pos())
    }
}

impl LexicalGateway for JsonLexicon {
    fn senses_of(&self, term: &str) -> Vec<Sense> {
        self.by_lemma
            .get(&normalize_term(term))
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| self.entries[position].sense.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn hypernyms_of(&self, sense: &Sense) -> Vec<Sense> {
        self.entry(sense)
            .map(|entry| {
                entry
                    .hypernyms
                    .iter()
                    .map(|&position| self.entries[position].sense.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn definition_of(&self, sense: &Sense) -> Option<String> {
        self.entry(sense).and_then(|entry| entry.definition.clone())
    }

    fn tokenize_and_tag(&self, text: &str) -> Vec<TaggedToken> {
        self.tagger.tag(text, |lemma| self.first_pos(lemma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LEXICON: &str = r#"{
        "senses": [
            {"id": "state.n.02", "lemmas": ["state"], "pos": "n", "definition": "the way something is with respect to its main attributes"},
            {"id": "state.n.01", "lemmas": ["state", "province"], "pos": "n", "definition": "the territory occupied by a nation"},
            {"id": "condition.n.01", "lemmas": ["condition", "status"], "pos": "n", "definition": "a state at a particular time", "hypernyms": ["state.n.02"]},
            {"id": "drought.n.01", "lemmas": ["drought", "drouth"], "pos": "n", "definition": "a shortage of rainfall", "hypernyms": ["condition.n.01", "weather.n.01"]},
            {"id": "rainfall.n.01", "lemmas": ["rainfall"], "pos": "n", "definition": "water falling in drops"},
            {"id": "flow.v.01", "lemmas": ["flow"], "pos": "v", "definition": "move along"},
            {"id": "body_of_water.n.01", "lemmas": ["body of water", "water"], "pos": "n"}
        ]
    }"#;

    fn lexicon() -> JsonLexicon {
        JsonLexicon::from_json_str(LEXICON).unwrap()
    }

    #[test]
    fn test_sense_order_per_lemma() {
        let lexicon = lexicon();
        let names: Vec<String> = lexicon
            .senses_of("state")
            .iter()
            .map(|sense| sense.name().to_owned())
            .collect();
        assert_eq!(names, vec!["state.n.02", "state.n.01"]);
        assert_eq!(lexicon.senses_of("province")[0].name(), "state.n.01");
        assert!(lexicon.senses_of("zyzzyva").is_empty());
    }

    #[test]
    fn test_multiword_terms_are_normalized() {
        let lexicon = lexicon();
        assert_eq!(lexicon.senses_of("Body of Water")[0].name(), "body_of_water.n.01");
        assert_eq!(lexicon.senses_of("body_of_water").len(), 1);
    }

    #[test]
    fn test_hypernyms_drop_unknown_ids() {
        let lexicon = lexicon();
        let drought = &lexicon.senses_of("drought")[0];
        let parents: Vec<String> = lexicon
            .hypernyms_of(drought)
            .iter()
            .map(|sense| sense.name().to_owned())
            .collect();
        assert_eq!(parents, vec!["condition.n.01"]);

        let chain: Vec<String> = lexicon
            .ancestors_of(drought)
            .flatten()
            .iter()
            .map(|sense| sense.name().to_owned())
            .collect();
        assert_eq!(chain, vec!["drought.n.01", "condition.n.01", "state.n.02"]);
    }

    #[test]
    fn test_definitions_and_pos() {
        let lexicon = lexicon();
        let flow = &lexicon.senses_of("flow")[0];
        assert_eq!(lexicon.part_of_speech_of(flow), PartOfSpeech::Verb);
        assert_eq!(lexicon.definition_of(flow).as_deref(), Some("move along"));
        assert_eq!(lexicon.definition_of(&lexicon.senses_of("water")[0]), None);
        assert_eq!(
            lexicon.definition_of(&Sense::new("unknown.n.01", PartOfSpeech::Noun)),
            None
        );
    }

    #[test]
    fn test_tagging_uses_lexicon() {
        let lexicon = lexicon();
        let nouns: Vec<String> = lexicon
            .tokenize_and_tag("a shortage of rainfall that will flow")
            .into_iter()
            .filter(TaggedToken::is_noun)
            .map(|token| token.token)
            .collect();
        assert_eq!(nouns, vec!["shortage", "rainfall"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = JsonLexicon::from_json_str(
            r#"{"senses": [{"id": "a.n.01", "pos": "n"}, {"id": "a.n.01", "pos": "n"}]}"#,
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lexicon.json");
        fs::write(&path, LEXICON).unwrap();

        let lexicon = JsonLexicon::load(&path).unwrap();
        assert_eq!(lexicon.len(), 7);
        assert!(JsonLexicon::load(&temp.path().join("missing.json")).is_err());
    }
}
