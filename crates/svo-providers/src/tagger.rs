//! Penn Treebank tagging of definition text.
//!
//! Closed-class words are tagged from fixed tables, open-class words from the
//! part of speech of their first sense in the lexicon, and unknown words by
//! suffix, defaulting to `NN`.

use std::collections::HashMap;
use std::sync::OnceLock;

use svo_core::{PartOfSpeech, TaggedToken};

/// Tags tokens using closed-class tables and a lexicon lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    /// Create a new tagger
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes `text` and tags every token.
    ///
    /// `lookup` returns the part of speech of the first sense of a lowercase
    /// lemma, or `None` when the lexicon does not know it. Punctuation is dropped.
    pub fn tag<F>(&self, text: &str, lookup: F) -> Vec<TaggedToken>
    where
        F: Fn(&str) -> Option<PartOfSpeech>,
    {
        Self::tokenize(text)
            .into_iter()
            .enumerate()
            .map(|(position, token)| {
                let tag = Self::tag_word(&token, position == 0, &lookup);
                TaggedToken::new(token, tag)
            })
            .collect()
    }

    /// Splits text into word tokens, keeping inner hyphens and apostrophes.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|character: char| {
            !(character.is_alphanumeric() || character == '-' || character == '\'')
        })
        .map(|word| word.trim_matches(|character: char| character == '-' || character == '\''))
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
    }

    fn tag_word<F>(word: &str, sentence_start: bool, lookup: &F) -> &'static str
    where
        F: Fn(&str) -> Option<PartOfSpeech>,
    {
        let lower = word.to_lowercase();

        if let Some(tag) = Self::closed_class().get(lower.as_str()) {
            return tag;
        }
        if lower.chars().all(|character| character.is_ascii_digit()) {
            return "CD";
        }
        if let Some(pos) = lookup(&lower) {
            return Self::open_class_tag(pos);
        }
        if let Some(tag) = Self::inflected_tag(&lower, lookup) {
            return tag;
        }
        if !sentence_start && word.chars().next().is_some_and(char::is_uppercase) {
            return "NNP";
        }
        Self::suffix_tag(&lower)
    }

    fn open_class_tag(pos: PartOfSpeech) -> &'static str {
        match pos {
            PartOfSpeech::Verb => "VB",
            PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => "JJ",
            PartOfSpeech::Adverb => "RB",
            PartOfSpeech::Noun | PartOfSpeech::Other => "NN",
        }
    }

    /// Tags plural nouns and third-person verbs whose stem the lexicon knows.
    fn inflected_tag<F>(word: &str, lookup: &F) -> Option<&'static str>
    where
        F: Fn(&str) -> Option<PartOfSpeech>,
    {
        let mut stems = Vec::new();
        if let Some(stem) = word.strip_suffix("ies") {
            stems.push(format!("{stem}y"));
        }
        if let Some(stem) = word.strip_suffix("es") {
            stems.push(stem.to_owned());
        }
        if let Some(stem) = word.strip_suffix('s') {
            stems.push(stem.to_owned());
        }

        stems
            .iter()
            .filter(|stem| !stem.is_empty())
            .find_map(|stem| match lookup(stem)? {
                PartOfSpeech::Noun | PartOfSpeech::Other => Some("NNS"),
                PartOfSpeech::Verb => Some("VBZ"),
                PartOfSpeech::Adjective
                | PartOfSpeech::AdjectiveSatellite
                | PartOfSpeech::Adverb => None,
            })
    }

    fn suffix_tag(word: &str) -> &'static str {
        if word.len() > 4 && word.ends_with("ly") {
            "RB"
        } else if word.len() > 5 && word.ends_with("ing") {
            "VBG"
        } else if word.len() > 4 && word.ends_with("ed") {
            "VBN"
        } else if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
            "NNS"
        } else {
            "NN"
        }
    }

    /// Tags of function words that must never be read as nouns
    fn closed_class() -> &'static HashMap<&'static str, &'static str> {
        static CLOSED_CLASS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
        CLOSED_CLASS.get_or_init(|| {
            const TABLE: &[(&str, &[&str])] = &[
                (
                    "DT",
                    &[
                        "the", "a", "an", "this", "that", "these", "those", "each", "every",
                        "some", "any", "no", "all", "both", "either", "neither", "another",
                    ],
                ),
                (
                    "IN",
                    &[
                        "of", "in", "on", "at", "by", "for", "with", "from", "into", "over",
                        "under", "through", "about", "as", "between", "during", "within",
                        "without", "across", "along", "among", "upon", "near", "than", "because",
                        "if", "whether", "while", "after", "before", "since", "until", "like",
                    ],
                ),
                ("TO", &["to"]),
                ("CC", &["and", "or", "but", "nor", "yet"]),
                (
                    "PRP",
                    &[
                        "it", "they", "them", "he", "she", "we", "you", "i", "him", "her", "us",
                        "itself", "themselves", "one", "oneself",
                    ],
                ),
                ("PRP$", &["its", "their", "his", "our", "your", "my"]),
                ("WDT", &["which", "whatever", "whichever"]),
                ("WP", &["who", "whom", "what", "whoever"]),
                ("WRB", &["where", "when", "how", "why"]),
                (
                    "MD",
                    &["can", "could", "may", "might", "must", "shall", "should", "will", "would"],
                ),
                ("VBZ", &["is", "has", "does"]),
                ("VBP", &["are", "have", "do"]),
                ("VBD", &["was", "were", "had", "did"]),
                ("VB", &["be"]),
                ("VBN", &["been"]),
                ("VBG", &["being", "having"]),
                (
                    "RB",
                    &[
                        "not",
                        "very",
                        "usually",
                        "often",
                        "especially",
                        "also",
                        "more",
                        "most",
                        "less",
                        "so",
                    ],
                ),
                ("EX", &["there"]),
            ];

            TABLE
                .iter()
                .flat_map(|(tag, words)| words.iter().map(move |word| (*word, *tag)))
                .collect()
        })
    }
}
