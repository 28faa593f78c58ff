use core::fmt;
use core::slice::Iter;

use serde::{Deserialize, Serialize};

/// Part of speech of a lexical sense, using WordNet's single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    /// Noun (`n`)
    #[serde(rename = "n")]
    Noun,
    /// Verb (`v`)
    #[serde(rename = "v")]
    Verb,
    /// Head adjective (`a`)
    #[serde(rename = "a")]
    Adjective,
    /// Adjective satellite (`s`)
    #[serde(rename = "s")]
    AdjectiveSatellite,
    /// Adverb (`r`)
    #[serde(rename = "r")]
    Adverb,
    /// Anything the lexical database does not classify further
    #[serde(other, rename = "x")]
    Other,
}

impl PartOfSpeech {
    /// Returns the WordNet code for this part of speech.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Noun => "n",
            Self::Verb => "v",
            Self::Adjective => "a",
            Self::AdjectiveSatellite => "s",
            Self::Adverb => "r",
            Self::Other => "x",
        }
    }

    /// Parses a WordNet code, mapping unknown codes to [`PartOfSpeech::Other`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "n" => Self::Noun,
            "v" => Self::Verb,
            "a" => Self::Adjective,
            "s" => Self::AdjectiveSatellite,
            "r" => Self::Adverb,
            _ => Self::Other,
        }
    }

    /// True for verbs.
    pub const fn is_verb(self) -> bool {
        matches!(self, Self::Verb)
    }

    /// True for head adjectives and adjective satellites.
    pub const fn is_adjective(self) -> bool {
        matches!(self, Self::Adjective | Self::AdjectiveSatellite)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

/// Opaque handle to one sense in the lexical database.
///
/// Two handles are equal when they name the same sense (e.g. `state.n.02`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sense {
    name: String,
    pos: PartOfSpeech,
}

impl Sense {
    /// Creates a sense handle.
    pub fn new<T: Into<String>>(name: T, pos: PartOfSpeech) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    /// Unique sense name as known to the lexical database.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Part of speech the sense is tagged with.
    pub const fn pos(&self) -> PartOfSpeech {
        self.pos
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.name)
    }
}

/// Generalization tree of a sense: the sense itself with one subtree per parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypernymTree {
    /// Sense at this node
    pub sense: Sense,
    /// One subtree per direct hypernym
    pub parents: Vec<HypernymTree>,
}

impl HypernymTree {
    /// Tree consisting of a single sense with no hypernyms.
    pub fn leaf(sense: Sense) -> Self {
        Self {
            sense,
            parents: Vec::new(),
        }
    }

    /// Flattens every path of the tree into one chain, node first.
    ///
    /// Ancestors reachable through several paths appear once per path.
    #[must_use]
    pub fn flatten(&self) -> GeneralizationChain {
        let mut senses = Vec::new();
        self.collect_into(&mut senses);
        GeneralizationChain(senses)
    }

    fn collect_into(&self, senses: &mut Vec<Sense>) {
        senses.push(self.sense.clone());
        for parent in &self.parents {
            parent.collect_into(senses);
        }
    }
}

/// Flattened, ordered sequence of the senses in a generalization tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralizationChain(Vec<Sense>);

impl GeneralizationChain {
    /// Iterates the chain in traversal order.
    pub fn iter(&self) -> Iter<'_, Sense> {
        self.0.iter()
    }

    /// Number of entries, counting repeated visits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the chain holds no senses.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `sense` appears anywhere in the chain.
    pub fn contains(&self, sense: &Sense) -> bool {
        self.0.contains(sense)
    }
}

impl From<Vec<Sense>> for GeneralizationChain {
    fn from(senses: Vec<Sense>) -> Self {
        Self(senses)
    }
}

impl<'chain> IntoIterator for &'chain GeneralizationChain {
    type Item = &'chain Sense;
    type IntoIter = Iter<'chain, Sense>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A token with its Penn Treebank part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Surface form of the token
    pub token: String,
    /// Penn Treebank tag (`NN`, `NNS`, `VB`, `JJ`, ...)
    pub tag: String,
}

impl TaggedToken {
    /// Creates a token with its part-of-speech tag.
    pub fn new<T: Into<String>, U: Into<String>>(token: T, tag: U) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }

    /// True for every noun tag (`NN`, `NNS`, `NNP`, `NNPS`).
    pub fn is_noun(&self) -> bool {
        self.tag.starts_with("NN")
    }
}

/// A catalog variable whose sub-label matched a searched term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVariable {
    /// Variable identifier (IRI fragment)
    pub id: String,
    /// Human-readable variable label
    pub label: String,
}

impl CatalogVariable {
    /// Creates a variable from its encoded id and human-readable label.
    pub fn new<T: Into<String>, U: Into<String>>(id: T, label: U) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One element of a phrase-search result.
///
/// A searched term always produces a [`TermNode::Match`]; when the term was
/// expanded through its definitions, a [`TermNode::Expansion`] for the same
/// term immediately follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermNode {
    /// Knowledge-base hits for a literal term
    Match {
        /// The searched term
        term: String,
        /// Ontology classes the term labels exactly
        classes: Vec<String>,
        /// Catalog variables whose sub-label is the term
        variables: Vec<CatalogVariable>,
    },
    /// Results of searching the nouns of each state definition of a term
    Expansion {
        /// The expanded term
        term: String,
        /// One search result per expanded sense
        expansions: Vec<Vec<TermNode>>,
    },
}

impl TermNode {
    /// The term this node was produced for.
    pub fn term(&self) -> &str {
        match self {
            Self::Match { term, .. } | Self::Expansion { term, .. } => term,
        }
    }

    /// True for expansion nodes.
    pub const fn is_expansion(&self) -> bool {
        matches!(self, Self::Expansion { .. })
    }
}

/// A ranked catalog variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableMatch {
    /// Variable identifier
    pub id: String,
    /// Variable label
    pub label: String,
    /// Weighted match score, rounded
    pub score: f64,
}
