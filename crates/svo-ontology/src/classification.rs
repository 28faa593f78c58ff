//! Per-sense classification records.

use serde::ser::{SerializeMap as _, Serializer};
use serde::Serialize;
use svo_core::PartOfSpeech;

/// Membership of one sense in each registered category, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memberships(Vec<(String, bool)>);

impl Memberships {
    pub(crate) fn new(entries: Vec<(String, bool)>) -> Self {
        Self(entries)
    }

    /// Membership in `category`, or `None` if it was not evaluated.
    pub fn get(&self, category: &str) -> Option<bool> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, member)| *member)
    }

    /// True when the sense belongs to `category`.
    pub fn is_member(&self, category: &str) -> bool {
        self.get(category).unwrap_or(false)
    }

    /// Names of the categories the sense belongs to.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, member)| *member)
            .map(|(name, _)| name.as_str())
    }

    /// Every `(category, member)` pair in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, member)| (name.as_str(), *member))
    }
}

impl Serialize for Memberships {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, member) in &self.0 {
            map.serialize_entry(name, if *member { "yes" } else { "no" })?;
        }
        map.end()
    }
}

/// Classification of one sense of a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// The classified term
    pub term: String,
    /// Position of the sense among the term's senses
    pub sense_index: usize,
    /// Gloss of the sense (empty when the lexicon has none)
    pub definition: String,
    /// Part of speech of the sense
    pub pos: PartOfSpeech,
    /// Category membership
    pub memberships: Memberships,
    /// Labels that placed the sense in its categories
    pub matched: Vec<String>,
}

impl ClassificationResult {
    /// True when the sense belongs to `category`.
    pub fn is(&self, category: &str) -> bool {
        self.memberships.is_member(category)
    }
}
