//! A single ontological category and its reference senses.

use serde_json::Value;
use svo_core::{Error, GeneralizationChain, LexicalGateway, ResolutionMode, Result, Sense};

/// Category whose membership is also triggered by verb senses.
pub const VERB_CATEGORY: &str = "process";
/// Category whose membership is also triggered by adjective senses.
pub const ADJECTIVE_CATEGORY: &str = "attribute";

/// Label appended when a verb sense triggers the verb category.
const VERB_LABEL: &str = "verb";
/// Label appended when an adjective sense triggers the adjective category.
const ADJECTIVE_LABEL: &str = "adjective";

/// A reference sense: the `index`-th sense of `term`, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenseRef {
    term: String,
    index: usize,
    sense: Sense,
}

impl SenseRef {
    /// Term the sense was looked up by.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Position of the sense among the senses of the term.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The resolved sense.
    pub const fn sense(&self) -> &Sense {
        &self.sense
    }

    /// Membership label, `<term>.<index>`.
    pub fn label(&self) -> String {
        format!("{}.{}", self.term, self.index)
    }

    fn is(&self, term: &str, index: usize) -> bool {
        self.term == term && self.index == index
    }
}

/// A `(term, index)` pair the lexical database could not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSense {
    /// Category that declared the sense
    pub category: String,
    /// Term whose senses were consulted
    pub term: String,
    /// Missing sense index
    pub index: usize,
}

/// Reference senses declared for a category, as `term -> [indices]` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenseSpec(Vec<(String, Vec<usize>)>);

impl SenseSpec {
    /// Builds a sense list from `(term, indices)` entries.
    pub fn new<T: Into<String>>(entries: Vec<(T, Vec<usize>)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(term, indices)| (term.into(), indices))
                .collect(),
        )
    }

    /// Parses senses given either as a mapping `{term: [indices]}` or as a list
    /// `[[term, [indices]], ...]`. `null` is an empty sense list.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for any other shape or for entries that
    /// are not a term with a list of non-negative indices
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => map
                .iter()
                .map(|(term, indices)| Ok((term.clone(), parse_indices(term, indices)?)))
                .collect::<Result<Vec<_>>>()
                .map(Self),
            Value::Array(entries) => entries
                .iter()
                .map(parse_list_entry)
                .collect::<Result<Vec<_>>>()
                .map(Self),
            other => Err(Error::InvalidConfiguration(format!(
                "senses must be a list or a mapping, got {other}"
            ))),
        }
    }

    /// Iterates every declared `(term, index)` pair in declaration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().flat_map(|(term, indices)| {
            indices.iter().map(move |index| (term.as_str(), *index))
        })
    }

    /// True when no sense is declared.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|(_, indices)| indices.is_empty())
    }
}

fn parse_list_entry(entry: &Value) -> Result<(String, Vec<usize>)> {
    match entry.as_array().map(Vec::as_slice) {
        Some([Value::String(term), indices]) => Ok((term.clone(), parse_indices(term, indices)?)),
        _ => Err(Error::InvalidConfiguration(format!(
            "sense entry must be [term, [indices]], got {entry}"
        ))),
    }
}

fn parse_indices(term: &str, value: &Value) -> Result<Vec<usize>> {
    let invalid = || {
        Error::InvalidConfiguration(format!(
            "sense indices for '{term}' must be a list of non-negative integers, got {value}"
        ))
    };
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|index| {
            index
                .as_u64()
                .and_then(|index| usize::try_from(index).ok())
                .ok_or_else(invalid)
        })
        .collect()
}

/// A category together with the reference senses that were dropped while building it.
#[derive(Debug, Clone)]
pub struct ResolvedCategory {
    /// The constructed category
    pub category: Category,
    /// Declared senses the lexical database could not resolve
    pub unresolved: Vec<UnresolvedSense>,
}

/// A named set of reference senses with verb and adjective triggers.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    senses: Vec<SenseRef>,
    verb_triggered: bool,
    adjective_triggered: bool,
}

impl Category {
    /// Creates a category without reference senses.
    ///
    /// `process` is verb-triggered and `attribute` is adjective-triggered.
    pub fn new<T: Into<String>>(name: T) -> Self {
        let name = name.into();
        Self {
            verb_triggered: name == VERB_CATEGORY,
            adjective_triggered: name == ADJECTIVE_CATEGORY,
            name,
            senses: Vec::new(),
        }
    }

    /// Creates a category and resolves every sense declared in `spec`.
    ///
    /// In [`ResolutionMode::Skip`] unresolvable senses are logged and returned
    /// in [`ResolvedCategory::unresolved`]; in [`ResolutionMode::Strict`] the
    /// first one fails construction.
    ///
    /// # Errors
    /// Returns `UnresolvedSense` in strict mode
    pub fn from_spec<T: Into<String>>(
        name: T,
        spec: &SenseSpec,
        lexicon: &dyn LexicalGateway,
        mode: ResolutionMode,
    ) -> Result<ResolvedCategory> {
        let mut category = Self::new(name);
        let mut unresolved = Vec::new();

        for (term, index) in spec.pairs() {
            match category.add_sense(lexicon, term, index) {
                Ok(_) => {}
                Err(Error::UnresolvedSense { term, index }) if mode == ResolutionMode::Skip => {
                    tracing::warn!(
                        "Could not find sense {index} for '{term}'; dropping it from category '{}'",
                        category.name
                    );
                    unresolved.push(UnresolvedSense {
                        category: category.name.clone(),
                        term,
                        index,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(ResolvedCategory {
            category,
            unresolved,
        })
    }

    /// Category name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference senses in insertion order.
    pub fn senses(&self) -> &[SenseRef] {
        &self.senses
    }

    /// True when verb senses trigger membership.
    pub const fn is_verb_category(&self) -> bool {
        self.verb_triggered
    }

    /// True when adjective senses trigger membership.
    pub const fn is_adjective_category(&self) -> bool {
        self.adjective_triggered
    }

    /// Resolves the `index`-th sense of `term` and adds it as a reference sense.
    ///
    /// Returns `false` when the pair is already present.
    ///
    /// # Errors
    /// Returns `UnresolvedSense` if the term has no such sense
    pub fn add_sense(
        &mut self,
        lexicon: &dyn LexicalGateway,
        term: &str,
        index: usize,
    ) -> Result<bool> {
        if self.senses.iter().any(|sense_ref| sense_ref.is(term, index)) {
            return Ok(false);
        }

        let sense = lexicon
            .senses_of(term)
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::UnresolvedSense {
                term: term.to_owned(),
                index,
            })?;

        self.senses.push(SenseRef {
            term: term.to_owned(),
            index,
            sense,
        });
        Ok(true)
    }

    /// Removes the reference sense `(term, index)`.
    ///
    /// # Errors
    /// Returns `NotFound` if the pair is not part of the category
    pub fn remove_sense(&mut self, term: &str, index: usize) -> Result<SenseRef> {
        let position = self
            .senses
            .iter()
            .position(|sense_ref| sense_ref.is(term, index))
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "sense {index} of '{term}' is not part of category '{}'",
                    self.name
                ))
            })?;
        Ok(self.senses.remove(position))
    }

    /// Returns the labels of everything in `chain` that places it in this category.
    ///
    /// Every chain entry equal to a reference sense contributes that sense's
    /// label; verb entries contribute `verb` for a verb-triggered category and
    /// adjective entries contribute `adjective` for an adjective-triggered one.
    /// A non-empty result ends with the category name; an empty result means
    /// the chain is not a member.
    pub fn is_member(&self, chain: &GeneralizationChain) -> Vec<String> {
        let mut labels = Vec::new();

        for ancestor in chain {
            labels.extend(
                self.senses
                    .iter()
                    .filter(|sense_ref| sense_ref.sense == *ancestor)
                    .map(SenseRef::label),
            );
            if self.verb_triggered && ancestor.pos().is_verb() {
                labels.push(VERB_LABEL.to_owned());
            }
            if self.adjective_triggered && ancestor.pos().is_adjective() {
                labels.push(ADJECTIVE_LABEL.to_owned());
            }
        }

        if !labels.is_empty() {
            labels.push(self.name.clone());
        }
        labels
    }

    /// Returns `(term, definition)` for every reference sense the lexicon can define.
    pub fn definitions(&self, lexicon: &dyn LexicalGateway) -> Vec<(String, String)> {
        self.senses
            .iter()
            .filter_map(|sense_ref| {
                lexicon
                    .definition_of(&sense_ref.sense)
                    .map(|definition| (sense_ref.term.clone(), definition))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureLexicon;
    use serde_json::json;
    use svo_core::PartOfSpeech;

    fn lexicon() -> FixtureLexicon {
        FixtureLexicon::default()
            .with_sense("quantity", "measure.n.02", PartOfSpeech::Noun, "how much there is", &[])
            .with_sense("quantity", "quantity.n.02", PartOfSpeech::Noun, "an adequate amount", &[])
            .with_sense("flow", "flow.v.01", PartOfSpeech::Verb, "move along", &[])
            .with_sense("dry", "dry.a.01", PartOfSpeech::Adjective, "free from liquid", &[])
    }

    fn chain(senses: &[Sense]) -> GeneralizationChain {
        GeneralizationChain::from(senses.to_vec())
    }

    #[test]
    fn test_flags_follow_name() {
        assert!(Category::new("process").is_verb_category());
        assert!(!Category::new("process").is_adjective_category());
        assert!(Category::new("attribute").is_adjective_category());
        assert!(!Category::new("state").is_verb_category());
    }

    #[test]
    fn test_empty_category_matches_nothing() {
        let category = Category::new("state");
        let verb = Sense::new("flow.v.01", PartOfSpeech::Verb);
        let adjective = Sense::new("dry.s.02", PartOfSpeech::AdjectiveSatellite);
        let noun = Sense::new("state.n.02", PartOfSpeech::Noun);

        assert!(category.is_member(&chain(&[verb, adjective, noun])).is_empty());
        assert!(category.is_member(&GeneralizationChain::default()).is_empty());
    }

    #[test]
    fn test_reference_sense_label_then_name() {
        let lexicon = lexicon();
        let spec = SenseSpec::new(vec![("quantity", vec![0])]);
        let resolved =
            Category::from_spec("quantity", &spec, &lexicon, ResolutionMode::Skip).unwrap();
        let measure = Sense::new("measure.n.02", PartOfSpeech::Noun);

        assert_eq!(
            resolved.category.is_member(&chain(&[measure])),
            vec!["quantity.0", "quantity"]
        );
    }

    #[test]
    fn test_repeated_ancestor_repeats_label() {
        let lexicon = lexicon();
        let spec = SenseSpec::new(vec![("quantity", vec![0])]);
        let category = Category::from_spec("quantity", &spec, &lexicon, ResolutionMode::Skip)
            .unwrap()
            .category;
        let measure = Sense::new("measure.n.02", PartOfSpeech::Noun);

        assert_eq!(
            category.is_member(&chain(&[measure.clone(), measure])),
            vec!["quantity.0", "quantity.0", "quantity"]
        );
    }

    #[test]
    fn test_verb_and_adjective_triggers() {
        let process = Category::new("process");
        let attribute = Category::new("attribute");
        let verb = Sense::new("flow.v.01", PartOfSpeech::Verb);
        let satellite = Sense::new("arid.s.01", PartOfSpeech::AdjectiveSatellite);

        assert_eq!(process.is_member(&chain(&[verb.clone()])), vec!["verb", "process"]);
        assert!(process.is_member(&chain(&[satellite.clone()])).is_empty());
        assert_eq!(
            attribute.is_member(&chain(&[satellite])),
            vec!["adjective", "attribute"]
        );
        assert!(attribute.is_member(&chain(&[verb])).is_empty());
    }

    #[test]
    fn test_unresolvable_sense_skipped_or_fatal() {
        let lexicon = lexicon();
        let spec = SenseSpec::new(vec![("quantity", vec![0, 7]), ("nonexistent", vec![0])]);

        let resolved =
            Category::from_spec("quantity", &spec, &lexicon, ResolutionMode::Skip).unwrap();
        assert_eq!(resolved.category.senses().len(), 1);
        assert_eq!(resolved.unresolved.len(), 2);
        assert_eq!(resolved.unresolved[0].term, "quantity");
        assert_eq!(resolved.unresolved[0].index, 7);

        let error =
            Category::from_spec("quantity", &spec, &lexicon, ResolutionMode::Strict).unwrap_err();
        assert!(matches!(error, Error::UnresolvedSense { index: 7, .. }));
    }

    #[test]
    fn test_duplicate_pairs_are_kept_once() {
        let lexicon = lexicon();
        let spec = SenseSpec::new(vec![("quantity", vec![1, 1]), ("quantity", vec![1])]);
        let category = Category::from_spec("quantity", &spec, &lexicon, ResolutionMode::Strict)
            .unwrap()
            .category;
        assert_eq!(category.senses().len(), 1);
        assert_eq!(category.senses()[0].label(), "quantity.1");
    }

    #[test]
    fn test_remove_sense() {
        let lexicon = lexicon();
        let mut category = Category::new("quantity");
        assert!(category.add_sense(&lexicon, "quantity", 1).unwrap());

        let removed = category.remove_sense("quantity", 1).unwrap();
        assert_eq!(removed.sense().name(), "quantity.n.02");
        assert!(category.senses().is_empty());
        assert!(matches!(
            category.remove_sense("quantity", 1),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_definitions() {
        let lexicon = lexicon();
        let mut category = Category::new("quantity");
        category.add_sense(&lexicon, "quantity", 0).unwrap();
        assert_eq!(
            category.definitions(&lexicon),
            vec![("quantity".to_owned(), "how much there is".to_owned())]
        );
    }

    #[test]
    fn test_sense_spec_shapes() {
        let mapping = SenseSpec::from_value(&json!({"condition": [0, 1], "state": [4]})).unwrap();
        let pairs: Vec<(&str, usize)> = mapping.pairs().collect();
        assert_eq!(pairs, vec![("condition", 0), ("condition", 1), ("state", 4)]);

        let list = SenseSpec::from_value(&json!([["event", [0]], ["act", [1, 5]]])).unwrap();
        let pairs: Vec<(&str, usize)> = list.pairs().collect();
        assert_eq!(pairs, vec![("event", 0), ("act", 1), ("act", 5)]);

        assert!(SenseSpec::from_value(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_sense_spec_rejects_malformed_input() {
        for value in [
            json!("process"),
            json!(3),
            json!([["event", 0]]),
            json!([["event"]]),
            json!({"event": [-1]}),
            json!({"event": "zero"}),
        ] {
            assert!(
                matches!(
                    SenseSpec::from_value(&value),
                    Err(Error::InvalidConfiguration(_))
                ),
                "{value} should be rejected"
            );
        }
    }
}
