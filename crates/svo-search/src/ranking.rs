//! Weighted ranking of the catalog variables found by a phrase search.
//!
//! Every variable hit adds `1 / expansion_factor / term_factor` to that
//! variable's weight, so hits found deep inside expansions count for less.
//! The first hit on a variable sets its phenomenon bonus when the hit term is
//! labelled with the phenomenon class. The
//! final score combines the fraction of phrase terms and of variable segments
//! matched:
//!
//! ```text
//! score = (phrase_weight * matched / total_terms + variable_weight * matched / variable_length)
//!       * (base_multiplier + phenomenon_multiplier * bonus)
//! ```

use std::collections::HashMap;

use svo_core::{CatalogVariable, FactorMode, RankingConfig, TermNode, VariableMatch};

/// Separator between the segments of a variable id.
const VARIABLE_SEGMENT_SEPARATOR: char = '_';

/// Accumulated weight of one variable while walking the result tree.
struct MatchRecord {
    id: String,
    label: String,
    matched: f64,
    phenomenon_bonus: f64,
}

/// Records in first-seen order, indexed by variable id.
#[derive(Default)]
struct Aggregation {
    records: Vec<MatchRecord>,
    positions: HashMap<String, usize>,
}

impl Aggregation {
    /// Adds `increment` to the variable's weight.
    ///
    /// The phenomenon bonus is fixed by the hit that first records the
    /// variable: its increment when that node carries the phenomenon class,
    /// zero otherwise.
    fn add(&mut self, variable: &CatalogVariable, increment: f64, phenomenon: bool) {
        if let Some(&position) = self.positions.get(&variable.id) {
            self.records[position].matched += increment;
            return;
        }

        self.positions.insert(variable.id.clone(), self.records.len());
        self.records.push(MatchRecord {
            id: variable.id.clone(),
            label: variable.label.clone(),
            matched: increment,
            phenomenon_bonus: if phenomenon { increment } else { 0.0 },
        });
    }
}

/// Scores and orders the variables of a phrase-search result.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    /// Creates a ranking engine with the given weights.
    pub const fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// The weights in use.
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Returns at most `max_results` variables, highest score first.
    ///
    /// Variables with equal scores keep the order in which the search first
    /// reported them.
    pub fn rank(&self, results: &[TermNode], max_results: usize) -> Vec<VariableMatch> {
        let mut aggregation = Aggregation::default();
        self.accumulate(results, 1.0, 1.0, &mut aggregation);

        let total_terms = results.len().max(1) as f64;
        let mut ranked: Vec<VariableMatch> = aggregation
            .records
            .into_iter()
            .map(|record| {
                let variable_length = self.variable_length(&record.id).max(1) as f64;
                let mut score = self.config.phrase_weight * (record.matched / total_terms)
                    + self.config.variable_weight * (record.matched / variable_length);
                score *= self.config.base_multiplier
                    + self.config.phenomenon_multiplier * record.phenomenon_bonus;

                VariableMatch {
                    id: record.id,
                    label: record.label,
                    score: self.round(score),
                }
            })
            .collect();

        ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
        ranked.truncate(max_results);
        ranked
    }

    /// Number of counted segments in a variable id plus one per encoded attribute separator.
    ///
    /// `air%7Etemperature` has one segment and one separator, so its length is 2.
    pub fn variable_length(&self, id: &str) -> usize {
        let segments = id
            .split(VARIABLE_SEGMENT_SEPARATOR)
            .filter(|segment| {
                !segment.is_empty()
                    && !self
                        .config
                        .ignored_segments
                        .iter()
                        .any(|ignored| ignored == segment)
            })
            .count();
        let attributes = if self.config.attribute_separator.is_empty() {
            0
        } else {
            id.matches(self.config.attribute_separator.as_str()).count()
        };
        segments + attributes
    }

    fn accumulate(
        &self,
        nodes: &[TermNode],
        mut expansion_factor: f64,
        mut term_factor: f64,
        aggregation: &mut Aggregation,
    ) {
        for node in nodes {
            match node {
                TermNode::Match {
                    classes, variables, ..
                } => {
                    let increment = 1.0 / expansion_factor / term_factor;
                    let phenomenon = classes
                        .iter()
                        .any(|class| *class == self.config.phenomenon_class);
                    for variable in variables {
                        aggregation.add(variable, increment, phenomenon);
                    }
                }
                TermNode::Expansion { expansions, .. } => {
                    // Growth persists for the rest of this sequence and across sibling branches.
                    expansion_factor = self.grow(expansion_factor, expansions.len());
                    for branch in expansions {
                        term_factor = self.grow(term_factor, branch.len());
                        self.accumulate(branch, expansion_factor, term_factor, aggregation);
                    }
                }
            }
        }
    }

    fn grow(&self, factor: f64, count: usize) -> f64 {
        match self.config.factor_mode {
            FactorMode::Multiplicative => factor * count.max(1) as f64,
            FactorMode::Additive => factor + count as f64,
        }
    }

    /// Rounds half away from zero, so exact binary halves may differ by one
    /// unit in the last place from round-half-to-even.
    fn round(&self, score: f64) -> f64 {
        let scale = 10_f64.powi(self.config.precision as i32);
        (score * scale).round() / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(id: &str) -> CatalogVariable {
        CatalogVariable::new(id, id.replace("%7E", "~"))
    }

    fn hit(term: &str, classes: &[&str], ids: &[&str]) -> TermNode {
        TermNode::Match {
            term: term.to_owned(),
            classes: classes.iter().map(|&class| class.to_owned()).collect(),
            variables: ids.iter().map(|id| variable(id)).collect(),
        }
    }

    fn expansion(term: &str, expansions: Vec<Vec<TermNode>>) -> TermNode {
        TermNode::Expansion {
            term: term.to_owned(),
            expansions,
        }
    }

    fn scores(ranked: &[VariableMatch]) -> Vec<(&str, f64)> {
        ranked
            .iter()
            .map(|entry| (entry.id.as_str(), entry.score))
            .collect()
    }

    #[test]
    fn test_two_sibling_hits() {
        let results = vec![
            hit("air", &[], &["air%7Etemperature"]),
            hit("temperature", &[], &["air%7Etemperature"]),
        ];
        let ranked = RankingEngine::default().rank(&results, 5);
        assert_eq!(scores(&ranked), vec![("air%7Etemperature", 0.4)]);
        assert_eq!(ranked[0].label, "air~temperature");
    }

    #[test]
    fn test_phenomenon_bonus() {
        let results = vec![hit("wind", &["Phenomenon"], &["wind%7Espeed"])];
        let ranked = RankingEngine::default().rank(&results, 5);
        // 0.75 * 1 + 0.25 * 1/2, then * (0.4 + 0.6)
        assert_eq!(scores(&ranked), vec![("wind%7Espeed", 0.875)]);
    }

    #[test]
    fn test_phenomenon_bonus_is_set_by_first_hit() {
        let repeated = vec![
            hit("wind", &["Phenomenon"], &["wind%7Espeed"]),
            hit("speed", &["Phenomenon"], &["wind%7Espeed"]),
        ];
        // matched 2 of 2 terms and 2 of length 2, bonus 1 from the first hit
        assert_eq!(
            scores(&RankingEngine::default().rank(&repeated, 5)),
            vec![("wind%7Espeed", 1.0)]
        );

        let plain_first = vec![
            hit("speed", &[], &["wind%7Espeed"]),
            hit("wind", &["Phenomenon"], &["wind%7Espeed"]),
        ];
        assert_eq!(
            scores(&RankingEngine::default().rank(&plain_first, 5)),
            vec![("wind%7Espeed", 0.4)]
        );
    }

    #[test]
    fn test_variable_length() {
        let engine = RankingEngine::default();
        assert_eq!(engine.variable_length("air%7Etemperature"), 2);
        assert_eq!(engine.variable_length("land_surface_air%7Etemperature"), 4);
        assert_eq!(
            engine.variable_length("soil_water%7Eshortage_of_rainfall_duration"),
            5
        );
        assert_eq!(engine.variable_length("__"), 0);
    }

    #[test]
    fn test_expansion_hits_are_discounted() {
        let results = vec![
            hit("drought", &[], &["drought%7Eduration"]),
            expansion(
                "drought",
                vec![vec![
                    hit("shortage", &[], &["soil_water%7Eshortage_of_rainfall_duration"]),
                    hit("rainfall", &[], &["soil_water%7Eshortage_of_rainfall_duration"]),
                ]],
            ),
        ];
        let ranked = RankingEngine::default().rank(&results, 5);

        // drought~duration: matched 1, total 2, length 2
        //   (0.75 * 0.5 + 0.25 * 0.5) * 0.4 = 0.2
        // shortage variable: matched 2 * 1/1/2 = 1, total 2, length 5
        //   (0.75 * 0.5 + 0.25 / 5) * 0.4 = 0.17
        assert_eq!(
            scores(&ranked),
            vec![
                ("drought%7Eduration", 0.2),
                ("soil_water%7Eshortage_of_rainfall_duration", 0.17),
            ]
        );
    }

    #[test]
    fn test_factors_compound_across_branches() {
        let shared = "river%7Edischarge";
        let results = vec![expansion(
            "humidity",
            vec![
                vec![hit("wetness", &[], &[shared]), hit("air", &[], &[])],
                vec![hit("degree", &[], &[]), hit("wetness", &[], &[shared]), hit("air", &[], &[])],
            ],
        )];

        let multiplicative = RankingEngine::default().rank(&results, 5);
        // branch one: 1 / 2 / 2 = 0.25; branch two: 1 / 2 / (2 * 3) = 1/12
        let matched: f64 = 1.0 / 2.0 / 2.0 + 1.0 / 2.0 / 6.0;
        let expected = ((0.75 * matched + 0.25 * matched / 2.0) * 0.4 * 1000.0).round() / 1000.0;
        assert_eq!(multiplicative[0].score, expected);

        let additive = RankingEngine::new(RankingConfig {
            factor_mode: FactorMode::Additive,
            ..RankingConfig::default()
        })
        .rank(&results, 5);
        // branch one: 1 / 3 / 3; branch two: 1 / 3 / 6
        let matched: f64 = 1.0 / 3.0 / 3.0 + 1.0 / 3.0 / 6.0;
        let expected = ((0.75 * matched + 0.25 * matched / 2.0) * 0.4 * 1000.0).round() / 1000.0;
        assert_eq!(additive[0].score, expected);
    }

    #[test]
    fn test_order_limit_and_ties() {
        let results = vec![
            hit("air", &[], &["air%7Epressure", "air%7Etemperature"]),
            hit("temperature", &[], &["air%7Etemperature", "land_surface_air%7Etemperature"]),
        ];
        let ranked = RankingEngine::default().rank(&results, 5);
        let ids: Vec<&str> = ranked.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "air%7Etemperature",
                "air%7Epressure",
                "land_surface_air%7Etemperature"
            ]
        );
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));

        assert_eq!(RankingEngine::default().rank(&results, 1).len(), 1);
        assert!(RankingEngine::default().rank(&results, 0).is_empty());
    }

    #[test]
    fn test_round_half_away_from_zero() {
        let engine = RankingEngine::default();
        assert_eq!(engine.round(0.0625), 0.063);
        assert_eq!(engine.round(0.1234), 0.123);
    }

    #[test]
    fn test_empty_results() {
        assert!(RankingEngine::default().rank(&[], 5).is_empty());
    }
}
