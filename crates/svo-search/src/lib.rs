//! Recursive phrase search against the variable catalog and ranking of the hits.
//!
//! [`PhraseSearchEngine`] splits a phrase into terms, looks each one up in the
//! knowledge base and expands terms of the `state` category through the nouns
//! of their definitions. [`RankingEngine`] folds the resulting tree into one
//! weighted score per catalog variable. [`PhraseMatcher`] ties both to a
//! categorizer and adds input validation, retries and a timeout.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::float_cmp,
        reason = "Test allows"
    )
)]

pub mod matcher;
pub mod phrase;
pub mod ranking;

pub use matcher::{PhraseMatcher, RankedPhrase};
pub use phrase::{MAX_DEPTH, PhraseSearchEngine};
pub use ranking::RankingEngine;

#[cfg(test)]
mod test_support;
