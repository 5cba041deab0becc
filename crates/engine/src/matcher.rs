//! Cross-batch duplicate detection against a reference set of
//! previously recorded transactions.

use serde::Serialize;

use txident_core::Record;

use crate::selector::{self, SelectedPosting};
use crate::util;

/// Criteria a reference record satisfied, reported for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCriterion {
    Date,
    Account,
    Amount,
    Payee,
}

/// Evidence that an incoming record is probably a re-import. The engine
/// only supplies this; keeping, skipping, or merging is the caller's
/// decision.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Position of the matched record in the reference set.
    pub reference_index: usize,
    /// Identity token of the matched record, when it carries one.
    pub reference_token: Option<String>,
    pub similarity: f32,
    pub criteria: Vec<MatchCriterion>,
}

/// Compares records on exact date/account/amount plus fuzzy payee.
pub struct DuplicateMatcher {
    /// Payee similarity must be strictly greater than this to match.
    pub similarity_threshold: f32,
}

impl Default for DuplicateMatcher {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.9,
        }
    }
}

impl DuplicateMatcher {
    pub fn new(similarity_threshold: f32) -> Self {
        Self {
            similarity_threshold,
        }
    }

    /// Scan the reference set for the record most likely to be the
    /// original of `candidate`. All four criteria are required; among
    /// several qualifying references the highest payee similarity wins,
    /// ties going to the earliest reference.
    pub fn find_match(&self, candidate: &Record, reference_set: &[Record]) -> Option<MatchResult> {
        let selected = selector::select(candidate).ok()?;

        let mut best: Option<MatchResult> = None;
        for (index, reference) in reference_set.iter().enumerate() {
            let Some((similarity, criteria)) = self.score_pair(candidate, &selected, reference)
            else {
                continue;
            };
            let improves = match &best {
                Some(b) => similarity > b.similarity,
                None => true,
            };
            if improves {
                best = Some(MatchResult {
                    reference_index: index,
                    reference_token: reference.token.clone(),
                    similarity,
                    criteria,
                });
            }
        }
        best
    }

    /// Duplicate verdicts for a whole incoming batch, one per record.
    pub fn find_matches(
        &self,
        batch: &[Record],
        reference_set: &[Record],
    ) -> Vec<Option<MatchResult>> {
        batch
            .iter()
            .map(|record| self.find_match(record, reference_set))
            .collect()
    }

    /// All four criteria or nothing: exact date, exact selected
    /// account, exact amount (value and currency), payee similarity
    /// strictly above the threshold.
    fn score_pair(
        &self,
        candidate: &Record,
        selected: &SelectedPosting,
        reference: &Record,
    ) -> Option<(f32, Vec<MatchCriterion>)> {
        if candidate.date != reference.date {
            return None;
        }
        let ref_selected = selector::select(reference).ok()?;
        if selected.account != ref_selected.account {
            return None;
        }
        if selected.amount != ref_selected.amount {
            return None;
        }
        let similarity = payee_similarity(&candidate.payee, &reference.payee);
        if similarity <= self.similarity_threshold {
            return None;
        }
        Some((
            similarity,
            vec![
                MatchCriterion::Date,
                MatchCriterion::Account,
                MatchCriterion::Amount,
                MatchCriterion::Payee,
            ],
        ))
    }
}

/// Case-insensitive payee similarity in [0.0, 1.0]: the best of plain,
/// partial, token-sort, and token-set ratios, so minor punctuation and
/// word-order differences barely lower the score. Either side empty
/// scores zero.
pub fn payee_similarity(payee1: &str, payee2: &str) -> f32 {
    if payee1.is_empty() || payee2.is_empty() {
        return 0.0;
    }
    if payee1 == payee2 {
        return 1.0;
    }
    let a = payee1.to_lowercase();
    let b = payee2.to_lowercase();
    util::ratio(&a, &b)
        .max(util::partial_ratio(&a, &b))
        .max(util::token_sort_ratio(&a, &b))
        .max(util::token_set_ratio(&a, &b))
}
