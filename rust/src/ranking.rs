//! Deterministic ranking of scored candidates for one slot.
//!
//! Candidates compare lexicographically on:
//! 1. primary score, descending
//! 2. issue count, ascending
//! 3. secondary, tertiary and tie-breaker scores, each descending
//!
//! Exact ties keep input order, so the earliest candidate wins.

use std::cmp::Ordering;
use thiserror::Error;

use crate::config::{RankingConfig, RegenerationPolicy};
use crate::log_changes;
use crate::models::Candidate;

/// Errors that can occur during ranking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error("No candidates to rank")]
    NoCandidates,
}

/// Comparison key for one candidate.
///
/// Implements `Ord` so that lower = better. Missing or NaN scores compare as
/// negative infinity, below every real score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankKey {
    pub primary: f64,
    pub issue_count: u32,
    /// Remaining dimensions in declared order
    pub dimensions: Vec<f64>,
}

impl RankKey {
    pub fn for_candidate(candidate: &Candidate, config: &RankingConfig) -> Self {
        Self {
            primary: score_or_floor(candidate, &config.primary),
            issue_count: candidate.issue_count,
            dimensions: config
                .ordered_dimensions()
                .map(|name| score_or_floor(candidate, name))
                .collect(),
        }
    }
}

fn score_or_floor(candidate: &Candidate, name: &str) -> f64 {
    match candidate.score(name) {
        Some(value) if !value.is_nan() => value,
        _ => f64::NEG_INFINITY,
    }
}

/// Descending comparison of two scores.
fn cmp_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

impl Eq for RankKey {}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_desc(self.primary, other.primary)
            .then(self.issue_count.cmp(&other.issue_count))
            .then_with(|| {
                self.dimensions
                    .iter()
                    .zip(&other.dimensions)
                    .map(|(a, b)| cmp_desc(*a, *b))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All candidates, best first. Stable: exact ties keep input order.
///
/// # Errors
/// * `RankingError::NoCandidates` for an empty slice
pub fn rank_candidates<'c>(
    candidates: &'c [Candidate],
    config: &RankingConfig,
) -> Result<Vec<&'c Candidate>, RankingError> {
    if candidates.is_empty() {
        return Err(RankingError::NoCandidates);
    }

    let mut keyed: Vec<(RankKey, &Candidate)> = candidates
        .iter()
        .map(|c| (RankKey::for_candidate(c, config), c))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(keyed.into_iter().map(|(_, c)| c).collect())
}

/// The single best candidate.
///
/// A one-element slice is returned without computing any keys.
///
/// # Errors
/// * `RankingError::NoCandidates` for an empty slice
pub fn select_best<'c>(
    candidates: &'c [Candidate],
    config: &RankingConfig,
) -> Result<&'c Candidate, RankingError> {
    let best = match candidates {
        [] => return Err(RankingError::NoCandidates),
        [only] => only,
        _ => candidates
            .iter()
            .map(|c| (RankKey::for_candidate(c, config), c))
            // `min_by` keeps the first of equal elements
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, c)| c)
            .ok_or(RankingError::NoCandidates)?,
    };

    log_changes!(
        config.verbosity,
        "Selected candidate {} out of {} ({}: {:?}, issues: {})",
        best.id,
        candidates.len(),
        config.primary,
        best.score(&config.primary),
        best.issue_count
    );
    Ok(best)
}

/// True if a candidate is too weak to publish and should be regenerated.
///
/// Triggers on a primary score below `policy.min_primary` (a missing primary
/// score counts as below), a floored dimension present in the candidate
/// falling below its floor, or any issue when `policy.reject_on_issues`.
pub fn needs_regeneration(
    candidate: &Candidate,
    config: &RankingConfig,
    policy: &RegenerationPolicy,
) -> bool {
    let primary_low = candidate
        .score(&config.primary)
        .map_or(true, |score| score < policy.min_primary);
    let floor_breached = policy
        .dimension_floors
        .iter()
        .any(|(name, floor)| candidate.score(name).is_some_and(|score| score < *floor));
    let has_issues = policy.reject_on_issues && candidate.issue_count > 0;

    primary_low || floor_breached || has_issues
}
