//! Configuration types for selection, scheduling and ranking.

use chrono::NaiveTime;

/// Configuration for the preset selector.
#[derive(Clone, Debug)]
pub struct SelectorConfig {
    /// Sampling weight for options without an explicit quality index (0-100)
    pub default_quality: u8,
    /// Logging verbosity (0-3)
    pub verbosity: u8,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            default_quality: 50,
            verbosity: 0,
        }
    }
}

/// Configuration for the temporal scheduler.
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Time of day used when a channel has no preferred times
    pub default_time: NaiveTime,
    /// Logging verbosity (0-3)
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            verbosity: 0,
        }
    }
}

/// Score dimensions used by the candidate ranker, most important first.
///
/// Issue count sits between `primary` and `secondary` in the comparison.
#[derive(Clone, Debug)]
pub struct RankingConfig {
    /// Headline metric
    pub primary: String,
    /// Structural/compositional accuracy
    pub secondary: String,
    /// Subject fidelity
    pub tertiary: String,
    /// Final tie-breakers, compared in this order
    pub tie_breakers: Vec<String>,
    /// Logging verbosity (0-3)
    pub verbosity: u8,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            primary: "overall".to_string(),
            secondary: "anatomical_accuracy".to_string(),
            tertiary: "product_fidelity".to_string(),
            tie_breakers: vec![
                "cannes_lions_potential".to_string(),
                "composition_excellence".to_string(),
                "creative_excellence".to_string(),
            ],
            verbosity: 0,
        }
    }
}

impl RankingConfig {
    /// All score dimensions after the issue count, in comparison order.
    pub fn ordered_dimensions(&self) -> impl Iterator<Item = &str> {
        [self.secondary.as_str(), self.tertiary.as_str()]
            .into_iter()
            .chain(self.tie_breakers.iter().map(String::as_str))
    }
}

/// Thresholds deciding whether a winning candidate is still too weak to publish.
#[derive(Clone, Debug)]
pub struct RegenerationPolicy {
    /// Primary score below this triggers regeneration
    pub min_primary: f64,
    /// Per-dimension floors; dimensions absent from a candidate are ignored
    pub dimension_floors: Vec<(String, f64)>,
    /// Any flagged issue triggers regeneration
    pub reject_on_issues: bool,
}

impl Default for RegenerationPolicy {
    fn default() -> Self {
        Self {
            min_primary: 75.0,
            dimension_floors: vec![
                ("anatomical_accuracy".to_string(), 70.0),
                ("hand_quality".to_string(), 70.0),
                ("product_fidelity".to_string(), 70.0),
            ],
            reject_on_issues: true,
        }
    }
}
