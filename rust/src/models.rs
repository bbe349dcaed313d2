//! Core data types for the creative selection and scheduling engine.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rustc_hash::FxHashSet;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::scheduler::ScheduleError;

/// Creative attribute categories, one option is picked from each per content item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Style,
    Context,
    Palette,
    Framework,
    Lighting,
}

impl Category {
    /// Every category in selection order.
    pub const ALL: [Category; 5] = [
        Category::Style,
        Category::Context,
        Category::Palette,
        Category::Framework,
        Category::Lighting,
    ];

    /// Dense index used for O(1) lookups in per-category arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Style => "style",
            Category::Context => "context",
            Category::Palette => "palette",
            Category::Framework => "framework",
            Category::Lighting => "lighting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable creative attribute value.
///
/// Immutable once loaded into a catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct CreativeOption {
    /// Unique within its category and sector
    pub id: String,
    /// Suitability labels (objective, season, mood...)
    pub tags: FxHashSet<String>,
    /// Quality weight 0-100; `None` falls back to the selector's default
    pub quality_index: Option<u8>,
}

impl CreativeOption {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tags: FxHashSet::default(),
            quality_index: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_quality(mut self, quality_index: u8) -> Self {
        self.quality_index = Some(quality_index.min(100));
        self
    }

    /// True if any of this option's tags appears in `objective_tags`.
    pub fn matches_any(&self, objective_tags: &FxHashSet<String>) -> bool {
        !self.tags.is_disjoint(objective_tags)
    }
}

/// One option per category, the creative direction for a single content item.
#[derive(Clone, Debug, PartialEq)]
pub struct CreativeDirection {
    pub style: CreativeOption,
    pub context: CreativeOption,
    pub palette: CreativeOption,
    pub framework: CreativeOption,
    pub lighting: CreativeOption,
}

impl CreativeDirection {
    pub fn get(&self, category: Category) -> &CreativeOption {
        match category {
            Category::Style => &self.style,
            Category::Context => &self.context,
            Category::Palette => &self.palette,
            Category::Framework => &self.framework,
            Category::Lighting => &self.lighting,
        }
    }
}

/// A publishing channel and its relative share of the content quota.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelWeight {
    pub channel_id: String,
    /// Strictly positive relative weight
    pub weight: f64,
    /// Reduced-cadence channels never absorb the rounding remainder unless
    /// every channel is reduced-cadence
    pub reduced_cadence: bool,
}

impl ChannelWeight {
    pub fn new(channel_id: impl Into<String>, weight: f64) -> Self {
        Self {
            channel_id: channel_id.into(),
            weight,
            reduced_cadence: false,
        }
    }

    pub fn reduced(channel_id: impl Into<String>, weight: f64) -> Self {
        Self {
            reduced_cadence: true,
            ..Self::new(channel_id, weight)
        }
    }
}

/// Publishing cadence rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrequencyPolicy {
    Daily,
    TwiceDaily,
    ThreePerWeek,
    Weekly,
}

impl FrequencyPolicy {
    /// Average number of slots per calendar day.
    pub fn slots_per_day(self) -> f64 {
        match self {
            FrequencyPolicy::Daily => 1.0,
            FrequencyPolicy::TwiceDaily => 2.0,
            FrequencyPolicy::ThreePerWeek => 3.0 / 7.0,
            FrequencyPolicy::Weekly => 1.0 / 7.0,
        }
    }

    /// Daily and twice-daily policies fill consecutive days; the others spread.
    pub fn is_high_cadence(self) -> bool {
        matches!(self, FrequencyPolicy::Daily | FrequencyPolicy::TwiceDaily)
    }

    /// Total content items a campaign of `days` calendar days should produce.
    ///
    /// Never less than 1 for a non-empty range.
    pub fn quota_for_days(self, days: u32) -> u32 {
        if days == 0 {
            return 0;
        }
        let quota = match self {
            FrequencyPolicy::Daily => days,
            FrequencyPolicy::TwiceDaily => days.saturating_mul(2),
            FrequencyPolicy::ThreePerWeek => days.saturating_mul(3).div_ceil(7),
            FrequencyPolicy::Weekly => days.div_ceil(7),
        };
        quota.max(1)
    }

    /// Maximum number of slots the scheduler can place in `days` calendar days.
    pub fn capacity(self, days: u32) -> u32 {
        match self {
            FrequencyPolicy::Daily => days,
            FrequencyPolicy::TwiceDaily => days.saturating_mul(2),
            // Low-cadence policies place at most one slot per day
            FrequencyPolicy::ThreePerWeek | FrequencyPolicy::Weekly => days,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrequencyPolicy::Daily => "daily",
            FrequencyPolicy::TwiceDaily => "twice_daily",
            FrequencyPolicy::ThreePerWeek => "three_per_week",
            FrequencyPolicy::Weekly => "weekly",
        }
    }
}

impl FromStr for FrequencyPolicy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(FrequencyPolicy::Daily),
            "twice_daily" => Ok(FrequencyPolicy::TwiceDaily),
            "three_per_week" => Ok(FrequencyPolicy::ThreePerWeek),
            "weekly" => Ok(FrequencyPolicy::Weekly),
            _ => Err(ScheduleError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for FrequencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for one campaign's scheduling call.
#[derive(Clone, Debug)]
pub struct ScheduleRequest {
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub policy: FrequencyPolicy,
    /// channel_id -> ordered preferred times of day
    pub preferred_times: HashMap<String, Vec<NaiveTime>>,
}

impl ScheduleRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, policy: FrequencyPolicy) -> Self {
        Self {
            start_date,
            end_date,
            policy,
            preferred_times: HashMap::new(),
        }
    }

    pub fn with_times(mut self, channel_id: impl Into<String>, times: Vec<NaiveTime>) -> Self {
        self.preferred_times.insert(channel_id.into(), times);
        self
    }

    /// Number of calendar days in the range, both ends included.
    ///
    /// Zero when the range is inverted.
    pub fn total_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }
}

/// A concrete publication slot.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduledSlot {
    pub channel_id: String,
    pub timestamp: NaiveDateTime,
}

/// One generated and scored result competing for a slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub id: String,
    /// Ordered named scores (overall, anatomical_accuracy, ...)
    pub scores: Vec<(String, f64)>,
    /// Number of flagged critical issues
    pub issue_count: u32,
}

impl Candidate {
    pub fn new(id: impl Into<String>, scores: Vec<(String, f64)>, issue_count: u32) -> Self {
        Self {
            id: id.into(),
            scores,
            issue_count,
        }
    }

    /// Look up a named score; the first entry wins if a name repeats.
    pub fn score(&self, name: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(dimension, _)| dimension == name)
            .map(|(_, value)| *value)
    }
}
