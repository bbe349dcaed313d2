//! PyO3 wrappers around the engine.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use std::collections::HashMap;

use crate::allocation::{allocate, checked_quota};
use crate::catalog::OptionCatalog;
use crate::config::{RankingConfig, RegenerationPolicy, ScheduleConfig, SelectorConfig};
use crate::models::{Candidate, Category, ChannelWeight, FrequencyPolicy, ScheduleRequest};
use crate::presets::builtin_catalog;
use crate::ranking::{needs_regeneration, select_best};
use crate::scheduler::{parse_time_of_day, schedule};
use crate::selector::{DiversityState, PresetSelector};

fn value_error(e: impl ToString) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Option catalog (PyO3 wrapper).
#[pyclass(name = "Catalog")]
pub struct PyCatalog {
    inner: OptionCatalog,
}

#[pymethods]
impl PyCatalog {
    /// The catalog shipped with the engine.
    #[staticmethod]
    fn builtin() -> PyResult<Self> {
        let inner = builtin_catalog().map_err(value_error)?;
        Ok(Self { inner })
    }

    fn sectors(&self) -> Vec<String> {
        let mut sectors: Vec<String> = self.inner.sectors().map(str::to_string).collect();
        sectors.sort();
        sectors
    }

    /// Option ids for one category of a sector (falls back to the default sector).
    fn options(&self, sector_id: &str, category: &str) -> PyResult<Vec<String>> {
        let category = Category::ALL
            .into_iter()
            .find(|c| c.as_str() == category)
            .ok_or_else(|| value_error(format!("Unknown category: {}", category)))?;
        let profile = self.inner.get_profile(sector_id).map_err(value_error)?;
        Ok(profile
            .options(category)
            .iter()
            .map(|o| o.id.clone())
            .collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "Catalog(sectors={}, default={})",
            self.inner.sectors().count(),
            self.inner.default_sector()
        )
    }
}

/// Per-campaign diversity state (PyO3 wrapper).
#[pyclass(name = "DiversityState")]
#[derive(Default)]
pub struct PyDiversityState {
    inner: DiversityState,
}

#[pymethods]
impl PyDiversityState {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    /// Recorded (category, option id) pairs in selection order.
    fn history(&self) -> Vec<(String, String)> {
        self.inner
            .history()
            .iter()
            .map(|(category, id)| (category.as_str().to_string(), id.clone()))
            .collect()
    }

    fn __len__(&self) -> usize {
        self.inner.history().len()
    }
}

/// Channel weight (PyO3 wrapper).
#[pyclass(name = "ChannelWeight")]
#[derive(Clone, Debug)]
pub struct PyChannelWeight {
    #[pyo3(get, set)]
    pub channel_id: String,
    #[pyo3(get, set)]
    pub weight: f64,
    #[pyo3(get, set)]
    pub reduced_cadence: bool,
}

#[pymethods]
impl PyChannelWeight {
    #[new]
    #[pyo3(signature = (channel_id, weight, reduced_cadence=false))]
    fn new(channel_id: String, weight: f64, reduced_cadence: bool) -> Self {
        Self {
            channel_id,
            weight,
            reduced_cadence,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ChannelWeight(channel_id={}, weight={}, reduced_cadence={})",
            self.channel_id, self.weight, self.reduced_cadence
        )
    }
}

impl From<&PyChannelWeight> for ChannelWeight {
    fn from(value: &PyChannelWeight) -> Self {
        Self {
            channel_id: value.channel_id.clone(),
            weight: value.weight,
            reduced_cadence: value.reduced_cadence,
        }
    }
}

/// Scored candidate (PyO3 wrapper).
#[pyclass(name = "Candidate")]
#[derive(Clone, Debug)]
pub struct PyCandidate {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub scores: HashMap<String, f64>,
    #[pyo3(get, set)]
    pub issue_count: u32,
}

#[pymethods]
impl PyCandidate {
    #[new]
    #[pyo3(signature = (id, scores, issue_count=0))]
    fn new(id: String, scores: HashMap<String, f64>, issue_count: u32) -> Self {
        Self {
            id,
            scores,
            issue_count,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Candidate(id={}, scores={}, issues={})",
            self.id,
            self.scores.len(),
            self.issue_count
        )
    }
}

impl From<&PyCandidate> for Candidate {
    fn from(value: &PyCandidate) -> Self {
        let mut scores: Vec<(String, f64)> = value
            .scores
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        scores.sort_by(|a, b| a.0.cmp(&b.0));
        Candidate::new(value.id.clone(), scores, value.issue_count)
    }
}

/// Split a content quota across channels by weight.
///
/// # Raises
/// * ValueError for a negative quota, no channels, a bad weight or a duplicate channel
#[pyfunction]
pub fn py_allocate(
    total_quota: i64,
    channels: Vec<PyChannelWeight>,
) -> PyResult<HashMap<String, u32>> {
    let total = checked_quota(total_quota).map_err(value_error)?;
    let channels: Vec<ChannelWeight> = channels.iter().map(ChannelWeight::from).collect();
    allocate(total, &channels).map_err(value_error)
}

/// Generate publication timestamps per channel.
///
/// # Arguments
/// * `policy` - One of "daily", "twice_daily", "three_per_week", "weekly"
/// * `preferred_times` - Dict mapping channel to "HH:MM" strings
/// * `seed` - Seed for reproducible time choices
///
/// # Raises
/// * ValueError for an inverted range, unknown policy or malformed time
#[pyfunction]
#[pyo3(signature = (start_date, end_date, policy, quotas, preferred_times=None, seed=None, verbosity=0))]
#[allow(clippy::too_many_arguments)]
pub fn py_schedule(
    start_date: NaiveDate,
    end_date: NaiveDate,
    policy: &str,
    quotas: HashMap<String, u32>,
    preferred_times: Option<HashMap<String, Vec<String>>>,
    seed: Option<u64>,
    verbosity: u8,
) -> PyResult<HashMap<String, Vec<NaiveDateTime>>> {
    let policy: FrequencyPolicy = policy.parse().map_err(value_error)?;
    let mut request = ScheduleRequest::new(start_date, end_date, policy);
    for (channel_id, times) in preferred_times.unwrap_or_default() {
        let parsed = times
            .iter()
            .map(|t| parse_time_of_day(t))
            .collect::<Result<Vec<NaiveTime>, _>>()
            .map_err(value_error)?;
        request = request.with_times(channel_id, parsed);
    }

    let config = ScheduleConfig {
        verbosity,
        ..ScheduleConfig::default()
    };
    let slots = schedule(&request, &quotas, &config, &mut rng_for(seed)).map_err(value_error)?;
    Ok(slots
        .into_iter()
        .map(|(channel, slots)| (channel, slots.into_iter().map(|s| s.timestamp).collect()))
        .collect())
}

/// Choose one option per category and record it in `state`.
///
/// # Returns
/// * Dict mapping category name to option id
///
/// # Raises
/// * ValueError if the catalog cannot serve the sector
#[pyfunction]
#[pyo3(signature = (catalog, sector_id, state, objective_tags=None, seed=None, verbosity=0))]
pub fn py_select_direction(
    catalog: PyRef<'_, PyCatalog>,
    sector_id: &str,
    mut state: PyRefMut<'_, PyDiversityState>,
    objective_tags: Option<Vec<String>>,
    seed: Option<u64>,
    verbosity: u8,
) -> PyResult<HashMap<String, String>> {
    let config = SelectorConfig {
        verbosity,
        ..SelectorConfig::default()
    };
    let selector = PresetSelector::with_config(&catalog.inner, config);
    let tags: FxHashSet<String> = objective_tags.unwrap_or_default().into_iter().collect();

    let direction = selector
        .select_direction(sector_id, &tags, &mut state.inner, &mut rng_for(seed))
        .map_err(value_error)?;
    Ok(Category::ALL
        .into_iter()
        .map(|c| (c.as_str().to_string(), direction.get(c).id.clone()))
        .collect())
}

/// Id of the best candidate under the default ranking.
///
/// # Raises
/// * ValueError for an empty candidate list
#[pyfunction]
pub fn py_select_best(candidates: Vec<PyCandidate>) -> PyResult<String> {
    let candidates: Vec<Candidate> = candidates.iter().map(Candidate::from).collect();
    let best = select_best(&candidates, &RankingConfig::default()).map_err(value_error)?;
    Ok(best.id.clone())
}

/// True if the candidate falls under the default regeneration thresholds.
#[pyfunction]
pub fn py_needs_regeneration(candidate: PyCandidate) -> bool {
    needs_regeneration(
        &Candidate::from(&candidate),
        &RankingConfig::default(),
        &RegenerationPolicy::default(),
    )
}
