//! Creative selection and temporal scheduling engine.
//!
//! Picks a creative direction (style, context, palette, framework, lighting)
//! per content item without repeating itself within a campaign, splits a
//! campaign's quota across channels, places each channel's posts on the
//! calendar, and ranks generated candidates to keep the best one.
//!
//! Python bindings are built with the `python` feature.

pub mod allocation;
pub mod catalog;
pub mod config;
pub mod key_dates;
pub mod logging;
pub mod models;
pub mod presets;
pub mod ranking;
pub mod scheduler;
pub mod selector;

#[cfg(feature = "python")]
mod bindings;

pub use allocation::{allocate, checked_quota, AllocationError};
pub use catalog::{CatalogBuilder, CatalogError, OptionCatalog, SectorProfile};
pub use config::{RankingConfig, RegenerationPolicy, ScheduleConfig, SelectorConfig};
pub use key_dates::{KeyDate, KeyDateCalendar};
pub use models::{
    Candidate, Category, ChannelWeight, CreativeDirection, CreativeOption, FrequencyPolicy,
    ScheduleRequest, ScheduledSlot,
};
pub use presets::builtin_catalog;
pub use ranking::{needs_regeneration, rank_candidates, select_best, RankKey, RankingError};
pub use scheduler::{parse_time_of_day, schedule, ScheduleError};
pub use selector::{CampaignDiversity, DiversityState, PresetSelector};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The postplan.rust Python module.
#[cfg(feature = "python")]
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<bindings::PyCatalog>()?;
    m.add_class::<bindings::PyDiversityState>()?;
    m.add_class::<bindings::PyChannelWeight>()?;
    m.add_class::<bindings::PyCandidate>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(bindings::py_allocate, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::py_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::py_select_direction, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::py_select_best, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::py_needs_regeneration, m)?)?;

    Ok(())
}
