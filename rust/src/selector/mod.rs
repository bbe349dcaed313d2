//! Preset selection module.
//!
//! Quality-weighted random choice of one creative option per category, with
//! per-campaign anti-repetition tracking.

mod core;
mod diversity;
mod sampling;

pub use core::PresetSelector;
pub use diversity::{lock_state, CampaignDiversity, DiversityState};
pub use sampling::weighted_index;
