//! Preset selection with objective matching, diversity and quality weighting.

use rand::Rng;
use rustc_hash::FxHashSet;
use std::sync::Mutex;

use crate::catalog::{CatalogError, OptionCatalog};
use crate::config::SelectorConfig;
use crate::models::{Category, CreativeDirection, CreativeOption};
use crate::{log_changes, log_checks, log_debug};

use super::diversity::{lock_state, DiversityState};
use super::sampling::weighted_index;

/// Picks one option per category for each content item.
pub struct PresetSelector<'a> {
    catalog: &'a OptionCatalog,
    config: SelectorConfig,
}

impl<'a> PresetSelector<'a> {
    pub fn new(catalog: &'a OptionCatalog) -> Self {
        Self::with_config(catalog, SelectorConfig::default())
    }

    pub fn with_config(catalog: &'a OptionCatalog, config: SelectorConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Choose a creative direction and record it in `state`.
    ///
    /// Per category: narrow to options matching `objective_tags` (if any do),
    /// drop options already used this campaign (unless that leaves nothing),
    /// then draw by quality index. The state is only updated once every
    /// category has produced a choice, so a configuration error leaves it
    /// untouched.
    ///
    /// # Errors
    /// * `CatalogError::EmptyCategory` if the resolved profile has an empty category
    /// * `CatalogError::MissingDefaultSector` if the sector is unknown and no
    ///   default profile exists
    pub fn select_direction<R: Rng + ?Sized>(
        &self,
        sector_id: &str,
        objective_tags: &FxHashSet<String>,
        state: &mut DiversityState,
        rng: &mut R,
    ) -> Result<CreativeDirection, CatalogError> {
        let verbosity = self.config.verbosity;
        let profile = self.catalog.get_profile(sector_id)?;

        let mut chosen: Vec<&CreativeOption> = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let options = self.catalog.get_category(profile, category)?;
            let option = self.select_option(category, options, objective_tags, state, rng);
            log_changes!(
                verbosity,
                "[{}] {} -> {}",
                profile.sector_id,
                category,
                option.id
            );
            chosen.push(option);
        }

        for (category, option) in Category::ALL.iter().zip(&chosen) {
            state.record(*category, &option.id);
        }

        Ok(CreativeDirection {
            style: chosen[Category::Style.index()].clone(),
            context: chosen[Category::Context.index()].clone(),
            palette: chosen[Category::Palette.index()].clone(),
            framework: chosen[Category::Framework.index()].clone(),
            lighting: chosen[Category::Lighting.index()].clone(),
        })
    }

    /// Same as [`select_direction`](Self::select_direction), holding the
    /// campaign's lock for the whole select-then-record step.
    pub fn select_direction_locked<R: Rng + ?Sized>(
        &self,
        sector_id: &str,
        objective_tags: &FxHashSet<String>,
        state: &Mutex<DiversityState>,
        rng: &mut R,
    ) -> Result<CreativeDirection, CatalogError> {
        let mut guard = lock_state(state);
        self.select_direction(sector_id, objective_tags, &mut guard, rng)
    }

    /// Pick one option from a non-empty category list.
    fn select_option<'o, R: Rng + ?Sized>(
        &self,
        category: Category,
        options: &'o [CreativeOption],
        objective_tags: &FxHashSet<String>,
        state: &DiversityState,
        rng: &mut R,
    ) -> &'o CreativeOption {
        let verbosity = self.config.verbosity;

        let mut pool: Vec<&CreativeOption> = options
            .iter()
            .filter(|o| o.matches_any(objective_tags))
            .collect();
        if pool.is_empty() {
            pool = options.iter().collect();
        } else {
            log_checks!(
                verbosity,
                "  {}: {}/{} options match objective",
                category,
                pool.len(),
                options.len()
            );
        }

        let unused: Vec<&CreativeOption> = pool
            .iter()
            .copied()
            .filter(|o| !state.is_used(category, &o.id))
            .collect();
        if unused.is_empty() {
            log_checks!(
                verbosity,
                "  {}: all {} candidates used, relaxing diversity for this call",
                category,
                pool.len()
            );
        } else {
            pool = unused;
        }

        let weights: Vec<f64> = pool
            .iter()
            .map(|o| f64::from(o.quality_index.unwrap_or(self.config.default_quality)))
            .collect();
        log_debug!(verbosity, "  {}: weights {:?}", category, weights);

        // `pool` is never empty: it falls back to the full non-empty list
        let index = weighted_index(&weights, rng).unwrap_or(0);
        pool[index]
    }
}
