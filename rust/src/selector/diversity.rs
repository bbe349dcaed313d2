//! Per-campaign diversity tracking.

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::Category;

/// Option ids already chosen in one campaign, per category.
///
/// Owned by the caller's campaign context and passed to every selection.
#[derive(Clone, Debug, Default)]
pub struct DiversityState {
    used: [FxHashSet<String>; 5],
    history: Vec<(Category, String)>,
}

impl DiversityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids already chosen for a category.
    #[inline]
    pub fn used(&self, category: Category) -> &FxHashSet<String> {
        &self.used[category.index()]
    }

    pub fn is_used(&self, category: Category, option_id: &str) -> bool {
        self.used[category.index()].contains(option_id)
    }

    /// Record a chosen id. Re-recording an id keeps the used-set unchanged
    /// but still appends to the history.
    pub fn record(&mut self, category: Category, option_id: &str) {
        self.used[category.index()].insert(option_id.to_string());
        self.history.push((category, option_id.to_string()));
    }

    /// Every recorded choice in selection order.
    pub fn history(&self) -> &[(Category, String)] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Forget everything, e.g. when a new campaign starts.
    pub fn clear(&mut self) {
        for used in &mut self.used {
            used.clear();
        }
        self.history.clear();
    }
}

/// Caller-owned registry giving each campaign its own lockable state.
///
/// Selections for the same campaign serialize on that campaign's mutex;
/// different campaigns never contend.
#[derive(Debug, Default)]
pub struct CampaignDiversity {
    campaigns: FxHashMap<String, Arc<Mutex<DiversityState>>>,
}

impl CampaignDiversity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to a campaign's state, created empty on first use.
    pub fn state(&mut self, campaign_id: &str) -> Arc<Mutex<DiversityState>> {
        Arc::clone(
            self.campaigns
                .entry(campaign_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(DiversityState::new()))),
        )
    }

    /// Clear a campaign's state in place; existing handles see the reset.
    pub fn reset(&self, campaign_id: &str) {
        if let Some(state) = self.campaigns.get(campaign_id) {
            lock_state(state).clear();
        }
    }

    /// Drop a finished campaign. Returns true if it was tracked.
    pub fn remove(&mut self, campaign_id: &str) -> bool {
        self.campaigns.remove(campaign_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

/// Lock a shared state, recovering from a poisoned mutex.
pub fn lock_state(state: &Mutex<DiversityState>) -> MutexGuard<'_, DiversityState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_clear() {
        let mut state = DiversityState::new();
        state.record(Category::Style, "studio-minimal");
        state.record(Category::Style, "studio-minimal");
        state.record(Category::Palette, "pastel-soft");

        assert_eq!(state.used(Category::Style).len(), 1);
        assert!(state.is_used(Category::Palette, "pastel-soft"));
        assert!(!state.is_used(Category::Context, "pastel-soft"));
        assert_eq!(state.history().len(), 3);

        state.clear();
        assert!(state.is_empty());
        assert!(state.used(Category::Style).is_empty());
    }

    #[test]
    fn test_campaigns_are_independent() {
        let mut registry = CampaignDiversity::new();
        let spring = registry.state("spring");
        let autumn = registry.state("autumn");

        lock_state(&spring).record(Category::Lighting, "blue-hour");
        assert!(lock_state(&autumn).is_empty());

        // Same campaign id yields the same shared state
        let spring_again = registry.state("spring");
        assert!(lock_state(&spring_again).is_used(Category::Lighting, "blue-hour"));

        registry.reset("spring");
        assert!(lock_state(&spring).is_empty());

        assert!(registry.remove("autumn"));
        assert!(!registry.remove("autumn"));
        assert_eq!(registry.len(), 1);
    }
}
