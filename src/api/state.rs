//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::Ruleset;

/// Shared application state.
///
/// Holds the ruleset every request is computed against. It is never
/// modified after startup.
#[derive(Clone)]
pub struct AppState {
    ruleset: Arc<Ruleset>,
}

impl AppState {
    /// Creates a new application state with the given ruleset.
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset: Arc::new(ruleset),
        }
    }

    /// Returns a reference to the ruleset.
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Ruleset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_ruleset() {
        let state = AppState::default();
        let clone = state.clone();
        assert!(std::ptr::eq(state.ruleset(), clone.ruleset()));
    }
}
