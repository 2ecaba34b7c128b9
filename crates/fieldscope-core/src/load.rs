//! Load lifecycle shared by the list-backed widgets
//!
//! Each widget instance owns its own lifecycle state; nothing is shared or
//! cached across instances.

/// Lifecycle of a once-per-instance remote list fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No fetch has been issued yet
    #[default]
    NotLoaded,
    /// A fetch is in flight
    Loading,
    /// The fetch completed and the list is usable (possibly empty)
    Loaded,
    /// The fetch failed with a user-facing message
    Failed(String),
}

impl LoadState {
    /// Whether a fetch completed successfully
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }

    /// Whether a fetch is currently in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The failure message, when the fetch failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
