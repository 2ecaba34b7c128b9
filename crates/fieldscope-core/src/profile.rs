//! Profile option list and selection state

use crate::load::LoadState;
use crate::types::ProfileOption;

/// Label preferred by the default-selection policy
pub const DEFAULT_PROFILE_LABEL: &str = "System Administrator";

/// Message surfaced when the profile list cannot be fetched
pub const PROFILE_LOAD_ERROR: &str = "Unable to load profiles. Contact your Salesforce admin.";

/// Selectable profiles and the current selection for one validator instance
///
/// The option list is fetched once at widget initialization. Selection keeps
/// the id and display label in step: the label is always looked up from the
/// option list, and an id with no matching option clears the label.
#[derive(Debug, Default)]
pub struct ProfileSelection {
    options: Vec<ProfileOption>,
    selected_id: Option<String>,
    selected_label: Option<String>,
    state: LoadState,
}

impl ProfileSelection {
    /// Empty selection, nothing loaded yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the option fetch as in flight
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Install fetched options and apply the default-selection policy:
    /// the option labeled "System Administrator" when present, else the
    /// first option, else no selection.
    pub fn load_succeeded(&mut self, options: Vec<ProfileOption>) {
        self.options = options;
        self.state = LoadState::Loaded;

        let default = self
            .options
            .iter()
            .find(|option| option.label == DEFAULT_PROFILE_LABEL)
            .or_else(|| self.options.first());

        match default {
            Some(option) => {
                self.selected_id = Some(option.value.clone());
                self.selected_label = Some(option.label.clone());
            }
            None => {
                self.selected_id = None;
                self.selected_label = None;
            }
        }
    }

    /// Record a fetch failure: options and selection are cleared and the
    /// message is kept for display.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.options.clear();
        self.selected_id = None;
        self.selected_label = None;
        self.state = LoadState::Failed(message.into());
    }

    /// Select an option by id. The label is resolved from the option list;
    /// an unknown id keeps the id but clears the label.
    pub fn select(&mut self, id: &str) {
        self.selected_id = Some(id.to_string());
        self.selected_label = self
            .options
            .iter()
            .find(|option| option.value == id)
            .map(|option| option.label.clone());
    }

    /// Override the display label, e.g. with the name the controller reports
    pub fn set_display_label(&mut self, label: String) {
        self.selected_label = Some(label);
    }

    /// Find an option whose id or label matches, for host-side lookups
    #[must_use]
    pub fn resolve(&self, id_or_label: &str) -> Option<&ProfileOption> {
        self.options
            .iter()
            .find(|option| option.value == id_or_label || option.label == id_or_label)
    }

    /// The fetched options, in returned order
    #[must_use]
    pub fn options(&self) -> &[ProfileOption] {
        &self.options
    }

    /// Currently selected profile id
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Display label of the current selection
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    /// Whether any profile is selected
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selected_id.is_some()
    }

    /// Lifecycle of the option fetch
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }
}
