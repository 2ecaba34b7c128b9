//! Profile FLS validator widget controller
//!
//! Composes the profile selection, the run state machine, and the
//! filter/sort pipeline, and produces the view-model fields the hosting
//! layer renders. One controller instance per widget session.

use crate::csv::{build_csv, derive_filename};
use crate::error::{WidgetError, WidgetResult};
use crate::gateway::{ApexGateway, GatewayResult};
use crate::profile::{ProfileSelection, DEFAULT_PROFILE_LABEL, PROFILE_LOAD_ERROR};
use crate::run::RunState;
use crate::transform::{filter_by_text, parse_permission, sort_permissions, SortDirection};
use crate::types::ValidationReport;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Filename suffix for the exported CSV artifact
pub const CSV_FILENAME_SUFFIX: &str = "Missing_FLS_Permissions.csv";

const CSV_HEADERS: [&str; 3] = ["Object", "Field", "Issue"];
const CSV_ISSUE_LABEL: &str = "Edit Access Missing";

/// One displayed permission entry, keyed for list rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRow {
    /// Render key, unique within one derived view
    pub key: String,
    /// The permission description as the controller returned it
    pub label: String,
}

/// Visual weight of the result summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryTone {
    /// No missing permissions were found
    Success,
    /// The run surfaced missing permissions
    Warning,
}

/// Result summary panel fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    /// Panel tone
    pub tone: SummaryTone,
    /// One-line explanation under the headline
    pub subtitle: &'static str,
}

/// A ready-to-write CSV artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Derived download filename
    pub filename: String,
    /// CSV text payload
    pub content: String,
}

/// Controller behind the profile validator panel
pub struct ProfileValidator {
    gateway: Arc<dyn ApexGateway>,
    profiles: ProfileSelection,
    run: RunState,
    filter_text: String,
    sort: SortDirection,
    info_message: Option<String>,
    surface_error: Option<String>,
}

impl ProfileValidator {
    /// New controller wired to a remote gateway; nothing is fetched yet
    #[must_use]
    pub fn new(gateway: Arc<dyn ApexGateway>) -> Self {
        Self {
            gateway,
            profiles: ProfileSelection::new(),
            run: RunState::Idle,
            filter_text: String::new(),
            sort: SortDirection::Ascending,
            info_message: None,
            surface_error: None,
        }
    }

    /// Fetch the selectable profiles and apply the default-selection policy.
    ///
    /// A failed fetch clears options and selection and surfaces a persistent
    /// message; it is independent of any later run error and retryable by
    /// calling this again.
    pub async fn load_profiles(&mut self) {
        self.profiles.begin_load();
        match self.gateway.get_available_profiles().await {
            Ok(options) => {
                debug!(count = options.len(), "profile options loaded");
                self.profiles.load_succeeded(options);
            }
            Err(err) => {
                warn!(error = %err, "profile option fetch failed");
                self.profiles.load_failed(PROFILE_LOAD_ERROR);
                self.surface_error = Some(PROFILE_LOAD_ERROR.to_string());
                self.info_message = None;
            }
        }
    }

    /// Change the selected profile by id
    pub fn select_profile(&mut self, id: &str) {
        self.profiles.select(id);
    }

    /// Run the FLS check against the selected profile.
    ///
    /// Rejected before any remote call when no profile is selected. While a
    /// run is in flight re-entry is the host's concern via
    /// [`is_run_disabled`](Self::is_run_disabled); a second run simply starts
    /// a fresh attempt and the attempt that settles last wins.
    ///
    /// # Errors
    /// [`WidgetError::NoProfileSelected`] when the guard rejects the request.
    pub async fn run_validation(&mut self) -> WidgetResult<()> {
        let Some(profile_id) = self.profiles.selected_id().map(str::to_string) else {
            let err = WidgetError::NoProfileSelected;
            self.surface_error = Some(err.to_string());
            return Err(err);
        };

        self.begin_run();
        let started = Utc::now();
        let outcome = self.gateway.validate_profile_fls(&profile_id).await;
        self.settle_run(outcome, None, started);
        Ok(())
    }

    /// Run the FLS check against the fixed admin profile; no selection needed
    pub async fn run_sys_admin_validation(&mut self) {
        self.begin_run();
        let started = Utc::now();
        let outcome = self.gateway.validate_sys_admin_fls().await;
        self.settle_run(outcome, Some(DEFAULT_PROFILE_LABEL), started);
    }

    /// Reset the result surface for a fresh attempt
    fn begin_run(&mut self) {
        self.run.begin();
        self.surface_error = None;
        self.info_message = None;
        self.filter_text.clear();
        self.sort = SortDirection::Ascending;
    }

    fn settle_run(
        &mut self,
        outcome: GatewayResult<ValidationReport>,
        fallback_name: Option<&str>,
        started: chrono::DateTime<Utc>,
    ) {
        if let Ok(report) = &outcome {
            if let Some(name) = &report.profile_name {
                self.profiles.set_display_label(name.clone());
            }
        }

        self.run.settle(outcome);

        match &self.run {
            RunState::Succeeded(report) => {
                let name = self
                    .profiles
                    .selected_label()
                    .or(fallback_name)
                    .unwrap_or(DEFAULT_PROFILE_LABEL)
                    .to_string();
                self.info_message = Some(if report.has_issues() {
                    format!(
                        "Found {} missing permissions for {name}.",
                        report.missing_permissions.len()
                    )
                } else {
                    format!("{name} permissions are correctly configured.")
                });
                debug!(
                    fields = report.total_fields_checked,
                    missing = report.missing_permissions.len(),
                    elapsed_ms = Utc::now().signed_duration_since(started).num_milliseconds(),
                    "validation run settled"
                );
            }
            RunState::Failed(message) => {
                warn!(error = %message, "validation run failed");
            }
            RunState::Idle | RunState::Running => {}
        }
    }

    /// Update the substring filter applied to the displayed list
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    /// Update the sort direction of the displayed list
    pub fn set_sort(&mut self, direction: SortDirection) {
        self.sort = direction;
    }

    /// Build the CSV artifact for the current result.
    ///
    /// Always covers the full result set, not the filtered view. Sets the
    /// info message the widget shows after a download.
    ///
    /// # Errors
    /// [`WidgetError::NothingToExport`] when no successful result is held.
    pub fn export_csv(&mut self) -> WidgetResult<CsvExport> {
        let report = self.run.report().ok_or(WidgetError::NothingToExport)?;

        let rows: Vec<Vec<String>> = report
            .missing_permissions
            .iter()
            .map(|permission| {
                let (object, field) = parse_permission(permission);
                vec![object, field, CSV_ISSUE_LABEL.to_string()]
            })
            .collect();

        let export = CsvExport {
            filename: derive_filename(self.profiles.selected_label(), CSV_FILENAME_SUFFIX),
            content: build_csv(&CSV_HEADERS, &rows),
        };

        self.info_message = Some(format!("CSV downloaded with {} records.", rows.len()));
        Ok(export)
    }

    /// Profile selection state, for option rendering and host-side lookups
    #[must_use]
    pub fn profiles(&self) -> &ProfileSelection {
        &self.profiles
    }

    /// Current run state
    #[must_use]
    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    /// Whether a run is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.run.is_running()
    }

    /// Whether a successful result is available to render
    #[must_use]
    pub fn show_results(&self) -> bool {
        self.run.report().is_some()
    }

    /// Whether the run control should be disabled
    #[must_use]
    pub fn is_run_disabled(&self) -> bool {
        self.run.is_running() || !self.profiles.has_selection()
    }

    /// Current user-facing error, run failure first, else surface errors
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.run.failure().or(self.surface_error.as_deref())
    }

    /// Current user-facing info message
    #[must_use]
    pub fn info_message(&self) -> Option<&str> {
        self.info_message.as_deref()
    }

    /// Count of missing permissions in the full result set
    #[must_use]
    pub fn missing_permission_count(&self) -> usize {
        self.run
            .report()
            .map_or(0, |report| report.missing_permissions.len())
    }

    /// Count of objects covered by the check
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.run.report().map_or(0, |report| report.objects.len())
    }

    /// The filtered, sorted permission list, recomputed on every read.
    ///
    /// Filter applies before sort; row keys are positional within this view.
    #[must_use]
    pub fn displayed_missing_permissions(&self) -> Vec<PermissionRow> {
        let Some(report) = self.run.report() else {
            return Vec::new();
        };

        let filtered = filter_by_text(&report.missing_permissions, &self.filter_text);
        sort_permissions(&filtered, self.sort)
            .into_iter()
            .enumerate()
            .map(|(index, label)| PermissionRow {
                key: format!("{index}-{label}"),
                label,
            })
            .collect()
    }

    /// Count of entries in the displayed view
    #[must_use]
    pub fn displayed_missing_permission_count(&self) -> usize {
        self.displayed_missing_permissions().len()
    }

    /// Whether the displayed view has any entries
    #[must_use]
    pub fn has_filtered_results(&self) -> bool {
        self.displayed_missing_permission_count() > 0
    }

    /// Result summary fields, present once a run succeeded
    #[must_use]
    pub fn summary(&self) -> Option<SummaryView> {
        let report = self.run.report()?;
        Some(if report.has_issues() {
            SummaryView {
                tone: SummaryTone::Warning,
                subtitle: "Issues were found for this profile.",
            }
        } else {
            SummaryView {
                tone: SummaryTone::Success,
                subtitle: "No missing field edit permissions were found.",
            }
        })
    }
}
