//! Validator controller scenarios
//!
//! Drives the widget controller against a scripted gateway double.

use async_trait::async_trait;
use fieldscope_core::gateway::{ApexGateway, GatewayError, GatewayResult};
use fieldscope_core::profile::PROFILE_LOAD_ERROR;
use fieldscope_core::run::{RunState, UNKNOWN_ERROR_MESSAGE};
use fieldscope_core::transform::SortDirection;
use fieldscope_core::types::{ProfileOption, ToolRecord, ValidationReport};
use fieldscope_core::validator::SummaryTone;
use fieldscope_core::ProfileValidator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Gateway double with scripted responses and call counting
struct ScriptedGateway {
    profiles: GatewayResult<Vec<ProfileOption>>,
    validation: GatewayResult<ValidationReport>,
    validate_calls: AtomicUsize,
}

impl ScriptedGateway {
    fn new(
        profiles: GatewayResult<Vec<ProfileOption>>,
        validation: GatewayResult<ValidationReport>,
    ) -> Arc<Self> {
        Arc::new(Self {
            profiles,
            validation,
            validate_calls: AtomicUsize::new(0),
        })
    }

    fn validate_call_count(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApexGateway for ScriptedGateway {
    async fn get_tools(&self) -> GatewayResult<Vec<ToolRecord>> {
        unimplemented!("not used by the validator")
    }

    async fn get_available_profiles(&self) -> GatewayResult<Vec<ProfileOption>> {
        self.profiles.clone()
    }

    async fn validate_profile_fls(&self, _profile_id: &str) -> GatewayResult<ValidationReport> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.validation.clone()
    }

    async fn validate_sys_admin_fls(&self) -> GatewayResult<ValidationReport> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.validation.clone()
    }
}

fn sys_admin_options() -> Vec<ProfileOption> {
    vec![
        ProfileOption {
            value: "00e1".to_string(),
            label: "Standard User".to_string(),
        },
        ProfileOption {
            value: "00e2".to_string(),
            label: "System Administrator".to_string(),
        },
    ]
}

fn clean_report() -> ValidationReport {
    ValidationReport {
        success: true,
        profile_name: Some("System Administrator".to_string()),
        total_fields_checked: 120,
        ..ValidationReport::default()
    }
}

fn report_with_issues() -> ValidationReport {
    ValidationReport {
        success: true,
        profile_name: Some("System Administrator".to_string()),
        total_fields_checked: 120,
        missing_permissions: vec![
            "Edit access missing: Case.Subject".to_string(),
            "Edit access missing: Account.Name".to_string(),
            "Edit access missing: Lead.Email".to_string(),
        ],
        objects: vec!["Account".to_string(), "Case".to_string(), "Lead".to_string()],
        ..ValidationReport::default()
    }
}

#[tokio::test]
async fn run_without_selection_is_rejected_before_the_remote_call() {
    let gateway = ScriptedGateway::new(Ok(vec![]), Ok(clean_report()));
    let mut validator = ProfileValidator::new(gateway.clone());

    validator.load_profiles().await;
    let result = validator.run_validation().await;

    assert!(result.is_err());
    assert_eq!(validator.run_state(), &RunState::Idle);
    assert_eq!(gateway.validate_call_count(), 0);
    assert_eq!(
        validator.error_message(),
        Some("Please select a profile before running validation.")
    );
}

#[tokio::test]
async fn clean_run_succeeds_without_issues() {
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(clean_report()));
    let mut validator = ProfileValidator::new(gateway.clone());

    validator.load_profiles().await;
    assert!(!validator.is_run_disabled());

    validator.run_validation().await.expect("Run should start");

    assert!(validator.show_results());
    assert_eq!(gateway.validate_call_count(), 1);
    assert_eq!(validator.missing_permission_count(), 0);
    assert!(!validator.has_filtered_results());
    assert_eq!(
        validator.info_message(),
        Some("System Administrator permissions are correctly configured.")
    );

    let summary = validator.summary().expect("Summary should be present");
    assert_eq!(summary.tone, SummaryTone::Success);
    assert_eq!(summary.subtitle, "No missing field edit permissions were found.");
}

#[tokio::test]
async fn run_with_issues_surfaces_counts_and_warning_summary() {
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(report_with_issues()));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    assert_eq!(validator.missing_permission_count(), 3);
    assert_eq!(validator.object_count(), 3);
    assert_eq!(
        validator.info_message(),
        Some("Found 3 missing permissions for System Administrator.")
    );
    assert_eq!(
        validator.summary().expect("Summary should be present").tone,
        SummaryTone::Warning
    );

    // Default view: full set, ascending, positionally keyed
    let rows = validator.displayed_missing_permissions();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].label, "Edit access missing: Account.Name");
    assert_eq!(rows[0].key, "0-Edit access missing: Account.Name");
    assert_eq!(rows[2].label, "Edit access missing: Lead.Email");
}

#[tokio::test]
async fn filter_applies_before_sort_and_recomputes_per_read() {
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(report_with_issues()));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    validator.set_filter_text("case");
    assert_eq!(validator.displayed_missing_permission_count(), 1);
    assert!(validator.has_filtered_results());

    validator.set_filter_text("");
    validator.set_sort(SortDirection::Descending);
    let rows = validator.displayed_missing_permissions();
    assert_eq!(rows[0].label, "Edit access missing: Lead.Email");
    assert_eq!(rows[2].label, "Edit access missing: Account.Name");

    validator.set_filter_text("no such entry");
    assert!(!validator.has_filtered_results());
}

#[tokio::test]
async fn a_new_run_resets_filter_sort_and_messages() {
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(report_with_issues()));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    validator.set_filter_text("case");
    validator.set_sort(SortDirection::Descending);
    assert_eq!(validator.displayed_missing_permission_count(), 1);

    validator.run_validation().await.expect("Run should start");

    let rows = validator.displayed_missing_permissions();
    assert_eq!(rows.len(), 3, "filter should be cleared by the new run");
    assert_eq!(
        rows[0].label, "Edit access missing: Account.Name",
        "sort should be back to ascending"
    );
}

#[tokio::test]
async fn in_band_failure_settles_with_the_server_message() {
    let report = ValidationReport {
        success: false,
        error_message: Some("Profile has been deactivated".to_string()),
        ..ValidationReport::default()
    };
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(report));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    assert!(!validator.show_results());
    assert!(!validator.is_loading());
    assert_eq!(validator.error_message(), Some("Profile has been deactivated"));
    assert!(validator.info_message().is_none());
}

#[tokio::test]
async fn in_band_failure_without_detail_gets_the_generic_message() {
    let report = ValidationReport {
        success: false,
        ..ValidationReport::default()
    };
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(report));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    assert_eq!(validator.error_message(), Some(UNKNOWN_ERROR_MESSAGE));
}

#[tokio::test]
async fn rejection_settles_with_the_extracted_message() {
    let gateway = ScriptedGateway::new(
        Ok(sys_admin_options()),
        Err(GatewayError::Server("boom".to_string())),
    );
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    assert_eq!(validator.run_state(), &RunState::Failed("boom".to_string()));
    assert_eq!(validator.error_message(), Some("boom"));

    // The widget stays re-triggerable
    assert!(!validator.is_run_disabled());
}

#[tokio::test]
async fn profile_load_failure_clears_selection_and_surfaces_the_admin_message() {
    let gateway = ScriptedGateway::new(
        Err(GatewayError::Transport("connection refused".to_string())),
        Ok(clean_report()),
    );
    let mut validator = ProfileValidator::new(gateway.clone());

    validator.load_profiles().await;

    assert!(validator.profiles().options().is_empty());
    assert!(!validator.profiles().has_selection());
    assert_eq!(validator.error_message(), Some(PROFILE_LOAD_ERROR));
    assert!(validator.is_run_disabled());

    // The load error precedes any run error; the remote is never called
    assert!(validator.run_validation().await.is_err());
    assert_eq!(gateway.validate_call_count(), 0);
}

#[tokio::test]
async fn controller_reported_name_overrides_the_display_label() {
    let report = ValidationReport {
        profile_name: Some("System Administrator (Clone)".to_string()),
        ..clean_report()
    };
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(report));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    assert_eq!(
        validator.profiles().selected_label(),
        Some("System Administrator (Clone)")
    );
    assert_eq!(
        validator.info_message(),
        Some("System Administrator (Clone) permissions are correctly configured.")
    );
}

#[tokio::test]
async fn sys_admin_run_needs_no_selection() {
    let gateway = ScriptedGateway::new(Ok(vec![]), Ok(clean_report()));
    let mut validator = ProfileValidator::new(gateway.clone());

    validator.run_sys_admin_validation().await;

    assert!(validator.show_results());
    assert_eq!(gateway.validate_call_count(), 1);
}

#[tokio::test]
async fn export_builds_the_csv_artifact_from_the_full_result_set() {
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(report_with_issues()));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    validator.run_validation().await.expect("Run should start");

    // The filtered view must not narrow the export
    validator.set_filter_text("case");

    let export = validator.export_csv().expect("Export should be available");
    assert_eq!(
        export.filename,
        "System_Administrator_Missing_FLS_Permissions.csv"
    );
    assert_eq!(
        export.content,
        "Object,Field,Issue\n\
         \"Case\",\"Subject\",\"Edit Access Missing\"\n\
         \"Account\",\"Name\",\"Edit Access Missing\"\n\
         \"Lead\",\"Email\",\"Edit Access Missing\""
    );
    assert_eq!(validator.info_message(), Some("CSV downloaded with 3 records."));
}

#[tokio::test]
async fn export_without_a_result_is_rejected() {
    let gateway = ScriptedGateway::new(Ok(sys_admin_options()), Ok(clean_report()));
    let mut validator = ProfileValidator::new(gateway);

    validator.load_profiles().await;
    assert!(validator.export_csv().is_err());
}
