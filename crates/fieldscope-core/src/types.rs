//! Data model shared between the widgets and the remote controller

use serde::{Deserialize, Serialize};

/// Tool record as the registry controller returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    /// Stable unique identifier
    pub developer_name: String,
    /// Display label
    pub label: String,
    /// Short description shown on the tile
    #[serde(default)]
    pub description: String,
    /// Target the tile navigates to
    #[serde(default)]
    pub navigation_url: String,
}

/// Launcher tile backing a single tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tool {
    /// Stable key, taken from the record's developer name
    pub key: String,
    /// Display label
    pub label: String,
    /// Short description shown on the tile
    pub description: String,
    /// Target the tile navigates to
    pub navigation_url: String,
}

impl From<ToolRecord> for Tool {
    fn from(record: ToolRecord) -> Self {
        Self {
            key: record.developer_name,
            label: record.label,
            description: record.description,
            navigation_url: record.navigation_url,
        }
    }
}

/// A selectable profile, keyed by its opaque platform id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOption {
    /// Opaque profile id
    pub value: String,
    /// Display label
    pub label: String,
}

/// Outcome of one validation run, as the controller reports it
///
/// `error_message` is present exactly when `success` is false. Entries of
/// `missing_permissions` are formatted `"<Context>: <Object>.<Field>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Whether the controller completed the check
    pub success: bool,
    /// Name of the profile that was checked
    #[serde(default)]
    pub profile_name: Option<String>,
    /// How many fields the controller inspected
    #[serde(default)]
    pub total_fields_checked: u32,
    /// Missing permission descriptions, in controller order
    #[serde(default)]
    pub missing_permissions: Vec<String>,
    /// Objects covered by the check, in controller order
    #[serde(default)]
    pub objects: Vec<String>,
    /// Failure detail when `success` is false
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ValidationReport {
    /// Whether the run found any missing permissions
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.missing_permissions.is_empty()
    }
}
