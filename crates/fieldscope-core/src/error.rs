//! Error types for widget operations

use thiserror::Error;

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors raised by the widget controllers before any remote call is made
///
/// Remote-side failures never surface here; they settle into the widget's
/// run state as user-facing messages instead.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// A validation run was requested with no profile selected
    #[error("Please select a profile before running validation.")]
    NoProfileSelected,

    /// An export was requested while no successful result is held
    #[error("No validation result available to export.")]
    NothingToExport,
}
