//! Remote controller contract
//!
//! The permission checks themselves run server-side in an Apex controller.
//! Widgets reach it through this trait so the transport stays swappable and
//! tests can stand in a scripted double.

use crate::types::{ProfileOption, ToolRecord, ValidationReport};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure of a remote controller call
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// The controller rejected the call with a structured message in the body
    #[error("{0}")]
    Server(String),

    /// The call failed below the controller: connection, timeout, bad payload
    #[error("request failed: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Best available user-facing message: the structured server message when
    /// one was returned, else the plain transport message.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            GatewayError::Server(message) | GatewayError::Transport(message) => message,
        };
        if message.is_empty() {
            "An unexpected error occurred".to_string()
        } else {
            message.clone()
        }
    }
}

/// Remote controller operations used by the widgets
///
/// All calls are asynchronous and may reject with a [`GatewayError`]. The
/// widgets never retry or time out on their own.
#[async_trait]
pub trait ApexGateway: Send + Sync {
    /// Fetch the registered dev tools for the launcher
    async fn get_tools(&self) -> GatewayResult<Vec<ToolRecord>>;

    /// Fetch the profiles the validator can run against
    async fn get_available_profiles(&self) -> GatewayResult<Vec<ProfileOption>>;

    /// Run the FLS check for one profile
    async fn validate_profile_fls(&self, profile_id: &str) -> GatewayResult<ValidationReport>;

    /// Run the FLS check for the fixed admin profile
    async fn validate_sys_admin_fls(&self) -> GatewayResult<ValidationReport>;
}
