//! Tool launcher widget controller

use crate::gateway::ApexGateway;
use crate::load::LoadState;
use crate::types::Tool;
use std::sync::Arc;
use tracing::{debug, warn};

/// Message surfaced when the tool list cannot be fetched
pub const TOOLS_LOAD_ERROR: &str = "Unable to load tools. Contact your Salesforce admin.";

/// Controller behind the tool-launcher tile list
///
/// The tool list is fetched once per instance; tiles are immutable after.
pub struct ToolLauncher {
    gateway: Arc<dyn ApexGateway>,
    tools: Vec<Tool>,
    state: LoadState,
}

impl ToolLauncher {
    /// New controller wired to a remote gateway; nothing is fetched yet
    #[must_use]
    pub fn new(gateway: Arc<dyn ApexGateway>) -> Self {
        Self {
            gateway,
            tools: Vec::new(),
            state: LoadState::NotLoaded,
        }
    }

    /// Fetch the registered tools. A failure clears the list and surfaces a
    /// persistent message; calling again retries.
    pub async fn load_tools(&mut self) {
        self.state = LoadState::Loading;
        match self.gateway.get_tools().await {
            Ok(records) => {
                debug!(count = records.len(), "tool registry loaded");
                self.tools = records.into_iter().map(Tool::from).collect();
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "tool registry fetch failed");
                self.tools.clear();
                self.state = LoadState::Failed(TOOLS_LOAD_ERROR.to_string());
            }
        }
    }

    /// The launcher tiles, in registry order
    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Whether any tiles are available
    #[must_use]
    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    /// The load failure message, when the fetch failed
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.state.error()
    }

    /// Lifecycle of the tool fetch
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// Resolve a tile's navigation target. Unknown keys and tiles without a
    /// URL yield `None`; navigating is the host's concern.
    #[must_use]
    pub fn navigation_target(&self, key: &str) -> Option<&str> {
        self.tools
            .iter()
            .find(|tool| tool.key == key)
            .map(|tool| tool.navigation_url.as_str())
            .filter(|url| !url.is_empty())
    }
}
