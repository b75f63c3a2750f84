//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for list commands.
const fn default_limit() -> u32 {
    10
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimisticMode {
    /// Wait for the server, then update local state.
    #[default]
    ConfirmThenApply,
    /// Update local state first; roll back if the server rejects the change.
    ApplyThenConfirm,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default page size for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    #[serde(default)]
    pub optimistic: OptimisticMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            optimistic: OptimisticMode::default(),
        }
    }
}
