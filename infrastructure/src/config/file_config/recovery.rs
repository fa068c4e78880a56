//! Retry policy configuration from TOML (`[recovery]` section)

use secscope_application::RecoveryParams;
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [recovery]
/// raw_output_limit = 1200
/// continuation = true
/// router_max_tokens = 40
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecoveryConfig {
    pub raw_output_limit: usize,
    pub continuation: bool,
    pub router_max_tokens: u32,
}

impl Default for FileRecoveryConfig {
    fn default() -> Self {
        let params = RecoveryParams::default();
        Self {
            raw_output_limit: params.raw_output_limit,
            continuation: params.continuation,
            router_max_tokens: params.router_max_tokens,
        }
    }
}

impl FileRecoveryConfig {
    pub fn to_recovery_params(&self) -> RecoveryParams {
        RecoveryParams::default()
            .with_raw_output_limit(self.raw_output_limit)
            .with_continuation(self.continuation)
            .with_router_max_tokens(self.router_max_tokens)
    }
}
