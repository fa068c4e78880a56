//! Recovery parameters - retry policy control.
//!
//! [`RecoveryParams`] groups the knobs of the escalating retry policy that
//! are not tool-specific. Per-tool budgets and models live on
//! [`ToolSpec`](secscope_domain::ToolSpec).

use secscope_domain::DEFAULT_RAW_OUTPUT_LIMIT;
use serde::{Deserialize, Serialize};

/// Default max-output-token budget for the router's tool vote.
pub const DEFAULT_ROUTER_MAX_TOKENS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryParams {
    /// Character bound applied to each raw text in a fallback payload.
    pub raw_output_limit: usize,
    /// Whether the continuation stage runs for truncated output.
    pub continuation: bool,
    /// Output budget for the routing vote.
    pub router_max_tokens: u32,
}

impl Default for RecoveryParams {
    fn default() -> Self {
        Self {
            raw_output_limit: DEFAULT_RAW_OUTPUT_LIMIT,
            continuation: true,
            router_max_tokens: DEFAULT_ROUTER_MAX_TOKENS,
        }
    }
}

impl RecoveryParams {
    // ==================== Builder Methods ====================

    pub fn with_raw_output_limit(mut self, limit: usize) -> Self {
        self.raw_output_limit = limit;
        self
    }

    pub fn with_continuation(mut self, enabled: bool) -> Self {
        self.continuation = enabled;
        self
    }

    pub fn with_router_max_tokens(mut self, max: u32) -> Self {
        self.router_max_tokens = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RecoveryParams::default();
        assert_eq!(params.raw_output_limit, 1200);
        assert!(params.continuation);
        assert_eq!(params.router_max_tokens, 40);
    }

    #[test]
    fn test_builder() {
        let params = RecoveryParams::default()
            .with_raw_output_limit(50)
            .with_continuation(false)
            .with_router_max_tokens(10);
        assert_eq!(params.raw_output_limit, 50);
        assert!(!params.continuation);
        assert_eq!(params.router_max_tokens, 10);
    }
}
