//! Application-level configuration.
//!
//! - [`RecoveryParams`] - retry policy control (fallback bounds, continuation, router budget)

pub mod recovery_params;

pub use recovery_params::{DEFAULT_ROUTER_MAX_TOKENS, RecoveryParams};
