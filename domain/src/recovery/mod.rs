//! Structured-output recovery.
//!
//! Pure building blocks used by the escalating retry policy:
//!
//! - [`extract`] - pull one JSON object out of free-form text
//! - [`truncation`] - decide whether output was cut off
//! - [`sanitize`] - clamp bounded score fields into [0, 1]
//! - [`attempt`] - stages, failures and generation attempts
//! - [`result`] - [`RecoveryResult`](result::RecoveryResult) and its wrapper

pub mod attempt;
pub mod extract;
pub mod result;
pub mod sanitize;
pub mod truncation;

pub use attempt::{AttemptOutcome, GenerationAttempt, Stage, StageFailure};
pub use extract::{JsonObject, extract_json, strip_fences};
pub use result::{DEFAULT_RAW_OUTPUT_LIMIT, RawFallback, RecoveryResult, Resolution};
pub use sanitize::{sanitize_bounded_fields, unit_score};
pub use truncation::looks_truncated;
