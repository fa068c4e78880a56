//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - generative model tiers (fast/cheap and strong)
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
