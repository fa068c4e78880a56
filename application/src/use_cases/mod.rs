//! Use cases (application services)

pub mod analyze_content;
pub mod resolve_structured;
pub mod route_query;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod scripted;
