//! Routing domain
//!
//! Hybrid tool selection: an explicit keyword precedence table with the
//! model's vote as tie-breaker and last resort.

pub mod precedence;

pub use precedence::{
    DEFAULT_TOOL, ROUTING_RULES, RoutingBasis, RoutingDecision, RoutingRule, parse_vote,
    select_tool,
};
