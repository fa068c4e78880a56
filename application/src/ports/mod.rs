//! Port definitions (interfaces for external adapters)

pub mod stage_observer;
pub mod text_generator;
