//! Stage progress reporting

pub mod reporter;
