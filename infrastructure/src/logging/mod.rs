//! Logging infrastructure - structured stage logging.
//!
//! Provides [`JsonlStageLogger`], a JSONL file writer that implements
//! the [`StageObserver`](secscope_application::StageObserver) port.

mod stage_logger;

pub use stage_logger::JsonlStageLogger;
