//! JSONL file writer for stage events.
//!
//! Each [`StageEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use secscope_application::{StageEvent, StageObserver};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL stage logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file so
/// successive runs share one log. Flushes on `Drop`.
pub struct JsonlStageLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlStageLogger {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create stage log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open stage log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StageObserver for JsonlStageLogger {
    fn on_event(&self, event: &StageEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // payload() is always an object; type + timestamp are merged into it
        let mut record = match event.payload() {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert(
            "type".to_string(),
            Value::String(event.event_type().to_string()),
        );
        record.insert("timestamp".to_string(), Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // JSONL is append-only; flush each line
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlStageLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secscope_domain::{Model, Stage, StageFailure, ToolName};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stages.jsonl");
        let logger = JsonlStageLogger::new(&path).unwrap();

        logger.on_event(&StageEvent::PrimaryAttempted {
            tool: ToolName::Vuln,
            model: Model::Gemini25Flash,
        });
        logger.on_event(&StageEvent::StageFailed {
            tool: ToolName::Vuln,
            stage: Stage::Primary,
            failure: StageFailure::Parse,
        });
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], "primary_attempted");
        assert_eq!(lines[0]["model"], "gemini-2.5-flash");
        assert_eq!(lines[1]["type"], "stage_failed");
        assert_eq!(lines[1]["failure"]["kind"], "parse");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stages.jsonl");

        for _ in 0..2 {
            let logger = JsonlStageLogger::new(&path).unwrap();
            logger.on_event(&StageEvent::FallbackReached {
                tool: ToolName::Config,
                generations: 3,
            });
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["generations"], 3);
        assert_eq!(lines[1]["tool"], "config");
    }
}
