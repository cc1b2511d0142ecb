//! JSONL file writer for auction transcript events.
//!
//! Each [`ConversationEvent`] is serialized as a single JSON line with a
//! `type`, a `timestamp`, and a per-file `seq` number, appended to the file
//! via a buffered writer.

use auction_application::{ConversationEvent, ConversationLogger};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

struct Inner {
    writer: BufWriter<File>,
    seq: u64,
}

/// Transcript logger that writes one JSON object per line.
///
/// Thread-safe via a `Mutex` around the buffered writer. Concurrent pipelines
/// may share one logger; `seq` gives the total order of writes. Flushes on `Drop`.
pub struct JsonlConversationLogger {
    inner: Mutex<Inner>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the log file at `path` in append mode.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        debug!("Writing auction transcript to {}", path.display());
        Some(Self {
            inner: Mutex::new(Inner {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Create a fresh `auction-<UTC timestamp>.jsonl` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        Self::new(dir.as_ref().join(format!("auction-{}.jsonl", stamp)))
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent, seq: u64) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        map.insert("seq".to_string(), Value::from(seq));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };

        let record = Self::record(event, inner.seq);
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if writeln!(inner.writer, "{}", line).is_ok() {
            inner.seq += 1;
        }
        // JSONL is append-only; flush every line so a crash loses nothing
        let _ = inner.writer.flush();
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            let _ = inner.writer.flush();
        }
    }
}
