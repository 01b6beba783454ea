use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::Mutex,
};

use crate::trace::trace::TraceEvent;

/// JSONL sink for per-request classification outcomes.
///
/// Tracing never fails a request: open and write errors are logged and the
/// record is dropped.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    /// Append to `path` when given; otherwise records go nowhere.
    pub fn open(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self { sink: None };
        };

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(Mutex::new(file)),
            },
            Err(e) => {
                tracing::warn!(path, error = %e, "could not open trace file, tracing disabled");
                Self { sink: None }
            }
        }
    }

    /// Write `event` as one JSON line.
    pub fn record(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(request = %event.request, error = %e, "unserializable trace event");
                return;
            }
        };

        let Ok(mut file) = sink.lock() else {
            tracing::warn!(request = %event.request, "trace sink poisoned, dropping event");
            return;
        };

        if let Err(e) = writeln!(file, "{}", line) {
            tracing::warn!(
                request = %event.request,
                package = %event.package,
                error = %e,
                "failed to append trace event"
            );
        }
    }
}
