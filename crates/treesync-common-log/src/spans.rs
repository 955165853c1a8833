//! Span helpers and timing for pipeline phases.

use tracing::{info_span, Span};

/// Create a span for one pipeline phase over a root directory.
pub fn phase_span(phase: &str, root: &str) -> Span {
    info_span!("phase", name = %phase, root = %root)
}

/// Create a span for a single tracked move.
pub fn rename_span(from: &str, to: &str) -> Span {
    info_span!("rename", from = %from, to = %to)
}

/// Create a span for a file operation.
pub fn file_span(operation: &str, path: &str) -> Span {
    info_span!("file", op = %operation, path = %path)
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
    }
}
