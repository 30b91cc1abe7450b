//! Optional append-only diagnostic log
//!
//! When enabled, every significant event (startup parameters, raw tool
//! output, invocation failures) is appended to a text file with a timestamp
//! prefix. When the file grows past 100 MiB it is renamed to an `.old`
//! sibling before the next append, and a one-line marker notes the move.
//! Write and rotation failures are reported through `tracing` and otherwise
//! ignored; they never affect metric publishing.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Rotate once the log passes this size.
const MAX_LOG_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// Handle to the diagnostic log sink. Cheap to clone; a disabled logger is
/// a no-op on every call.
#[derive(Debug, Clone)]
pub struct DiagLogger {
    enabled: bool,
    path: PathBuf,
}

impl DiagLogger {
    pub fn new(enabled: bool, path: impl Into<PathBuf>) -> Self {
        Self {
            enabled,
            path: path.into(),
        }
    }

    /// A logger that discards everything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            path: PathBuf::new(),
        }
    }

    /// Append one timestamped message, rotating first if the file is over
    /// the size threshold.
    pub fn log(&self, message: &str) {
        if !self.enabled {
            return;
        }

        let rotated = self.rotate_if_oversized();

        let file = OpenOptions::new().create(true).append(true).open(&self.path);
        let mut file = match file {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to open diagnostic log");
                return;
            }
        };

        if rotated {
            let marker = format!("Old entries have been moved to {}.old\n", self.path.display());
            if let Err(e) = file.write_all(marker.as_bytes()) {
                warn!(error = %e, "failed to write rotation marker");
            }
        }

        let timestamp = Local::now().format("%m/%d/%Y %r");
        let line = format!("MSG : {timestamp} - {message}\n");
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!(path = %self.path.display(), error = %e, "failed to append to diagnostic log");
        }
    }

    /// Rename the log to `<path>.old` when it exceeds the size threshold.
    /// Returns true when a rotation actually happened.
    fn rotate_if_oversized(&self) -> bool {
        let size = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            // Not existing yet is the normal first-run case
            Err(_) => return false,
        };

        if size <= MAX_LOG_SIZE_BYTES {
            return false;
        }

        let mut old_path = self.path.clone().into_os_string();
        old_path.push(".old");
        match std::fs::rename(&self.path, &old_path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to rotate diagnostic log");
                false
            }
        }
    }
}
