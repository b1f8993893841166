//! Captures formatted log output for assertions

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;

/// In-memory log sink shared with the fmt subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines logged at `level` that contain `needle`
    pub fn matching(&self, level: Level, needle: &str) -> Vec<String> {
        let level = level.to_string();
        self.lines()
            .into_iter()
            .filter(|line| line.contains(&level) && line.contains(needle))
            .collect()
    }

    pub fn at_level(&self, level: Level) -> Vec<String> {
        self.matching(level, "")
    }
}

/// Run `f` with a plain-text subscriber writing into a fresh capture
pub fn capture_logs<T>(max_level: Level, f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(max_level)
        .with_ansi(false)
        .finish();

    let output = tracing::subscriber::with_default(subscriber, f);
    (output, logs)
}
