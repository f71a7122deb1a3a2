//! Per-run ingest accounting, for the summary line and the log file.

use std::path::Path;
use std::time::{Duration, Instant};

/// Counters for one ingestion run.
#[derive(Debug)]
pub struct IngestReport {
    pub user: String,
    /// Pages that yielded at least one log node.
    pub pages: u32,
    /// Log entries merged into the ledger.
    pub entries: usize,
    /// Malformed poster nodes skipped.
    pub skipped: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    started: Instant,
    elapsed: Option<Duration>,
}

impl IngestReport {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pages: 0,
            entries: 0,
            skipped: 0,
            cache_hits: 0,
            cache_misses: 0,
            started: Instant::now(),
            elapsed: None,
        }
    }

    /// Stop the clock. Called once, when the walk ends.
    pub(crate) fn finish(&mut self) {
        self.elapsed = Some(self.started.elapsed());
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.started.elapsed())
    }

    /// One-line result for the terminal.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} entries across {} pages in {:.1}s ({} cached, {} fetched{})",
            self.user,
            self.entries,
            self.pages,
            self.elapsed().as_secs_f64(),
            self.cache_hits,
            self.cache_misses,
            if self.skipped > 0 {
                format!(", {} nodes skipped", self.skipped)
            } else {
                String::new()
            },
        )
    }

    /// Append a dated record to the ingest log file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(
            file,
            "[{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.summary(),
        )
    }
}
