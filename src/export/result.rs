//! Per-playlist outcomes and the batch result of one export run

use std::path::PathBuf;

/// A playlist that could not be exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub playlist_name: String,
    pub reason: String,
}

/// Result of exporting one playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Success { file_path: PathBuf },
    Failure(ExportFailure),
}

/// Result of an export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub success_count: usize,
    /// Written files, in processing order
    pub exported: Vec<PathBuf>,
    /// Failures, in processing order
    pub failures: Vec<ExportFailure>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one playlist outcome into the batch
    pub fn record(&mut self, outcome: ExportOutcome) {
        match outcome {
            ExportOutcome::Success { file_path } => {
                self.success_count += 1;
                self.exported.push(file_path);
            }
            ExportOutcome::Failure(failure) => self.failures.push(failure),
        }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Render a plain-text summary
    ///
    /// At most `max_listed` failures are listed; the rest are counted in a
    /// trailing `...and N more` line.
    pub fn summary(&self, max_listed: usize) -> String {
        let mut message = String::from("Export complete!\n\n");
        message.push_str(&format!(
            "Successfully exported: {} playlist(s)\n",
            self.success_count
        ));

        if !self.failures.is_empty() {
            message.push_str(&format!("\nErrors ({}):\n", self.failures.len()));
            for failure in self.failures.iter().take(max_listed) {
                message.push_str(&format!("{}: {}\n", failure.playlist_name, failure.reason));
            }
            if self.failures.len() > max_listed {
                message.push_str(&format!(
                    "...and {} more\n",
                    self.failures.len() - max_listed
                ));
            }
        }

        message
    }
}

impl FromIterator<ExportOutcome> for BatchResult {
    fn from_iter<I: IntoIterator<Item = ExportOutcome>>(iter: I) -> Self {
        let mut result = Self::new();
        for outcome in iter {
            result.record(outcome);
        }
        result
    }
}
