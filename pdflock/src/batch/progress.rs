//! Progress reporting for batch runs.

use serde::Serialize;

use crate::transform::TransformOutcome;

/// Published after each file of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// 1-based position of the file in the run.
    pub index: usize,
    /// Number of files in the run.
    pub total: usize,
    /// What happened to the file.
    pub outcome: TransformOutcome,
    /// Successes so far, including this file.
    pub succeeded: usize,
    /// Failures so far, including this file.
    pub failed: usize,
    /// Whether the file was only previewed.
    pub dry_run: bool,
}

impl ProgressEvent {
    /// Get progress percentage (0.0 - 100.0).
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.index as f64 / self.total as f64) * 100.0
        }
    }

    /// Whether this is the last file of the run.
    pub fn is_last(&self) -> bool {
        self.index >= self.total
    }

    /// Format progress as a string.
    pub fn format_progress(&self) -> String {
        format!(
            "{}/{} ({:.1}%) - {} failed",
            self.index,
            self.total,
            self.percentage(),
            self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(index: usize, total: usize) -> ProgressEvent {
        ProgressEvent {
            index,
            total,
            outcome: TransformOutcome::succeeded("a.pdf"),
            succeeded: index,
            failed: 0,
            dry_run: false,
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(event(1, 4).percentage(), 25.0);
        assert_eq!(event(4, 4).percentage(), 100.0);
        assert_eq!(event(0, 0).percentage(), 100.0);
    }

    #[test]
    fn test_is_last() {
        assert!(!event(1, 2).is_last());
        assert!(event(2, 2).is_last());
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(event(1, 4).format_progress(), "1/4 (25.0%) - 0 failed");
    }
}
