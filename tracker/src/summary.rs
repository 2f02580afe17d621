//! Run aggregation: pass counts, percentage score and the rendered text that
//! goes into the tracking record.

use crate::probe::TestResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const STATUS_DONE: &str = "Done";
pub const STATUS_IN_PROGRESS: &str = "En cours";

/// HTTP code a probe must return to pass, and the score from which a run is
/// labelled done.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub expected_status: u16,
    pub done_threshold: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            expected_status: 200,
            done_threshold: 80.0,
        }
    }
}

impl ScoringPolicy {
    pub fn with_expected_status(mut self, expected_status: u16) -> Self {
        self.expected_status = expected_status;
        self
    }

    pub fn with_done_threshold(mut self, done_threshold: f64) -> Self {
        self.done_threshold = done_threshold;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(100..=599).contains(&self.expected_status) {
            return Err(format!(
                "Expected status {} is not an HTTP status code",
                self.expected_status
            ));
        }

        if !(0.0..=100.0).contains(&self.done_threshold) {
            return Err("Done threshold must be between 0 and 100".to_string());
        }

        Ok(())
    }

    /// Inclusive: a score equal to the threshold is done.
    pub fn status_label(&self, score: f64) -> &'static str {
        if score >= self.done_threshold {
            STATUS_DONE
        } else {
            STATUS_IN_PROGRESS
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub score: f64,
}

impl RunSummary {
    pub fn from_counts(passed: usize, total: usize) -> Self {
        let score = if total == 0 {
            0.0
        } else {
            round_to(passed as f64 / total as f64 * 100.0, 1)
        };

        Self {
            total,
            passed,
            score,
        }
    }

    pub fn from_results(results: &[TestResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        Self::from_counts(passed, results.len())
    }

    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    /// Multi-line text stored in the record's description.
    pub fn render(&self, results: &[TestResult]) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "Tests exécutés: {}", self.total);
        let _ = writeln!(text, "Réussis: {}", self.passed);
        let _ = writeln!(text, "Score: {}%", format_score(self.score));
        text.push('\n');

        for result in results {
            let _ = writeln!(
                text,
                "{} {}: {}",
                result.status.glyph(),
                result.test,
                result.status
            );
            if let Some(load_time) = result.load_time() {
                let _ = writeln!(text, "   Temps: {}s", load_time);
            }
        }

        text
    }
}

/// Always shows one decimal, so `75` renders as `75.0`.
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
