//! Commit events turned into tracking records. Progress is estimated from
//! keywords in the commit message.

use crate::record::{iso_timestamp, PropertyNames, TrackingRecord};
use crate::report::{deliver, ReportOutcome};
use crate::summary::STATUS_IN_PROGRESS;
use chrono::{DateTime, FixedOffset, Local};
use notion::DatabaseClient;
use serde::{Deserialize, Serialize};

pub const STATUS_FINISHED: &str = "Terminé";

const TITLE_PREVIEW_CHARS: usize = 50;

const PROGRESS_KEYWORDS: &[(&str, u32)] = &[
    ("init", 10),
    ("setup", 15),
    ("feature", 30),
    ("fix", 5),
    ("refactor", 10),
    ("test", 20),
    ("deploy", 25),
    ("complete", 40),
];

/// Sum of the weights of every keyword present, capped at 100.
pub fn calculate_progress(message: &str) -> u32 {
    let message = message.to_lowercase();
    let progress: u32 = PROGRESS_KEYWORDS
        .iter()
        .filter(|(keyword, _)| message.contains(keyword))
        .map(|(_, weight)| weight)
        .sum();
    progress.min(100)
}

pub fn determine_status(message: &str) -> &'static str {
    let message = message.to_lowercase();
    if message.contains("error") || message.contains("fix") {
        return STATUS_IN_PROGRESS;
    }
    if message.contains("complete") || message.contains("deploy") {
        return STATUS_FINISHED;
    }
    STATUS_IN_PROGRESS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEvent {
    pub message: String,
    pub author: Option<String>,
    pub branch: Option<String>,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl CommitEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            author: None,
            branch: None,
            timestamp: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn to_record(&self, now: &DateTime<Local>) -> TrackingRecord {
        let preview: String = self.message.chars().take(TITLE_PREVIEW_CHARS).collect();
        let date = match &self.timestamp {
            Some(ts) => iso_timestamp(ts),
            None => iso_timestamp(now),
        };

        TrackingRecord {
            title: format!("Commit: {}...", preview),
            status: determine_status(&self.message).to_string(),
            progress: f64::from(calculate_progress(&self.message)),
            description: format!(
                "Auteur: {}, Branche: {}",
                self.author.as_deref().unwrap_or("Inconnu"),
                self.branch.as_deref().unwrap_or("main")
            ),
            date,
        }
    }
}

pub async fn track_commit(
    client: &dyn DatabaseClient,
    database_id: &str,
    properties: &PropertyNames,
    event: &CommitEvent,
) -> ReportOutcome {
    let record = event.to_record(&Local::now());
    println!(
        "Commit tracked: progress {}%, status {}",
        record.progress, record.status
    );
    deliver(
        client,
        record.to_page_request(database_id, properties),
        "commit event",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_progress_sums_keywords() {
        assert_eq!(calculate_progress("init project setup"), 25);
        assert_eq!(calculate_progress("Add FEATURE with tests"), 50);
        assert_eq!(calculate_progress("update readme"), 0);
    }

    #[test]
    fn test_progress_capped_at_100() {
        assert_eq!(
            calculate_progress("complete feature, deploy, test and refactor"),
            100
        );
    }

    #[test]
    fn test_status_rules() {
        assert_eq!(determine_status("Fix login error"), "En cours");
        assert_eq!(determine_status("fix deploy script"), "En cours");
        assert_eq!(determine_status("Deploy v2"), "Terminé");
        assert_eq!(determine_status("Complete onboarding"), "Terminé");
        assert_eq!(determine_status("wip"), "En cours");
    }

    #[test]
    fn test_record_defaults() {
        let now = Local.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let record = CommitEvent::new("feature: add tracker").to_record(&now);

        assert_eq!(record.title, "Commit: feature: add tracker...");
        assert_eq!(record.description, "Auteur: Inconnu, Branche: main");
        assert_eq!(record.progress, 30.0);
        assert!(record.date.starts_with("2026-10-17T12:00:00"));
    }

    #[test]
    fn test_record_with_details() {
        let now = Local.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let ts = DateTime::parse_from_rfc3339("2026-10-16T18:45:00+00:00").unwrap();
        let message = "x".repeat(80);
        let record = CommitEvent::new(message)
            .with_author("ada")
            .with_branch("develop")
            .with_timestamp(ts)
            .to_record(&now);

        assert_eq!(record.title, format!("Commit: {}...", "x".repeat(50)));
        assert_eq!(record.description, "Auteur: ada, Branche: develop");
        assert_eq!(record.date, "2026-10-16T18:45:00+00:00");
    }
}
