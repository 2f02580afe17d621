//! Operator notifications written to the tracking database, such as an alert
//! when the application stops answering.

use crate::probe::TestResult;
use crate::record::{iso_timestamp, PropertyNames, TrackingRecord};
use crate::report::{deliver, ReportOutcome};
use crate::summary::STATUS_DONE;
use chrono::{DateTime, Local};
use notion::DatabaseClient;
use serde::{Deserialize, Serialize};

pub const STATUS_ERROR: &str = "Erreur";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

impl NotificationLevel {
    pub fn status_label(&self) -> &'static str {
        match self {
            NotificationLevel::Info => STATUS_DONE,
            NotificationLevel::Error => STATUS_ERROR,
        }
    }

    pub fn progress(&self) -> f64 {
        match self {
            NotificationLevel::Info => 100.0,
            NotificationLevel::Error => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }

    /// Alert for a probe that did not pass; `None` for a passing result.
    pub fn for_failed_probe(result: &TestResult) -> Option<Self> {
        let reason = result.failure_reason()?;
        Some(Self::error(
            "Erreur Application",
            format!("Application inaccessible ({}): {}", result.url, reason),
        ))
    }

    pub fn to_record(&self, now: &DateTime<Local>) -> TrackingRecord {
        TrackingRecord {
            title: self.title.clone(),
            status: self.level.status_label().to_string(),
            progress: self.level.progress(),
            description: self.message.clone(),
            date: iso_timestamp(now),
        }
    }
}

pub async fn send_notification(
    client: &dyn DatabaseClient,
    database_id: &str,
    properties: &PropertyNames,
    notification: &Notification,
) -> ReportOutcome {
    let request = notification
        .to_record(&Local::now())
        .to_page_request(database_id, properties);

    let outcome = deliver(client, request, "notification").await;
    if outcome.is_delivered() {
        println!("✅ Notification sent to Notion: {}", notification.title);
    }
    outcome
}
