//! The five-property page shape shared by run reports, notifications and
//! commit events.

use chrono::{DateTime, TimeZone};
use notion::{CreatePageRequest, PropertyValue};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Column names of the tracking database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyNames {
    pub title: String,
    pub status: String,
    pub progress: String,
    pub description: String,
    pub date: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Oracle Portfolio Tracking".to_string(),
            status: "Statut".to_string(),
            progress: "Progression".to_string(),
            description: "Description".to_string(),
            date: "Date".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub title: String,
    pub status: String,
    pub progress: f64,
    pub description: String,
    pub date: String,
}

impl TrackingRecord {
    pub fn to_page_request(&self, database_id: &str, names: &PropertyNames) -> CreatePageRequest {
        CreatePageRequest::new(database_id)
            .with_property(names.title.clone(), PropertyValue::title(self.title.clone()))
            .with_property(names.status.clone(), PropertyValue::select(self.status.clone()))
            .with_property(names.progress.clone(), PropertyValue::number(self.progress))
            .with_property(
                names.description.clone(),
                PropertyValue::rich_text(&self.description),
            )
            .with_property(names.date.clone(), PropertyValue::date(self.date.clone()))
    }
}

/// Minute precision, used in page titles.
pub fn title_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// RFC 3339, accepted by Notion date properties.
pub fn iso_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.to_rfc3339()
}
