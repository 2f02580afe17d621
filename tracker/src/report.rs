use crate::probe::TestResult;
use crate::record::{iso_timestamp, title_timestamp, PropertyNames, TrackingRecord};
use crate::summary::{format_score, RunSummary, ScoringPolicy};
use chrono::{DateTime, Local};
use notion::{CreatePageRequest, DatabaseClient};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub const TEST_RUN_TITLE: &str = "Tests Automatisés";

/// Result of one attempt to write a record. Delivery problems are values,
/// not errors: the run is complete either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReportOutcome {
    Delivered { page_id: String },
    Skipped,
    Failed { reason: String },
}

impl ReportOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, ReportOutcome::Delivered { .. })
    }
}

pub struct Reporter {
    policy: ScoringPolicy,
    properties: PropertyNames,
}

impl Reporter {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            properties: PropertyNames::default(),
        }
    }

    pub fn with_properties(mut self, properties: PropertyNames) -> Self {
        self.properties = properties;
        self
    }

    pub fn properties(&self) -> &PropertyNames {
        &self.properties
    }

    pub fn build_record(&self, results: &[TestResult], now: &DateTime<Local>) -> TrackingRecord {
        let summary = RunSummary::from_results(results);

        TrackingRecord {
            title: format!("{} - {}", TEST_RUN_TITLE, title_timestamp(now)),
            status: self.policy.status_label(summary.score).to_string(),
            progress: summary.score,
            description: summary.render(results),
            date: iso_timestamp(now),
        }
    }

    pub fn build_request(
        &self,
        database_id: &str,
        results: &[TestResult],
        now: &DateTime<Local>,
    ) -> CreatePageRequest {
        self.build_record(results, now)
            .to_page_request(database_id, &self.properties)
    }

    /// Writes one summary page for `results`. Never fails: delivery errors
    /// are logged and returned as [`ReportOutcome::Failed`].
    pub async fn report(
        &self,
        client: &dyn DatabaseClient,
        database_id: &str,
        results: &[TestResult],
    ) -> ReportOutcome {
        let summary = RunSummary::from_results(results);
        let request = self.build_request(database_id, results, &Local::now());

        let outcome = deliver(client, request, "test results").await;
        if outcome.is_delivered() {
            println!(
                "✅ Results sent to Notion (score: {}%)",
                format_score(summary.score)
            );
        }
        outcome
    }
}

/// Single create-page call shared by every record producer.
pub(crate) async fn deliver(
    client: &dyn DatabaseClient,
    request: CreatePageRequest,
    what: &str,
) -> ReportOutcome {
    match client.create_page(request).await {
        Ok(page) => {
            info!(
                "Delivered {} to {} as page {}",
                what,
                client.provider_name(),
                page.id
            );
            ReportOutcome::Delivered { page_id: page.id }
        }
        Err(e) => {
            error!("Failed to deliver {}: {}", what, e);
            println!("❌ Failed to send {} to Notion: {}", what, e);
            ReportOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{STATUS_DONE, STATUS_IN_PROGRESS};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use notion::{Database, NotionError, NotionResult, Page, PropertyValue};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        requests: Mutex<Vec<CreatePageRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl DatabaseClient for RecordingClient {
        async fn create_page(&self, request: CreatePageRequest) -> NotionResult<Page> {
            self.requests.lock().unwrap().push(request);
            if self.fail {
                return Err(NotionError::Authentication {
                    message: "API token is invalid.".to_string(),
                });
            }
            Ok(Page {
                id: "page-1".to_string(),
                url: None,
                created_time: None,
            })
        }

        async fn retrieve_database(&self, database_id: &str) -> NotionResult<Database> {
            Err(NotionError::NotFound {
                message: database_id.to_string(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 17, 9, 30, 15).unwrap()
    }

    fn results(passed: usize, failed: usize) -> Vec<TestResult> {
        let policy = ScoringPolicy::default();
        let mut results: Vec<TestResult> = (0..passed)
            .map(|i| TestResult::response(format!("https://ok{}.example", i), 200, 0.3, &policy))
            .collect();
        results.extend(
            (0..failed).map(|i| TestResult::error(format!("https://ko{}.example", i), "refused")),
        );
        results
    }

    #[test]
    fn test_build_record() {
        let reporter = Reporter::new(ScoringPolicy::default());
        let record = reporter.build_record(&results(3, 1), &fixed_now());

        assert_eq!(record.title, "Tests Automatisés - 2026-10-17 09:30");
        assert_eq!(record.status, STATUS_IN_PROGRESS);
        assert_eq!(record.progress, 75.0);
        assert!(record.description.starts_with("Tests exécutés: 4\nRéussis: 3\nScore: 75.0%\n"));
        assert!(record.date.starts_with("2026-10-17T09:30:15"));
    }

    #[test]
    fn test_build_record_done_at_threshold() {
        let reporter = Reporter::new(ScoringPolicy::default());
        let record = reporter.build_record(&results(4, 1), &fixed_now());
        assert_eq!(record.progress, 80.0);
        assert_eq!(record.status, STATUS_DONE);
    }

    #[test]
    fn test_build_request_targets_database() {
        let reporter = Reporter::new(ScoringPolicy::default());
        let request = reporter.build_request("db-9", &results(1, 0), &fixed_now());

        assert_eq!(request.parent.database_id, "db-9");
        assert_eq!(
            request.properties.get("Statut"),
            Some(&PropertyValue::select(STATUS_DONE))
        );
        assert_eq!(
            request.properties.get("Progression"),
            Some(&PropertyValue::number(100.0))
        );
    }

    #[tokio::test]
    async fn test_report_delivers_one_page() {
        let client = RecordingClient::default();
        let reporter = Reporter::new(ScoringPolicy::default());

        let outcome = reporter.report(&client, "db-1", &results(1, 1)).await;

        assert_eq!(
            outcome,
            ReportOutcome::Delivered {
                page_id: "page-1".to_string()
            }
        );
        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].parent.database_id, "db-1");
    }

    #[tokio::test]
    async fn test_report_failure_is_swallowed() {
        let client = RecordingClient {
            fail: true,
            ..Default::default()
        };
        let reporter = Reporter::new(ScoringPolicy::default());

        let outcome = reporter.report(&client, "db-1", &results(1, 0)).await;

        match outcome {
            ReportOutcome::Failed { reason } => assert!(reason.contains("API token is invalid")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(client.requests.lock().unwrap().len(), 1);
    }
}
