use crate::error::TrackerResult;
use crate::notify::{send_notification, Notification};
use crate::probe::{ProbeSpec, Prober, TestResult};
use crate::report::{ReportOutcome, Reporter};
use crate::settings::Credentials;
use crate::summary::{RunSummary, ScoringPolicy};
use notion::{DatabaseClient, NotionClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub probes: Vec<ProbeSpec>,
    pub policy: ScoringPolicy,
    pub credentials: Option<Credentials>,
    pub notion_base_url: Option<String>,
    pub alert_on_failure: bool,
}

impl RunSettings {
    pub fn new(probes: Vec<ProbeSpec>) -> Self {
        Self {
            probes,
            policy: ScoringPolicy::default(),
            credentials: None,
            notion_base_url: None,
            alert_on_failure: false,
        }
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_notion_base_url(mut self, base_url: Option<String>) -> Self {
        self.notion_base_url = base_url;
        self
    }

    pub fn with_alert_on_failure(mut self, alert_on_failure: bool) -> Self {
        self.alert_on_failure = alert_on_failure;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub results: Vec<TestResult>,
    pub summary: RunSummary,
    pub report: ReportOutcome,
    pub alerts: Vec<ReportOutcome>,
}

/// Probes every configured target in order, then writes one summary page
/// when credentials are available. Holds no state between runs.
pub struct Runner {
    settings: RunSettings,
    prober: Prober,
    reporter: Reporter,
}

impl Runner {
    pub fn new(settings: RunSettings) -> TrackerResult<Self> {
        let prober = Prober::new(settings.policy)?;
        let reporter = Reporter::new(settings.policy);
        Ok(Self {
            settings,
            prober,
            reporter,
        })
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub async fn run(&self) -> Vec<TestResult> {
        self.run_detailed().await.results
    }

    /// Builds the Notion client for this run only. Without credentials the
    /// report step is skipped.
    pub async fn run_detailed(&self) -> RunOutcome {
        let results = self.probe_all().await;

        let (report, alerts) = match &self.settings.credentials {
            None => {
                debug!("Notion credentials not configured, skipping report");
                (ReportOutcome::Skipped, Vec::new())
            }
            Some(credentials) => {
                let config =
                    credentials.notion_config(self.settings.notion_base_url.as_deref());
                match NotionClient::new(config) {
                    Ok(client) => {
                        self.deliver(&client, &credentials.database_id, &results)
                            .await
                    }
                    Err(e) => {
                        error!("Cannot create Notion client: {}", e);
                        println!("❌ Failed to send test results to Notion: {}", e);
                        (
                            ReportOutcome::Failed {
                                reason: e.to_string(),
                            },
                            Vec::new(),
                        )
                    }
                }
            }
        };

        Self::finish(results, report, alerts)
    }

    /// Same cycle against a caller-provided client.
    pub async fn run_with(&self, client: &dyn DatabaseClient, database_id: &str) -> RunOutcome {
        let results = self.probe_all().await;
        let (report, alerts) = self.deliver(client, database_id, &results).await;
        Self::finish(results, report, alerts)
    }

    async fn probe_all(&self) -> Vec<TestResult> {
        println!("🧪 Starting automated tests...");

        let mut results = Vec::with_capacity(self.settings.probes.len());
        for spec in &self.settings.probes {
            println!("🔍 Checking accessibility of {}...", spec.url);
            results.push(self.prober.probe(spec).await);
        }

        println!("\n📊 Test results:");
        for result in &results {
            println!("  {} {}: {}", result.status.glyph(), result.test, result.status);
        }

        results
    }

    async fn deliver(
        &self,
        client: &dyn DatabaseClient,
        database_id: &str,
        results: &[TestResult],
    ) -> (ReportOutcome, Vec<ReportOutcome>) {
        let report = self.reporter.report(client, database_id, results).await;

        let mut alerts = Vec::new();
        if self.settings.alert_on_failure {
            for notification in results.iter().filter_map(Notification::for_failed_probe) {
                alerts.push(
                    send_notification(
                        client,
                        database_id,
                        self.reporter.properties(),
                        &notification,
                    )
                    .await,
                );
            }
        }

        (report, alerts)
    }

    fn finish(
        results: Vec<TestResult>,
        report: ReportOutcome,
        alerts: Vec<ReportOutcome>,
    ) -> RunOutcome {
        let summary = RunSummary::from_results(&results);
        info!(
            "Run finished: {}/{} passed (score {}), report {:?}",
            summary.passed, summary.total, summary.score, report
        );
        RunOutcome {
            results,
            summary,
            report,
            alerts,
        }
    }
}
