use crate::error::TrackerResult;
use crate::summary::{round_to, ScoringPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const URL_ACCESSIBILITY: &str = "url_accessibility";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✅",
            TestStatus::Fail => "❌",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the probe observed. A completed request carries timing and status;
/// a request that never completed carries only the error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeOutcome {
    Response { load_time: f64, status_code: u16 },
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test: String,
    pub status: TestStatus,
    pub url: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

impl TestResult {
    pub fn response(
        url: impl Into<String>,
        status_code: u16,
        load_time: f64,
        policy: &ScoringPolicy,
    ) -> Self {
        let status = if status_code == policy.expected_status {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        };

        Self {
            test: URL_ACCESSIBILITY.to_string(),
            status,
            url: url.into(),
            outcome: ProbeOutcome::Response {
                load_time: round_to(load_time, 2),
                status_code,
            },
        }
    }

    pub fn error(url: impl Into<String>, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "request failed".to_string();
        }

        Self {
            test: URL_ACCESSIBILITY.to_string(),
            status: TestStatus::Fail,
            url: url.into(),
            outcome: ProbeOutcome::Error { error },
        }
    }

    pub fn passed(&self) -> bool {
        self.status == TestStatus::Pass
    }

    pub fn load_time(&self) -> Option<f64> {
        match self.outcome {
            ProbeOutcome::Response { load_time, .. } => Some(load_time),
            ProbeOutcome::Error { .. } => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Response { status_code, .. } => Some(status_code),
            ProbeOutcome::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Error { error } => Some(error),
            ProbeOutcome::Response { .. } => None,
        }
    }

    /// Short reason for a failed probe, `None` when it passed.
    pub fn failure_reason(&self) -> Option<String> {
        if self.passed() {
            return None;
        }
        Some(match &self.outcome {
            ProbeOutcome::Error { error } => error.clone(),
            ProbeOutcome::Response { status_code, .. } => format!("Status {}", status_code),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeSpec {
    pub url: String,
    pub timeout: Duration,
}

impl ProbeSpec {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct Prober {
    http_client: reqwest::Client,
    policy: ScoringPolicy,
}

impl Prober {
    pub fn new(policy: ScoringPolicy) -> TrackerResult<Self> {
        let http_client = reqwest::Client::builder().build()?;
        Ok(Self {
            http_client,
            policy,
        })
    }

    /// One bounded GET against `spec.url`. Transport failures become a FAIL
    /// record, never an error.
    pub async fn probe(&self, spec: &ProbeSpec) -> TestResult {
        debug!("Probing {} (timeout {:?})", spec.url, spec.timeout);

        let start = Instant::now();
        let response = self
            .http_client
            .get(&spec.url)
            .timeout(spec.timeout)
            .send()
            .await;
        let elapsed = start.elapsed();

        match response {
            Ok(response) => {
                let status_code = response.status().as_u16();
                let result =
                    TestResult::response(&spec.url, status_code, elapsed.as_secs_f64(), &self.policy);
                info!(
                    "Probe of {} returned {} in {:.2}s ({})",
                    spec.url,
                    status_code,
                    elapsed.as_secs_f64(),
                    result.status
                );
                result
            }
            Err(e) => {
                warn!("Probe of {} failed: {}", spec.url, e);
                TestResult::error(&spec.url, e.to_string())
            }
        }
    }
}
