//! Command-line and environment configuration.

use crate::error::{TrackerError, TrackerResult};
use crate::probe::ProbeSpec;
use crate::summary::ScoringPolicy;
use clap::Args;
use notion::NotionConfig;
use std::time::Duration;

pub const DEFAULT_APP_URL: &str = "https://google.com";

/// Token and destination of the tracking database. Only built when both
/// are present and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub database_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_parts(api_key: Option<String>, database_id: Option<String>) -> Option<Self> {
        let api_key = api_key.filter(|v| !v.trim().is_empty())?;
        let database_id = database_id.filter(|v| !v.trim().is_empty())?;
        Some(Self {
            api_key: api_key.trim().to_string(),
            database_id: database_id.trim().to_string(),
        })
    }

    pub fn notion_config(&self, base_url: Option<&str>) -> NotionConfig {
        let config = NotionConfig::new(self.api_key.clone());
        match base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct NotionArgs {
    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
    /// Database receiving the tracking pages
    #[arg(long, env = "NOTION_DATABASE_ID", global = true)]
    pub database_id: Option<String>,
    /// Override of the Notion API base URL
    #[arg(long, env = "NOTION_API_URL", global = true)]
    pub api_url: Option<String>,
}

impl NotionArgs {
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.api_key.clone(), self.database_id.clone())
    }

    pub fn require_credentials(&self) -> TrackerResult<Credentials> {
        if self.api_key.as_deref().map_or(true, |v| v.trim().is_empty()) {
            return Err(TrackerError::MissingConfig {
                name: "NOTION_API_KEY",
            });
        }
        self.credentials().ok_or(TrackerError::MissingConfig {
            name: "NOTION_DATABASE_ID",
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// URL to probe; repeat the flag or comma-separate in APP_URL
    #[arg(
        long = "url",
        env = "APP_URL",
        value_delimiter = ',',
        default_value = DEFAULT_APP_URL
    )]
    pub urls: Vec<String>,
    /// Per-probe timeout in seconds
    #[arg(long, env = "PROBE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout: u64,
    /// HTTP status a probe must return to pass
    #[arg(long, default_value_t = 200)]
    pub expected_status: u16,
    /// Score from which the run is recorded as done
    #[arg(long, default_value_t = 80.0)]
    pub done_threshold: f64,
    /// Also write an error notification for each failed probe
    #[arg(long)]
    pub alert_on_failure: bool,
}

impl RunArgs {
    pub fn probes(&self) -> TrackerResult<Vec<ProbeSpec>> {
        if self.timeout == 0 {
            return Err(TrackerError::InvalidArgument {
                message: "Probe timeout must be greater than 0".to_string(),
            });
        }

        let timeout = Duration::from_secs(self.timeout);
        let probes: Vec<ProbeSpec> = self
            .urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(|u| ProbeSpec::new(u).with_timeout(timeout))
            .collect();

        if probes.is_empty() {
            return Err(TrackerError::InvalidArgument {
                message: "At least one URL is required".to_string(),
            });
        }
        Ok(probes)
    }

    pub fn policy(&self) -> TrackerResult<ScoringPolicy> {
        let policy = ScoringPolicy::default()
            .with_expected_status(self.expected_status)
            .with_done_threshold(self.done_threshold);
        policy
            .validate()
            .map_err(|message| TrackerError::InvalidArgument { message })?;
        Ok(policy)
    }
}
