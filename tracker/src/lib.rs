pub mod commit;
pub mod error;
pub mod notify;
pub mod probe;
pub mod record;
pub mod report;
pub mod runner;
pub mod settings;
pub mod summary;

pub use commit::{calculate_progress, determine_status, track_commit, CommitEvent};
pub use error::{TrackerError, TrackerResult};
pub use notify::{send_notification, Notification, NotificationLevel};
pub use probe::{ProbeOutcome, ProbeSpec, Prober, TestResult, TestStatus, URL_ACCESSIBILITY};
pub use record::{PropertyNames, TrackingRecord};
pub use report::{ReportOutcome, Reporter};
pub use runner::{RunOutcome, RunSettings, Runner};
pub use settings::{Credentials, NotionArgs, RunArgs};
pub use summary::{RunSummary, ScoringPolicy};
