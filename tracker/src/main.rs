use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use notion::prelude::*;
use tracing::{error, info};
use tracker::{
    track_commit, CommitEvent, Credentials, Notification, NotificationLevel, NotionArgs,
    PropertyNames, ReportOutcome, RunArgs, RunSettings, Runner, TrackerError,
};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Check URL accessibility and record the results in Notion")]
struct Cli {
    #[command(flatten)]
    notion: NotionArgs,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the Notion database is reachable
    Ping,
    /// List the columns of the Notion database
    Columns,
    /// Write a notification page
    Notify {
        /// Page title
        #[arg(short, long)]
        title: String,
        /// Notification body
        #[arg(short, long)]
        message: String,
        /// Severity
        #[arg(short, long, value_enum, default_value = "info")]
        level: LevelArg,
    },
    /// Record a commit and its estimated progress
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
        /// Commit author
        #[arg(short, long)]
        author: Option<String>,
        /// Branch name
        #[arg(short, long)]
        branch: Option<String>,
        /// RFC 3339 commit timestamp (defaults to now)
        #[arg(long)]
        timestamp: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Info,
    Error,
}

impl From<LevelArg> for NotificationLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Info => NotificationLevel::Info,
            LevelArg::Error => NotificationLevel::Error,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_tests(&cli.notion, &cli.run).await?,
        Some(Commands::Ping) => ping(&cli.notion).await?,
        Some(Commands::Columns) => list_columns(&cli.notion).await?,
        Some(Commands::Notify {
            title,
            message,
            level,
        }) => {
            let notification = Notification {
                title,
                message,
                level: level.into(),
            };
            notify(&cli.notion, &notification).await?;
        }
        Some(Commands::Commit {
            message,
            author,
            branch,
            timestamp,
        }) => {
            let mut event = CommitEvent::new(message);
            event.author = author;
            event.branch = branch;
            if let Some(ts) = timestamp {
                let parsed =
                    DateTime::parse_from_rfc3339(&ts).map_err(|e| TrackerError::InvalidArgument {
                        message: format!("invalid timestamp {:?}: {}", ts, e),
                    })?;
                event = event.with_timestamp(parsed);
            }
            commit(&cli.notion, &event).await?;
        }
    }

    Ok(())
}

async fn run_tests(notion: &NotionArgs, run: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = RunSettings::new(run.probes()?)
        .with_policy(run.policy()?)
        .with_credentials(notion.credentials())
        .with_notion_base_url(notion.api_url.clone())
        .with_alert_on_failure(run.alert_on_failure);

    let runner = Runner::new(settings)?;
    let results = runner.run().await;
    info!("Completed {} probe(s)", results.len());

    Ok(())
}

fn connect(notion: &NotionArgs) -> Result<(NotionClient, Credentials), Box<dyn std::error::Error>> {
    let credentials = notion.require_credentials()?;
    let client = NotionClient::new(credentials.notion_config(notion.api_url.as_deref()))?;
    Ok((client, credentials))
}

async fn ping(notion: &NotionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (client, credentials) = connect(notion)?;

    match client.retrieve_database(&credentials.database_id).await {
        Ok(database) => {
            println!("✓ Notion connection OK");
            println!("Database found: {}", database.title_text());
            Ok(())
        }
        Err(e) => {
            println!("✗ Notion connection failed: {}", e);
            error!("Ping failed: {}", e);
            Err(e.into())
        }
    }
}

async fn list_columns(notion: &NotionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (client, credentials) = connect(notion)?;
    let database = client.retrieve_database(&credentials.database_id).await?;

    println!("Database columns:");
    for (name, property_type) in database.columns() {
        println!("  - \"{}\" (type: {})", name, property_type);
    }

    Ok(())
}

async fn notify(
    notion: &NotionArgs,
    notification: &Notification,
) -> Result<(), Box<dyn std::error::Error>> {
    let (client, credentials) = connect(notion)?;
    let outcome = tracker::send_notification(
        &client,
        &credentials.database_id,
        &PropertyNames::default(),
        notification,
    )
    .await;
    outcome_to_result(outcome)
}

async fn commit(notion: &NotionArgs, event: &CommitEvent) -> Result<(), Box<dyn std::error::Error>> {
    let (client, credentials) = connect(notion)?;
    let outcome = track_commit(
        &client,
        &credentials.database_id,
        &PropertyNames::default(),
        event,
    )
    .await;
    outcome_to_result(outcome)
}

fn outcome_to_result(outcome: ReportOutcome) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        ReportOutcome::Failed { reason } => Err(reason.into()),
        ReportOutcome::Delivered { .. } | ReportOutcome::Skipped => Ok(()),
    }
}
