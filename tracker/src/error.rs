use notion::NotionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Notion error: {0}")]
    Notion(#[from] NotionError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Missing configuration: {name} is not set")]
    MissingConfig { name: &'static str },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

pub type TrackerResult<T> = Result<T, TrackerError>;
