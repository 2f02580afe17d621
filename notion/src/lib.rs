pub mod client;
pub mod config;
pub mod provider;
pub mod types;

pub use client::NotionClient;
pub use config::{NotionConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use provider::{DatabaseClient, NotionError, NotionResult};
pub use types::{
    ApiErrorBody, CreatePageRequest, Database, DatabaseProperty, DateValue, Page, Parent,
    PlainText, PropertyValue, RichText, SelectOption, TextContent, MAX_TEXT_LENGTH,
};

pub mod prelude {
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::provider::*;
    pub use crate::types::*;
}
