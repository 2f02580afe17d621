use crate::config::NotionConfig;
use crate::provider::{DatabaseClient, NotionError, NotionResult};
use crate::types::{ApiErrorBody, CreatePageRequest, Database, Page};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

const NOTION_VERSION_HEADER: &str = "notion-version";

pub struct NotionClient {
    http_client: reqwest::Client,
    base_url: String,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> NotionResult<Self> {
        config
            .validate()
            .map_err(|message| NotionError::InvalidConfig { message })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))
            .map_err(|e| NotionError::InvalidConfig {
                message: format!("API key is not a valid header value: {}", e),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            NOTION_VERSION_HEADER,
            HeaderValue::from_str(&config.api_version).map_err(|e| {
                NotionError::InvalidConfig {
                    message: format!("API version is not a valid header value: {}", e),
                }
            })?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| NotionError::InvalidConfig {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    fn map_send_error(e: reqwest::Error) -> NotionError {
        if e.is_timeout() {
            NotionError::ServiceUnavailable {
                message: "Request timeout".to_string(),
            }
        } else if e.is_connect() {
            NotionError::ServiceUnavailable {
                message: "Cannot connect to the Notion API".to_string(),
            }
        } else {
            NotionError::Network(e)
        }
    }

    /// Maps a non-2xx status and its body onto the error taxonomy.
    fn error_from_status(status: StatusCode, body: &str) -> NotionError {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();
        let message = parsed
            .as_ref()
            .map(|b| b.message.clone())
            .unwrap_or_else(|| body.to_string());

        match status {
            StatusCode::UNAUTHORIZED => NotionError::Authentication { message },
            StatusCode::NOT_FOUND => NotionError::NotFound { message },
            StatusCode::TOO_MANY_REQUESTS => NotionError::RateLimit,
            StatusCode::BAD_REQUEST => NotionError::Validation { message },
            s if s.is_server_error() => NotionError::ServiceUnavailable {
                message: format!("{}: {}", s, message),
            },
            s => NotionError::Api {
                status: s.as_u16(),
                code: parsed
                    .map(|b| b.code)
                    .unwrap_or_else(|| "unknown".to_string()),
                message,
            },
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> NotionResult<T> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = Self::error_from_status(status, &error_text);
            warn!("Notion API call failed: {}", err);
            return Err(err);
        }

        let body = response.text().await.map_err(NotionError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DatabaseClient for NotionClient {
    async fn create_page(&self, request: CreatePageRequest) -> NotionResult<Page> {
        debug!(
            "Creating page in database {} with {} properties",
            request.parent.database_id,
            request.properties.len()
        );

        let url = format!("{}/pages", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let page: Page = Self::decode(response).await?;
        info!("Created Notion page {}", page.id);
        Ok(page)
    }

    async fn retrieve_database(&self, database_id: &str) -> NotionResult<Database> {
        debug!("Retrieving database {}", database_id);

        let url = format!("{}/databases/{}", self.base_url, database_id);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let database: Database = Self::decode(response).await?;
        info!(
            "Retrieved database {} with {} properties",
            database.id,
            database.properties.len()
        );
        Ok(database)
    }

    fn provider_name(&self) -> &'static str {
        "notion"
    }
}
