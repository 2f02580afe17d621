use crate::types::{CreatePageRequest, Database, Page};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotionError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Object not found: {message}")]
    NotFound { message: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Request rejected: {message}")]
    Validation { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Notion API returned {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

pub type NotionResult<T> = Result<T, NotionError>;

/// A document database that accepts tracking pages.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    async fn create_page(&self, request: CreatePageRequest) -> NotionResult<Page>;

    async fn retrieve_database(&self, database_id: &str) -> NotionResult<Database>;

    async fn health_check(&self, database_id: &str) -> NotionResult<()> {
        self.retrieve_database(database_id).await.map(|_| ())
    }

    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DatabaseProperty, PropertyValue};
    use std::collections::HashMap;

    struct MockClient;

    #[async_trait]
    impl DatabaseClient for MockClient {
        async fn create_page(&self, request: CreatePageRequest) -> NotionResult<Page> {
            Ok(Page {
                id: format!("page-in-{}", request.parent.database_id),
                url: None,
                created_time: None,
            })
        }

        async fn retrieve_database(&self, database_id: &str) -> NotionResult<Database> {
            if database_id != "known" {
                return Err(NotionError::NotFound {
                    message: database_id.to_string(),
                });
            }
            let mut properties = HashMap::new();
            properties.insert(
                "Statut".to_string(),
                DatabaseProperty {
                    id: None,
                    property_type: "select".to_string(),
                },
            );
            Ok(Database {
                id: database_id.to_string(),
                title: vec![],
                properties,
            })
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let client = MockClient;

        let request =
            CreatePageRequest::new("known").with_property("Statut", PropertyValue::select("Done"));
        let page = client.create_page(request).await.unwrap();
        assert_eq!(page.id, "page-in-known");

        client.health_check("known").await.unwrap();
        let missing = client.health_check("missing").await;
        assert!(matches!(missing, Err(NotionError::NotFound { .. })));
        assert_eq!(client.provider_name(), "mock");
    }

    #[test]
    fn test_error_display() {
        let err = NotionError::Api {
            status: 409,
            code: "conflict_error".to_string(),
            message: "Transaction conflict".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Notion API returned 409 (conflict_error): Transaction conflict"
        );
        assert_eq!(NotionError::RateLimit.to_string(), "Rate limit exceeded");
    }
}
