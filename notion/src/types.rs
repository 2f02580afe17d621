use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Notion rejects text objects whose content exceeds this many characters.
pub const MAX_TEXT_LENGTH: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub database_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "RichText::text_type")]
    pub kind: String,
    pub text: TextContent,
}

impl RichText {
    fn text_type() -> String {
        "text".to_string()
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: Self::text_type(),
            text: TextContent {
                content: content.into(),
            },
        }
    }

    /// Splits `content` into as many text objects as needed to stay under
    /// [`MAX_TEXT_LENGTH`]. Empty input yields a single empty object.
    pub fn chunked(content: &str) -> Vec<Self> {
        if content.is_empty() {
            return vec![Self::plain("")];
        }

        let chars: Vec<char> = content.chars().collect();
        chars
            .chunks(MAX_TEXT_LENGTH)
            .map(|chunk| Self::plain(chunk.iter().collect::<String>()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Value of one page property, serialized in Notion's `{"<type>": ...}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Select(SelectOption),
    Number(f64),
    Date(DateValue),
}

impl PropertyValue {
    pub fn title(content: impl Into<String>) -> Self {
        Self::Title(vec![RichText::plain(content)])
    }

    pub fn rich_text(content: &str) -> Self {
        Self::RichText(RichText::chunked(content))
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::Select(SelectOption { name: name.into() })
    }

    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn date(start: impl Into<String>) -> Self {
        Self::Date(DateValue {
            start: start.into(),
            end: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: HashMap<String, PropertyValue>,
}

impl CreatePageRequest {
    pub fn new(database_id: impl Into<String>) -> Self {
        Self {
            parent: Parent {
                database_id: database_id.into(),
            },
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseProperty {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub property_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    #[serde(default)]
    pub title: Vec<PlainText>,
    #[serde(default)]
    pub properties: HashMap<String, DatabaseProperty>,
}

impl Database {
    pub fn title_text(&self) -> String {
        self.title
            .iter()
            .map(|t| t.plain_text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Property names with their types, sorted by name.
    pub fn columns(&self) -> Vec<(&str, &str)> {
        let mut columns: Vec<(&str, &str)> = self
            .properties
            .iter()
            .map(|(name, prop)| (name.as_str(), prop.property_type.as_str()))
            .collect();
        columns.sort_unstable();
        columns
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub object: String,
    pub status: u16,
    pub code: String,
    pub message: String,
}
