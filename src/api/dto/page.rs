//! Page representation and its typed configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::links::PageLinks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    Asciidoc,
    Asyncapi,
    Swagger,
    Markdown,
    Folder,
    Root,
    Link,
}

impl PageType {
    /// Case-insensitive parse; unknown types yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASCIIDOC" => Some(PageType::Asciidoc),
            "ASYNCAPI" => Some(PageType::Asyncapi),
            "SWAGGER" => Some(PageType::Swagger),
            "MARKDOWN" => Some(PageType::Markdown),
            "FOLDER" => Some(PageType::Folder),
            "ROOT" => Some(PageType::Root),
            "LINK" => Some(PageType::Link),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    List,
    Full,
    None,
}

impl DocExpansion {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "list" => Some(DocExpansion::List),
            "full" => Some(DocExpansion::Full),
            "none" => Some(DocExpansion::None),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Viewer {
    Swagger,
    Redoc,
}

impl Viewer {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "swagger" => Some(Viewer::Swagger),
            "redoc" => Some(Viewer::Redoc),
            _ => None,
        }
    }
}

/// Typed view over a page's free-form configuration map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_operation_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_expansion: Option<DocExpansion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_filtering: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_displayed_tags: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_common_extensions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_extensions: Option<bool>,
    /// Kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub try_it: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub try_it_anonymous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub try_it_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer: Option<Viewer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    pub name: String,
    pub value: String,
    /// Position in the source map, as a string ("0", "1", ...)
    pub order: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Page {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    pub order: i32,
    /// Id of the parent page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<PageConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<Metadata>>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl Page {
    pub fn with_links(mut self, links: PageLinks) -> Self {
        self.links = Some(links);
        self
    }
}

/// Raw page content served by `/pages/{pageId}/content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageContent {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_parsing_is_case_insensitive() {
        assert_eq!(PageType::parse("swagger"), Some(PageType::Swagger));
        assert_eq!(PageType::parse("Markdown"), Some(PageType::Markdown));
        assert_eq!(PageType::parse("WIKI"), None);
        assert_eq!(DocExpansion::parse("LIST"), Some(DocExpansion::List));
        assert_eq!(DocExpansion::parse("partial"), None);
        assert_eq!(Viewer::parse("Redoc"), Some(Viewer::Redoc));
        assert_eq!(Viewer::parse("SWAGGER"), Some(Viewer::Swagger));
        assert_eq!(Viewer::parse("graphiql"), None);
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(serde_json::to_value(DocExpansion::List).unwrap(), "list");
        assert_eq!(serde_json::to_value(Viewer::Redoc).unwrap(), "Redoc");
        assert_eq!(serde_json::to_value(PageType::Asyncapi).unwrap(), "ASYNCAPI");
    }

    #[test]
    fn empty_configuration_fields_are_skipped() {
        let json = serde_json::to_value(PageConfiguration {
            try_it: Some(true),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "try_it": true }));
    }
}
