//! Page entity to [`Page`] conversion.

use std::collections::BTreeMap;

use crate::api::dto::{DocExpansion, Metadata, Page, PageConfiguration, PageType, Viewer};
use crate::domain::PageEntity;

pub const DISPLAY_OPERATION_ID: &str = "displayOperationId";
pub const DOC_EXPANSION: &str = "docExpansion";
pub const ENABLE_FILTERING: &str = "enableFiltering";
pub const MAX_DISPLAYED_TAGS: &str = "maxDisplayedTags";
pub const SHOW_COMMON_EXTENSIONS: &str = "showCommonExtensions";
pub const SHOW_EXTENSIONS: &str = "showExtensions";
pub const SHOW_URL: &str = "showUrl";
pub const TRY_IT: &str = "tryIt";
pub const TRY_IT_ANONYMOUS: &str = "tryItAnonymous";
pub const TRY_IT_URL: &str = "tryItUrl";
pub const VIEWER: &str = "viewer";

/// Convert a page without links; callers attach them with [`Page::with_links`].
pub fn convert_page(entity: &PageEntity) -> Page {
    Page {
        id: entity.id.to_string(),
        name: entity.name.clone(),
        page_type: PageType::parse(&entity.page_type),
        order: entity.order,
        parent: entity.parent_id.as_ref().map(|id| id.to_string()),
        updated_at: entity.last_modification_date,
        configuration: parse_configuration(&entity.configuration),
        metadata: reindex_metadata(&entity.metadata),
        links: None,
    }
}

/// Typed configuration, or `None` when the map is empty.
pub fn parse_configuration(configuration: &BTreeMap<String, String>) -> Option<PageConfiguration> {
    if configuration.is_empty() {
        return None;
    }

    let get = |key: &str| configuration.get(key).map(String::as_str);

    Some(PageConfiguration {
        display_operation_id: get(DISPLAY_OPERATION_ID).and_then(parse_bool),
        doc_expansion: get(DOC_EXPANSION).and_then(DocExpansion::parse),
        enable_filtering: get(ENABLE_FILTERING).and_then(parse_bool),
        max_displayed_tags: get(MAX_DISPLAYED_TAGS).and_then(|v| v.parse::<i32>().ok()),
        show_common_extensions: get(SHOW_COMMON_EXTENSIONS).and_then(parse_bool),
        show_extensions: get(SHOW_EXTENSIONS).and_then(parse_bool),
        show_url: get(SHOW_URL).map(str::to_string),
        try_it: get(TRY_IT).and_then(parse_bool),
        try_it_anonymous: get(TRY_IT_ANONYMOUS).and_then(parse_bool),
        try_it_url: get(TRY_IT_URL).map(str::to_string),
        viewer: get(VIEWER).and_then(Viewer::parse),
    })
}

/// Metadata entries in key order, numbered from "0".
pub fn reindex_metadata(metadata: &BTreeMap<String, String>) -> Option<Vec<Metadata>> {
    if metadata.is_empty() {
        return None;
    }

    Some(
        metadata
            .iter()
            .enumerate()
            .map(|(index, (name, value))| Metadata {
                name: name.clone(),
                value: value.clone(),
                order: index.to_string(),
            })
            .collect(),
    )
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PageId, UserId};
    use chrono::Utc;
    use proptest::prelude::*;

    fn minimal_page() -> PageEntity {
        PageEntity {
            id: PageId::from("my-page-id"),
            api: None,
            name: None,
            page_type: "SWAGGER".into(),
            parent_id: None,
            order: 0,
            configuration: BTreeMap::new(),
            metadata: BTreeMap::new(),
            content: None,
            last_modification_date: Utc::now(),
            last_contributor: None,
            published: true,
        }
    }

    #[test]
    fn test_convert_full_page() {
        let mut page = minimal_page();
        page.last_contributor = Some(UserId::from("my-page-contributor"));
        page.name = Some("my-page-name".into());
        page.order = 1;
        page.parent_id = Some(PageId::from("my-page-parent"));
        page.configuration = BTreeMap::from([
            (DISPLAY_OPERATION_ID.to_string(), "false".to_string()),
            (DOC_EXPANSION.to_string(), "list".to_string()),
            (ENABLE_FILTERING.to_string(), "true".to_string()),
            (MAX_DISPLAYED_TAGS.to_string(), "42".to_string()),
            (SHOW_COMMON_EXTENSIONS.to_string(), "false".to_string()),
            (SHOW_EXTENSIONS.to_string(), "true".to_string()),
            (SHOW_URL.to_string(), "false".to_string()),
            (TRY_IT.to_string(), "true".to_string()),
            (TRY_IT_ANONYMOUS.to_string(), "false".to_string()),
            (TRY_IT_URL.to_string(), "http://try.it/url".to_string()),
            (VIEWER.to_string(), "Redoc".to_string()),
        ]);
        page.metadata = BTreeMap::from([("meta".to_string(), "my-page-id".to_string())]);

        let converted = convert_page(&page);

        let configuration = converted.configuration.expect("configuration present");
        assert_eq!(configuration.display_operation_id, Some(false));
        assert_eq!(configuration.doc_expansion, Some(DocExpansion::List));
        assert_eq!(configuration.enable_filtering, Some(true));
        assert_eq!(configuration.max_displayed_tags, Some(42));
        assert_eq!(configuration.show_common_extensions, Some(false));
        assert_eq!(configuration.show_extensions, Some(true));
        assert_eq!(configuration.show_url.as_deref(), Some("false"));
        assert_eq!(configuration.try_it, Some(true));
        assert_eq!(configuration.try_it_anonymous, Some(false));
        assert_eq!(configuration.try_it_url.as_deref(), Some("http://try.it/url"));
        assert_eq!(configuration.viewer, Some(Viewer::Redoc));

        assert_eq!(converted.id, "my-page-id");
        let metadata = converted.metadata.expect("metadata present");
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].order, "0");
        assert_eq!(metadata[0].name, "meta");
        assert_eq!(metadata[0].value, "my-page-id");

        assert_eq!(converted.name.as_deref(), Some("my-page-name"));
        assert_eq!(converted.order, 1);
        assert_eq!(converted.parent.as_deref(), Some("my-page-parent"));
        assert_eq!(converted.page_type, Some(PageType::Swagger));
        assert_eq!(
            converted.updated_at.timestamp_millis(),
            page.last_modification_date.timestamp_millis()
        );
        assert!(converted.links.is_none());
    }

    #[test]
    fn test_convert_minimal_page() {
        let page = minimal_page();
        let converted = convert_page(&page);

        assert!(converted.configuration.is_none());
        assert!(converted.metadata.is_none());
        assert_eq!(converted.page_type, Some(PageType::Swagger));
        assert_eq!(converted.updated_at, page.last_modification_date);
    }

    #[test]
    fn test_unparsable_values_are_left_unset() {
        let configuration = BTreeMap::from([
            (TRY_IT.to_string(), "yes".to_string()),
            (ENABLE_FILTERING.to_string(), "TRUE".to_string()),
            (MAX_DISPLAYED_TAGS.to_string(), "forty-two".to_string()),
            (DOC_EXPANSION.to_string(), "partial".to_string()),
            (VIEWER.to_string(), "graphiql".to_string()),
            ("unrelated".to_string(), "value".to_string()),
        ]);

        let parsed = parse_configuration(&configuration).expect("non-empty map");
        assert_eq!(parsed, PageConfiguration::default());
    }

    #[test]
    fn test_unknown_page_type_is_omitted() {
        let mut page = minimal_page();
        page.page_type = "WIKI".into();
        let json = serde_json::to_value(convert_page(&page)).unwrap();
        assert!(json.get("type").is_none());
        assert!(json.get("configuration").is_none());
        assert!(json.get("metadata").is_none());
    }

    proptest! {
        #[test]
        fn metadata_orders_are_dense_and_follow_key_order(
            metadata in prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{0,8}", 1..20)
        ) {
            let entries = reindex_metadata(&metadata).expect("non-empty");
            prop_assert_eq!(entries.len(), metadata.len());
            for (index, (entry, (name, value))) in entries.iter().zip(metadata.iter()).enumerate() {
                prop_assert_eq!(&entry.order, &index.to_string());
                prop_assert_eq!(&entry.name, name);
                prop_assert_eq!(&entry.value, value);
            }
        }
    }
}
