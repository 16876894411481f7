//! Paged response envelope with HATEOAS navigation links.
//!
//! Collection responses wrap their items in [`PagedResponse`], carrying
//! pagination metadata and a `_links` map. A `self` link is always present;
//! `first` and `prev` appear only when a previous page exists, `next` and
//! `last` only when one follows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Page;

/// One hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    #[schema(example = "/api/persons?page=0&size=10")]
    pub href: String,
}

impl Link {
    fn paged(base_path: &str, page: u64, size: u32) -> Self {
        Self {
            href: format!("{base_path}?page={page}&size={size}"),
        }
    }
}

/// Pagination metadata echoed alongside the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Current page number, zero based.
    #[schema(example = 0)]
    pub page: u32,
    /// Requested page size.
    #[schema(example = 10)]
    pub size: u32,
    /// Total items across all pages.
    #[schema(example = 25)]
    pub total_elements: u64,
    /// Total pages at this size.
    #[schema(example = 3)]
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMetadata {
    fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page(),
            size: page.size(),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            first: page.is_first(),
            last: page.is_last(),
            has_next: page.has_next(),
            has_previous: page.has_previous(),
        }
    }
}

/// Paginated collection envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub page_metadata: PageMetadata,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

impl<T> PagedResponse<T> {
    /// Build the envelope from a domain page, mapping each item into its
    /// resource form.
    pub fn from_page<S>(page: Page<S>, base_path: &str, to_resource: impl Fn(S) -> T) -> Self {
        let metadata = PageMetadata::from_page(&page);
        let links = pagination_links(&metadata, base_path);
        let content = page.into_items().into_iter().map(to_resource).collect();

        Self {
            content,
            page_metadata: metadata,
            links,
        }
    }
}

/// Links attached to a single resource: itself and its collection.
pub fn resource_links(base_path: &str, id: i64) -> BTreeMap<String, Link> {
    let mut links = BTreeMap::new();
    links.insert(
        "self".to_owned(),
        Link {
            href: format!("{base_path}/{id}"),
        },
    );
    links.insert(
        "collection".to_owned(),
        Link {
            href: base_path.to_owned(),
        },
    );
    links
}

fn pagination_links(metadata: &PageMetadata, base_path: &str) -> BTreeMap<String, Link> {
    let mut links = BTreeMap::new();
    links.insert(
        "self".to_owned(),
        Link::paged(base_path, u64::from(metadata.page), metadata.size),
    );
    if metadata.has_previous {
        links.insert("first".to_owned(), Link::paged(base_path, 0, metadata.size));
        links.insert(
            "prev".to_owned(),
            Link::paged(base_path, u64::from(metadata.page - 1), metadata.size),
        );
    }
    if metadata.has_next {
        links.insert(
            "next".to_owned(),
            Link::paged(base_path, u64::from(metadata.page + 1), metadata.size),
        );
        links.insert(
            "last".to_owned(),
            Link::paged(base_path, metadata.total_pages - 1, metadata.size),
        );
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response_for(page: u32, size: u32, total: u64) -> PagedResponse<u32> {
        let items = vec![1_u32; size as usize];
        PagedResponse::from_page(Page::new(items, page, size, total), "/api/persons", |n| n)
    }

    #[test]
    fn sole_page_gets_only_a_self_link() {
        let response = response_for(0, 10, 3);
        let keys: Vec<&str> = response.links.keys().map(String::as_str).collect();
        assert_eq!(keys, ["self"]);
        assert_eq!(
            response.links["self"].href,
            "/api/persons?page=0&size=10"
        );
    }

    #[test]
    fn first_of_many_pages_links_forward_only() {
        let response = response_for(0, 10, 25);
        let keys: Vec<&str> = response.links.keys().map(String::as_str).collect();
        assert_eq!(keys, ["last", "next", "self"]);
        assert_eq!(response.links["next"].href, "/api/persons?page=1&size=10");
        assert_eq!(response.links["last"].href, "/api/persons?page=2&size=10");
    }

    #[test]
    fn middle_page_links_both_ways() {
        let response = response_for(1, 10, 25);
        let keys: Vec<&str> = response.links.keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "last", "next", "prev", "self"]);
        assert_eq!(response.links["first"].href, "/api/persons?page=0&size=10");
        assert_eq!(response.links["prev"].href, "/api/persons?page=0&size=10");
    }

    #[test]
    fn last_page_links_backward_only() {
        let response = response_for(2, 10, 25);
        let keys: Vec<&str> = response.links.keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "prev", "self"]);
    }

    #[rstest]
    #[case(0, 10, 25, true, false)]
    #[case(2, 10, 25, false, true)]
    #[case(0, 10, 0, true, true)]
    fn metadata_flags_match_position(
        #[case] page: u32,
        #[case] size: u32,
        #[case] total: u64,
        #[case] first: bool,
        #[case] last: bool,
    ) {
        let response = response_for(page, size, total);
        assert_eq!(response.page_metadata.first, first);
        assert_eq!(response.page_metadata.last, last);
    }

    #[test]
    fn resource_links_point_at_item_and_collection() {
        let links = resource_links("/api/persons", 7);
        assert_eq!(links["self"].href, "/api/persons/7");
        assert_eq!(links["collection"].href, "/api/persons");
    }

    #[test]
    fn envelope_serialises_links_under_underscore_key() {
        let response = response_for(0, 10, 3);
        let value = serde_json::to_value(&response).expect("serialises");
        assert!(value.get("_links").is_some());
        assert!(value.get("pageMetadata").is_some());
        assert_eq!(
            value
                .get("pageMetadata")
                .and_then(|m| m.get("totalElements")),
            Some(&serde_json::json!(3))
        );
    }
}
