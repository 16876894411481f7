//! Pagination and sorting query parameters.
//!
//! Every collection endpoint accepts the same four parameters. Sort fields
//! are validated against a per-entity allow-list; unknown fields are
//! rejected rather than silently ignored.

use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{Error, PageRequest, SortDirection, SortSpec};

const DEFAULT_PAGE: u32 = 0;
const DEFAULT_SIZE: u32 = 10;
const DEFAULT_SORT_FIELD: &str = "id";

/// Query parameters shared by paged collection endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Zero-based page number. Defaults to 0.
    pub page: Option<u32>,
    /// Page size. Defaults to 10; must be at least 1.
    pub size: Option<u32>,
    /// Sort field. Defaults to `id`.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`. Anything but `desc` ascends.
    pub sort_dir: Option<String>,
}

impl ListParams {
    /// Validate into a sorted page request against the entity's sortable
    /// field allow-list.
    pub fn into_page_request(self, sortable: &[&str]) -> Result<PageRequest, Error> {
        let field = self
            .sort_by
            .clone()
            .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_owned());
        if !sortable.contains(&field.as_str()) {
            return Err(Error::invalid_request(format!(
                "cannot sort by unknown field: {field}"
            ))
            .with_details(json!({
                "field": field,
                "sortable": sortable,
                "code": "invalid_sort_field",
            })));
        }

        let direction = self
            .sort_dir
            .as_deref()
            .map_or(SortDirection::Ascending, SortDirection::from_param);

        Ok(self
            .into_unsorted_page_request()?
            .with_sort(SortSpec { field, direction }))
    }

    /// Validate into a page request without sorting, for endpoints with a
    /// fixed result order.
    pub fn into_unsorted_page_request(self) -> Result<PageRequest, Error> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let size = self.size.unwrap_or(DEFAULT_SIZE);
        PageRequest::new(page, size).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "size", "code": "invalid_page_size" }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const SORTABLE: &[&str] = &["id", "firstName"];

    #[test]
    fn defaults_apply_when_no_parameters_are_given() {
        let request = ListParams::default()
            .into_page_request(SORTABLE)
            .expect("defaults are valid");

        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), 10);
        let sort = request.sort().expect("default sort");
        assert_eq!(sort.field, "id");
        assert!(!sort.direction.is_descending());
    }

    #[rstest]
    #[case("desc", true)]
    #[case("DESC", true)]
    #[case("asc", false)]
    #[case("sideways", false)]
    fn direction_parses_leniently(#[case] raw: &str, #[case] descending: bool) {
        let params = ListParams {
            sort_dir: Some(raw.to_owned()),
            ..ListParams::default()
        };
        let request = params.into_page_request(SORTABLE).expect("valid params");
        assert_eq!(
            request.sort().expect("sort").direction.is_descending(),
            descending
        );
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let params = ListParams {
            sort_by: Some("password".to_owned()),
            ..ListParams::default()
        };
        let error = params
            .into_page_request(SORTABLE)
            .expect_err("field outside the allow-list");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert!(error.message.contains("password"));
    }

    #[test]
    fn zero_size_is_rejected() {
        let params = ListParams {
            size: Some(0),
            ..ListParams::default()
        };
        let error = params
            .into_page_request(SORTABLE)
            .expect_err("zero page size");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
