//! Offset pagination primitives shared by ports and adapters.
//!
//! Pages are addressed by a zero-based page number and a page size, the way
//! the REST surface exposes them. The derived metadata (`total_pages`,
//! `is_first`, …) feeds the paged response envelope in the HTTP adapter.

/// Direction applied to a sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a query-string direction: `desc` (case-insensitive) descends,
    /// anything else ascends.
    pub fn from_param(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

/// Sort field plus direction, validated against a per-entity allow-list
/// before it reaches a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Validation errors returned by [`PageRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageValidationError {
    #[error("page size must be at least 1")]
    ZeroSize,
}

/// A validated request for one page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Option<SortSpec>,
}

impl PageRequest {
    /// Build a request for the given zero-based page and page size.
    pub fn new(page: u32, size: u32) -> Result<Self, PageValidationError> {
        if size == 0 {
            return Err(PageValidationError::ZeroSize);
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    /// Attach a sort specification.
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Row limit for SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus the totals needed to derive page metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Assemble a page from loaded items and the total row count.
    pub fn new(items: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        Self {
            items,
            page,
            size,
            total_elements,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Total page count: `ceil(total_elements / size)`.
    pub fn total_pages(&self) -> u64 {
        let size = u64::from(self.size.max(1));
        self.total_elements.div_ceil(size)
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_pages()
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}
