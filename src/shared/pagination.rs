//! Pagination and sorting
//!
//! List endpoints accept `page`, `limit`, `sortBy`, `sortType` and, where it
//! applies, a title `query`. Results come back as a [`Page`], whose field set
//! matches what paginating clients of this API already consume.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Default page size
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a client may request
pub const MAX_LIMIT: i64 = 100;

/// Query-string parameters shared by list endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Case-insensitive title filter
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    /// Channel filter (video listing only)
    pub user_id: Option<String>,
}

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, SharedError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(SharedError::validation("page", "page must be at least 1"));
        }
        if limit < 1 {
            return Err(SharedError::validation("limit", "limit must be at least 1"));
        }

        Ok(Self {
            page,
            limit: limit.min(MAX_LIMIT),
        })
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `sortType`; anything other than `desc` sorts ascending
    pub fn parse(raw: Option<&str>, default: SortDirection) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            None => default,
            Some(s) if s.is_empty() => default,
            Some(s) if s == "desc" => SortDirection::Desc,
            Some(_) => SortDirection::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A sortable field of one resource
///
/// Implementors map the client-facing `sortBy` names onto fixed column
/// expressions, so user input never reaches the `ORDER BY` clause.
pub trait SortField: Copy + Sized {
    /// Field used when `sortBy` is absent
    const DEFAULT: Self;

    /// Parse a client-facing field name (`createdAt`, `views`, ...)
    fn from_param(name: &str) -> Option<Self>;

    /// Column expression for `ORDER BY`
    fn column(&self) -> &'static str;
}

/// Validated sort order for resource `F`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: SortField> Sort<F> {
    pub fn parse(
        sort_by: Option<&str>,
        sort_type: Option<&str>,
        default_direction: SortDirection,
    ) -> Result<Self, SharedError> {
        let field = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
            None => F::DEFAULT,
            Some(name) => F::from_param(name)
                .ok_or_else(|| SharedError::validation("sortBy", "Invalid sortBy field"))?,
        };

        Ok(Self {
            field,
            direction: SortDirection::parse(sort_type, default_direction),
        })
    }

    /// `ORDER BY` body, with a stable tie-breaker on the primary key
    pub fn order_by(&self, id_column: &str) -> String {
        let direction = self.direction.as_sql();
        format!("{} {direction}, {id_column} {direction}", self.field.column())
    }
}

impl ListQuery {
    pub fn pagination(&self) -> Result<Pagination, SharedError> {
        Pagination::new(self.page, self.limit)
    }

    pub fn sort<F: SortField>(&self, default_direction: SortDirection) -> Result<Sort<F>, SharedError> {
        Sort::parse(self.sort_by.as_deref(), self.sort_type.as_deref(), default_direction)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub docs: Vec<T>,
    pub total_docs: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
    pub paging_counter: i64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
}

impl<T> Page<T> {
    pub fn new(docs: Vec<T>, total_docs: i64, pagination: Pagination) -> Self {
        let Pagination { page, limit } = pagination;
        let total_pages = if total_docs <= 0 {
            1
        } else {
            (total_docs - 1) / limit + 1
        };
        let has_prev_page = page > 1;
        let has_next_page = page < total_pages;

        Self {
            docs,
            total_docs,
            limit,
            page,
            total_pages,
            paging_counter: pagination.offset().saturating_add(1),
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }
}
