/// Task listing query builder
///
/// Translates raw listing parameters into a [`TaskQuery`]: a scoped,
/// deterministic query plan. The plan always carries the owner id, and the
/// SQL layer in [`crate::models::task`] applies it as the first predicate:
/// a listing can never observe another user's tasks, whatever filter, search,
/// or sort values were supplied.
///
/// Sort key and status filter are exhaustively matched enums rather than
/// string-keyed lookups, so adding a sortable field is a compile-time-checked
/// change.
///
/// # Defaults
///
/// - `status`: all (no filter)
/// - `search`: none
/// - `sortBy`: createdAt
/// - `sortOrder`: desc, whatever the sort key
/// - `page`: 1, `limit`: 10, both coerced to positive integers
use serde::{Deserialize, Serialize};

use super::task::TaskStatus;

/// Field driving the listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Order by task title
    Title,

    /// Order by task status
    Status,

    /// Order by creation timestamp
    CreatedAt,
}

impl SortKey {
    /// Parses a raw `sortBy` value; unknown keys fall back to `CreatedAt`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => SortKey::Title,
            Some("status") => SortKey::Status,
            _ => SortKey::CreatedAt,
        }
    }

    /// Column name used in ORDER BY
    pub fn column(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Status => "status",
            SortKey::CreatedAt => "created_at",
        }
    }
}

/// Listing sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    Asc,

    /// Descending
    Desc,
}

impl SortOrder {
    /// Parses a raw `sortOrder` value; absent and unknown values both fall
    /// back to descending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    /// SQL keyword for ORDER BY
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Status predicate for the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status predicate applied
    All,

    /// Only tasks in the given status
    Only(TaskStatus),
}

impl StatusFilter {
    /// Parses a raw `status` value
    ///
    /// `"all"`, absent, and unrecognized values all mean no filter. Treating
    /// an unknown status as a no-op rather than an error is a policy choice:
    /// the request layer validates status values on writes, and listings stay
    /// tolerant of stale clients.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.and_then(TaskStatus::parse) {
            Some(status) => StatusFilter::Only(status),
            None => StatusFilter::All,
        }
    }
}

/// Raw listing parameters as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Status filter (`all`, `pending`, `in_progress`, `completed`)
    pub status: Option<String>,

    /// Free-text search over title and description
    pub search: Option<String>,

    /// Sort key (`title`, `status`, `createdAt`)
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,

    /// Sort direction (`asc`, `desc`)
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,

    /// 1-based page number, kept raw so junk values degrade instead of
    /// failing deserialization
    pub page: Option<String>,

    /// Page size, raw for the same reason
    pub limit: Option<String>,
}

/// Resolved, owner-scoped query plan for a task listing
///
/// Fully determines the result set and its ordering; built per request and
/// never persisted.
#[derive(Debug, Clone)]
pub struct TaskQuery {
    /// Owner whose tasks the listing is scoped to; always the first
    /// predicate, never optional
    pub owner_id: i64,

    /// Status predicate
    pub status: StatusFilter,

    /// Search term (present only when non-empty); matches title OR
    /// description, case-insensitively (ILIKE) on both fields
    pub search: Option<String>,

    /// Sort key
    pub sort: SortKey,

    /// Sort direction
    pub order: SortOrder,

    /// 1-based page number (>= 1)
    pub page: i64,

    /// Page size (>= 1)
    pub limit: i64,
}

impl TaskQuery {
    /// Resolves raw listing parameters into a scoped query plan
    pub fn build(owner_id: i64, params: &ListParams) -> Self {
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            owner_id,
            status: StatusFilter::parse(params.status.as_deref()),
            search,
            sort: SortKey::parse(params.sort_by.as_deref()),
            order: SortOrder::parse(params.sort_order.as_deref()),
            page: coerce_positive(params.page.as_deref(), 1),
            limit: coerce_positive(params.limit.as_deref(), 10),
        }
    }

    /// Rows skipped before the page starts; never negative because `page`
    /// and `limit` are clamped
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Coerces a raw pagination value to a positive integer
///
/// Absent and unparseable values take the default; parseable values are
/// clamped to at least 1.
fn coerce_positive(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
        .max(1)
}

/// Pagination metadata returned alongside a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number served
    pub page: i64,

    /// Page size used
    pub limit: i64,

    /// Total rows matching the filter predicates (ignoring pagination)
    pub total: i64,

    /// ceil(total / limit)
    pub total_pages: i64,
}

impl Pagination {
    /// Builds pagination metadata from the served query and the total count
    pub fn new(query: &TaskQuery, total: i64) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            total,
            total_pages: (total + query.limit - 1) / query.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = TaskQuery::build(42, &ListParams::default());

        assert_eq!(query.owner_id, 42);
        assert_eq!(query.status, StatusFilter::All);
        assert_eq!(query.search, None);
        assert_eq!(query.sort, SortKey::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_status_filter_parse() {
        use crate::models::task::TaskStatus;

        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("pending")),
            StatusFilter::Only(TaskStatus::Pending)
        );
        assert_eq!(
            StatusFilter::parse(Some("in_progress")),
            StatusFilter::Only(TaskStatus::InProgress)
        );
        assert_eq!(
            StatusFilter::parse(Some("completed")),
            StatusFilter::Only(TaskStatus::Completed)
        );
        // Unrecognized values are a no-op, not an error
        assert_eq!(StatusFilter::parse(Some("archived")), StatusFilter::All);
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_created_at() {
        let params = ListParams {
            sort_by: Some("priority".to_string()),
            ..Default::default()
        };
        let query = TaskQuery::build(1, &params);

        assert_eq!(query.sort, SortKey::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_order_defaults_to_desc_for_every_sort_key() {
        for (raw, key) in [
            ("title", SortKey::Title),
            ("status", SortKey::Status),
            ("createdAt", SortKey::CreatedAt),
        ] {
            let params = ListParams {
                sort_by: Some(raw.to_string()),
                ..Default::default()
            };
            let query = TaskQuery::build(1, &params);
            assert_eq!(query.sort, key);
            assert_eq!(query.order, SortOrder::Desc, "default order for {}", raw);
        }
    }

    #[test]
    fn test_explicit_order_wins() {
        let params = ListParams {
            sort_by: Some("title".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let query = TaskQuery::build(1, &params);

        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn test_unknown_order_falls_back_to_desc() {
        let params = ListParams {
            sort_order: Some("sideways".to_string()),
            ..Default::default()
        };
        assert_eq!(TaskQuery::build(1, &params).order, SortOrder::Desc);
    }

    #[test]
    fn test_page_and_limit_clamped() {
        let params = ListParams {
            page: Some("0".to_string()),
            limit: Some("-5".to_string()),
            ..Default::default()
        };
        let query = TaskQuery::build(1, &params);

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 1);
        assert_eq!(query.offset(), 0);

        let params = ListParams {
            page: Some("-3".to_string()),
            ..Default::default()
        };
        assert_eq!(TaskQuery::build(1, &params).offset(), 0);
    }

    #[test]
    fn test_non_numeric_page_and_limit_take_defaults() {
        let params = ListParams {
            page: Some("abc".to_string()),
            limit: Some("ten".to_string()),
            ..Default::default()
        };
        let query = TaskQuery::build(1, &params);

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_offset_math() {
        let params = ListParams {
            page: Some("3".to_string()),
            limit: Some("10".to_string()),
            ..Default::default()
        };
        assert_eq!(TaskQuery::build(1, &params).offset(), 20);
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let params = ListParams {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(TaskQuery::build(1, &params).search, None);

        let params = ListParams {
            search: Some("  report ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            TaskQuery::build(1, &params).search,
            Some("report".to_string())
        );
    }

    #[test]
    fn test_pagination_metadata() {
        let params = ListParams {
            limit: Some("10".to_string()),
            ..Default::default()
        };
        let query = TaskQuery::build(1, &params);

        // 15 tasks over pages of 10 -> 2 pages
        let pagination = Pagination::new(&query, 15);
        assert_eq!(pagination.total, 15);
        assert_eq!(pagination.total_pages, 2);

        assert_eq!(Pagination::new(&query, 0).total_pages, 0);
        assert_eq!(Pagination::new(&query, 10).total_pages, 1);
        assert_eq!(Pagination::new(&query, 11).total_pages, 2);
    }

    #[test]
    fn test_list_params_wire_names() {
        // Query-string names are camelCase for sort fields; everything
        // arrives as a string on the wire
        let params: ListParams = serde_json::from_str(
            r#"{"status":"pending","sortBy":"title","sortOrder":"asc","page":"2","limit":"5"}"#,
        )
        .unwrap();

        let query = TaskQuery::build(9, &params);
        assert_eq!(query.sort, SortKey::Title);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
    }
}
