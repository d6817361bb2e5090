//! Pagination inputs.
//!
//! `PageCursor` is the caller-facing page/limit pair; `PostPage` is the
//! limit/offset form the repository consumes. Neither is persisted.

use serde::{Deserialize, Serialize};

/// Page number used when the caller omits or sends a non-positive page.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the caller omits or sends a non-positive limit.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest offset SQLite can bind.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Caller-supplied page/limit pair with derived offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub limit: u64,
    pub offset: u64,
    pub page: u64,
}

impl PageCursor {
    /// Builds a cursor from raw query values.
    ///
    /// Missing, zero, or negative values fall back to `page=1` and `limit=10`.
    /// The offset is exact up to `MAX_OFFSET` and capped there beyond it.
    pub fn from_raw(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = positive_or(page, DEFAULT_PAGE);
        let limit = positive_or(limit, DEFAULT_LIMIT);
        let offset = (page - 1)
            .checked_mul(limit)
            .map_or(MAX_OFFSET, |offset| offset.min(MAX_OFFSET));
        Self {
            limit,
            offset,
            page,
        }
    }

    /// Converts the cursor into repository query options.
    pub fn to_post_page(self) -> PostPage {
        PostPage {
            limit: Some(self.limit),
            offset: self.offset,
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::from_raw(None, None)
    }
}

/// Repository-level page bounds over distinct posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostPage {
    /// Maximum number of posts. `None` means unbounded.
    pub limit: Option<u64>,
    /// Number of posts to skip.
    pub offset: u64,
}

impl PostPage {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: Some(limit),
            offset,
        }
    }
}

fn positive_or(value: Option<i64>, fallback: u64) -> u64 {
    value
        .and_then(|value| u64::try_from(value).ok())
        .filter(|value| *value >= 1)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::{PageCursor, PostPage, MAX_OFFSET};

    #[test]
    fn defaults_apply_when_absent() {
        let cursor = PageCursor::from_raw(None, None);
        assert_eq!(cursor.page, 1);
        assert_eq!(cursor.limit, 10);
        assert_eq!(cursor.offset, 0);
    }

    #[test]
    fn non_positive_values_fall_back_to_defaults() {
        let cursor = PageCursor::from_raw(Some(0), Some(-4));
        assert_eq!(cursor, PageCursor::default());
    }

    #[test]
    fn offset_is_derived_from_page_and_limit() {
        let cursor = PageCursor::from_raw(Some(3), Some(5));
        assert_eq!(cursor.offset, 10);
        assert_eq!(cursor.to_post_page(), PostPage::new(5, 10));
    }

    #[test]
    fn offset_is_exact_beyond_32_bit_range() {
        let cursor = PageCursor::from_raw(Some(500_000_000), Some(10));
        assert_eq!(cursor.page, 500_000_000);
        assert_eq!(cursor.limit, 10);
        assert_eq!(cursor.offset, 4_999_999_990);
    }

    #[test]
    fn offset_past_sqlite_range_is_capped() {
        let cursor = PageCursor::from_raw(Some(i64::MAX), Some(i64::MAX));
        assert_eq!(cursor.page, i64::MAX as u64);
        assert_eq!(cursor.offset, MAX_OFFSET);
    }
}
