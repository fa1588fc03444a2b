//! Pagination utilities shared by repositories and services
//!
//! Provides a simple `Pagination` struct, the normalisation rules applied to
//! caller input, and the `Paged` envelope returned by list operations.

use serde::Serialize;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self { Self { page, per_page } }

    /// Clamp to sane defaults: page 0 becomes 1, per_page 0 becomes the default,
    /// per_page above the maximum is capped.
    pub fn normalized(self) -> Self {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = match self.per_page {
            0 => DEFAULT_PER_PAGE,
            n => n.min(MAX_PER_PAGE),
        };
        Self { page, per_page }
    }

    /// `(offset, limit)` for a SQL query.
    pub fn offset_limit(self) -> (u64, u64) {
        let n = self.normalized();
        ((n.page as u64 - 1) * n.per_page as u64, n.per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PER_PAGE } }
}

/// One page of results plus the total row count matching the query.
#[derive(Clone, Debug, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        let p = pagination.normalized();
        Self { items, total, page: p.page, per_page: p.per_page }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged { items: self.items.into_iter().map(f).collect(), total: self.total, page: self.page, per_page: self.per_page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let p = Pagination { page: 0, per_page: 0 }.normalized();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (offset, limit) = Pagination { page: 5, per_page: 1000 }.offset_limit();
        assert_eq!(offset, 400);
        assert_eq!(limit, 100);
    }

    #[test]
    fn offset_of_third_page() {
        assert_eq!(Pagination::new(3, 7).offset_limit(), (14, 7));
    }

    #[test]
    fn paged_map_keeps_counts() {
        let page = Paged::new(vec![1, 2], 9, Pagination::new(2, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 9);
        assert_eq!(page.page, 2);
    }
}
