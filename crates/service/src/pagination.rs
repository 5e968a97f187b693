//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Items per page used by the trivia listings.
pub const ITEMS_PER_PAGE: u32 = 10;

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

    /// First page with the given size.
    pub fn first(per_page: u32) -> Self { Self { page: 1, per_page } }

    /// Page 0 precedes the first page: its slice of any result set is empty.
    pub fn is_before_first(self) -> bool { self.page == 0 }

    /// Clamp to sane defaults and convert to a 0-based page index and size
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }

    /// Offset of the first item on this page.
    pub fn offset(self) -> u64 {
        let (idx, per_page) = self.normalize();
        idx * per_page
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: ITEMS_PER_PAGE } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn offset_follows_page_size() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 7).offset(), 14);
    }

    #[test]
    fn only_page_zero_is_before_first() {
        assert!(Pagination::new(0, 10).is_before_first());
        assert!(!Pagination::new(1, 10).is_before_first());
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 10);
    }
}
