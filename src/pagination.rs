//! Pagination

/// Page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 160;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// Build a page request. Missing or zero values fall back to page 1 and the default size.
    pub fn new(number: Option<u32>, size: Option<u32>) -> Self {
        Self {
            number: number.filter(|number| *number > 0).unwrap_or(1),
            size: size.filter(|size| *size > 0).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// The 1-based page number.
    pub fn number(self) -> u32 {
        self.number
    }

    /// Rows per page.
    pub fn limit(self) -> u32 {
        self.size
    }

    /// Rows to skip before this page.
    pub fn offset(self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    /// Number of pages needed for `total` rows.
    pub fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.size))
    }
}

/// One page of results with the totals of the full result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Matching items across every page.
    pub total: u64,

    /// 1-based page number.
    pub page: u32,

    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Wrap a fetched page with its totals.
    pub fn new(items: Vec<T>, total: u64, page: Page) -> Self {
        Self {
            items,
            total,
            page: page.number(),
            total_pages: page.total_pages(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_160() {
        let page = Page::new(None, None);

        assert_eq!(page, Page::default());
        assert_eq!(page.number(), 1);
        assert_eq!(page.limit(), 160);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        assert_eq!(Page::new(Some(0), Some(0)), Page::default());
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Page::new(Some(2), None).offset(), 160);
        assert_eq!(Page::new(Some(3), Some(25)).offset(), 50);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::default();

        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(160), 1);
        assert_eq!(page.total_pages(161), 2);
    }

    #[test]
    fn page_past_the_end_keeps_accurate_totals() {
        let result: Paginated<u32> = Paginated::new(Vec::new(), 161, Page::new(Some(3), None));

        assert!(result.items.is_empty());
        assert_eq!(result.total, 161);
        assert_eq!(result.page, 3);
        assert_eq!(result.total_pages, 2);
    }
}
