/// Page size used by every listing in the store.
pub const PAGE_SIZE: i64 = 10;

/// A resolved, always-valid page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Build a request for `page`, clamping anything below 1 to the first page.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Resolve a raw `page` query value. Absent or non-numeric input means page 1.
    pub fn from_param(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(1);
        Self::new(page, PAGE_SIZE)
    }

    pub fn skip(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn take(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, PAGE_SIZE)
    }
}

pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// One page of results plus the counts needed to render pagination controls.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages: total_pages(total, request.page_size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_page_defaults_to_first() {
        let req = PageRequest::from_param(None);
        assert_eq!(req.page, 1);
        assert_eq!(req.skip(), 0);
        assert_eq!(req.take(), PAGE_SIZE);
    }

    #[test]
    fn non_numeric_page_defaults_to_first() {
        assert_eq!(PageRequest::from_param(Some("abc")).page, 1);
        assert_eq!(PageRequest::from_param(Some("")).page, 1);
    }

    #[test]
    fn zero_and_negative_pages_are_clamped() {
        assert_eq!(PageRequest::from_param(Some("0")).page, 1);
        assert_eq!(PageRequest::from_param(Some("-1")).page, 1);
        assert_eq!(PageRequest::from_param(Some("-1")).skip(), 0);
    }

    #[test]
    fn skip_follows_page_number() {
        let req = PageRequest::from_param(Some("3"));
        assert_eq!(req.skip(), 20);
        assert_eq!(req.take(), 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(23, 10), 3);
    }

    #[test]
    fn page_map_keeps_counts() {
        let page = Page::new(vec![1, 2, 3], 23, PageRequest::new(2, 10)).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total, 23);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
    }
}
