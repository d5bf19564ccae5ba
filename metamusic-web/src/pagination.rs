//! Pagination utilities

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    pub page_size: i64,
    /// Total number of pages, never less than 1
    pub total_pages: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Offset for a 1-indexed page; pages below 1 are treated as page 1
///
/// Saturates instead of overflowing, so a huge page is simply past the end.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size.max(0))
}

/// Total pages for a result count: `max(1, ceil(total / page_size))`
pub fn total_pages(total_results: i64, page_size: i64) -> i64 {
    if page_size <= 0 {
        return 1;
    }
    (total_results.saturating_add(page_size - 1) / page_size).max(1)
}

/// Calculate pagination metadata from total results and requested page
///
/// Unlike a table browser, pages past the end are not clamped: they
/// produce an empty range.
///
/// # Examples
/// ```
/// use metamusic_web::pagination::calculate_pagination;
///
/// let p = calculate_pagination(25, 2, 12);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 12);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64, page_size: i64) -> Pagination {
    let page = requested_page.max(1);
    Pagination {
        page,
        page_size,
        total_pages: total_pages(total_results, page_size),
        offset: page_offset(page, page_size),
    }
}

/// Parse a raw `page` query value; missing, non-numeric or <1 becomes 1
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normal() {
        let p = calculate_pagination(25, 2, 12);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 12);
    }

    #[test]
    fn test_pagination_empty_is_one_page() {
        let p = calculate_pagination(0, 1, 12);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        assert_eq!(total_pages(24, 12), 2);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(12, 12), 1);
    }

    #[test]
    fn test_pagination_out_of_bounds_high_not_clamped() {
        let p = calculate_pagination(5, 4, 12);
        assert_eq!(p.page, 4);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.offset, 36);
    }

    #[test]
    fn test_pagination_out_of_bounds_low() {
        let p = calculate_pagination(150, 0, 12);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
        assert_eq!(page_offset(-3, 12), 0);
    }

    #[test]
    fn test_pagination_huge_page_saturates() {
        assert_eq!(page_offset(i64::MAX, 12), i64::MAX);
        let p = calculate_pagination(25, i64::MAX, 12);
        assert_eq!(p.page, i64::MAX);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("")), 1);
    }
}
