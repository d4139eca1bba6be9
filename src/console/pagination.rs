//! Pagination arithmetic for the token listing.

/// A single control in the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// "previous" control; disabled on the first page.
    Prev { target: u32, disabled: bool },
    /// A numbered page link.
    Number { page: u32, current: bool },
    /// "next" control; disabled on the last page.
    Next { target: u32, disabled: bool },
    /// Non-interactive total record count.
    Total { count: u64 },
}

/// Build the pagination strip for `page` of `total_pages`.
///
/// Numbered links cover the sliding window
/// `max(1, page - 2) ..= min(total_pages, page + 2)`. With at most one page
/// there is nothing to navigate, so the strip is empty.
pub fn window(page: u32, total_pages: u32, total: u64) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut links = Vec::new();
    links.push(PageLink::Prev {
        target: page.saturating_sub(1).max(1),
        disabled: page == 1,
    });

    let start = page.saturating_sub(2).max(1);
    let end = page.saturating_add(2).min(total_pages);
    for n in start..=end {
        links.push(PageLink::Number {
            page: n,
            current: n == page,
        });
    }

    links.push(PageLink::Next {
        target: page.saturating_add(1).min(total_pages),
        disabled: page == total_pages,
    });
    links.push(PageLink::Total { count: total });
    links
}

/// 1-based row ordinal, continuous across pages.
pub fn row_ordinal(page: u32, per_page: u32, index: usize) -> u64 {
    (u64::from(page) - 1) * u64::from(per_page) + index as u64 + 1
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(links: &[PageLink]) -> Vec<u32> {
        links
            .iter()
            .filter_map(|l| match l {
                PageLink::Number { page, .. } => Some(*page),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_page_renders_no_links() {
        assert!(window(1, 1, 12).is_empty());
        assert!(window(1, 0, 0).is_empty());
    }

    #[test]
    fn test_first_page_of_three() {
        let links = window(1, 3, 31);
        assert_eq!(
            links[0],
            PageLink::Prev {
                target: 1,
                disabled: true
            }
        );
        assert_eq!(numbers(&links), vec![1, 2, 3]);
        assert_eq!(
            links[links.len() - 2],
            PageLink::Next {
                target: 2,
                disabled: false
            }
        );
        assert_eq!(links[links.len() - 1], PageLink::Total { count: 31 });
    }

    #[test]
    fn test_window_is_clamped_to_valid_pages() {
        assert_eq!(numbers(&window(5, 9, 130)), vec![3, 4, 5, 6, 7]);
        assert_eq!(numbers(&window(2, 9, 130)), vec![1, 2, 3, 4]);
        assert_eq!(numbers(&window(9, 9, 130)), vec![7, 8, 9]);
    }

    #[test]
    fn test_last_page_disables_next() {
        let links = window(9, 9, 130);
        assert_eq!(
            links[links.len() - 2],
            PageLink::Next {
                target: 9,
                disabled: true
            }
        );
    }

    #[test]
    fn test_current_page_is_marked() {
        let current: Vec<u32> = window(4, 9, 130)
            .iter()
            .filter_map(|l| match l {
                PageLink::Number {
                    page,
                    current: true,
                } => Some(*page),
                _ => None,
            })
            .collect();
        assert_eq!(current, vec![4]);
    }

    #[test]
    fn test_row_ordinals_are_continuous() {
        assert_eq!(row_ordinal(1, 15, 0), 1);
        assert_eq!(row_ordinal(1, 15, 14), 15);
        assert_eq!(row_ordinal(2, 15, 0), 16);
        assert_eq!(row_ordinal(3, 50, 7), 108);
    }
}
