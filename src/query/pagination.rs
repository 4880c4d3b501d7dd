//! Page-window arithmetic over an ordered result list.

use crate::models::Page;

/// Members per page in listings.
pub const PAGE_SIZE: usize = 8;

/// `[start, end)` index window of a 1-based page, before clamping.
fn window(page: i64, page_size: usize) -> (i64, i64) {
    let size = i64::try_from(page_size).unwrap_or(i64::MAX);
    let start = page.saturating_sub(1).saturating_mul(size);
    let end = page.saturating_mul(size);
    (start, end)
}

/// Whether the page window overlaps `[0, len)`.
pub fn page_exists(len: usize, page_size: usize, page: i64) -> bool {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let (start, end) = window(page, page_size);
    len > 0 && start <= len - 1 && end > 0
}

/// Slice out page `page` of `items`.
///
/// A page outside the data yields no items but still echoes the requested
/// number, with neighbour flags computed from the neighbours' own existence.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: i64) -> Page<T> {
    let len = items.len();
    let slice = if page_exists(len, page_size, page) {
        let (start, end) = window(page, page_size);
        let clamp = |i: i64| usize::try_from(i.max(0)).unwrap_or(usize::MAX).min(len);
        items[clamp(start)..clamp(end)].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items: slice,
        page,
        has_previous: page_exists(len, page_size, page.saturating_sub(1)),
        has_next: page_exists(len, page_size, page.saturating_add(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn data(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_first_page() {
        let page = paginate(&data(20), 8, 1);
        assert_eq!(page.items, (0..8).collect::<Vec<_>>());
        assert!(!page.has_previous);
        assert!(page.has_next);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate(&data(20), 8, 3);
        assert_eq!(page.items, vec![16, 17, 18, 19]);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_just_past_the_end() {
        let page = paginate(&data(20), 8, 4);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 4);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_far_past_the_end() {
        // Page 4 starts at index 24, so it does not exist either.
        let page = paginate(&data(20), 8, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 5);
        assert!(!page.has_previous);
        assert!(!page.has_next);

        let page = paginate(&data(20), 8, i64::MAX);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }

    #[test]
    fn test_page_zero_and_negative() {
        let page = paginate(&data(20), 8, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 0);
        assert!(!page.has_previous);
        assert!(page.has_next);

        let page = paginate(&data(20), 8, -3);
        assert!(page.items.is_empty());
        assert!(!page.has_next);

        let page = paginate(&data(20), 8, i64::MIN);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let page = paginate::<usize>(&[], 8, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_exact_multiple() {
        let page = paginate(&data(16), 8, 2);
        assert_eq!(page.items.len(), 8);
        assert!(!page.has_next);
    }

    proptest! {
        #[test]
        fn pages_cover_every_item_once(len in 0usize..100, size in 1usize..20) {
            let items = data(len);
            let pages = len.div_ceil(size) as i64;
            let mut seen = Vec::new();
            for p in 1..=pages {
                let page = paginate(&items, size, p);
                prop_assert!(!page.items.is_empty());
                prop_assert_eq!(page.has_previous, p > 1);
                prop_assert_eq!(page.has_next, p < pages);
                seen.extend(page.items);
            }
            prop_assert_eq!(seen, items);
        }

        #[test]
        fn page_never_exceeds_size(len in 0usize..100, size in 1usize..20, p in -5i64..20) {
            let page = paginate(&data(len), size, p);
            prop_assert!(page.items.len() <= size);
            prop_assert_eq!(page.page, p);
        }
    }
}
