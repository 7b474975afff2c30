use crate::types::PaginatedResponse;

/// Number of pages needed for `total_count` items; zero when empty.
pub fn page_count(total_count: u64, page_size: u32) -> u32 {
    if total_count == 0 || page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice an already filtered and sorted collection into one page.
///
/// `page` is 1-based. A page past the end yields an empty `items` list with
/// the usual metadata. With `fetch_all` the whole collection is returned as a
/// single page.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32, fetch_all: bool) -> PaginatedResponse<T> {
    let total_count = items.len() as u64;

    if fetch_all {
        return PaginatedResponse {
            items,
            total_count,
            total_pages: u32::from(total_count > 0),
            has_next: false,
            has_previous: false,
        };
    }

    let total_pages = page_count(total_count, page_size);
    let start = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
    let items: Vec<T> = items.into_iter().skip(start).take(page_size as usize).collect();

    PaginatedResponse {
        items,
        total_count,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_twenty_three_items_page_size_twenty() {
        let first = paginate(numbers(23), 1, 20, false);
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.total_count, 23);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next);
        assert!(!first.has_previous);

        let second = paginate(numbers(23), 2, 20, false);
        assert_eq!(second.items, vec![20, 21, 22]);
        assert!(!second.has_next);
        assert!(second.has_previous);
    }

    #[test]
    fn test_empty_dataset() {
        let page = paginate(Vec::<usize>::new(), 1, 10, false);
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let page = paginate(numbers(7), 5, 5, false);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_slice_length_formula() {
        for total in [0usize, 1, 4, 5, 6, 23, 100] {
            for size in [1u32, 5, 10, 20] {
                for page in 1u32..=6 {
                    let got = paginate(numbers(total), page, size, false).items.len();
                    let offset = (page as usize - 1) * size as usize;
                    let expected = (size as usize).min(total.saturating_sub(offset));
                    assert_eq!(got, expected, "total={total} size={size} page={page}");
                }
            }
        }
    }

    #[test]
    fn test_page_count_zero_iff_empty() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn test_fetch_all_returns_everything() {
        let page = paginate(numbers(42), 3, 5, true);
        assert_eq!(page.items.len(), 42);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
        assert!(!page.has_previous);

        let empty = paginate(Vec::<usize>::new(), 1, 5, true);
        assert_eq!(empty.total_pages, 0);
    }
}
