//! Pagination over a fully materialized, ordered result list.
//!
//! `start` is 1-based. Both `start` and `limit` arrive as raw query-string
//! values and may be numeric strings; they are coerced here rather than at the
//! extractor so that a bad value maps to a 400 instead of a rejection.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// One page of results plus navigation metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub start: i64,
    pub limit: i64,
    /// Total number of items before slicing
    pub count: i64,
    /// URL of the previous page, empty string on the first page
    pub previous: String,
    /// URL of the next page, empty string on the last page
    pub next: String,
    pub results: Vec<T>,
}

fn coerce(raw: Option<&str>, default: i64, name: &str) -> AppResult<i64> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse::<i64>().map_err(|_| {
            AppError::InvalidParameter(format!("{} must be an integer, got '{}'", name, v))
        }),
    }
}

/// Slice an ordered result list into a page with previous/next links.
///
/// Fails with `InvalidParameter` when `start` or `limit` does not coerce to a
/// positive integer, and with `OutOfRange` when `start` points past the end of
/// the list. `start == count` is still in range and yields the final item.
///
/// The previous link is computed purely from the current `start` and `limit`
/// (`start = max(1, start - limit)`, `limit = start - 1`), so it is not
/// symmetric with the forward page size when the caller varied `limit`
/// between requests.
pub fn paginate<T: for<'a> ToSchema<'a>>(
    results: Vec<T>,
    base_url: &str,
    start: Option<&str>,
    limit: Option<&str>,
    default_limit: i64,
) -> AppResult<Page<T>> {
    let start = coerce(start, 1, "start")?;
    let limit = coerce(limit, default_limit, "limit")?;

    if start < 1 {
        return Err(AppError::InvalidParameter(format!(
            "start must be >= 1, got {}",
            start
        )));
    }
    if limit < 1 {
        return Err(AppError::InvalidParameter(format!(
            "limit must be >= 1, got {}",
            limit
        )));
    }

    let count = results.len() as i64;
    if count < start {
        return Err(AppError::OutOfRange(format!(
            "start {} exceeds result count {}",
            start, count
        )));
    }

    let previous = if start == 1 {
        String::new()
    } else {
        let prev_start = std::cmp::max(1, start - limit);
        let prev_limit = start - 1;
        format!("{}?start={}&limit={}", base_url, prev_start, prev_limit)
    };

    // Checked so an absurd limit reads as "past the end" instead of
    // overflowing start + limit.
    let window_end = start.checked_add(limit);

    let next = match window_end {
        Some(end) if end <= count => format!("{}?start={}&limit={}", base_url, end, limit),
        _ => String::new(),
    };

    let from = (start - 1) as usize;
    let to = window_end.map_or(count, |end| std::cmp::min(count, end - 1)) as usize;
    let results = results
        .into_iter()
        .skip(from)
        .take(to - from)
        .collect::<Vec<_>>();

    Ok(Page {
        start,
        limit,
        count,
        previous,
        next,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
    struct Row(i64);

    fn items(n: i64) -> Vec<Row> {
        (1..=n).map(Row).collect()
    }

    #[test]
    fn first_page_of_twenty_five() {
        let page = paginate(items(25), "/api/v1/books", Some("1"), Some("20"), 20).unwrap();
        assert_eq!(page.start, 1);
        assert_eq!(page.limit, 20);
        assert_eq!(page.count, 25);
        assert_eq!(page.results, items(20));
        assert_eq!(page.previous, "");
        assert_eq!(page.next, "/api/v1/books?start=21&limit=20");
    }

    #[test]
    fn last_partial_page() {
        let page = paginate(items(25), "/api/v1/books", Some("21"), Some("20"), 20).unwrap();
        assert_eq!(page.results, (21..=25).map(Row).collect::<Vec<_>>());
        assert_eq!(page.previous, "/api/v1/books?start=1&limit=20");
        assert_eq!(page.next, "");
    }

    #[test]
    fn start_beyond_count_is_out_of_range() {
        let err = paginate(items(5), "/books", Some("10"), Some("5"), 20).unwrap_err();
        assert!(matches!(err, AppError::OutOfRange(_)));
    }

    #[test]
    fn start_equal_to_count_returns_final_item() {
        let page = paginate(items(5), "/books", Some("5"), Some("5"), 20).unwrap();
        assert_eq!(page.results, vec![Row(5)]);
        assert_eq!(page.next, "");
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        let page = paginate(items(25), "/books", None, None, 20).unwrap();
        assert_eq!(page.start, 1);
        assert_eq!(page.limit, 20);
        assert_eq!(page.results.len(), 20);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let page = paginate(items(10), "/books", Some(" 3 "), Some("4"), 20).unwrap();
        assert_eq!(page.start, 3);
        assert_eq!(page.results, vec![Row(3), Row(4), Row(5), Row(6)]);
    }

    #[test]
    fn non_integer_params_are_rejected() {
        for (start, limit) in [(Some("abc"), Some("5")), (Some("1"), Some("5.5"))] {
            let err = paginate(items(5), "/books", start, limit, 20).unwrap_err();
            assert!(matches!(err, AppError::InvalidParameter(_)));
        }
    }

    #[test]
    fn non_positive_params_are_rejected() {
        for (start, limit) in [(Some("0"), Some("5")), (Some("1"), Some("0"))] {
            let err = paginate(items(5), "/books", start, limit, 20).unwrap_err();
            assert!(matches!(err, AppError::InvalidParameter(_)));
        }
    }

    #[test]
    fn extreme_limit_returns_the_rest_without_a_next_link() {
        let page = paginate(
            items(5),
            "/books",
            Some("2"),
            Some(&i64::MAX.to_string()),
            20,
        )
        .unwrap();
        assert_eq!(page.results, (2..=5).map(Row).collect::<Vec<_>>());
        assert_eq!(page.next, "");
        assert_eq!(page.previous, "/books?start=1&limit=1");
    }

    #[test]
    fn slice_length_matches_window() {
        for count in [1i64, 7, 20, 25] {
            for start in 1..=count {
                for limit in [1i64, 3, 20] {
                    let page = paginate(
                        items(count),
                        "/books",
                        Some(&start.to_string()),
                        Some(&limit.to_string()),
                        20,
                    )
                    .unwrap();
                    let expected = std::cmp::min(limit, count - start + 1);
                    assert_eq!(page.results.len() as i64, expected);
                    assert_eq!(page.previous.is_empty(), start == 1);
                    assert_eq!(page.next.is_empty(), start + limit > count);
                }
            }
        }
    }

    #[test]
    fn following_next_continues_after_current_slice() {
        let mut start = 1i64;
        let limit = 4i64;
        let mut seen = Vec::new();
        loop {
            let page = paginate(
                items(11),
                "/books",
                Some(&start.to_string()),
                Some(&limit.to_string()),
                20,
            )
            .unwrap();
            seen.extend(page.results);
            if page.next.is_empty() {
                break;
            }
            start += limit;
        }
        assert_eq!(seen, items(11));
    }
}
