use std::collections::BTreeSet;

/// One comma-separated token of a page range expression: either a single
/// page (`end == None`) or an inclusive span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: Option<u32>,
}

impl PageRange {
    /// Parse a single token like "5" or "3 - 7".
    ///
    /// Returns `None` for anything that is not a page number or a pair of
    /// page numbers separated by one dash.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        match s.split_once('-') {
            Some((start, end)) => Some(PageRange {
                start: parse_page_number(start)?,
                end: Some(parse_page_number(end)?),
            }),
            None => Some(PageRange {
                start: parse_page_number(s)?,
                end: None,
            }),
        }
    }

    /// Expand into 1-based page numbers.
    ///
    /// A token that does not fit entirely inside `1..=total_pages`, or a span
    /// written backwards, expands to nothing. Spans are never clamped.
    pub fn expand(&self, total_pages: u32) -> Vec<u32> {
        let end = self.end.unwrap_or(self.start);

        if self.start < 1 || end > total_pages || self.start > end {
            return Vec::new();
        }

        (self.start..=end).collect()
    }
}

fn parse_page_number(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}

/// Parse a comma-separated list of page ranges like "1,3-5,7", skipping
/// empty and unparseable tokens.
pub fn parse_page_ranges(s: &str) -> Vec<PageRange> {
    s.split(',').filter_map(PageRange::parse).collect()
}

/// Expand a page range expression into ascending, deduplicated 1-based page
/// numbers. Invalid tokens are dropped silently; an empty result is left for
/// the caller to report.
pub fn parse_range(s: &str, total_pages: u32) -> Vec<u32> {
    let pages: BTreeSet<u32> = parse_page_ranges(s)
        .iter()
        .flat_map(|range| range.expand(total_pages))
        .collect();
    pages.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let range = PageRange::parse("5").unwrap();
        assert_eq!(range.start, 5);
        assert_eq!(range.end, None);
        assert_eq!(range.expand(10), vec![5]);
    }

    #[test]
    fn test_page_range() {
        let range = PageRange::parse("1-5").unwrap();
        assert_eq!(range.expand(10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_whitespace_around_dash() {
        let range = PageRange::parse("  2 -  4 ").unwrap();
        assert_eq!(range, PageRange { start: 2, end: Some(4) });
    }

    #[test]
    fn test_reverse_range_is_dropped() {
        let range = PageRange::parse("5-2").unwrap();
        assert!(range.expand(10).is_empty());
        assert_eq!(parse_range("5-2", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_span_past_end_is_dropped_not_clamped() {
        assert_eq!(parse_range("8-12", 10), Vec::<u32>::new());
        assert_eq!(parse_range("0-3", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_mixed_expression() {
        assert_eq!(parse_range("1,3-5,7", 10), vec![1, 3, 4, 5, 7]);
        assert_eq!(parse_range("1,3-6,7", 10), vec![1, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_out_of_bounds_single_pages() {
        assert_eq!(parse_range("0,11", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_non_numeric_token_dropped() {
        assert_eq!(parse_range("abc,2", 10), vec![2]);
        assert_eq!(parse_range("1-x,3", 10), vec![3]);
        assert_eq!(parse_range("1-2-3,4", 10), vec![4]);
        assert_eq!(parse_range("-3", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_range("", 10), Vec::<u32>::new());
        assert_eq!(parse_range(" , ,", 10), Vec::<u32>::new());
    }

    #[test]
    fn test_empty_tokens_skipped() {
        assert_eq!(parse_range("1,,2,", 10), vec![1, 2]);
    }

    #[test]
    fn test_output_sorted_and_deduplicated() {
        assert_eq!(parse_range("9,2-4,3,1-2,9", 10), vec![1, 2, 3, 4, 9]);

        let pages = parse_range("10,1-10,5,7-8,2", 10);
        assert!(pages.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(pages.len(), 10);
    }
}
