/// Every maximal run of ASCII digits in `page_ref`, left to right.
/// Runs too large for `u32` are skipped.
pub fn resolve_pages(page_ref: &str) -> Vec<u32> {
    page_ref
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse().ok())
        .collect()
}

/// First page number named by a free-form citation such as `"p.231–232"`.
///
/// `None` means the citation names no page; callers skip the snapshot.
pub fn resolve_first_page(page_ref: &str) -> Option<u32> {
    let first = page_ref.split(|c: char| !c.is_ascii_digit()).find(|run| !run.is_empty())?;
    first.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ranges_with_en_dash() {
        assert_eq!(resolve_first_page("p.231–232"), Some(231));
        assert_eq!(resolve_pages("p.231–232"), [231, 232]);
    }

    #[test]
    fn lists_and_prefixes() {
        assert_eq!(resolve_first_page("pp. 5-9, see also 12"), Some(5));
        assert_eq!(resolve_pages("pp. 5-9, see also 12"), [5, 9, 12]);
        assert_eq!(resolve_first_page("page 42"), Some(42));
        assert_eq!(resolve_first_page("  7  "), Some(7));
    }

    #[test]
    fn no_digits_is_none() {
        assert_eq!(resolve_first_page("no digits here"), None);
        assert_eq!(resolve_first_page(""), None);
        assert!(resolve_pages("chapter one").is_empty());
    }

    #[test]
    fn non_ascii_numerals_are_not_digits() {
        assert_eq!(resolve_first_page("p.٣٤"), None);
        assert_eq!(resolve_first_page("p.٣٤ or 8"), Some(8));
    }

    #[test]
    fn leading_zeros_parse() {
        assert_eq!(resolve_first_page("p.007"), Some(7));
    }

    #[test]
    fn overflowing_run_is_none() {
        assert_eq!(resolve_first_page("p.99999999999999"), None);
    }
}
