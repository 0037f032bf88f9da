//! Resorting of quoted output lines by their target field.

/// Separator between quoted fields in `"a","b"` lines.
const QUOTED_FIELD_SEPARATOR: &str = "\",\"";

/// Case-folded second field of a `"field1","field2",...` line.
///
/// Lines without a second field get an empty key and sort first.
pub fn sort_key(line: &str) -> String {
    match line.split(QUOTED_FIELD_SEPARATOR).nth(1) {
        Some(field) => field.trim_matches('"').trim().to_lowercase(),
        None => String::new(),
    }
}

/// Stable sort of body lines by [`sort_key`].
pub fn sort_body(lines: &mut [String]) {
    lines.sort_by_cached_key(|line| sort_key(line));
}

/// Sort everything after the first line; the header stays first.
pub fn sort_with_header(mut lines: Vec<String>) -> Vec<String> {
    if lines.len() > 1 {
        sort_body(&mut lines[1..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn key_is_second_field_case_folded() {
        assert_eq!(sort_key(r#""English","Cat","Finnish","kissa""#), "cat");
        assert_eq!(sort_key(r#""hello","Bonjour""#), "bonjour");
    }

    #[test]
    fn key_strips_residual_quotes_and_space() {
        assert_eq!(sort_key(r#""a","  Zed ""#), "zed");
    }

    #[test]
    fn line_without_second_field_sorts_first() {
        assert_eq!(sort_key(r#""only one field""#), "");
        assert_eq!(sort_key("unquoted,line"), "");

        let sorted = sort_with_header(owned(&[
            "header",
            r#""a","b""#,
            r#""quarantined line""#,
        ]));
        assert_eq!(sorted[1], r#""quarantined line""#);
    }

    #[test]
    fn header_stays_first() {
        let sorted = sort_with_header(owned(&[
            r#""Source","Zzz""#,
            r#""x","banana""#,
            r#""y","Apple""#,
        ]));
        assert_eq!(
            sorted,
            owned(&[r#""Source","Zzz""#, r#""y","Apple""#, r#""x","banana""#])
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let sorted = sort_with_header(owned(&[
            "h",
            r#""second","same""#,
            r#""first","SAME""#,
        ]));
        assert_eq!(sorted[1], r#""second","same""#);
        assert_eq!(sorted[2], r#""first","SAME""#);
    }

    #[test]
    fn resorting_sorted_body_is_identity() {
        let once = sort_with_header(owned(&[
            "h",
            r#""a","c""#,
            r#""b","a""#,
            r#""c","b""#,
            r#""d","a""#,
        ]));
        let twice = sort_with_header(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_and_header_only_inputs() {
        assert!(sort_with_header(Vec::new()).is_empty());
        assert_eq!(sort_with_header(owned(&["h"])), owned(&["h"]));
    }
}
