//! Strict delimited-field parsing. No heuristics live here; see
//! `heuristics` for the best-effort pattern layer.

/// Separates a `Category: rest` prefix on the FIRST colon only, so the
/// remainder may itself contain colons (times, URLs, "Thesis: ...").
/// Returns `None` when the line carries no colon.
pub fn split_prefix(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(category, rest)| (category.trim(), rest.trim()))
}

/// Splits a row on every `|`, trimming each field. Empty fields are kept so
/// that positions stay meaningful.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

/// Splits a comma list, trimming items and discarding empty ones.
pub fn split_list(line: &str) -> Vec<&str> {
    line.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Parses a fixed-arity `|` row. Missing trailing fields default to `""`,
/// fields beyond `N` are ignored.
pub fn row<const N: usize>(line: &str) -> [&str; N] {
    let mut out = [""; N];
    for (slot, field) in out.iter_mut().zip(line.split('|')) {
        *slot = field.trim();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_prefix_first_colon_only() {
        assert_eq!(
            split_prefix("Degrees: BSc | MIT | 2020 | Thesis: networks"),
            Some(("Degrees", "BSc | MIT | 2020 | Thesis: networks"))
        );
    }

    #[test]
    fn test_split_prefix_without_colon() {
        assert_eq!(split_prefix("ReactJS | Udemy"), None);
    }

    #[test]
    fn test_split_prefix_empty_rest() {
        assert_eq!(split_prefix("Languages:"), Some(("Languages", "")));
    }

    #[test]
    fn test_split_fields_keeps_empty_positions() {
        assert_eq!(
            split_fields("Blog | A blog | | https://demo.com"),
            vec!["Blog", "A blog", "", "https://demo.com"]
        );
    }

    #[test]
    fn test_split_list_drops_empty_items() {
        assert_eq!(split_list(" React, ,Node ,"), vec!["React", "Node"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_row_pads_short_rows() {
        let [a, b, c, d] = row::<4>("ReactJS");
        assert_eq!((a, b, c, d), ("ReactJS", "", "", ""));
    }

    #[test]
    fn test_row_ignores_extra_fields() {
        let fields = row::<4>("a | b | c | d | e |");
        assert_eq!(fields, ["a", "b", "c", "d"]);
    }
}
