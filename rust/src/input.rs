//! Parsing of raw activity input fields.

/// Split a comma separated predecessor field into ids.
///
/// Items are trimmed and blank items dropped, so `"A, B,,"` yields
/// `["A", "B"]` and an empty field yields no predecessors.
pub fn parse_predecessors(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_field_has_no_predecessors() {
        assert!(parse_predecessors("").is_empty());
        assert!(parse_predecessors("  ,  ").is_empty());
    }

    #[test]
    fn test_items_are_trimmed_in_order() {
        assert_eq!(parse_predecessors("B, A ,C"), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_inner_spaces_are_kept() {
        assert_eq!(parse_predecessors("pour slab, frame"), vec!["pour slab", "frame"]);
    }
}
