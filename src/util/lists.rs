/// Splits a delimited request field into trimmed, non-empty entries.
///
/// Several endpoints accept flat comma- or semicolon-delimited strings
/// instead of JSON arrays (tags, expertise, key takeaways).
pub fn split_delimited_list(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn split_comma_list(raw: &str) -> Vec<String> {
    split_delimited_list(raw, ',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            split_comma_list(" rust, web ,  backend "),
            vec!["rust", "web", "backend"]
        );
    }

    #[test]
    fn drops_empty_entries() {
        assert_eq!(split_comma_list("a,,b,"), vec!["a", "b"]);
        assert!(split_comma_list("").is_empty());
        assert!(split_comma_list(" , ,").is_empty());
    }

    #[test]
    fn semicolon_delimiter_for_takeaways() {
        assert_eq!(
            split_delimited_list("practice daily; ask questions;", ';'),
            vec!["practice daily", "ask questions"]
        );
    }
}
