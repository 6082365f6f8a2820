/// First value of a query parameter that may be repeated (`?view=a&view=b` gives `a`).
///
/// Handlers extract the query as `Query<Vec<(String, String)>>` so repeated keys are
/// kept, and reduce it to a single optional value here before any resolver sees it.
pub fn first_query_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_repeated_key_takes_first() {
        let query = pairs(&[("view", "operations"), ("view", "exec")]);
        assert_eq!(first_query_value(&query, "view"), Some("operations"));
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(first_query_value(&pairs(&[("page", "2")]), "view"), None);
        assert_eq!(first_query_value(&pairs(&[("view", "")]), "view"), Some(""));
    }
}
