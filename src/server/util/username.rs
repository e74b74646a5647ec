/// Normalizes a caller-supplied username for lookup.
///
/// Trims surrounding whitespace, strips one leading `@` and trims again, so `"@Foo "` and
/// `"Foo"` normalize identically. Case is preserved; comparisons lowercase both sides in
/// the query.
///
/// # Arguments
/// - `raw` - Username as received in the request path
///
/// # Returns
/// - `Some(String)` - Normalized, non-empty username
/// - `None` - Nothing left after normalization
pub fn normalize_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let name = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_at_and_whitespace() {
        assert_eq!(normalize_username("@Foo "), Some("Foo".to_string()));
        assert_eq!(normalize_username("  foo"), Some("foo".to_string()));
        assert_eq!(normalize_username("@ bar"), Some("bar".to_string()));
    }

    #[test]
    fn strips_a_single_at_only() {
        assert_eq!(normalize_username("@@foo"), Some("@foo".to_string()));
    }

    #[test]
    fn rejects_empty_names() {
        assert_eq!(normalize_username(""), None);
        assert_eq!(normalize_username(" @ "), None);
    }
}
