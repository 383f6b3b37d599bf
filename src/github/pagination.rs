//! RFC 5988 `Link` header parsing.

/// Extract the `rel="next"` target from a `Link` response header.
///
/// GitHub sends one comma-separated header such as
/// `<https://api.github.com/...&page=2>; rel="next", <...&page=9>; rel="last"`.
/// Returns `None` when the header is absent, carries no `next` relation, or
/// the target is not angle-bracketed.
pub fn next_page_url(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;
    for part in header.split(',') {
        let part = part.trim();
        if !part.contains("rel=\"next\"") {
            continue;
        }
        let target = part.split(';').next().unwrap_or("").trim();
        if let Some(url) = target
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return Some(url.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_among_multiple_relations() {
        let header = "<https://api.github.com/repositories/1/commits?page=2>; rel=\"next\", \
                      <https://api.github.com/repositories/1/commits?page=9>; rel=\"last\"";
        assert_eq!(
            next_page_url(Some(header)).as_deref(),
            Some("https://api.github.com/repositories/1/commits?page=2")
        );
    }

    #[test]
    fn test_next_after_prev_and_first() {
        let header = "<https://x/a?page=1>; rel=\"prev\", <https://x/a?page=1>; rel=\"first\", \
                      <https://x/a?page=3>; rel=\"next\"";
        assert_eq!(
            next_page_url(Some(header)).as_deref(),
            Some("https://x/a?page=3")
        );
    }

    #[test]
    fn test_no_next_relation() {
        let header = "<https://x/a?page=1>; rel=\"prev\", <https://x/a?page=1>; rel=\"first\"";
        assert_eq!(next_page_url(Some(header)), None);
    }

    #[test]
    fn test_absent_header() {
        assert_eq!(next_page_url(None), None);
    }

    #[test]
    fn test_malformed_target_is_ignored() {
        assert_eq!(next_page_url(Some("https://x/a?page=2; rel=\"next\"")), None);
    }
}
