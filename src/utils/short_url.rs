//! Conversions between short codes and full short links.

use url::Url;

/// Builds the public short link for a code, e.g. `http://localhost:5000/Ab3dE9`.
pub fn short_link(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

/// Extracts the short code from user input.
///
/// Accepts either a bare code (`Ab3dE9`) or a full short link
/// (`http://localhost:5000/Ab3dE9`), in which case the last non-empty
/// path segment is used. Returns `None` for blank input.
pub fn extract_code(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match Url::parse(input) {
        Ok(url) if url.has_host() => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(str::to_string),
        _ => Some(input.trim_matches('/').to_string()).filter(|code| !code.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link() {
        assert_eq!(
            short_link("http://localhost:5000", "Ab3dE9"),
            "http://localhost:5000/Ab3dE9"
        );
        assert_eq!(
            short_link("https://s.example.com/", "xyz"),
            "https://s.example.com/xyz"
        );
    }

    #[test]
    fn test_extract_bare_code() {
        assert_eq!(extract_code("Ab3dE9"), Some("Ab3dE9".to_string()));
        assert_eq!(extract_code("  Ab3dE9 "), Some("Ab3dE9".to_string()));
        assert_eq!(extract_code("/Ab3dE9"), Some("Ab3dE9".to_string()));
    }

    #[test]
    fn test_extract_from_full_link() {
        assert_eq!(
            extract_code("http://localhost:5000/Ab3dE9"),
            Some("Ab3dE9".to_string())
        );
        assert_eq!(
            extract_code("https://s.example.com/Ab3dE9/"),
            Some("Ab3dE9".to_string())
        );
    }

    #[test]
    fn test_extract_blank() {
        assert_eq!(extract_code(""), None);
        assert_eq!(extract_code("   "), None);
        assert_eq!(extract_code("/"), None);
        assert_eq!(extract_code("http://localhost:5000/"), None);
    }
}
