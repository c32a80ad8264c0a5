//! URL and path helpers

/// Join a base path and an endpoint with exactly one `/` between them
///
/// An empty base yields the endpoint rooted at `/`.
pub fn join_path(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    if base.is_empty() {
        format!("/{}", endpoint)
    } else {
        format!("{}/{}", base, endpoint)
    }
}

/// Ensure a base path starts and ends with `/`
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Strip query string and fragment from a location
pub fn strip_query_and_fragment(location: &str) -> &str {
    let end = location
        .find(|c| c == '?' || c == '#')
        .unwrap_or(location.len());
    &location[..end]
}

/// Split a path into decoded, non-empty segments
///
/// Segments that fail to decode are kept as-is.
pub fn path_segments(path: &str) -> Vec<String> {
    strip_query_and_fragment(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| match urlencoding::decode(s) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => s.to_string(),
        })
        .collect()
}

/// Canonical form of a route path: leading `/`, no trailing `/`, decoded segments
pub fn normalize_path(path: &str) -> String {
    let segments = path_segments(path);
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
