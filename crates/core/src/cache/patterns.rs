//! Pure glob matching for cache keys.
//!
//! Patterns use `*` as a wildcard matching any run of characters, including the
//! empty run. This is the subset of Redis `KEYS` syntax the invalidation paths use,
//! so in-memory and Redis backends agree on which keys a pattern selects.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use postcache_core::cache::pattern_matches;
///
/// assert!(pattern_matches("post:42", "post:42"));
/// assert!(pattern_matches("posts:*", "posts:all:limit=20:offset=0"));
/// assert!(pattern_matches("posts:*:limit=*", "posts:tag:rust:limit=5:offset=0"));
/// assert!(!pattern_matches("posts:*", "post:42"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut segments = pattern.split('*');

    // `split` always yields at least one item.
    let head = segments.next().unwrap_or_default();
    let Some(mut remaining) = key.strip_prefix(head) else {
        return false;
    };

    let rest: Vec<&str> = segments.collect();
    let Some((tail, middle)) = rest.split_last() else {
        // No wildcard at all: the prefix must have consumed the whole key.
        return remaining.is_empty();
    };

    for segment in middle.iter().filter(|s| !s.is_empty()) {
        match remaining.find(segment) {
            Some(pos) => remaining = &remaining[pos + segment.len()..],
            None => return false,
        }
    }

    remaining.ends_with(tail)
}
