//! Small utility helpers used across modules.

/// True if `haystack` contains at least one of `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
  needles.iter().any(|n| haystack.contains(n))
}

/// Character count after trimming surrounding whitespace.
/// Counts chars, not bytes, so non-ASCII titles are measured fairly.
pub fn trimmed_len(s: &str) -> usize {
  s.trim().chars().count()
}
