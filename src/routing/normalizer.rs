//! URL prefix normalization.
//!
//! # Responsibilities
//! - Strip query string and fragment
//! - Strip scheme and authority from absolute URLs
//! - Rewrite any accepted prefix to the canonical `/api/` prefix
//!
//! # Design Decisions
//! - Rewrite is anchored at the start of the path; later occurrences of a
//!   prefix inside resource names or ids are never touched
//! - Longest prefix is tried first so overlapping prefixes are unambiguous
//! - Unknown prefixes pass through unchanged; the matcher rejects them

/// The single canonical prefix every accepted prefix is rewritten to.
pub const CANONICAL_PREFIX: &str = "/api/";

/// Development-server style prefix.
pub const DEV_PREFIX: &str = "/api/";

/// Serverless-function style prefix.
pub const SERVERLESS_PREFIX: &str = "/.netlify/functions/";

/// Rewrites request URLs onto the canonical prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNormalizer {
    prefixes: Vec<String>,
}

impl PathNormalizer {
    /// Create a normalizer accepting the given prefixes.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        prefixes.dedup();
        Self { prefixes }
    }

    /// Accepted prefixes, longest first.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Normalize a raw URL to its canonical path.
    pub fn normalize(&self, url: &str) -> String {
        let path = path_of(url);

        for prefix in &self.prefixes {
            if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                return format!("{CANONICAL_PREFIX}{rest}");
            }
            if path == prefix.trim_end_matches('/') {
                return CANONICAL_PREFIX.trim_end_matches('/').to_string();
            }
        }

        path.to_string()
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::new([DEV_PREFIX, SERVERLESS_PREFIX])
    }
}

fn path_of(url: &str) -> &str {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let url = &url[..end];

    // Only a leading scheme carries an authority; `://` deeper in a path is data
    match url.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => rest.find('/').map_or("/", |i| &rest[i..]),
        _ => url,
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
