//! Rate-limit classification of backend failures

const DEFAULT_PATTERNS: &[&str] = &[
    "rate limit",
    "rate_limit",
    "ratelimit",
    "quota",
    "too many requests",
    "429",
];

/// Classifies backend error text as a rate limit
///
/// Matching is a case-insensitive substring test against a pattern list.
/// The list is injectable so callers can adapt it to their backend's
/// error wording.
#[derive(Debug, Clone)]
pub struct RateLimitDetector {
    patterns: Vec<String>,
}

impl Default for RateLimitDetector {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl RateLimitDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one pattern to the current list
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into().to_lowercase());
        self
    }

    /// Replace the pattern list entirely
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns
            .into_iter()
            .map(|p| p.into().to_lowercase())
            .collect();
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_rate_limit(&self, error_text: &str) -> bool {
        let lower = error_text.to_lowercase();
        self.patterns.iter().any(|p| lower.contains(p.as_str()))
    }
}
