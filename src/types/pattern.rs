use std::fmt;

use regex::Regex;

use super::error::ConfigError;

/// A compiled regular expression that remembers its literal source.
///
/// The empty source `""` matches every value and doubles as a sentinel:
/// in duplicate grouping it marks "no quality marker", in sort orders it
/// marks the default bucket.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if `source` is not a valid regex.
    pub fn new(source: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(source).map_err(|source_err| ConfigError::InvalidPattern {
            pattern: source.to_owned(),
            source: source_err,
        })?;
        Ok(Self { regex })
    }

    /// Compile a list of patterns, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for the first invalid source.
    pub fn list<S: AsRef<str>>(sources: &[S]) -> Result<Vec<Self>, ConfigError> {
        sources.iter().map(|s| Self::new(s.as_ref())).collect()
    }

    #[must_use]
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn is_empty_source(&self) -> bool {
        self.regex.as_str().is_empty()
    }

    /// Unanchored search.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    pub(crate) fn strip(&self, value: &str) -> String {
        self.regex.replace_all(value, "").into_owned()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source())
    }
}
