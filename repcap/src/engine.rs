//! Host-engine adapter
//!
//! Expansion produces plain pattern text; matching is done by
//! [`fancy_regex`], a backtracking engine with lookaround, atomic groups and
//! named groups. [`Regex`] composes the two: it transforms a pattern, compiles
//! the result, and wraps match results in [`CaptureList`].

use crate::alias::AliasRegistry;
use crate::captures::CaptureList;
use crate::compiler::DEFAULT_CEILING;
use crate::error::{ExpandError, Result};
use crate::transform::{PatternSource, transform_with};

/// A compiled, expanded pattern
#[derive(Debug, Clone)]
pub struct Regex {
    source: String,
    inner: fancy_regex::Regex,
}

impl Regex {
    /// Expand `pattern` with the process-wide registry and the default
    /// ceiling, then compile it
    pub fn new<P: PatternSource + ?Sized>(pattern: &P) -> Result<Self> {
        let registry = AliasRegistry::read_global();
        Regex::with_registry(pattern, &registry, DEFAULT_CEILING)
    }

    /// Expand `pattern` with an explicit registry and ceiling, then compile it
    pub fn with_registry<P: PatternSource + ?Sized>(
        pattern: &P,
        registry: &AliasRegistry,
        ceiling: usize,
    ) -> Result<Self> {
        let source = pattern.pattern_source().into_owned();
        let expanded = transform_with(source.as_str(), registry, ceiling)?;
        let inner = fancy_regex::Regex::new(&expanded)
            .map_err(|e| ExpandError::Compile(e.to_string()))?;
        Ok(Regex { source, inner })
    }

    /// The expanded pattern text handed to the host engine
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// The pattern as it was written, before expansion
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The underlying host-engine regex
    pub fn host(&self) -> &fancy_regex::Regex {
        &self.inner
    }

    /// Check if the pattern matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> Result<bool> {
        self.inner
            .is_match(text)
            .map_err(|e| ExpandError::Runtime(e.to_string()))
    }

    /// Captures of the leftmost match in `text`
    pub fn captures<'t>(&self, text: &'t str) -> Result<CaptureList<'t>> {
        let captures = self
            .inner
            .captures(text)
            .map_err(|e| ExpandError::Runtime(e.to_string()))?;
        Ok(CaptureList::from_captures(captures))
    }

    /// Captures of every non-overlapping match in `text`
    pub fn captures_all<'t>(&self, text: &'t str) -> Result<Vec<CaptureList<'t>>> {
        self.inner
            .captures_iter(text)
            .map(|caps| {
                caps.map(|caps| CaptureList::from_captures(Some(caps)))
                    .map_err(|e| ExpandError::Runtime(e.to_string()))
            })
            .collect()
    }
}
