use fancy_regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// An ordered list of compiled patterns loaded from one source file.
///
/// Matching is an unanchored search; the first pattern that matches wins and
/// no pattern takes precedence over another.
#[derive(Debug, Clone)]
pub struct PatternList {
    name: Arc<str>,
    patterns: Vec<Regex>,
}

impl PatternList {
    pub fn new(name: impl Into<Arc<str>>, patterns: Vec<Regex>) -> Self {
        Self {
            name: name.into(),
            patterns,
        }
    }

    pub fn empty(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Compiles `sources` in order. Returns the index and reason of the first
    /// pattern that fails to compile.
    pub fn compile<'a>(
        name: impl Into<Arc<str>>,
        sources: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, (usize, String)> {
        let patterns = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| Regex::new(source).map_err(|e| (index, e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, patterns))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|pattern| match pattern.is_match(candidate) {
            Ok(matched) => matched,
            Err(e) => {
                debug!(
                    list = %self.name,
                    pattern = pattern.as_str(),
                    candidate = candidate,
                    error = %e,
                    "Pattern evaluation failed, treating as no match"
                );
                false
            }
        })
    }

    pub fn matches_any<'a>(&self, mut candidates: impl Iterator<Item = &'a str>) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        candidates.any(|candidate| self.is_match(candidate))
    }
}
