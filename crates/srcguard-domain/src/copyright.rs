//! Copyright notice matching.

use regex::Regex;
use std::sync::LazyLock;

/// Default notice: `Copyright (c) 2021, Kai Wolf - SW Consulting` with an optional year range.
pub const DEFAULT_COPYRIGHT_PATTERN: &str =
    r"Copyright \([cC]\) \d{4}(-\d{4})?, Kai Wolf - SW Consulting";

static DEFAULT_MATCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_COPYRIGHT_PATTERN).expect("default copyright pattern is a valid regex")
});

/// Line-oriented matcher for the configured copyright notice.
#[derive(Clone, Debug)]
pub struct CopyrightMatcher {
    regex: Regex,
}

impl Default for CopyrightMatcher {
    fn default() -> Self {
        Self {
            regex: DEFAULT_MATCHER.clone(),
        }
    }
}

impl CopyrightMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// 1-based number of the first line carrying the notice.
    pub fn find_line(&self, text: &str) -> Option<u32> {
        text.lines()
            .position(|line| self.regex.is_match(line))
            .map(|idx| u32::try_from(idx + 1).unwrap_or(u32::MAX))
    }
}
