use regex::{Regex, RegexBuilder};

use crate::error::TocError;

/// Controls which headings make it into the outline.
#[derive(Debug, Clone)]
pub struct TocOptions {
    /// Shallowest heading depth to include (1-6)
    pub min_depth: u8,
    /// Deepest heading depth to include (1-6)
    pub max_depth: u8,
    /// Only include headings in the section following the first heading
    /// whose text matches this pattern
    pub heading: Option<Regex>,
    /// Exclude headings whose text matches this pattern
    pub skip: Option<Regex>,
}

impl Default for TocOptions {
    fn default() -> Self {
        TocOptions {
            min_depth: 1,
            max_depth: 6,
            heading: None,
            skip: None,
        }
    }
}

impl TocOptions {
    pub fn with_depths(mut self, min_depth: u8, max_depth: u8) -> Self {
        self.min_depth = min_depth.clamp(1, 6);
        self.max_depth = max_depth.clamp(self.min_depth, 6);
        self
    }

    pub fn with_heading(mut self, pattern: &str) -> Result<Self, TocError> {
        self.heading = Some(whole_text_pattern(pattern)?);
        Ok(self)
    }

    pub fn with_skip(mut self, pattern: &str) -> Result<Self, TocError> {
        self.skip = Some(whole_text_pattern(pattern)?);
        Ok(self)
    }

    pub(crate) fn accepts_depth(&self, depth: u8) -> bool {
        depth >= self.min_depth && depth <= self.max_depth
    }
}

/// Patterns match the entire heading text, ignoring case.
fn whole_text_pattern(pattern: &str) -> Result<Regex, TocError> {
    let regex = RegexBuilder::new(&format!("^({})$", pattern))
        .case_insensitive(true)
        .build()?;
    Ok(regex)
}
