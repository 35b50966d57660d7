//! Publisher boilerplate removal.
//!
//! The default markers recognise Project Gutenberg headers and license
//! footers. Everything before the start marker and from the end marker on is
//! dropped.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use folio_core::{FolioError, FolioResult};

const GUTENBERG_START: &str = r"(?is)\*\*\* *START OF (THIS|THE) PROJECT GUTENBERG EBOOK.*?\*\*\*";
const GUTENBERG_END: &str = r"(?is)\*\*\* *END OF (THIS|THE) PROJECT GUTENBERG EBOOK.*?\*\*\*";
const CHAPTER_HEADING: &str = r"(?i)(?:^|\n)(chapter|i\.)\s+[A-Z0-9\.\- ]{2,}";
const TRAILING_END_NOTICE: &str = r"(?is)\*\*\* *END OF .{0,80}\n?\z";

static GUTENBERG: Lazy<BoilerplateStripper> = Lazy::new(|| {
    BoilerplateStripper::new(&BoilerplateMarkers::default()).unwrap()
});

/// Regex patterns delimiting the body of a document.
///
/// Patterns carry their own flags, e.g. `(?i)` for case-insensitive matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoilerplateMarkers {
    /// Body starts right after the first match.
    pub start: String,
    /// Body ends right before the first match.
    pub end: String,
    /// Used when `start` does not match; body starts at the match.
    pub start_fallback: Option<String>,
    /// Used when `end` does not match; body ends at the match.
    pub end_fallback: Option<String>,
}

impl Default for BoilerplateMarkers {
    fn default() -> Self {
        Self {
            start: GUTENBERG_START.to_string(),
            end: GUTENBERG_END.to_string(),
            start_fallback: Some(CHAPTER_HEADING.to_string()),
            end_fallback: Some(TRAILING_END_NOTICE.to_string()),
        }
    }
}

/// Strips header and footer boilerplate from a document.
#[derive(Debug, Clone)]
pub struct BoilerplateStripper {
    start: Regex,
    end: Regex,
    start_fallback: Option<Regex>,
    end_fallback: Option<Regex>,
}

impl Default for BoilerplateStripper {
    fn default() -> Self {
        GUTENBERG.clone()
    }
}

impl BoilerplateStripper {
    /// Compile a stripper from custom markers.
    pub fn new(markers: &BoilerplateMarkers) -> FolioResult<Self> {
        Ok(Self {
            start: compile(&markers.start)?,
            end: compile(&markers.end)?,
            start_fallback: markers.start_fallback.as_deref().map(compile).transpose()?,
            end_fallback: markers.end_fallback.as_deref().map(compile).transpose()?,
        })
    }

    /// Byte range of the body within `text`. Empty when the start boundary
    /// falls at or after the end boundary.
    pub fn body_range(&self, text: &str) -> Range<usize> {
        let start = self
            .start
            .find(text)
            .map(|m| m.end())
            .or_else(|| {
                self.start_fallback
                    .as_ref()
                    .and_then(|re| re.find(text))
                    .map(|m| m.start())
            })
            .unwrap_or(0);

        let end = self
            .end
            .find(text)
            .or_else(|| self.end_fallback.as_ref().and_then(|re| re.find(text)))
            .map(|m| m.start())
            .unwrap_or(text.len());

        if start >= end {
            start..start
        } else {
            start..end
        }
    }

    /// Return the trimmed body of `text`.
    pub fn strip(&self, text: &str) -> String {
        let range = self.body_range(text);
        let body = text[range.clone()].trim();

        tracing::debug!(
            input_bytes = text.len(),
            start = range.start,
            end = range.end,
            output_bytes = body.len(),
            "Stripped boilerplate"
        );
        body.to_string()
    }
}

fn compile(pattern: &str) -> FolioResult<Regex> {
    Regex::new(pattern).map_err(|e| FolioError::invalid_pattern(pattern, e))
}

/// Strip Project Gutenberg boilerplate from `text`.
pub fn strip_boilerplate(text: &str) -> String {
    GUTENBERG.strip(text)
}
