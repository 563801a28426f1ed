//! The parsed subtitle record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single subtitle block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// Sequence number from the first line of the block.
    pub sequence: u64,

    /// Start timestamp, verbatim `HH:MM:SS,mmm`.
    pub start_time: String,

    /// End timestamp, verbatim `HH:MM:SS,mmm`.
    pub end_time: String,

    /// Body lines joined with `\n`.
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(
        sequence: u64,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            start_time: start_time.into(),
            end_time: end_time.into(),
            text: text.into(),
        }
    }

    /// The `start --> end` line.
    pub fn timing_line(&self) -> String {
        format!("{} --> {}", self.start_time, self.end_time)
    }

    /// Render this entry as a standalone SRT block.
    ///
    /// Every line, including the last text line, ends with `\n`.
    pub fn to_block(&self) -> String {
        self.to_string()
    }

    /// First line of the body, for listings.
    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sequence)?;
        writeln!(f, "{}", self.timing_line())?;
        writeln!(f, "{}", self.text)
    }
}
