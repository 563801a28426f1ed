//! Subseq SubRip Support
//!
//! Reads SubRip (`.srt`) content into ordered [`SubtitleEntry`] records and
//! writes single entries back out as standalone blocks.
//!
//! Parsing is deliberately lenient: blocks that are too short or whose
//! second line is not a timing line are dropped. The one hard failure is a
//! block whose first line is not a sequence number.

pub mod entry;
pub mod parser;

pub use entry::*;
pub use parser::*;
