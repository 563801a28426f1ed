//! Subseq Layout
//!
//! Turns parsed subtitle entries into a per-sequence folder tree:
//!
//! ```text
//! output_root/
//! ├── 1/
//! │   ├── 1.srt
//! │   └── 1.mp3   (only when audio_dir/1.mp3 exists)
//! └── 2/
//!     └── 2.srt
//! ```
//!
//! [`materialize`] performs the writes, [`plan`] computes the same pairing
//! without touching the output tree.

pub mod materialize;
pub mod paths;
pub mod plan;

pub use materialize::*;
pub use paths::*;
pub use plan::*;
