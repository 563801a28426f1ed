//! Naming rules for the generated tree.

use std::path::{Path, PathBuf};

/// Extension of the audio clips paired with each sequence.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Extension of the per-sequence subtitle file.
pub const SUBTITLE_EXTENSION: &str = "srt";

/// Every path involved in laying out one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePaths {
    /// `output_root/<sequence>`
    pub folder: PathBuf,

    /// `output_root/<sequence>/<sequence>.srt`
    pub subtitle: PathBuf,

    /// `audio_dir/<sequence>.mp3`
    pub audio_source: PathBuf,

    /// `output_root/<sequence>/<sequence>.mp3`
    pub audio_target: PathBuf,
}

impl SequencePaths {
    pub fn new(sequence: u64, audio_dir: &Path, output_root: &Path) -> Self {
        let folder = output_root.join(sequence.to_string());
        let audio_name = audio_file_name(sequence);
        Self {
            subtitle: folder.join(subtitle_file_name(sequence)),
            audio_source: audio_dir.join(&audio_name),
            audio_target: folder.join(&audio_name),
            folder,
        }
    }
}

/// `<sequence>.mp3`
pub fn audio_file_name(sequence: u64) -> String {
    format!("{sequence}.{AUDIO_EXTENSION}")
}

/// `<sequence>.srt`
pub fn subtitle_file_name(sequence: u64) -> String {
    format!("{sequence}.{SUBTITLE_EXTENSION}")
}
