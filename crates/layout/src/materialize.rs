//! Writes the per-sequence folder tree and reconciles audio clips.

use std::fs::{File, FileTimes};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use subseq_common::config::LayoutConfig;
use subseq_srt::{SrtError, SubtitleEntry};

use crate::paths::SequencePaths;

/// Errors that abort a layout run.
///
/// Nothing is rolled back: folders written before the failure stay on disk.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Srt(#[from] SrtError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LayoutError + '_ {
    move |source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// An entry whose audio clip was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAudio {
    pub sequence: u64,
    pub expected_path: PathBuf,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Entries laid out.
    pub total: usize,

    /// Entries whose audio clip was copied.
    pub with_audio: usize,

    /// Entries without an audio clip.
    pub missing_audio: usize,

    /// Root of the generated tree.
    pub output_root: PathBuf,

    /// Which entries lacked audio, in source order.
    pub missing: Vec<MissingAudio>,
}

impl Summary {
    fn new(output_root: &Path) -> Self {
        Self {
            total: 0,
            with_audio: 0,
            missing_audio: 0,
            output_root: output_root.to_path_buf(),
            missing: Vec::new(),
        }
    }

    fn record_missing(&mut self, sequence: u64, expected_path: PathBuf) {
        self.missing_audio += 1;
        self.missing.push(MissingAudio {
            sequence,
            expected_path,
        });
    }
}

/// Parse the configured subtitle file and lay it out.
///
/// A malformed sequence number fails the run before any folder is created.
pub fn run(config: &LayoutConfig) -> Result<Summary, LayoutError> {
    tracing::info!(
        subtitle_file = %config.subtitle_file.display(),
        audio_dir = %config.audio_dir.display(),
        output_root = %config.output_root.display(),
        "organizing subtitle sequences"
    );
    let entries = subseq_srt::parse_file(&config.subtitle_file)?;
    materialize(&entries, &config.audio_dir, &config.output_root)
}

/// Create `output_root/<sequence>/` for every entry, write its single-block
/// subtitle file and copy `audio_dir/<sequence>.mp3` next to it when present.
///
/// Re-running with unchanged inputs rewrites identical files.
pub fn materialize(
    entries: &[SubtitleEntry],
    audio_dir: &Path,
    output_root: &Path,
) -> Result<Summary, LayoutError> {
    std::fs::create_dir_all(output_root).map_err(io_error(output_root))?;

    let mut summary = Summary::new(output_root);

    for entry in entries {
        let paths = SequencePaths::new(entry.sequence, audio_dir, output_root);

        std::fs::create_dir_all(&paths.folder).map_err(io_error(&paths.folder))?;
        std::fs::write(&paths.subtitle, entry.to_block()).map_err(io_error(&paths.subtitle))?;

        if paths.audio_source.is_file() {
            copy_preserving_times(&paths.audio_source, &paths.audio_target)?;
            summary.with_audio += 1;
            tracing::debug!(sequence = entry.sequence, "copied audio");
        } else {
            tracing::warn!(
                "Audio file for sequence {} not found at {}",
                entry.sequence,
                paths.audio_source.display()
            );
            summary.record_missing(entry.sequence, paths.audio_source);
        }
        summary.total += 1;
    }

    tracing::info!(
        total = summary.total,
        with_audio = summary.with_audio,
        missing_audio = summary.missing_audio,
        "layout complete"
    );
    Ok(summary)
}

/// Copy a file, carrying over permissions and access/modification times.
fn copy_preserving_times(from: &Path, to: &Path) -> Result<(), LayoutError> {
    let metadata = std::fs::metadata(from).map_err(io_error(from))?;
    std::fs::copy(from, to).map_err(io_error(to))?;

    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let target = open_for_set_times(to).map_err(io_error(to))?;
    target.set_times(times).map_err(io_error(to))
}

/// Windows needs write-attributes access to change times; Unix only needs
/// ownership, so a read-only copy can still be stamped.
#[cfg(windows)]
fn open_for_set_times(path: &Path) -> std::io::Result<File> {
    File::options().write(true).open(path)
}

#[cfg(not(windows))]
fn open_for_set_times(path: &Path) -> std::io::Result<File> {
    File::open(path)
}
