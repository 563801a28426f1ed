//! Dry-run view of a layout.

use std::path::{Path, PathBuf};

use subseq_srt::SubtitleEntry;

use crate::materialize::{MissingAudio, Summary};
use crate::paths::SequencePaths;

/// What a run would do for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSequence {
    pub sequence: u64,
    pub paths: SequencePaths,
    pub audio_present: bool,
}

/// What a run would do for a whole subtitle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub output_root: PathBuf,
    pub sequences: Vec<PlannedSequence>,
}

/// Pair each entry with its audio clip without writing anything.
pub fn plan(entries: &[SubtitleEntry], audio_dir: &Path, output_root: &Path) -> Plan {
    let sequences = entries
        .iter()
        .map(|entry| {
            let paths = SequencePaths::new(entry.sequence, audio_dir, output_root);
            PlannedSequence {
                sequence: entry.sequence,
                audio_present: paths.audio_source.is_file(),
                paths,
            }
        })
        .collect();

    Plan {
        output_root: output_root.to_path_buf(),
        sequences,
    }
}

impl Plan {
    pub fn with_audio(&self) -> usize {
        self.sequences.iter().filter(|s| s.audio_present).count()
    }

    pub fn missing_audio(&self) -> usize {
        self.sequences.len() - self.with_audio()
    }

    /// The summary a real run would report if nothing fails.
    pub fn summary(&self) -> Summary {
        let missing = self
            .sequences
            .iter()
            .filter(|s| !s.audio_present)
            .map(|s| MissingAudio {
                sequence: s.sequence,
                expected_path: s.paths.audio_source.clone(),
            })
            .collect::<Vec<_>>();

        Summary {
            total: self.sequences.len(),
            with_audio: self.with_audio(),
            missing_audio: missing.len(),
            output_root: self.output_root.clone(),
            missing,
        }
    }
}
