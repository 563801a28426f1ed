//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SubseqError, SubseqResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default paths used when the command line leaves them out.
    pub paths: PathDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Optional default locations for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathDefaults {
    /// SubRip file to split.
    pub subtitle_file: Option<PathBuf>,

    /// Flat directory of `<sequence>.mp3` clips.
    pub audio_dir: Option<PathBuf>,

    /// Directory that receives one folder per sequence.
    pub output_root: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "subseq_layout=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// The three locations a run works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Input SubRip file.
    pub subtitle_file: PathBuf,

    /// Source directory of audio clips.
    pub audio_dir: PathBuf,

    /// Root of the generated per-sequence tree.
    pub output_root: PathBuf,
}

impl AppConfig {
    /// Load config from an explicit file, or from the standard location
    /// falling back to defaults.
    ///
    /// An explicitly requested file must exist and parse; problems with the
    /// standard location are logged and ignored.
    pub fn load(explicit: Option<&Path>) -> SubseqResult<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SubseqError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::load_from(path);
        }

        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Ok(Self::default())
    }

    /// Parse a JSON config file.
    pub fn load_from(path: &Path) -> SubseqResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)
            .map_err(|e| SubseqError::config(format!("{}: {e}", path.display())))?;
        tracing::trace!(?path, "loaded config");
        Ok(config)
    }

    /// Merge command-line paths over the configured defaults.
    pub fn layout(
        &self,
        subtitle_file: Option<PathBuf>,
        audio_dir: Option<PathBuf>,
        output_root: Option<PathBuf>,
    ) -> SubseqResult<LayoutConfig> {
        let pick = |flag: Option<PathBuf>,
                    default: &Option<PathBuf>,
                    name: &'static str,
                    flag_name: &'static str| {
            flag.or_else(|| default.clone())
                .ok_or_else(|| SubseqError::missing_path(name, flag_name))
        };

        Ok(LayoutConfig {
            subtitle_file: pick(subtitle_file, &self.paths.subtitle_file, "subtitle_file", "srt")?,
            audio_dir: pick(audio_dir, &self.paths.audio_dir, "audio_dir", "audio")?,
            output_root: pick(output_root, &self.paths.output_root, "output_root", "output")?,
        })
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("subseq").join("config.json")
}
