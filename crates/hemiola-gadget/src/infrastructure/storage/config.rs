//! TOML configuration for the gadget typer.
//!
//! Default location: `$XDG_CONFIG_HOME/hemiola/config.toml`, falling back to
//! `~/.config/hemiola/config.toml`.
//!
//! ```toml
//! [device]
//! path = "/dev/hidg0"
//! report_delay_ms = 0
//! release_on_start = true
//!
//! [typing]
//! on_unsupported = "abort"   # or "skip"
//!
//! [logging]
//! log_level = "info"
//!
//! [chords]
//! dup = "="
//! plural = ";"
//! past = ","
//!
//! [chords.words]
//! the = "th"
//! them = "th+;"
//!
//! [anagrams]
//! dictionary = "/usr/share/dict/words"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section, or
//! a missing key all fall back to the values above.

use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
    time::Duration,
};

use hemiola_core::{ChordSpecials, ChordTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    application::type_text::UnsupportedCharPolicy,
    infrastructure::output_sink::gadget::DEFAULT_DEVICE,
};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("could not determine config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub chords: ChordsConfig,
    #[serde(default)]
    pub anagrams: AnagramConfig,
}

/// Output device settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// HID gadget character device.
    #[serde(default = "default_device_path")]
    pub path: PathBuf,
    /// Pause after every report, in milliseconds. Slow hosts (or KVM
    /// switches in between) can drop reports that arrive back to back.
    #[serde(default)]
    pub report_delay_ms: u64,
    /// Send an all-keys-up report before typing, clearing keys left held by
    /// an interrupted earlier run.
    #[serde(default = "default_true")]
    pub release_on_start: bool,
}

/// Text handling settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypingConfig {
    #[serde(default)]
    pub on_unsupported: UnsupportedCharPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Chord shorthand: special keys and the word each chord types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordsConfig {
    #[serde(default = "default_dup")]
    pub dup: char,
    #[serde(default = "default_plural")]
    pub plural: char,
    #[serde(default = "default_past")]
    pub past: char,
    /// Word → chord text, e.g. `the = "th"`.
    #[serde(default)]
    pub words: BTreeMap<String, String>,
}

impl ChordsConfig {
    pub fn specials(&self) -> ChordSpecials {
        ChordSpecials {
            dup: self.dup,
            plural: self.plural,
            past: self.past,
        }
    }

    /// Builds the lookup table; bad or clashing entries are logged and skipped.
    pub fn table(&self) -> ChordTable {
        ChordTable::from_entries(self.specials(), &self.words)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnagramConfig {
    /// Word list, one word per line. Hunspell `word/FLAGS` lines are accepted.
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_device_path() -> PathBuf {
    PathBuf::from(DEFAULT_DEVICE)
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_dup() -> char {
    ChordSpecials::default().dup
}
fn default_plural() -> char {
    ChordSpecials::default().plural
}
fn default_past() -> char {
    ChordSpecials::default().past
}
fn default_dictionary() -> PathBuf {
    PathBuf::from("/usr/share/dict/words")
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: default_device_path(),
            report_delay_ms: 0,
            release_on_start: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ChordsConfig {
    fn default() -> Self {
        Self {
            dup: default_dup(),
            plural: default_plural(),
            past: default_past(),
            words: BTreeMap::new(),
        }
    }
}

impl Default for AnagramConfig {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
        }
    }
}

impl DeviceConfig {
    pub fn report_delay(&self) -> Duration {
        Duration::from_millis(self.report_delay_ms)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the default config file path.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    config_file_path_from(std::env::var_os("XDG_CONFIG_HOME"), std::env::var_os("HOME"))
}

/// [`config_file_path`] with the environment passed in.
///
/// An empty or relative `XDG_CONFIG_HOME` is ignored, as are an empty or
/// relative `HOME`.
fn config_file_path_from(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    let base = xdg_config_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| {
            home.map(PathBuf::from)
                .filter(|p| p.is_absolute())
                .map(|h| h.join(".config"))
        })
        .ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(base.join("hemiola").join("config.toml"))
}

/// Reads `AppConfig` from `path`; `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads `AppConfig` from `path`, logging a warning and returning
/// `AppConfig::default()` if the file does not exist.
///
/// # Errors
///
/// Same as [`read_config`].
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    Ok(read_config(path)?.unwrap_or_else(|| {
        warn_missing_config(path);
        AppConfig::default()
    }))
}

/// The warning logged when a config file is absent and defaults apply.
pub fn warn_missing_config(path: &Path) {
    warn!("no config at {}; using defaults", path.display());
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
