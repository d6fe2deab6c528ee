//! Settings for `Taskdeck`.
//!
//! Each setting is taken from the first source that provides it:
//! command-line flags (some also readable from `TASKDECK_*` environment
//! variables through clap), then `~/.config/taskdeck/config.toml`, then
//! the built-in value.
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/.local/share/taskdeck"
//!
//! [ui]
//! poll_timeout_ms = 50
//! timestamp_format = "%H:%M:%S"
//! default_sort = "asc"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use taskdeck_proto::task::SortDirection;

const DEFAULT_POLL_MS: u64 = 50;
const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Why settings could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file exists (or was named explicitly) but can't be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// File that was opened.
        path: PathBuf,
        /// I/O failure.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for this layout.
    #[error("malformed settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting parsed but holds an unusable value.
    #[error("bad value for {key}: {reason}")]
    InvalidValue {
        /// Dotted key, e.g. `ui.default_sort`.
        key: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// On-disk layout. Every field is optional so a file may set only a few.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    storage: StorageSection,
    ui: UiSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StorageSection {
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct UiSection {
    poll_timeout_ms: Option<u64>,
    timestamp_format: Option<String>,
    default_sort: Option<String>,
}

/// Settings after all sources have been merged.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the task list is kept. `None` if no directory was configured
    /// and the platform has no data directory; tasks then live in memory.
    pub data_dir: Option<PathBuf>,
    /// How long the event loop waits for a key before redrawing.
    pub poll_timeout: Duration,
    /// chrono format of the "Saved" time in the status bar.
    pub timestamp_format: String,
    /// Priority sort direction at startup.
    pub default_sort: SortDirection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: crate::store::FileStore::default_dir(),
            poll_timeout: Duration::from_millis(DEFAULT_POLL_MS),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            default_sort: SortDirection::default(),
        }
    }
}

impl AppConfig {
    /// Builds the effective settings for this run.
    ///
    /// With `--config`, that file must exist. Without it, the default
    /// settings file is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a settings file can't be read or parsed,
    /// or if any merged value is invalid.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => read_settings(path)?,
            None => match default_settings_path() {
                Some(path) if path.exists() => read_settings(&path)?,
                _ => SettingsFile::default(),
            },
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &CliArgs, file: SettingsFile) -> Result<Self, ConfigError> {
        let fallback = Self::default();

        let file_sort = file
            .ui
            .default_sort
            .as_deref()
            .map(str::parse::<SortDirection>)
            .transpose()
            .map_err(|reason| ConfigError::InvalidValue {
                key: "ui.default_sort",
                reason,
            })?;
        let default_sort = cli.sort.or(file_sort).unwrap_or(fallback.default_sort);

        let timestamp_format = cli
            .timestamp_format
            .clone()
            .or(file.ui.timestamp_format)
            .unwrap_or(fallback.timestamp_format);
        check_timestamp_format(&timestamp_format)?;

        let poll_timeout = match file.ui.poll_timeout_ms {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    key: "ui.poll_timeout_ms",
                    reason: "must be at least 1".to_string(),
                });
            }
            Some(ms) => Duration::from_millis(ms),
            None => fallback.poll_timeout,
        };

        Ok(Self {
            data_dir: cli
                .data_dir
                .clone()
                .or(file.storage.data_dir)
                .or(fallback.data_dir),
            poll_timeout,
            timestamp_format,
            default_sort,
        })
    }
}

/// Command-line flags.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal todo list with priorities, search, and bulk actions")]
pub struct CliArgs {
    /// Directory holding the task list.
    #[arg(long, env = "TASKDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Settings file to use instead of `~/.config/taskdeck/config.toml`.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sort direction at startup: `asc` or `desc`.
    #[arg(long, value_name = "DIR")]
    pub sort: Option<SortDirection>,

    /// chrono format for the "Saved" time, e.g. `%H:%M`.
    #[arg(long, value_name = "FMT", value_parser = parse_timestamp_format)]
    pub timestamp_format: Option<String>,

    /// Tracing filter, e.g. `debug` or `taskdeck=trace`.
    #[arg(long, default_value = "info", env = "TASKDECK_LOG")]
    pub log_level: String,

    /// Log destination (default: `$TMPDIR/taskdeck.log`).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// `~/.config/taskdeck/config.toml`, if the platform has a config dir.
fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taskdeck").join("config.toml"))
}

fn read_settings(path: &Path) -> Result<SettingsFile, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&raw)?)
}

/// chrono only reports a bad specifier when formatting, which happens
/// mid-render. Catch it up front instead.
fn check_timestamp_format(format: &str) -> Result<(), ConfigError> {
    use chrono::format::{Item, StrftimeItems};

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::InvalidValue {
            key: "ui.timestamp_format",
            reason: format!("unknown specifier in {format:?}"),
        });
    }
    Ok(())
}

/// clap value parser for `--timestamp-format`.
fn parse_timestamp_format(format: &str) -> Result<String, String> {
    check_timestamp_format(format).map_err(|e| e.to_string())?;
    Ok(format.to_string())
}
