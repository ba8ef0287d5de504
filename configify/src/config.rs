//! Layered runtime settings.
//!
//! Precedence, lowest first: built-in defaults, a TOML file
//! (`configify.toml` in the working directory or the file passed with
//! `--config`), `CONFIGIFY_*` environment variables, then command-line
//! overrides.

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigifyError;
use crate::fs_helpers;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "configify.toml";

/// Prefix of environment variables that override settings.
pub const ENV_PREFIX: &str = "CONFIGIFY_";

/// Environment variable holding the log filter; not a setting.
pub const LOG_ENV: &str = "CONFIGIFY_LOG";

/// Runtime settings for a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Program and leading arguments of the package loader.
    pub loader_command: Vec<String>,
    /// Program and arguments of the source formatter.
    pub formatter_command: Vec<String>,
    /// Whether generated source is piped through the formatter.
    pub should_format: bool,
    /// Appended to the lower-cased type name to form the output file name.
    pub output_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            loader_command: vec!["configify-load".to_owned()],
            formatter_command: vec!["gofmt".to_owned()],
            should_format: true,
            output_suffix: "_option.go".to_owned(),
        }
    }
}

/// Command-line values layered over every other source.
///
/// Unset fields are not serialized, so they leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsOverrides {
    /// Overrides [`Settings::should_format`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_format: Option<bool>,
    /// Overrides [`Settings::loader_command`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader_command: Option<Vec<String>>,
}

/// Loads settings from every layer.
///
/// # Errors
///
/// Returns [`ConfigifyError::ConfigNotFound`] when `config_path` is given but
/// missing, and [`ConfigifyError::Config`] when a layer cannot be parsed.
pub fn load_settings(
    config_path: Option<&Utf8Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings, ConfigifyError> {
    let file = match config_path {
        Some(path) if !fs_helpers::is_file(path) => {
            return Err(ConfigifyError::ConfigNotFound(path.to_path_buf()));
        }
        Some(path) => path,
        None => Utf8Path::new(DEFAULT_CONFIG_FILE),
    };
    debug!(config = %file, "loading settings");

    let settings = Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file(file.as_std_path()))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["log"]))
        .merge(Serialized::defaults(overrides))
        .extract::<Settings>()
        .map_err(Box::new)?;
    Ok(settings)
}
