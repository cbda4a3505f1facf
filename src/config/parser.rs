use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE_NAME: &str = "a11y-sweep.toml";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use a11y_sweep::config::load_config;
///
/// let config = load_config(Path::new("a11y-sweep.toml")).unwrap();
/// println!("Runners: {:?}", config.audit.runners);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "configuration file {} is empty",
            path.display()
        )));
    }

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Finds the configuration file by walking up from `start`
///
/// The first directory containing [`CONFIG_FILE_NAME`] wins.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the discovered configuration file
/// * `Err(ConfigError::NotFound)` - No ancestor of `start` holds a config file
pub fn discover_config(start: &Path) -> Result<PathBuf, ConfigError> {
    discover_config_within(start, None)
}

/// Like [`discover_config`], but never searches above `stop`
///
/// `stop` itself is searched. A `stop` that is not an ancestor of `start`
/// has no effect.
pub fn discover_config_within(start: &Path, stop: Option<&Path>) -> Result<PathBuf, ConfigError> {
    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("Found configuration at {}", candidate.display());
            return Ok(candidate);
        }
        if stop == Some(dir) {
            break;
        }
    }

    Err(ConfigError::NotFound {
        file_name: CONFIG_FILE_NAME.to_string(),
        start: start.to_path_buf(),
    })
}

/// Resolves the report output directory against the config file location
///
/// Absolute directories are returned unchanged; relative ones are placed
/// next to the config file.
pub fn resolve_output_dir(config: &Config, config_path: &Path) -> PathBuf {
    if config.output.directory.is_absolute() {
        return config.output.directory.clone();
    }

    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    base.join(&config.output.directory)
}
