mod schema;

pub use schema::{Config, KNOWN_KEYS};

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::media::MinMax;

const CONFIG_ENV_VAR: &str = "MEDIA_MINMAX_CONFIG";

/// where the config file is read from and whether the user chose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath {
    pub path: PathBuf,
    /// named via --config or the environment, so it must exist
    pub explicit: bool,
}

/// default location: <config dir>/media-minmax/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("media-minmax").join("config.json"))
}

/// resolve the config path: override, then env var, then default location
pub fn get_config_path_with_override(override_path: Option<&Path>) -> Result<ConfigPath> {
    if let Some(path) = override_path {
        return Ok(ConfigPath {
            path: path.to_path_buf(),
            explicit: true,
        });
    }

    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Ok(ConfigPath {
                path: PathBuf::from(path),
                explicit: true,
            });
        }
    }

    let path = default_config_path().ok_or_else(|| anyhow!("Could not find config directory"))?;
    Ok(ConfigPath {
        path,
        explicit: false,
    })
}

/// load config, falling back to defaults when the default file is absent
pub fn load_with_override(override_path: Option<&Path>) -> Result<Config> {
    let config_path = get_config_path_with_override(override_path)?;
    let path = &config_path.path;

    if !path.exists() {
        if config_path.explicit {
            return Err(anyhow!("config file not found: {}", path.display()));
        }
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    load(path)
}

pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// parse JSON5 (plain JSON is valid JSON5)
pub fn parse(content: &str) -> Result<Config> {
    let config: Config = json5::from_str(content)?;
    Ok(config)
}

pub fn save(config: &Config, path: &Path) -> Result<()> {
    // ensure directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, content + "\n")
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// Verify configuration file and return a list of errors
pub fn verify(path: &Path) -> Result<Vec<String>> {
    let mut errors = Vec::new();

    if !path.exists() {
        return Err(anyhow!("config file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let raw: serde_json::Value = match json5::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            return Err(anyhow!("invalid JSON5: {}", e));
        }
    };

    let Some(obj) = raw.as_object() else {
        return Err(anyhow!("config must be an object"));
    };

    for key in obj.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            errors.push(format!("unknown key '{}'", key));
        }
    }

    let config: Config = match serde_json::from_value(raw.clone()) {
        Ok(c) => c,
        Err(e) => {
            errors.push(e.to_string());
            return Ok(errors);
        }
    };

    match config.to_options() {
        Ok(options) => {
            // the pattern may be valid alone but break the combined grammar
            if let Err(e) = MinMax::new(options) {
                errors.push(format!("customValueRegExp: {}", e));
            }
        }
        Err(e) => errors.push(format!("customValueRegExp: {}", e)),
    }

    Ok(errors)
}
