use std::path::{Path, PathBuf};

use converge_core::Timeouts;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvergeConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    /// Fixed seconds between probes. `None` keeps each waiter's backoff.
    /// Added in v1.
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
    #[serde(default)]
    pub timeouts: Timeouts,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("converge"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config from the default location, falling back to defaults when
/// no file exists yet.
pub fn load_config() -> eyre::Result<ConvergeConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ConvergeConfig::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> eyre::Result<ConvergeConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> eyre::Result<ConvergeConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ConvergeConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update converge."
        ));
    }

    // v0 → v1: timeouts moved from top-level `*_timeout_secs` keys into a
    // `timeouts` object, and `poll_interval_secs` was added.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

        let mut timeouts = serde_json::Map::new();
        for op in ["create", "update", "delete"] {
            if let Some(secs) = obj.remove(&format!("{op}_timeout_secs")) {
                timeouts.insert(op.to_string(), secs);
            }
        }
        if !timeouts.is_empty() {
            obj.insert("timeouts".to_string(), serde_json::Value::Object(timeouts));
        }
        obj.entry("poll_interval_secs")
            .or_insert(serde_json::Value::Null);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(CURRENT_VERSION.into()),
        );
        tracing::info!("migrated config v0 → v1 (nested timeouts)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &ConvergeConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
