//! Layered config discovery and loading.
//!
//! Implements the load algorithm described in SPEC_FULL.md §10.4, modeled on
//! the teacher's `Config::load` pipeline but narrowed to this engine's
//! configurable surface:
//!
//! 1. Parse embedded `defaults.toml` → base.
//! 2. Merge `/etc/weave/config.toml` (system), if present.
//! 3. Merge `~/.weave/config.toml` (user), if present.
//! 4. Merge `{workspace}/.weave/config.toml` (workspace), if present.
//! 5. Apply `WEAVE_*` environment variable overrides for a handful of
//!    hot-path knobs.
//! 6. Deserialize the merged tree.
//! 7. Validate.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::merge::deep_merge;
use crate::types::EngineConfig;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB) — same ceiling the teacher's
/// config loader uses to bound a single read.
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load the unified engine configuration with layered file precedence.
///
/// `workspace_root` is the root of the current project; if `None`, the
/// workspace layer is skipped.
///
/// # Errors
///
/// Returns a [`ConfigError`] if any config file is malformed or the merged
/// result fails validation.
pub fn load(workspace_root: Option<&Path>) -> ConfigResult<EngineConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    if let Some(overlay) = try_load_file(&system_config_path())? {
        deep_merge(&mut merged, &overlay);
        info!(path = "/etc/weave/config.toml", "loaded system config");
    }

    if let Some(home) = home_directory() {
        let user_path = home.join(".weave").join("config.toml");
        if let Some(overlay) = try_load_file(&user_path)? {
            deep_merge(&mut merged, &overlay);
            info!(path = %user_path.display(), "loaded user config");
        }
    }

    if let Some(ws_root) = workspace_root {
        let ws_path = ws_root.join(".weave").join("config.toml");
        if let Some(overlay) = try_load_file(&ws_path)? {
            deep_merge(&mut merged, &overlay);
            info!(path = %ws_path.display(), "loaded workspace config");
        }
    }

    apply_env_overrides(&mut merged);

    let config: EngineConfig =
        merged.try_into().map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: "<merged config>".to_owned(),
            source: e,
        })?;

    validate::validate(&config)?;
    Ok(config)
}

/// Load a config from a specific file path with no layering, for tests and
/// one-off tooling.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let config: EngineConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/weave/config.toml")
}

fn home_directory() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

/// Try to load a file, returning `None` if it doesn't exist. Size-checked
/// after reading (not stat-then-read) to avoid a TOCTOU window.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError { path: path.display().to_string(), source: e });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }

    let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(value))
}

/// Apply a narrow set of `WEAVE_*` environment variable overrides — only the
/// knobs an operator is likely to want to flip without editing a file.
fn apply_env_overrides(merged: &mut toml::Value) {
    if let Ok(raw) = std::env::var("WEAVE_L3_MAX_ITERATIONS") {
        if let Ok(value) = raw.parse::<i64>() {
            set_path(merged, &["l3", "max_iterations"], toml::Value::Integer(value));
        }
    }
    if let Ok(raw) = std::env::var("WEAVE_L3_TIMEOUT_SECONDS") {
        if let Ok(value) = raw.parse::<i64>() {
            set_path(merged, &["l3", "timeout_seconds"], toml::Value::Integer(value));
        }
    }
    if let Ok(raw) = std::env::var("WEAVE_LOG_LEVEL") {
        set_path(merged, &["logging", "level"], toml::Value::String(raw));
    }
}

fn set_path(root: &mut toml::Value, path: &[&str], value: toml::Value) {
    let Some((last, prefix)) = path.split_last() else { return };
    let mut cursor = root;
    for segment in prefix {
        if !cursor.is_table() {
            *cursor = toml::Value::Table(toml::map::Map::new());
        }
        cursor = cursor
            .as_table_mut()
            .expect("just ensured table")
            .entry((*segment).to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
    if !cursor.is_table() {
        *cursor = toml::Value::Table(toml::map::Map::new());
    }
    cursor.as_table_mut().expect("just ensured table").insert((*last).to_owned(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_and_validate() {
        let value: toml::Value = toml::from_str(DEFAULTS_TOML).unwrap();
        assert!(value.as_table().unwrap().contains_key("l3"));
        let config: EngineConfig = toml::from_str(DEFAULTS_TOML).unwrap();
        assert!(validate::validate(&config).is_ok());
    }

    #[test]
    fn load_file_nonexistent_is_a_read_error() {
        let result = load_file(Path::new("/nonexistent/weave/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn load_file_merges_into_full_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[l1]\nmax_steps = 5\n").unwrap();
        let config = load_file(&path).unwrap();
        assert_eq!(config.l1.max_steps, 5);
        assert_eq!(config.l3.max_iterations, 25);
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.toml");
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        std::fs::write(&path, data).unwrap();
        let result = try_load_file(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn set_path_builds_missing_intermediate_tables() {
        let mut value = toml::Value::Table(toml::map::Map::new());
        set_path(&mut value, &["l3", "max_iterations"], toml::Value::Integer(42));
        assert_eq!(value["l3"]["max_iterations"].as_integer(), Some(42));
    }
}
