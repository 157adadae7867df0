//! Loading, creating and merging `bernova.config.json`
//!
//! All functions take the [`Workspace`] whose root holds the config document.

use super::schema::{default_config, BernovaConfig};
use crate::store::{StoreError, Workspace};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No config document at the workspace root
    #[error("{} not found. Create one with create_config first", .path.display())]
    NotFound { path: PathBuf },
    /// `create_config` on a workspace that already has one
    #[error("{} already exists. Use update_config to modify it", .path.display())]
    AlreadyExists { path: PathBuf },
    /// Reading or writing the document failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The document does not have the configuration shape
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
    /// Validation error
    #[error("Config validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Load the workspace configuration.
///
/// The document is not rejected for validation problems (it may be
/// hand-edited); they are logged as warnings instead.
pub async fn load_config(workspace: &Workspace) -> Result<BernovaConfig, ConfigError> {
    let path = workspace.config_path();
    let config: BernovaConfig = match workspace.read_json(&path).await {
        Ok(config) => config,
        Err(e) if e.is_not_found() => return Err(ConfigError::NotFound { path }),
        Err(e) => return Err(e.into()),
    };

    for problem in config.validate() {
        log::warn!("{}: {}", path.display(), problem);
    }
    log::debug!("loaded {} with {} theme(s)", path.display(), config.themes.len());
    Ok(config)
}

/// Write the default configuration with a single theme.
///
/// Fails with [`ConfigError::AlreadyExists`] rather than overwriting.
pub async fn create_config(
    workspace: &Workspace,
    theme_name: &str,
) -> Result<BernovaConfig, ConfigError> {
    let path = workspace.config_path();
    if workspace.exists(&path).await {
        return Err(ConfigError::AlreadyExists { path });
    }

    let config = default_config(theme_name);
    check(&config)?;
    workspace.write_json(&path, &config).await?;

    log::info!("created {} with theme \"{}\"", path.display(), theme_name);
    Ok(config)
}

/// Replace or merge the configuration.
///
/// With `merge`, top-level keys of `patch` override the existing document
/// and everything else is kept. A `themes` key that is absent or `null`
/// keeps the existing themes. Without `merge` (or without an existing
/// document) `patch` becomes the whole configuration. The result is
/// validated before anything is written.
pub async fn update_config(
    workspace: &Workspace,
    patch: Value,
    merge: bool,
) -> Result<BernovaConfig, ConfigError> {
    let path = workspace.config_path();
    let Value::Object(patch) = patch else {
        return Err(ConfigError::Validation(vec!["configuration must be an object".to_string()]));
    };

    let document = match workspace.read_json::<Value>(&path).await {
        Ok(Value::Object(existing)) if merge => merge_shallow(existing, patch),
        Ok(_) => patch,
        Err(e) if e.is_not_found() => patch,
        Err(e) => return Err(e.into()),
    };

    let document = Value::Object(document);
    let config: BernovaConfig = serde_json::from_value(document.clone())?;
    check(&config)?;

    // Written as merged so key order and unknown keys survive untouched.
    workspace.write_json(&path, &document).await?;

    log::info!("updated {} (merge: {})", path.display(), merge);
    Ok(config)
}

fn merge_shallow(mut existing: Map<String, Value>, patch: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in patch {
        if key == "themes" && value.is_null() {
            continue;
        }
        existing.insert(key, value);
    }
    existing
}

fn check(config: &BernovaConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        let err = load_config(&ws).await.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("bernova.config.json not found"));
    }

    #[tokio::test]
    async fn test_create_then_load() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        let created = create_config(&ws, "brand").await.unwrap();
        let loaded = load_config(&ws).await.unwrap();
        assert_eq!(created, loaded);
        assert_eq!(loaded.theme_names(), vec!["brand"]);
    }

    #[tokio::test]
    async fn test_create_twice_fails() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        create_config(&ws, "default").await.unwrap();
        let err = create_config(&ws, "other").await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        assert_eq!(load_config(&ws).await.unwrap().theme_names(), vec!["default"]);
    }

    #[tokio::test]
    async fn test_merge_keeps_themes() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        create_config(&ws, "default").await.unwrap();

        let config =
            update_config(&ws, json!({"tsconfigPath": "./tsconfig.json"}), true).await.unwrap();
        assert_eq!(config.tsconfig_path.as_deref(), Some("./tsconfig.json"));
        assert_eq!(config.theme_names(), vec!["default"]);
        assert!(config.provider.is_some());

        let config = update_config(&ws, json!({"themes": null}), true).await.unwrap();
        assert_eq!(config.theme_names(), vec!["default"]);
    }

    #[tokio::test]
    async fn test_merge_replaces_themes() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        create_config(&ws, "default").await.unwrap();

        let config = update_config(&ws, json!({"themes": [{"name": "a"}, {"name": "b"}]}), true)
            .await
            .unwrap();
        assert_eq!(config.theme_names(), vec!["a", "b"]);
        assert!(config.provider.is_some());
    }

    #[tokio::test]
    async fn test_replace_without_merge() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        create_config(&ws, "default").await.unwrap();

        let config = update_config(&ws, json!({"themes": [{"name": "solo"}]}), false).await.unwrap();
        assert!(config.provider.is_none());
        assert_eq!(load_config(&ws).await.unwrap().theme_names(), vec!["solo"]);
    }

    #[tokio::test]
    async fn test_invalid_update_not_written() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        create_config(&ws, "default").await.unwrap();
        let before = std::fs::read_to_string(ws.config_path()).unwrap();

        let err = update_config(&ws, json!({"themes": []}), true).await.unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));

        let err = update_config(&ws, json!({"themes": [{"name": "a"}, {"name": "a"}]}), true)
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = update_config(&ws, json!({"themes": "nope"}), true).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = update_config(&ws, json!([1, 2]), true).await.unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        assert_eq!(std::fs::read_to_string(ws.config_path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_without_existing_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        let config = update_config(&ws, json!({"themes": [{"name": "x"}]}), true).await.unwrap();
        assert_eq!(config.theme_names(), vec!["x"]);
        assert!(ws.config_path().exists());
    }

    #[tokio::test]
    async fn test_merge_preserves_unknown_keys_and_order() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        std::fs::write(
            ws.config_path(),
            r#"{"custom": 1, "themes": [{"name": "a", "flag": true}]}"#,
        )
        .unwrap();

        update_config(&ws, json!({"tsconfigPath": "t.json"}), true).await.unwrap();
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(ws.config_path()).unwrap()).unwrap();
        let keys: Vec<_> = written.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["custom", "themes", "tsconfigPath"]);
        assert_eq!(written["themes"][0]["flag"], json!(true));
    }

    #[tokio::test]
    async fn test_load_malformed_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        std::fs::write(ws.config_path(), "{ not json").unwrap();
        let err = load_config(&ws).await.unwrap_err();
        assert!(matches!(err, ConfigError::Store(StoreError::Json { .. })));
    }
}
