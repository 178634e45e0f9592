//! Config file loading

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Extensions tried, in order, when searching for the config file.
const CANDIDATE_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Supported config file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Key-value mapping loaded from a config file.
///
/// Keys are lowercased and `_` is folded into `-`, so `favorite_color` and
/// `favorite-color` address the same option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMap {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl ConfigMap {
    pub fn from_values(path: impl Into<PathBuf>, raw: Map<String, Value>) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            let normalized = normalize_key(&key);
            // The canonical spelling wins when both forms are present.
            if normalized == key {
                values.insert(normalized, value);
            } else {
                values.entry(normalized).or_insert(value);
            }
        }
        Self { path: path.into(), values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(&normalize_key(name))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

/// Search `dir` for `<basename>.<ext>` and load the first match.
///
/// A missing file is not an error: `Ok(None)` is returned.
pub fn load_config(dir: &Path, basename: &str) -> Result<Option<ConfigMap>> {
    let Some(config_file) = discover_config(dir, basename) else {
        tracing::debug!("No {} config file found in {}", basename, dir.display());
        return Ok(None);
    };

    tracing::debug!("Using config file: {}", config_file.display());
    load_config_file(&config_file).map(Some)
}

/// Load a config file named explicitly by the user.
pub fn load_config_file(config_file: &Path) -> Result<ConfigMap> {
    let format = ConfigFormat::from_path(config_file).ok_or_else(|| {
        let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("");
        ConfigError::file_parse(config_file, format!("unsupported config extension '.{}'", ext))
    })?;

    let content = fs::read_to_string(config_file)
        .map_err(|source| ConfigError::Io { path: config_file.to_path_buf(), source })?;

    parse_config(&content, format, config_file)
}

/// Parse config file content into a [`ConfigMap`].
///
/// The document must be a table/mapping at the top level. An empty or
/// whitespace-only document is an empty mapping.
pub fn parse_config(content: &str, format: ConfigFormat, config_file: &Path) -> Result<ConfigMap> {
    if content.trim().is_empty() {
        return Ok(ConfigMap::from_values(config_file, Map::new()));
    }

    let raw: Value = match format {
        ConfigFormat::Toml => {
            let table: toml::Table = toml::from_str(content)
                .map_err(|e| ConfigError::file_parse(config_file, format!("invalid TOML: {}", e)))?;
            serde_json::to_value(table)
                .map_err(|e| ConfigError::file_parse(config_file, format!("invalid TOML: {}", e)))?
        }
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| ConfigError::file_parse(config_file, format!("invalid YAML: {}", e)))?,
        ConfigFormat::Json => serde_json::from_str(content)
            .map_err(|e| ConfigError::file_parse(config_file, format!("invalid JSON: {}", e)))?,
    };

    match raw {
        Value::Object(map) => Ok(ConfigMap::from_values(config_file, map)),
        Value::Null => Ok(ConfigMap::from_values(config_file, Map::new())),
        _ => Err(ConfigError::file_parse(
            config_file,
            "expected a key-value mapping at the top level",
        )),
    }
}

/// Find `<basename>.<ext>` in `dir` for the first supported extension.
pub fn discover_config(dir: &Path, basename: &str) -> Option<PathBuf> {
    CANDIDATE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", basename, ext)))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_not_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_config(tmp.path(), "stingoftheviper").expect("load");
        assert!(cfg.is_none());
    }

    #[test]
    fn test_load_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        let content = "number = 12\nfavorite-color = \"blue\"\n";
        fs::write(tmp.path().join("stingoftheviper.toml"), content).expect("write");

        let cfg = load_config(tmp.path(), "stingoftheviper").expect("load").expect("found");
        assert_eq!(cfg.get("number"), Some(&json!(12)));
        assert_eq!(cfg.get("favorite-color"), Some(&json!("blue")));
    }

    #[test]
    fn test_load_yaml_config_with_underscore_key() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("stingoftheviper.yml"), "favorite_color: green\n")
            .expect("write");

        let cfg = load_config(tmp.path(), "stingoftheviper").expect("load").expect("found");
        assert_eq!(cfg.get("favorite-color"), Some(&json!("green")));
        assert!(cfg.get("number").is_none());
    }

    #[test]
    fn test_load_json_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("stingoftheviper.json"), r#"{"Number": "3"}"#).expect("write");

        let cfg = load_config(tmp.path(), "stingoftheviper").expect("load").expect("found");
        assert_eq!(cfg.get("number"), Some(&json!("3")));
    }

    #[test]
    fn test_toml_preferred_over_yaml() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("stingoftheviper.toml"), "favorite-color = \"blue\"\n")
            .expect("write");
        fs::write(tmp.path().join("stingoftheviper.yaml"), "favorite-color: pink\n")
            .expect("write");

        let cfg = load_config(tmp.path(), "stingoftheviper").expect("load").expect("found");
        assert_eq!(cfg.path(), tmp.path().join("stingoftheviper.toml"));
        assert_eq!(cfg.get("favorite-color"), Some(&json!("blue")));
    }

    #[test]
    fn test_canonical_key_wins_over_underscore_spelling() {
        let mut raw = Map::new();
        raw.insert("favorite_color".into(), json!("green"));
        raw.insert("favorite-color".into(), json!("blue"));
        let cfg = ConfigMap::from_values("x.json", raw);
        assert_eq!(cfg.len(), 1);
        assert_eq!(cfg.get("favorite_color"), Some(&json!("blue")));
    }

    #[test]
    fn test_empty_file_is_empty_mapping() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("stingoftheviper.yaml"), "\n").expect("write");

        let cfg = load_config(tmp.path(), "stingoftheviper").expect("load").expect("found");
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("stingoftheviper.toml"), "number = = 3\n").expect("write");

        let err = load_config(tmp.path(), "stingoftheviper").expect_err("should fail");
        assert!(matches!(err, ConfigError::FileParse { .. }), "got {err:?}");
    }

    #[test]
    fn test_non_mapping_yaml_is_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("stingoftheviper.yaml"), "- red\n- blue\n").expect("write");

        let err = load_config(tmp.path(), "stingoftheviper").expect_err("should fail");
        assert!(matches!(err, ConfigError::FileParse { .. }), "got {err:?}");
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_config_file(&tmp.path().join("nope.toml")).expect_err("should fail");
        assert!(matches!(err, ConfigError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn test_explicit_unsupported_extension_is_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.ini");
        fs::write(&path, "number=3\n").expect("write");

        let err = load_config_file(&path).expect_err("should fail");
        assert!(err.to_string().contains("unsupported config extension '.ini'"));
    }

    #[test]
    fn test_directory_named_like_config_is_ignored() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("stingoftheviper.toml")).expect("mkdir");
        assert!(discover_config(tmp.path(), "stingoftheviper").is_none());
    }
}
