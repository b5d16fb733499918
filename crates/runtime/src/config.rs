//! Engine configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use augment_content::{ContentFactory, EngineSettings, LoadOptions, LoadResult};

/// Catalog directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data/augments";

/// Catalog file name used when nothing else is configured.
pub const DEFAULT_FILE_NAME: &str = "augments.ron";

/// Where the augment catalog lives and how strictly it is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    pub strict_vocabulary: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_name: DEFAULT_FILE_NAME.to_owned(),
            strict_vocabulary: false,
        }
    }
}

impl EngineConfig {
    pub fn new(data_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_name: file_name.into(),
            strict_vocabulary: false,
        }
    }

    /// Enables strict vocabulary resolution (builder pattern).
    #[must_use]
    pub fn with_strict_vocabulary(mut self, strict: bool) -> Self {
        self.strict_vocabulary = strict;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AUGMENT_DATA_DIR` - Catalog directory (default: `data/augments`)
    /// - `AUGMENT_FILE` - Catalog file name (default: `augments.ron`)
    /// - `AUGMENT_STRICT_VOCABULARY` - Skip modifiers with unknown filter names (default: false)
    pub fn from_env() -> Self {
        Self::from_vars(process_var)
    }

    /// Construct configuration from `engine.toml` and the environment.
    ///
    /// `engine.toml` is looked up in the directory named by `AUGMENT_DATA_DIR`
    /// (or the default). Environment variables win over file settings.
    pub fn load() -> LoadResult<Self> {
        Self::load_with(process_var)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.apply(&env_settings(var));
        config
    }

    fn load_with(var: impl Fn(&str) -> Option<String>) -> LoadResult<Self> {
        let overrides = env_settings(var);
        let settings_dir = overrides
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let file_settings = ContentFactory::new(settings_dir).load_settings()?;

        let mut config = Self::default();
        config.apply(&file_settings);
        config.apply(&overrides);
        Ok(config)
    }

    /// Overwrites every field that `settings` sets.
    pub fn apply(&mut self, settings: &EngineSettings) {
        if let Some(data_dir) = &settings.data_dir {
            self.data_dir = data_dir.clone();
        }
        if let Some(file_name) = &settings.file_name {
            self.file_name = file_name.clone();
        }
        if let Some(strict) = settings.strict_vocabulary {
            self.strict_vocabulary = strict;
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict_vocabulary: self.strict_vocabulary,
        }
    }

    /// Full path of the configured catalog.
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

fn process_var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_settings(var: impl Fn(&str) -> Option<String>) -> EngineSettings {
    let strict_vocabulary = match var("AUGMENT_STRICT_VOCABULARY") {
        // Also accept just setting the variable without value as "true"
        Some(value) if value.is_empty() => Some(true),
        Some(value) => parse::<bool>(&value).or(match value.as_str() {
            "0" => Some(false),
            "1" => Some(true),
            _ => None,
        }),
        None => None,
    };

    EngineSettings {
        data_dir: var("AUGMENT_DATA_DIR").map(PathBuf::from),
        file_name: var("AUGMENT_FILE"),
        strict_vocabulary,
    }
}

fn parse<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let mut config = EngineConfig::default();
        config.apply(&env_settings(vars(&[])));

        assert_eq!(config.data_dir, PathBuf::from("data/augments"));
        assert_eq!(config.catalog_path(), PathBuf::from("data/augments/augments.ron"));
        assert!(!config.strict_vocabulary);
    }

    #[test]
    fn environment_overrides_file_settings() {
        let file = EngineSettings {
            data_dir: Some(PathBuf::from("/srv/content")),
            file_name: Some("augments.toml".to_owned()),
            strict_vocabulary: Some(true),
        };
        let overrides = env_settings(vars(&[
            ("AUGMENT_FILE", "override.ron"),
            ("AUGMENT_STRICT_VOCABULARY", "0"),
        ]));

        let mut config = EngineConfig::default();
        config.apply(&file);
        config.apply(&overrides);

        assert_eq!(config.data_dir, PathBuf::from("/srv/content"));
        assert_eq!(config.file_name, "override.ron");
        assert!(!config.strict_vocabulary);
    }

    #[test]
    fn from_vars_reads_every_variable() {
        let config = EngineConfig::from_vars(vars(&[
            ("AUGMENT_DATA_DIR", "/srv/augments"),
            ("AUGMENT_FILE", "live.toml"),
            ("AUGMENT_STRICT_VOCABULARY", ""),
        ]));

        assert_eq!(config.catalog_path(), PathBuf::from("/srv/augments/live.toml"));
        assert!(config.strict_vocabulary);
        assert_eq!(EngineConfig::from_vars(vars(&[])), EngineConfig::default());
    }

    #[test]
    fn from_env_matches_process_environment() {
        assert_eq!(EngineConfig::from_env(), EngineConfig::from_vars(process_var));
    }

    #[test]
    fn load_layers_settings_file_under_environment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("engine.toml"),
            "file_name = \"augments.toml\"\nstrict_vocabulary = true\n",
        )
        .unwrap();
        let data_dir = dir.path().to_string_lossy().into_owned();

        let from_file = EngineConfig::load_with(vars(&[("AUGMENT_DATA_DIR", data_dir.as_str())])).unwrap();
        assert_eq!(from_file.data_dir, dir.path());
        assert_eq!(from_file.file_name, "augments.toml");
        assert!(from_file.strict_vocabulary);

        let overridden = EngineConfig::load_with(vars(&[
            ("AUGMENT_DATA_DIR", data_dir.as_str()),
            ("AUGMENT_STRICT_VOCABULARY", "false"),
        ]))
        .unwrap();
        assert_eq!(overridden.file_name, "augments.toml");
        assert!(!overridden.strict_vocabulary);
    }

    #[test]
    fn strict_flag_spellings() {
        for (raw, expected) in [
            ("true", Some(true)),
            ("false", Some(false)),
            ("1", Some(true)),
            ("", Some(true)),
            ("maybe", None),
        ] {
            let settings = env_settings(vars(&[("AUGMENT_STRICT_VOCABULARY", raw)]));
            assert_eq!(settings.strict_vocabulary, expected, "{raw:?}");
        }
    }
}
