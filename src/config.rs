// Runner configuration: narration colors, log level, simulated latency and a
// few demo knobs. Loaded from TOML; every field has a default so an absent or
// partial file is fine.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "PATTERNS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "patterns.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub narration: NarrationSettings,
    pub logging: LoggingSettings,
    pub latency: LatencySettings,
    pub flyweight: FlyweightSettings,
    pub command: CommandSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NarrationSettings {
    pub color: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: String,
}

/// Fixed sleeps that make payment and image-loading narration feel slow.
/// They carry no correctness meaning and are off by default.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LatencySettings {
    pub enabled: bool,
    pub card_ms: u64,
    pub paypal_ms: u64,
    pub crypto_ms: u64,
    pub image_load_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FlyweightSettings {
    pub random_trees: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CommandSettings {
    pub remote_slots: usize,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            card_ms: 100,
            paypal_ms: 150,
            crypto_ms: 200,
            image_load_ms: 1000,
        }
    }
}

impl Default for FlyweightSettings {
    fn default() -> Self {
        Self {
            random_trees: 10_000,
            seed: None,
        }
    }
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self { remote_slots: 4 }
    }
}

impl LatencySettings {
    /// Sleep to use for a step whose nominal duration is `ms`.
    pub fn delay(&self, ms: u64) -> Duration {
        if self.enabled {
            Duration::from_millis(ms)
        } else {
            Duration::ZERO
        }
    }

    /// Zero-latency settings, as used by tests.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolves the config source in priority order:
    /// 1. the explicit path (usually `--config`)
    /// 2. `$PATTERNS_CONFIG`
    /// 3. `patterns.toml` in the working directory, if it exists
    /// 4. built-in defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.remote_slots == 0 {
            return Err(ConfigError::invalid(
                "command.remote_slots",
                "a remote needs at least one slot",
            ));
        }
        if self.flyweight.random_trees == 0 {
            return Err(ConfigError::invalid(
                "flyweight.random_trees",
                "plant at least one tree",
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid("logging.level", "must not be empty"));
        }
        Ok(())
    }

    /// Defaults tuned for tests: no sleeps, a small seeded forest.
    pub fn for_tests() -> Self {
        Self {
            narration: NarrationSettings { color: false },
            latency: LatencySettings::disabled(),
            flyweight: FlyweightSettings {
                random_trees: 200,
                seed: Some(7),
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.narration.color);
        assert_eq!(settings.logging.level, "warn");
        assert!(!settings.latency.enabled);
        assert_eq!(settings.command.remote_slots, 4);
        assert_eq!(settings.flyweight.random_trees, 10_000);
        assert_eq!(settings.flyweight.seed, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [latency]
            enabled = true
            image_load_ms = 250
            "#,
        )
        .unwrap();

        assert!(settings.latency.enabled);
        assert_eq!(settings.latency.image_load_ms, 250);
        assert_eq!(settings.latency.card_ms, 100);
        assert_eq!(settings.command.remote_slots, 4);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Settings::from_toml_str("[latency]\nsleepy = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_slots_invalid() {
        let err = Settings::from_toml_str("[command]\nremote_slots = 0\n").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "command.remote_slots"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_delay_respects_enabled() {
        let mut latency = LatencySettings::default();
        assert_eq!(latency.delay(500), Duration::ZERO);

        latency.enabled = true;
        assert_eq!(latency.delay(500), Duration::from_millis(500));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[flyweight]\nseed = 42\nrandom_trees = 50").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.flyweight.seed, Some(42));
        assert_eq!(settings.flyweight.random_trees, 50);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Settings::discover(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
