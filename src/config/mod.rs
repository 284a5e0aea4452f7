use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::LedgerLinkError;

pub const DEFAULT_NAME: &str = "ledgerlink";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_NAME: &str = "LEDGERLINK_NAME";
pub const ENV_LOG_LEVEL: &str = "LEDGERLINK_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LEDGERLINK_LOG_FORMAT";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = LedgerLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(LedgerLinkError::InvalidConfig(format!(
                "unknown log format '{other}', expected 'json', 'pretty' or 'compact'"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Settings a [`LedgerLink`](crate::LedgerLink) is started with.
///
/// Missing fields in a config file fall back to their defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkConfig {
    pub name: String,
    pub log: LogConfig,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl LinkConfig {
    /// Defaults or `path`, then environment overrides, then `log_level`, then validation.
    pub fn load(path: Option<&Path>, log_level: Option<&str>) -> Result<Self, LedgerLinkError> {
        Self::load_with(path, log_level, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with a custom environment lookup.
    pub fn load_with<F>(
        path: Option<&Path>,
        log_level: Option<&str>,
        lookup: F,
    ) -> Result<Self, LedgerLinkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup);
        if let Some(level) = log_level {
            config.log.level = level.to_string();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LedgerLinkError> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, LedgerLinkError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LedgerLinkError::ConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                LedgerLinkError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    pub fn parse(json: &str) -> Result<Self, LedgerLinkError> {
        serde_json::from_str(json).map_err(|e| LedgerLinkError::ConfigParse(e.to_string()))
    }

    /// Applies `LEDGERLINK_NAME`, `LEDGERLINK_LOG_LEVEL` and `LEDGERLINK_LOG_FORMAT`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with a custom lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_NAME) {
            self.name = name;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log.level = level;
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            match value.parse::<LogFormat>() {
                Ok(format) => self.log.format = format,
                Err(_) => warn!(
                    env_key = ENV_LOG_FORMAT,
                    value = value.as_str(),
                    "failed to parse log format from env var, ignoring"
                ),
            }
        }
    }

    pub fn validate(&self) -> Result<(), LedgerLinkError> {
        if self.name.trim().is_empty() {
            return Err(LedgerLinkError::InvalidConfig(
                "name must not be empty".to_string(),
            ));
        }
        let level = self.log.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(LedgerLinkError::InvalidConfig(format!(
                "unknown log level '{}', expected one of {}",
                self.log.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, io::Write};

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = LinkConfig::default();
        assert_eq!(config.name, "ledgerlink");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Pretty);
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LinkConfig::parse(r#"{ "log": { "format": "json" } }"#).unwrap();
        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(config.log.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = LinkConfig::parse("{ name: ").unwrap_err();
        assert!(matches!(err, LedgerLinkError::ConfigParse(_)));
    }

    #[test]
    fn unknown_log_format_is_rejected_by_parse() {
        let err = LinkConfig::parse(r#"{ "log": { "format": "xml" } }"#).unwrap_err();
        assert!(matches!(err, LedgerLinkError::ConfigParse(_)));
    }

    #[test]
    fn blank_name_fails_validation() {
        let config = LinkConfig {
            name: "   ".into(),
            ..LinkConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, LedgerLinkError::InvalidConfig(_)));
    }

    #[test]
    fn unknown_level_fails_validation() {
        let mut config = LinkConfig::default();
        config.log.level = "loud".into();
        assert!(config.validate().is_err());
        config.log.level = "DEBUG".into();
        config.validate().unwrap();
    }

    #[test]
    fn overrides_replace_fields() {
        let vars: BTreeMap<&str, &str> = [
            (ENV_NAME, "nightly"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "compact"),
        ]
        .into_iter()
        .collect();
        let mut config = LinkConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.name, "nightly");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Compact);
    }

    #[test]
    fn bad_format_override_is_ignored() {
        let mut config = LinkConfig::default();
        config.apply_overrides(|key| (key == ENV_LOG_FORMAT).then(|| "yaml".to_string()));
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn log_level_argument_wins_over_bad_env_level() {
        let config = LinkConfig::load_with(None, Some("debug"), |key| {
            (key == ENV_LOG_LEVEL).then(|| "loud".to_string())
        })
        .unwrap();
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn bad_env_level_without_argument_fails() {
        let err = LinkConfig::load_with(None, None, |key| {
            (key == ENV_LOG_LEVEL).then(|| "loud".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, LedgerLinkError::InvalidConfig(_)));
    }

    #[test]
    fn log_level_argument_wins_over_bad_file_level() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "fixture", "log": {{ "level": "loud" }} }}"#).unwrap();
        assert!(LinkConfig::from_file(file.path()).is_err());

        let config = LinkConfig::load_with(Some(file.path()), Some("warn"), |_| None).unwrap();
        assert_eq!(config.name, "fixture");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn from_file_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "from-file", "log": {{ "level": "warn" }} }}"#).unwrap();
        let config = LinkConfig::from_file(file.path()).unwrap();
        assert_eq!(config.name, "from-file");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn from_file_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = LinkConfig::from_file(&path).unwrap_err();
        match err {
            LedgerLinkError::ConfigNotFound { path: reported } => {
                assert!(reported.ends_with("absent.json"));
            }
            other => panic!("expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn log_format_round_trips_through_display() {
        for format in [LogFormat::Json, LogFormat::Pretty, LogFormat::Compact] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }
}
