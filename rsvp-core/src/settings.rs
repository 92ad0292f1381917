//! rsvp configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::{RsvpError, RsvpResult};
use crate::event::EventDetails;

static DEFAULT_CACHE_DIR: &str = "~/.cache/rsvp";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn is_default_cache_dir(p: &PathBuf) -> bool {
    *p == default_cache_dir()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/rsvp/config.toml
///
/// Any top-level key can be overridden from the environment with an
/// `RSVP_` prefix, e.g. `RSVP_ENDPOINT`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RsvpConfig {
    /// Sheet web-app URL records are pushed to and pulled from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default = "default_cache_dir", skip_serializing_if = "is_default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub event: EventConfig,
}

/// The `[event]` table. An empty `start` means the date isn't announced yet.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EventConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
}

impl RsvpConfig {
    pub fn config_path() -> RsvpResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RsvpError::Config("Could not determine config directory".into()))?
            .join("rsvp");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path` (or the default location), creating a commented
    /// default file first if none exists.
    pub fn load(path: Option<&Path>) -> RsvpResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        ::config::Config::builder()
            .add_source(::config::File::from(config_path).required(false))
            .add_source(::config::Environment::with_prefix("RSVP"))
            .build()
            .map_err(|e| RsvpError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RsvpError::Config(e.to_string()))
    }

    /// Write the current config to `path`.
    pub fn save(&self, path: &Path) -> RsvpResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RsvpError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| RsvpError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RsvpResult<()> {
        let contents = format!(
            "\
# rsvp configuration

# Sheet web-app URL that stores submissions:
# endpoint = \"https://script.google.com/macros/s/<deployment>/exec\"

# Where submission lists are cached between runs:
# cache_dir = \"{}\"

# Seconds before a request to the endpoint gives up:
# request_timeout_secs = {}

# [event]
# title = \"Retirement Celebration\"
# start = \"2025-10-18T18:00:00-07:00\"
# end = \"2025-10-18T21:00:00-07:00\"
# description = \"Join us to celebrate a legacy of service.\"
# location = \"Officers' Club\"
",
            DEFAULT_CACHE_DIR, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RsvpError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RsvpError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn endpoint(&self) -> RsvpResult<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                RsvpError::Config(
                    "No endpoint configured.\n\n\
                    Set it with:\n  \
                    rsvp config --endpoint <url>"
                        .into(),
                )
            })
    }

    /// Cache directory with `~` expanded.
    pub fn cache_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.cache_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Parsed event details, or `None` while no start time is set.
    pub fn event_details(&self) -> RsvpResult<Option<EventDetails>> {
        self.event.details()
    }
}

impl EventConfig {
    pub fn details(&self) -> RsvpResult<Option<EventDetails>> {
        let start = self.start.trim();
        if start.is_empty() {
            return Ok(None);
        }

        let parse = |field: &str, raw: &str| {
            DateTime::parse_from_rfc3339(raw)
                .map_err(|e| RsvpError::Event(format!("Invalid {field} '{raw}': {e}")))
        };

        let end = match self.end.trim() {
            "" => None,
            raw => Some(parse("end", raw)?),
        };

        Ok(Some(EventDetails {
            title: self.title.clone(),
            start: parse("start", start)?,
            end,
            description: self.description.clone(),
            location: self.location.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_creates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsvp/config.toml");

        let config = RsvpConfig::load(Some(&path)).unwrap();

        assert!(path.exists());
        assert_eq!(config.cache_dir, default_cache_dir());
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert!(config.event_details().unwrap().is_none());
    }

    #[test]
    fn load_reads_event_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
endpoint = "https://script.example.com/exec"
cache_dir = "/tmp/rsvp-test"
request_timeout_secs = 3

[event]
title = "Party"
start = "2025-10-18T18:00:00-07:00"
"#,
        )
        .unwrap();

        let config = RsvpConfig::load(Some(&path)).unwrap();
        let event = config.event_details().unwrap().unwrap();

        assert_eq!(config.endpoint().unwrap(), "https://script.example.com/exec");
        assert_eq!(config.cache_path(), PathBuf::from("/tmp/rsvp-test"));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(event.title, "Party");
        assert_eq!(event.end, None);
    }

    #[test]
    fn missing_endpoint_is_a_config_error() {
        let config: RsvpConfig = toml::from_str("").unwrap();
        assert!(matches!(config.endpoint(), Err(RsvpError::Config(_))));
    }

    #[test]
    fn invalid_event_time_is_reported() {
        let event = EventConfig {
            start: "next friday".to_string(),
            ..Default::default()
        };
        assert!(matches!(event.details(), Err(RsvpError::Event(_))));
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config: RsvpConfig = toml::from_str("").unwrap();
        config.endpoint = Some("https://script.example.com/exec".to_string());

        config.save(&path).unwrap();
        let loaded = RsvpConfig::load(Some(&path)).unwrap();

        assert_eq!(loaded.endpoint.as_deref(), Some("https://script.example.com/exec"));
        assert!(!std::fs::read_to_string(&path).unwrap().contains("cache_dir"));
    }
}
