// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::de;

use crate::error::ConfigError;
use crate::recurrence::DEFAULT_MAX_OCCURRENCES;

/// The name of the lunarcal application.
pub const APP_NAME: &str = "lunarcal";

/// Core configuration of the calendar engines.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on occurrences produced by one expansion.
    pub max_occurrences: usize,

    /// Minimum distance between now and a reminder's trigger time.
    pub reminder_min_lead: LeadTime,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
            reminder_min_lead: LeadTime::default(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    ///
    /// ## Errors
    ///
    /// Fails when `max_occurrences` is zero; a negative lead time is clamped to zero.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.max_occurrences == 0 {
            return Err(ConfigError::ZeroMaxOccurrences);
        }

        if self.reminder_min_lead.0 < Duration::zero() {
            tracing::warn!(
                lead = %self.reminder_min_lead,
                "negative reminder lead time, using zero"
            );
            self.reminder_min_lead = LeadTime(Duration::zero());
        }

        Ok(())
    }
}

/// A duration written as "HH:MM", "1d", "24h", "60m" or "1800s".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeadTime(pub Duration);

impl LeadTime {
    /// The wrapped duration.
    pub fn duration(self) -> Duration {
        self.0
    }
}

impl Default for LeadTime {
    fn default() -> Self {
        Self(Duration::minutes(2))
    }
}

impl From<Duration> for LeadTime {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.num_seconds();
        match secs {
            s if s % 86_400 == 0 && s != 0 => write!(f, "{}d", s / 86_400),
            s if s % 3600 == 0 && s != 0 => write!(f, "{}h", s / 3600),
            s if s % 60 == 0 => write!(f, "{}m", s / 60),
            s => write!(f, "{s}s"),
        }
    }
}

impl serde::Serialize for LeadTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl std::str::FromStr for LeadTime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(LeadTime)
    }
}

impl<'de> serde::Deserialize<'de> for LeadTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct LeadTimeVisitor;

        impl de::Visitor<'_> for LeadTimeVisitor {
            type Value = LeadTime;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str(r#"a duration string like "HH:MM", "1d", "24h", "60m", or "1800s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(LeadTime)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(LeadTimeVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
///
/// ## Errors
///
/// Fails when the path is not valid UTF-8 or the referenced directory is unknown.
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_string_lossy().into_owned()))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

/// The user's home directory.
///
/// ## Errors
///
/// Fails when the platform reports no home directory.
pub fn get_home_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::DirectoryNotFound("home"))
}

/// The user's configuration directory, `$XDG_CONFIG_HOME` on unix.
///
/// ## Errors
///
/// Fails when the platform reports no configuration directory.
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or(ConfigError::DirectoryNotFound("config"))
}

/// Parse a duration string in the format "HH:MM" / "1d" / "24h" / "60m" / "1800s".
fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(s.to_owned());
    let int = |v: &str| v.trim().parse::<i64>().map_err(|_| invalid());

    // Try to parse "HH:MM" format
    if let Some((h, m)) = s.split_once(':') {
        let hours = int(h)?;
        let minutes = int(m)?;
        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .and_then(Duration::try_minutes)
            .ok_or_else(invalid)
    }
    // Match suffix-based formats
    else if let Some(rest) = s.strip_suffix('d') {
        Duration::try_days(int(rest)?).ok_or_else(invalid)
    } else if let Some(rest) = s.strip_suffix('h') {
        Duration::try_hours(int(rest)?).ok_or_else(invalid)
    } else if let Some(rest) = s.strip_suffix('m') {
        Duration::try_minutes(int(rest)?).ok_or_else(invalid)
    } else if let Some(rest) = s.strip_suffix('s') {
        Duration::try_seconds(int(rest)?).ok_or_else(invalid)
    } else {
        Err(invalid())
    }
}
