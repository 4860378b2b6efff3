// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use lunarcal_core::{APP_NAME, Config as CoreConfig, WeekStart, expand_path, get_config_dir};

const LUNARCAL_CONFIG_ENV: &str = "LUNARCAL_CONFIG";

/// Load the configuration from `--config`, `$LUNARCAL_CONFIG`, or the user's config directory.
///
/// An explicitly given file must exist; a missing default file yields the defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        expand_path(&path)?
    } else if let Ok(env_path) = std::env::var(LUNARCAL_CONFIG_ENV) {
        expand_path(&PathBuf::from(env_path))?
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            return Ok((CoreConfig::default(), Config::default()));
        }
        config
    };

    let mut raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()?;
    raw.core.normalize()?;
    Ok((raw.core, raw.display))
}

/// Display toggles of the command-line front end, the `[display]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Show lunar dates next to Gregorian ones.
    pub show_lunar: bool,

    /// Show festival names.
    pub show_festivals: bool,

    /// Show solar term names.
    pub show_solar_terms: bool,

    /// First day of the week in month views.
    pub week_start: WeekStart,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_lunar: true,
            show_festivals: true,
            show_solar_terms: true,
            week_start: WeekStart::default(),
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,

    #[serde(default)]
    display: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use std::sync::OnceLock;

    use chrono::Duration;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    use super::*;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    const FULL: &str = r#"
[core]
max_occurrences = 50
reminder_min_lead = "5m"

[display]
show_lunar = false
show_festivals = true
show_solar_terms = false
week_start = "sunday"
"#;

    #[test]
    fn test_parse_full_config() {
        let raw: ConfigRaw = FULL.parse().unwrap();
        assert_eq!(raw.core.max_occurrences, 50);
        assert_eq!(raw.core.reminder_min_lead.duration(), Duration::minutes(5));
        assert_eq!(
            raw.display,
            Config {
                show_lunar: false,
                show_festivals: true,
                show_solar_terms: false,
                week_start: WeekStart::Sunday,
            }
        );
    }

    #[test]
    fn test_parse_partial_config() {
        let raw: ConfigRaw = "[display]\nshow_lunar = false\n".parse().unwrap();
        assert_eq!(raw.core, CoreConfig::default());
        assert!(!raw.display.show_lunar);
        assert!(raw.display.show_festivals);
        assert_eq!(raw.display.week_start, WeekStart::Monday);
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!("[display]\nweek_start = \"friday\"\n".parse::<ConfigRaw>().is_err());
        assert!("[core]\nreminder_min_lead = 5\n".parse::<ConfigRaw>().is_err());
    }

    #[tokio::test]
    async fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, FULL).unwrap();
        let env_path = temp_dir.path().join("env_config.toml");
        std::fs::write(&env_path, "[core]\nmax_occurrences = 7\n").unwrap();

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::set_var(LUNARCAL_CONFIG_ENV, &env_path);
        }

        let (core, display) = parse_config(Some(config_path)).await.unwrap();
        assert_eq!(core.max_occurrences, 50);
        assert_eq!(display.week_start, WeekStart::Sunday);

        let (core, display) = parse_config(None).await.unwrap();
        assert_eq!(core.max_occurrences, 7);
        assert_eq!(display, Config::default());

        unsafe {
            std::env::remove_var(LUNARCAL_CONFIG_ENV);
        }
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        let err = parse_config(Some(missing)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn zero_cap_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[core]\nmax_occurrences = 0\n").unwrap();
        assert!(parse_config(Some(config_path)).await.is_err());
    }
}
