//! Store configuration from the environment
//!
//! Environment variables:
//!   TABLEBOOK_DATABASE_URL      Postgres connection string (falls back to DATABASE_URL)
//!   TABLEBOOK_MAX_CONNECTIONS   Pool size (default: 5)
//!   TABLEBOOK_TIMEZONE          IANA zone for rendered start times (default: UTC)

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Default maximum connections for the Postgres pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const DATABASE_URL_VAR: &str = "TABLEBOOK_DATABASE_URL";
const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";
const MAX_CONNECTIONS_VAR: &str = "TABLEBOOK_MAX_CONNECTIONS";
const TIMEZONE_VAR: &str = "TABLEBOOK_TIMEZONE";

/// Settings needed to reach the booking store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Zone used when rendering start times for people
    pub display_timezone: Tz,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            display_timezone: Tz::UTC,
        }
    }

    /// Load .env files, then read the environment.
    ///
    /// See [`load_dotenv`] for which files are read and in what order.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_env()
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .or_else(|| lookup(FALLBACK_DATABASE_URL_VAR))
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing {
                var: DATABASE_URL_VAR,
            })?;

        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            Some(raw) => {
                let n: u32 = raw
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid(MAX_CONNECTIONS_VAR, raw.as_str(), e))?;
                if n == 0 {
                    return Err(ConfigError::invalid(
                        MAX_CONNECTIONS_VAR,
                        raw,
                        "must be at least 1",
                    ));
                }
                n
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let display_timezone = match lookup(TIMEZONE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<Tz>()
                .map_err(|e| ConfigError::invalid(TIMEZONE_VAR, raw.as_str(), e))?,
            None => Tz::UTC,
        };

        Ok(Self {
            database_url,
            max_connections,
            display_timezone,
        })
    }
}

/// Load environment variables from .env files.
///
/// Priority order (highest to lowest):
/// 1. Variables already set in the process
/// 2. Current directory .env
/// 3. ~/.tablebook/.env
///
/// Returns the files that were loaded.
pub fn load_dotenv() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    load_dotenv_in(cwd.as_deref(), config_dir().as_deref())
}

/// Load `.env` from `work_dir`, then from `config_dir`.
///
/// dotenvy never overwrites a variable that is already set, so the first
/// file to define a key wins.
pub fn load_dotenv_in(work_dir: Option<&Path>, config_dir: Option<&Path>) -> Vec<PathBuf> {
    let loaded: Vec<PathBuf> = [work_dir, config_dir]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(".env"))
        .filter(|env_file| load_dotenv_from(env_file))
        .collect();

    if loaded.is_empty() {
        info!("Using environment variables only (no .env file found)");
    }

    loaded
}

/// Load one .env file without overwriting variables that are already set.
pub fn load_dotenv_from(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!("Loaded .env from {}", path.display());
            true
        }
        Err(e) => {
            debug!("Failed to load {}: {}", path.display(), e);
            false
        }
    }
}

/// Get the tablebook config directory path (~/.tablebook)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tablebook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = StoreConfig::from_lookup(lookup(&[(
            "TABLEBOOK_DATABASE_URL",
            "postgres://localhost/tablebook",
        )]))
        .unwrap();

        assert_eq!(config, StoreConfig::new("postgres://localhost/tablebook"));
    }

    #[test]
    fn falls_back_to_database_url() {
        let config =
            StoreConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db/other")])).unwrap();
        assert_eq!(config.database_url, "postgres://db/other");
    }

    #[test]
    fn prefers_prefixed_url() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/other"),
            ("TABLEBOOK_DATABASE_URL", "postgres://db/tablebook"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://db/tablebook");
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = StoreConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "TABLEBOOK_DATABASE_URL" }));
    }

    #[test]
    fn parses_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/x"),
            ("TABLEBOOK_MAX_CONNECTIONS", "12"),
            ("TABLEBOOK_TIMEZONE", "Europe/Paris"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.display_timezone, chrono_tz::Europe::Paris);
    }

    #[test]
    fn rejects_bad_values() {
        let err = StoreConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/x"),
            ("TABLEBOOK_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = StoreConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/x"),
            ("TABLEBOOK_TIMEZONE", "Mars/Olympus_Mons"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("TABLEBOOK_TIMEZONE"));
    }

    #[test]
    fn dotenv_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "TABLEBOOK_DOTENV_TEST_VAR=loaded").unwrap();
        file.flush().unwrap();

        assert!(load_dotenv_from(file.path()));
        assert_eq!(
            std::env::var("TABLEBOOK_DOTENV_TEST_VAR").as_deref(),
            Ok("loaded")
        );
    }

    #[test]
    fn work_dir_dotenv_wins_over_config_dir() {
        let work = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        std::fs::write(
            work.path().join(".env"),
            "TABLEBOOK_LAYER_TEST_SHARED=work\n",
        )
        .unwrap();
        std::fs::write(
            home.path().join(".env"),
            "TABLEBOOK_LAYER_TEST_SHARED=home\nTABLEBOOK_LAYER_TEST_HOME_ONLY=home\n",
        )
        .unwrap();

        let loaded = load_dotenv_in(Some(work.path()), Some(home.path()));

        assert_eq!(
            loaded,
            vec![work.path().join(".env"), home.path().join(".env")]
        );
        assert_eq!(
            std::env::var("TABLEBOOK_LAYER_TEST_SHARED").as_deref(),
            Ok("work")
        );
        assert_eq!(
            std::env::var("TABLEBOOK_LAYER_TEST_HOME_ONLY").as_deref(),
            Ok("home")
        );
    }

    #[test]
    fn no_dotenv_files_loads_nothing() {
        let empty = tempfile::tempdir().unwrap();
        assert!(load_dotenv_in(Some(empty.path()), None).is_empty());
        assert!(load_dotenv_in(None, None).is_empty());
    }

    #[test]
    fn load_dotenv_reports_only_existing_files() {
        for path in load_dotenv() {
            assert!(path.exists(), "{} reported but missing", path.display());
        }
    }

    #[test]
    fn config_dir_is_under_home() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with(".tablebook"));
        }
    }

    #[test]
    fn missing_dotenv_file_is_skipped() {
        assert!(!load_dotenv_from(Path::new("/nonexistent/tablebook/.env")));
    }
}
