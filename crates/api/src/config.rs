//! # Server and grid configuration
//!
//! Everything is read from the process environment (a `.env` file is loaded
//! by the binary first). Unset keys fall back to the defaults below; keys that
//! are set but unparseable are errors, except the log level and request
//! timeout, which fall back quietly.
//!
//! | Key | Default |
//! |-----|---------|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `3000` |
//! | `DATABASE_URL` | required |
//! | `LOG_LEVEL` | `info` |
//! | `API_CORS_ORIGINS` | unset, comma-separated |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` |
//! | `GRID_PRESET` | `half-hourly`, or `hourly` |
//! | `GRID_TICK_MINUTES`, `GRID_DAY_START`, `GRID_DAY_END`, `GRID_WEEK_START` | from the preset |

use std::{env, str::FromStr};

use classgrid_core::{
    codec,
    grid::{Day, GridConfig},
};
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one running instance of the timetable service
///
/// ```no_run
/// use classgrid_api::config::ApiConfig;
///
/// # fn main() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// assert!(config.server_addr().ends_with(&config.port.to_string()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Connection string for the sections database
    pub database_url: String,
    pub log_level: Level,
    /// Origins allowed to drive the board from a browser; `None` disables CORS
    pub cors_origins: Option<Vec<String>>,
    /// Upper bound on one request, in seconds, collaborator call included
    pub request_timeout: u64,
    pub grid: GridConfig,
}

impl ApiConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a key to its value.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing, or when `API_PORT` or any `GRID_*`
    /// key holds a value that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let port = env
            .parsed::<u16>("API_PORT")?
            .unwrap_or(DEFAULT_PORT);
        let database_url = env
            .get("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        Ok(Self {
            host: env.get("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url,
            log_level: env
                .get("LOG_LEVEL")
                .and_then(|level| Level::from_str(&level).ok())
                .unwrap_or(Level::INFO),
            cors_origins: env.get("API_CORS_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            }),
            request_timeout: env
                .get("API_REQUEST_TIMEOUT_SECONDS")
                .and_then(|secs| secs.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            grid: env.grid()?,
        })
    }

    /// `host:port` to bind the listener to
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.get(key)
            .map(|raw| raw.parse::<T>().wrap_err_with(|| format!("Invalid {} value: {}", key, raw)))
            .transpose()
    }

    fn clock(&self, key: &str) -> Result<Option<chrono::NaiveTime>> {
        self.get(key)
            .map(|raw| codec::parse_clock(&raw).ok_or_else(|| eyre!("Invalid {} value: {}", key, raw)))
            .transpose()
    }

    fn grid(&self) -> Result<GridConfig> {
        let mut grid = match self.get("GRID_PRESET").as_deref() {
            None | Some("half-hourly") => GridConfig::half_hourly(),
            Some("hourly") => GridConfig::hourly(),
            Some(other) => return Err(eyre!("Unknown GRID_PRESET value: {}", other)),
        };

        if let Some(tick) = self.parsed("GRID_TICK_MINUTES")? {
            grid.tick_minutes = tick;
        }
        if let Some(start) = self.clock("GRID_DAY_START")? {
            grid.day_start = start;
        }
        if let Some(end) = self.clock("GRID_DAY_END")? {
            grid.day_end = end;
        }
        if let Some(day) = self.parsed::<Day>("GRID_WEEK_START")? {
            grid.week_start = day;
        }

        Ok(grid)
    }
}
