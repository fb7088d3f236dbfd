/// Database configuration
use crate::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "belajar.toml";

/// Environment variable prefix (`BELAJAR_DATABASE__HOST=...`)
pub const ENV_PREFIX: &str = "BELAJAR";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct AppConfig {
    #[serde(default)]
    database: DatabaseConfig,
}

/// Connection parameters for the exercise schema
///
/// Defaults point at `root@localhost:3306/belajar_golang_gorm` with an
/// empty password, `utf8mb4` and the server's local time zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_charset")]
    pub charset: String,

    /// Keep the server's time zone instead of forcing UTC
    #[serde(default = "default_local_time")]
    pub local_time: bool,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Level at which every executed statement is logged
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Statements slower than this are logged at `warn`
    #[serde(default = "default_slow_statement_ms")]
    pub slow_statement_ms: u64,
}

impl DatabaseConfig {
    /// Load configuration from `belajar.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_layers(Some(PathBuf::from(CONFIG_FILE)), false)
    }

    /// Load configuration from an explicit file, then environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layers(Some(path.as_ref().to_path_buf()), true)
    }

    fn load_layers(file: Option<PathBuf>, required: bool) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = file {
            if required || path.exists() {
                settings = settings.add_source(config::File::from(path).required(required));
            }
        }

        // Override with environment variables (BELAJAR_DATABASE__PORT=3307).
        // Values stay strings; numeric fields convert on deserialize.
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let app: AppConfig = settings.build()?.try_deserialize()?;
        app.database.validate()?;

        Ok(app.database)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(StorageError::Config("database host is required".to_string()));
        }

        if self.database.trim().is_empty() {
            return Err(StorageError::Config("database name is required".to_string()));
        }

        if self.port == 0 {
            return Err(StorageError::Config("database port must be non-zero".to_string()));
        }

        if self.max_connections == 0 {
            return Err(StorageError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        self.statement_level()?;

        Ok(())
    }

    /// Connection string for logs, password redacted
    pub fn dsn(&self) -> String {
        let password = if self.password.is_empty() { "" } else { "***" };
        let loc = if self.local_time { "Local" } else { "UTC" };

        format!(
            "mysql://{}:{}@{}:{}/{}?charset={}&loc={}",
            self.username, password, self.host, self.port, self.database, self.charset, loc
        )
    }

    /// Build driver options from this configuration
    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.database)
            .charset(&self.charset);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }

        // `None` leaves the session on the server's own time zone
        options = if self.local_time {
            options.timezone(None::<String>)
        } else {
            options.timezone(Some("+00:00".to_string()))
        };

        Ok(options
            .log_statements(self.statement_level()?)
            .log_slow_statements(
                log::LevelFilter::Warn,
                Duration::from_millis(self.slow_statement_ms),
            ))
    }

    fn statement_level(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(self.log_level.trim()).map_err(|_| {
            StorageError::Config(format!(
                "unsupported log level `{}`; expected off|error|warn|info|debug|trace",
                self.log_level
            ))
        })
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: String::new(),
            database: default_database(),
            charset: default_charset(),
            local_time: default_local_time(),
            max_connections: default_max_connections(),
            log_level: default_log_level(),
            slow_statement_ms: default_slow_statement_ms(),
        }
    }
}

// Default values
fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_username() -> String {
    "root".to_string()
}

fn default_database() -> String {
    "belajar_golang_gorm".to_string()
}

fn default_charset() -> String {
    "utf8mb4".to_string()
}

fn default_local_time() -> bool {
    true
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_slow_statement_ms() -> u64 {
    1000
}
