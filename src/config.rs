use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub session: SessionConfig,

    pub uploads: UploadConfig,

    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// SQLite connection string, e.g. `sqlite:stayr.db` or `sqlite::memory:`.
    pub database_url: String,

    /// "development" or "production". Production suppresses error detail in
    /// responses and forces the Secure cookie flag.
    pub environment: String,

    pub log_level: String,

    /// 0 lets tokio pick the worker count.
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:stayr.db".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
            worker_threads: 0,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub bind_address: String,

    /// Set the Secure flag on session cookies even outside production.
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Signing secret for session cookies. Override in production.
    pub secret: String,

    /// Inactivity window before a session expires.
    pub expiry_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "default-secret-key".to_string(),
            expiry_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory uploaded files are written to, created at startup.
    pub directory: String,

    /// Maximum accepted upload size in bytes (default 5 MiB).
    pub max_file_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: "uploads".to_string(),
            max_file_size: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            session: SessionConfig::default(),
            uploads: UploadConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the first discovered config.toml, then apply
    /// environment overrides. `.env` files are honored via dotenvy.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("STAYR_DATABASE_URL") {
            self.general.database_url = url;
        }
        if let Ok(env) = std::env::var("STAYR_ENV") {
            self.general.environment = env;
        }
        if let Ok(secret) = std::env::var("STAYR_SESSION_SECRET") {
            self.session.secret = secret;
        }
        if let Ok(dir) = std::env::var("STAYR_UPLOAD_DIR") {
            self.uploads.directory = dir;
        }
        if let Ok(size) = std::env::var("STAYR_MAX_FILE_SIZE")
            && let Ok(size) = size.parse()
        {
            self.uploads.max_file_size = size;
        }
        if let Ok(port) = std::env::var("STAYR_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("stayr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".stayr").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.uploads.max_file_size == 0 {
            anyhow::bail!("Max upload size must be greater than zero");
        }

        if self.session.expiry_hours <= 0 {
            anyhow::bail!("Session expiry must be greater than zero");
        }

        if self.is_production() && self.session.secret == SessionConfig::default().secret {
            anyhow::bail!("Session secret must be overridden in production");
        }

        Ok(())
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        self.general.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
        assert_eq!(config.uploads.max_file_size, 5 * 1024 * 1024);
    }

    #[test]
    fn production_requires_real_secret() {
        let mut config = Config::default();
        config.general.environment = "production".to_string();
        assert!(config.validate().is_err());

        config.session.secret = "something-long-and-random".to_string();
        assert!(config.validate().is_ok());
    }
}
