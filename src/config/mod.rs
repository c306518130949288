use crate::core::aggregator::DEFAULT_QUANTUM_MINUTES;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_quantum")]
    pub quantum_minutes: u32,
}

fn default_quantum() -> u32 {
    DEFAULT_QUANTUM_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            quantum_minutes: default_quantum(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("shiftlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shiftlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftlog.sqlite")
    }

    /// Where a `--db` value points to: absolute paths (and `~/…`) as given,
    /// relative ones inside the config directory.
    pub fn resolve_database_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("'database' must not be empty".into()));
        }
        if !(1..=24 * 60).contains(&self.quantum_minutes) {
            return Err(AppError::Config(format!(
                "'quantum_minutes' must be between 1 and 1440, got {}",
                self.quantum_minutes
            )));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Initialize configuration and database files.
    ///
    /// Returns the configuration that was written (or would have been, in
    /// test mode).
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => Self::resolve_database_path(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            quantum_minutes: default_quantum(),
        };

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
