use crate::errors::{AppError, AppResult};
use crate::models::schedule::ShiftSchedule;
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

/// Per-minute currency rates used by the suggestion deriver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rates {
    #[serde(default = "default_bonus_rate")]
    pub early_arrival: i64,
    #[serde(default = "default_bonus_rate")]
    pub late_departure: i64,
    #[serde(default = "default_lateness_rate")]
    pub lateness: i64,
    #[serde(default = "default_early_leave_rate")]
    pub early_leave: i64,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            early_arrival: default_bonus_rate(),
            late_departure: default_bonus_rate(),
            lateness: default_lateness_rate(),
            early_leave: default_early_leave_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub default_store: Option<String>,
    #[serde(default)]
    pub rates: Rates,
    #[serde(default = "default_standard_work_hours")]
    pub standard_work_hours: u32,
    #[serde(default = "default_absence_divisor")]
    pub absence_divisor: i64,
    #[serde(default)]
    pub default_shifts: ShiftSchedule,
}

fn default_bonus_rate() -> i64 {
    1500
}
fn default_lateness_rate() -> i64 {
    1000
}
fn default_early_leave_rate() -> i64 {
    800
}
fn default_standard_work_hours() -> u32 {
    8
}
fn default_absence_divisor() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_store: None,
            rates: Rates::default(),
            standard_work_hours: default_standard_work_hours(),
            absence_divisor: default_absence_divisor(),
            default_shifts: ShiftSchedule::builtin(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftpay")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shiftpay")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftpay.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftpay.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()
            .map_err(|msg| AppError::Config(format!("{}: {}", path.display(), msg)))?;
        Ok(cfg)
    }

    /// Rates are per-minute amounts and must not be negative; the absence
    /// divisor must be at least 1.
    pub fn validate(&self) -> Result<(), String> {
        let rates = [
            ("rates.early_arrival", self.rates.early_arrival),
            ("rates.late_departure", self.rates.late_departure),
            ("rates.lateness", self.rates.lateness),
            ("rates.early_leave", self.rates.early_leave),
        ];
        if let Some((key, value)) = rates.iter().find(|(_, v)| *v < 0) {
            return Err(format!("{key} must not be negative (got {value})"));
        }
        if self.absence_divisor <= 0 {
            return Err(format!(
                "absence_divisor must be positive (got {})",
                self.absence_divisor
            ));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("shiftpay.sqlite")
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            success(format!("Config file: {:?}", Self::config_file()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {:?}", db_path));

        Ok(config)
    }
}
