use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub seating: SeatingConfig,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => bail!("unknown log format '{}', expected pretty | json", other),
        }
    }
}

// Где хранится история бронирований
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    pub redis_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Redis,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("unknown storage backend '{}', expected file | redis | memory", other),
        }
    }
}

// Схема зала: буквы рядов и количество мест в ряду
#[derive(Debug, Clone, Deserialize)]
pub struct SeatingConfig {
    pub rows: String,
    pub seats_per_row: u32,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            rows: "ABCDEFGHIJ".to_string(),
            seats_per_row: 12,
        }
    }
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_cors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "seat_booking=debug".to_string(),
                log_format: LogFormat::Pretty,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                data_dir: PathBuf::from("./data"),
                redis_url: None,
            },
            seating: SeatingConfig::default(),
            features: FeatureFlags { enable_cors: false },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend: StorageBackend = parse_var("STORAGE_BACKEND", "file")?;
        let redis_url = env::var("REDIS_URL").ok();
        if backend == StorageBackend::Redis && redis_url.is_none() {
            bail!("REDIS_URL must be set when STORAGE_BACKEND=redis");
        }

        let seating = SeatingConfig {
            rows: env::var("SEAT_ROWS").unwrap_or_else(|_| SeatingConfig::default().rows),
            seats_per_row: parse_var("SEATS_PER_ROW", "12")?,
        };
        if seating.rows.trim().is_empty() || seating.seats_per_row == 0 {
            bail!("SEAT_ROWS and SEATS_PER_ROW must describe at least one seat");
        }

        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", "8000")?,
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seat_booking=debug,tower_http=debug".to_string()),
                log_format: parse_var("LOG_FORMAT", "pretty")?,
            },
            storage: StorageConfig {
                backend,
                data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string())),
                redis_url,
            },
            seating,
            features: FeatureFlags {
                enable_cors: parse_var("ENABLE_CORS", "true")?,
            },
        })
    }
}

fn parse_var<T>(name: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("{} has an invalid value '{}'", name, raw))
}
