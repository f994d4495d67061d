use crate::error::{AppError, Result};

pub const DEFAULT_DB_PATH: &str = "ratesx.db";

/// Connections in the SQLite pool. The pass is strictly sequential, so one
/// reader/writer is all it ever uses.
pub const DB_MAX_CONNECTIONS: u32 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub log_level: String,
    /// Run the pass against an in-memory copy and leave the database untouched (DRY_RUN).
    pub dry_run: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            dry_run: parse_flag("DRY_RUN", std::env::var("DRY_RUN").ok().as_deref())?,
        })
    }
}

fn parse_flag(name: &str, raw: Option<&str>) -> Result<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Ok(false),
            "1" | "true" | "yes" | "on" => Ok(true),
            _ => Err(AppError::Config(format!("{name} must be a boolean, got {v:?}"))),
        },
    }
}
