use std::{env, path::PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

pub const DEFAULT_TODAY: &str = "2025-10-22";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Reference day for the "today"/"yesterday" report buckets.
    pub today: NaiveDate,
    pub secure_cookies: bool,
}

#[derive(Debug, Error)]
#[error("invalid value {value:?} for {var}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError {
                var: "PORT",
                value,
            })?,
            None => 8080,
        };

        let today = lookup("GLOWTRACK_TODAY").unwrap_or_else(|| DEFAULT_TODAY.to_string());
        let today = NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d").map_err(|_| ConfigError {
            var: "GLOWTRACK_TODAY",
            value: today.clone(),
        })?;

        let secure_cookies = lookup("SECURE_COOKIES")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./static")),
            today,
            secure_cookies,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
