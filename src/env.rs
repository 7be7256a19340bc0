use std::path::Path;

use tracing::{info, warn};

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://athletes.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Env files read at startup. Loading happens before the subscriber exists,
/// so the outcome is kept here and logged once tracing is up.
#[derive(Debug, Default, PartialEq)]
pub struct LoadedEnvironment {
    pub loaded: Vec<String>,
    pub skipped: Vec<String>,
}

impl LoadedEnvironment {
    pub fn log(&self) {
        for path in &self.loaded {
            info!("Loaded environment from: {}", path);
        }
        for path in &self.skipped {
            warn!("Warning: Environment file {} not found, skipping", path);
        }
    }
}

pub fn load_environment() -> Result<LoadedEnvironment, Box<dyn std::error::Error>> {
    let is_production =
        dotenvy::var("ROCKET_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        vec!["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        vec!["config/common.env", "config/dev.env", ".secrets.env"]
    };

    load_env_files(&env_files)
}

pub fn load_env_files(paths: &[&str]) -> Result<LoadedEnvironment, Box<dyn std::error::Error>> {
    let mut outcome = LoadedEnvironment::default();

    for path in paths {
        if !Path::new(path).exists() {
            outcome.skipped.push(path.to_string());
            continue;
        }

        dotenvy::from_filename_override(path)?;
        outcome.loaded.push(path.to_string());
    }

    Ok(outcome)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn from_env() -> Result<Self, AppError> {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                AppError::Config(format!(
                    "DATABASE_MAX_CONNECTIONS must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}
