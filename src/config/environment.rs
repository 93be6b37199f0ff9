//! Configuración de variables de entorno
//!
//! Todas las variables tienen un valor por defecto salvo `DATABASE_URL`,
//! que solo se exige con el backend de PostgreSQL. La lectura pasa por una
//! función de búsqueda para poder probarla sin tocar el entorno del proceso.

use std::env;

use anyhow::{bail, Result};
use tracing::Level;

use super::database::{parse_or, DatabaseConfig};

pub const DEFAULT_PROXIMITY_TOLERANCE: f64 = 0.01;
pub const DEFAULT_CONFLICT_RETRY_ATTEMPTS: u32 = 3;

/// Dónde se guardan los datos
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Postgres(DatabaseConfig),
    Memory,
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Postgres(_) => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub log_level: Level,
    pub version: String,
    pub storage: StorageBackend,
    pub cors_origins: Vec<String>,
    pub location_proximity_tolerance: f64,
    pub conflict_retry_attempts: u32,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage = match lookup("STORAGE_BACKEND")
            .map(|raw| raw.trim().to_lowercase())
            .as_deref()
        {
            None | Some("") | Some("postgres") => {
                StorageBackend::Postgres(DatabaseConfig::from_lookup(&lookup)?)
            }
            Some("memory") => StorageBackend::Memory,
            Some(other) => bail!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'", other),
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let location_proximity_tolerance: f64 = parse_or(
            &lookup,
            "LOCATION_PROXIMITY_TOLERANCE",
            DEFAULT_PROXIMITY_TOLERANCE,
        )?;
        if !location_proximity_tolerance.is_finite() || location_proximity_tolerance < 0.0 {
            bail!("LOCATION_PROXIMITY_TOLERANCE must be a non-negative number");
        }

        let conflict_retry_attempts: u32 = parse_or(
            &lookup,
            "CONFLICT_RETRY_ATTEMPTS",
            DEFAULT_CONFLICT_RETRY_ATTEMPTS,
        )?;
        if conflict_retry_attempts == 0 {
            bail!("CONFLICT_RETRY_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            log_level: parse_or(&lookup, "LOG_LEVEL", Level::INFO)?,
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage,
            cors_origins,
            location_proximity_tolerance,
            conflict_retry_attempts,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
