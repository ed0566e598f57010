use serde::{Deserialize, Serialize};
use crate::utils::constants::{POINTS_POLL_INTERVAL_MS, POINTS_THROTTLE_MS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub sync_config: SyncConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: crate::utils::BACKEND_URL.to_string(),
            backend_url_production: crate::utils::BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            sync_config: SyncConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

/// Parámetros del refresco de puntos
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub points_throttle_ms: i64,
    pub points_poll_interval_ms: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            points_throttle_ms: POINTS_THROTTLE_MS,
            points_poll_interval_ms: POINTS_POLL_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub toast_duration_ms: u32,
    pub max_visible_toasts: usize,
    pub min_password_length: usize,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3_000,
            max_visible_toasts: 3,
            min_password_length: 6,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            sync_config: SyncConfig {
                points_throttle_ms: option_env!("POINTS_THROTTLE_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.sync_config.points_throttle_ms),
                points_poll_interval_ms: option_env!("POINTS_POLL_INTERVAL_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.sync_config.points_poll_interval_ms),
            },
            ui_config: UIConfig {
                toast_duration_ms: option_env!("TOAST_DURATION_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.ui_config.toast_duration_ms),
                max_visible_toasts: option_env!("MAX_VISIBLE_TOASTS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.ui_config.max_visible_toasts),
                min_password_length: option_env!("MIN_PASSWORD_LENGTH")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.ui_config.min_password_length),
            },
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sync_windows() {
        let config = AppConfig::default();
        assert_eq!(config.sync_config.points_throttle_ms, 8_000);
        assert_eq!(config.sync_config.points_poll_interval_ms, 10_000);
    }

    #[test]
    fn test_backend_url_follows_environment() {
        let mut config = AppConfig::default();
        config.backend_url_production = "https://api.example.org".to_string();
        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), "https://api.example.org");

        config.environment = "staging".to_string();
        assert_eq!(config.backend_url(), config.backend_url_development);
    }
}
