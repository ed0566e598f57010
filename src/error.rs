// ============================================================================
// ERRORES DE LA CAPA API
// ============================================================================

use thiserror::Error;

/// Fallo tipado de una llamada al backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Red caída o HTTP no-2xx sin cuerpo `error`
    #[error("Network error: {0}")]
    Transport(String),

    /// El backend respondió con un campo `error`
    #[error("{0}")]
    Rejected(String),

    /// El cuerpo no se pudo decodificar
    #[error("Parse error: {0}")]
    Malformed(String),

    /// Operación de escritura sin sesión activa
    #[error("No hay sesión activa")]
    Unauthenticated,
}

impl ApiError {
    /// Mensaje apto para mostrar en un toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(msg) => msg.clone(),
            ApiError::Transport(_) => "No se pudo conectar con el servidor".to_string(),
            ApiError::Malformed(_) => "Respuesta inesperada del servidor".to_string(),
            ApiError::Unauthenticated => "Inicia sesión para continuar".to_string(),
        }
    }
}
