use gloo_storage::{LocalStorage, Storage};
use crate::utils::constants::{STORAGE_KEY_CORREO, STORAGE_KEY_NOMBRE};

/// Sesión persistida del usuario (solo identificador y nombre visible)
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoredSession {
    pub correo: String,
    pub nombre: Option<String>,
}

pub fn save_session(session: &StoredSession) -> Result<(), String> {
    LocalStorage::set(STORAGE_KEY_CORREO, &session.correo)
        .map_err(|e| format!("Error guardando correo en localStorage: {}", e))?;
    match &session.nombre {
        Some(nombre) => LocalStorage::set(STORAGE_KEY_NOMBRE, nombre)
            .map_err(|e| format!("Error guardando nombre en localStorage: {}", e))?,
        None => LocalStorage::delete(STORAGE_KEY_NOMBRE),
    }
    Ok(())
}

/// Leer sesión; `None` si no hay correo guardado (usuario no autenticado)
pub fn load_session() -> Option<StoredSession> {
    let correo: String = LocalStorage::get(STORAGE_KEY_CORREO).ok()?;
    if correo.trim().is_empty() {
        return None;
    }
    let nombre = LocalStorage::get::<String>(STORAGE_KEY_NOMBRE).ok();
    Some(StoredSession { correo, nombre })
}

pub fn clear_session() {
    LocalStorage::delete(STORAGE_KEY_CORREO);
    LocalStorage::delete(STORAGE_KEY_NOMBRE);
}
