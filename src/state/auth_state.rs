// ============================================================================
// AUTH STATE - Identidad del usuario activo
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Estado de autenticación. El correo es el identificador que usan
/// todas las rutas de puntos/historial; sin correo no hay nada que sincronizar.
#[derive(Clone, Default)]
pub struct AuthState {
    pub correo: Rc<RefCell<Option<String>>>,
    pub nombre: Rc<RefCell<Option<String>>>,
}

impl AuthState {
    /// Crear nuevo estado de autenticación
    pub fn new() -> Self {
        Self::default()
    }

    /// Establecer usuario activo
    pub fn set_user(&self, correo: String, nombre: Option<String>) {
        *self.correo.borrow_mut() = Some(correo);
        *self.nombre.borrow_mut() = nombre;
    }

    /// Correo del usuario activo (vacío cuenta como ausente)
    pub fn get_correo(&self) -> Option<String> {
        self.correo
            .borrow()
            .as_ref()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
    }

    pub fn get_nombre(&self) -> Option<String> {
        self.nombre.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.get_correo().is_some()
    }

    /// Logout - limpiar todo
    pub fn logout(&self) {
        *self.correo.borrow_mut() = None;
        *self.nombre.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_correo_is_not_a_session() {
        let auth = AuthState::new();
        auth.set_user("   ".to_string(), None);
        assert_eq!(auth.get_correo(), None);
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn test_clones_share_identity() {
        let auth = AuthState::new();
        let other = auth.clone();
        auth.set_user("ana@example.org".to_string(), Some("Ana".to_string()));
        assert_eq!(other.get_correo().as_deref(), Some("ana@example.org"));
        other.logout();
        assert!(!auth.is_logged_in());
    }
}
