// ============================================================================
// AUTH VIEWMODEL - Validación de formularios + login/registro
// ============================================================================
// Validación pura (testeable sin navegador) y flujos que llaman a la API,
// persisten la sesión y actualizan AuthState.
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use crate::error::ApiError;
use crate::services::ApiClient;
use crate::state::AuthState;
use crate::utils::storage::{self, StoredSession};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").unwrap();
}

const MIN_NOMBRE_LEN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Nombre,
    Correo,
    Password,
    Confirmacion,
}

impl Field {
    /// id del input en el formulario
    pub fn input_id(&self) -> &'static str {
        match self {
            Field::Nombre => "nombre",
            Field::Correo => "correo",
            Field::Password => "password",
            Field::Confirmacion => "confirmacion",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Formulario inválido ({} campos)", .0.len())]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthFailure {
    pub fn user_message(&self) -> String {
        match self {
            AuthFailure::Invalid(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Revisa el formulario".to_string()),
            AuthFailure::Api(e) => e.user_message(),
        }
    }
}

// ==========================================
// VALIDACIÓN
// ==========================================

pub fn is_valid_email(correo: &str) -> bool {
    EMAIL_RE.is_match(correo.trim())
}

fn check_correo(correo: &str, errors: &mut Vec<FieldError>) {
    let correo = correo.trim();
    if correo.is_empty() {
        errors.push(FieldError::new(Field::Correo, "El correo es obligatorio"));
    } else if !is_valid_email(correo) {
        errors.push(FieldError::new(Field::Correo, "Correo no válido"));
    }
}

fn check_password(password: &str, min_len: usize, errors: &mut Vec<FieldError>) {
    if password.trim().is_empty() {
        errors.push(FieldError::new(Field::Password, "La contraseña es obligatoria"));
    } else if password.chars().count() < min_len {
        errors.push(FieldError {
            field: Field::Password,
            message: format!("La contraseña debe tener al menos {} caracteres", min_len),
        });
    }
}

pub fn validate_login(correo: &str, password: &str, min_password_len: usize) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_correo(correo, &mut errors);
    check_password(password, min_password_len, &mut errors);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_register(
    nombre: &str,
    correo: &str,
    password: &str,
    confirmacion: &str,
    min_password_len: usize,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let nombre = nombre.trim();
    if nombre.is_empty() {
        errors.push(FieldError::new(Field::Nombre, "El nombre es obligatorio"));
    } else if nombre.chars().count() < MIN_NOMBRE_LEN {
        errors.push(FieldError::new(Field::Nombre, "El nombre es demasiado corto"));
    }

    check_correo(correo, &mut errors);
    check_password(password, min_password_len, &mut errors);

    if confirmacion.trim().is_empty() {
        errors.push(FieldError::new(Field::Confirmacion, "Confirma la contraseña"));
    } else if confirmacion != password {
        errors.push(FieldError::new(Field::Confirmacion, "Las contraseñas no coinciden"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

// ==========================================
// FLUJOS
// ==========================================

/// ViewModel de autenticación
#[derive(Clone)]
pub struct AuthViewModel {
    api: ApiClient,
    auth: AuthState,
    min_password_len: usize,
}

impl AuthViewModel {
    pub fn new(api: ApiClient, auth: AuthState, min_password_len: usize) -> Self {
        Self { api, auth, min_password_len }
    }

    /// Restaurar sesión guardada al arrancar
    pub fn restore(&self) -> bool {
        match storage::load_session() {
            Some(session) => {
                log::info!("🔑 [AUTH] Sesión restaurada: {}", session.correo);
                self.auth.set_user(session.correo, session.nombre);
                true
            }
            None => false,
        }
    }

    pub async fn login(&self, correo: &str, password: &str) -> Result<String, AuthFailure> {
        validate_login(correo, password, self.min_password_len).map_err(AuthFailure::Invalid)?;
        let correo = correo.trim();

        let response = self.api.login(correo, password).await?;
        let nombre = response.nombre.filter(|n| !n.trim().is_empty());
        self.start_session(correo, nombre);

        Ok(response.mensaje.unwrap_or_else(|| "Bienvenido".to_string()))
    }

    pub async fn register(
        &self,
        nombre: &str,
        correo: &str,
        password: &str,
        confirmacion: &str,
    ) -> Result<String, AuthFailure> {
        validate_register(nombre, correo, password, confirmacion, self.min_password_len)
            .map_err(AuthFailure::Invalid)?;
        let correo = correo.trim();
        let nombre = nombre.trim();

        let response = self.api.register(nombre, correo, password).await?;
        let nombre = response.nombre.unwrap_or_else(|| nombre.to_string());
        self.start_session(correo, Some(nombre));

        Ok(response.mensaje.unwrap_or_else(|| "Cuenta creada".to_string()))
    }

    pub fn logout(&self) {
        log::info!("👋 [AUTH] Cerrando sesión");
        storage::clear_session();
        self.auth.logout();
    }

    fn start_session(&self, correo: &str, nombre: Option<String>) {
        let session = StoredSession {
            correo: correo.to_string(),
            nombre: nombre.clone(),
        };
        if let Err(e) = storage::save_session(&session) {
            log::error!("❌ [AUTH] {}", e);
        }
        self.auth.set_user(correo.to_string(), nombre);
        log::info!("✅ [AUTH] Sesión iniciada: {}", correo);
    }
}
