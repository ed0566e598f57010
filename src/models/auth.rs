use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub correo: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub nombre: String,
    pub correo: String,
    pub password: String,
}

/// Respuesta de /login y /register
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct AuthResponse {
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
}
