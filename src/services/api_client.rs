// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP y traduce errores
// ============================================================================

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use crate::error::ApiError;
use crate::models::{
    AddPointsRequest, AuthResponse, BalanceResponse, ClassifyResponse, CumulativeResponse,
    LoginRequest, RawHistoryEntry, RedeemRequest, RedeemResponse, RegisterRequest, Reward,
};

/// Backend de puntos/premios visto por el controlador de sincronización.
/// Un solo hilo (WASM): los futures no necesitan ser `Send`.
#[allow(async_fn_in_trait)]
pub trait RewardsApi {
    /// GET /usuarios/{correo}/puntos
    async fn fetch_balance(&self, correo: &str) -> Result<BalanceResponse, ApiError>;

    /// GET /usuarios/{correo}/puntos-acumulados
    async fn fetch_cumulative(&self, correo: &str) -> Result<CumulativeResponse, ApiError>;

    /// GET /historial/{correo}
    async fn fetch_history(&self, correo: &str) -> Result<Vec<RawHistoryEntry>, ApiError>;

    /// POST /puntos/agregar
    async fn add_points(&self, correo: &str, puntos: i64) -> Result<(), ApiError>;

    /// POST /puntos/canjear
    async fn redeem(&self, correo: &str, premio: &str) -> Result<RedeemResponse, ApiError>;

    /// GET /premios
    async fn list_rewards(&self) -> Result<Vec<Reward>, ApiError>;
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(crate::config::CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn user_url(&self, prefix: &str, correo: &str, suffix: &str) -> String {
        let encoded: String = js_sys::encode_uri_component(correo).into();
        format!("{}/{}/{}{}", self.base_url, prefix, encoded, suffix)
    }

    /// Iniciar sesión
    pub async fn login(&self, correo: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/login", self.base_url);
        let request = LoginRequest {
            correo: correo.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 [API] Login para: {}", correo);

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Transport(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = decode::<AuthResponse>(response).await?;
        reject_if_error(body.error.as_deref())?;
        Ok(body)
    }

    /// Registrar usuario nuevo
    pub async fn register(&self, nombre: &str, correo: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = format!("{}/register", self.base_url);
        let request = RegisterRequest {
            nombre: nombre.to_string(),
            correo: correo.to_string(),
            password: password.to_string(),
        };

        log::info!("📝 [API] Registro de: {}", correo);

        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Transport(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = decode::<AuthResponse>(response).await?;
        reject_if_error(body.error.as_deref())?;
        Ok(body)
    }

    /// Clasificar una foto de residuo (multipart, campo `file`)
    pub async fn classify(&self, file: &web_sys::File) -> Result<ClassifyResponse, ApiError> {
        let url = format!("{}/classify", self.base_url);

        let form = web_sys::FormData::new()
            .map_err(|_| ApiError::Transport("No se pudo crear FormData".to_string()))?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|_| ApiError::Transport("No se pudo adjuntar la imagen".to_string()))?;

        log::info!("📷 [API] Clasificando imagen: {} ({} bytes)", file.name(), file.size());

        let response = Request::post(&url)
            .body(form)
            .map_err(|e| ApiError::Transport(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = decode::<ClassifyResponse>(response).await?;
        reject_if_error(body.error.as_deref())?;
        log::info!("✅ [API] Clasificado como '{}' (+{} puntos)", body.clase, body.puntos);
        Ok(body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardsApi for ApiClient {
    async fn fetch_balance(&self, correo: &str) -> Result<BalanceResponse, ApiError> {
        let url = self.user_url("usuarios", correo, "/puntos");
        get_json(&url).await
    }

    async fn fetch_cumulative(&self, correo: &str) -> Result<CumulativeResponse, ApiError> {
        let url = self.user_url("usuarios", correo, "/puntos-acumulados");
        get_json(&url).await
    }

    async fn fetch_history(&self, correo: &str) -> Result<Vec<RawHistoryEntry>, ApiError> {
        let url = self.user_url("historial", correo, "");
        get_json(&url).await
    }

    async fn add_points(&self, correo: &str, puntos: i64) -> Result<(), ApiError> {
        let url = format!("{}/puntos/agregar", self.base_url);

        log::info!("➕ [API] Agregando {} puntos a {}", puntos, correo);

        let response = Request::post(&url)
            .json(&AddPointsRequest { correo, puntos })
            .map_err(|e| ApiError::Transport(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        // El ack no tiene forma fija: solo importa un posible campo `error`
        let body = decode::<serde_json::Value>(response).await?;
        reject_if_error(body.get("error").and_then(|v| v.as_str()))
    }

    async fn redeem(&self, correo: &str, premio: &str) -> Result<RedeemResponse, ApiError> {
        let url = format!("{}/puntos/canjear", self.base_url);

        log::info!("🎁 [API] Canjeando '{}' para {}", premio, correo);

        let response = Request::post(&url)
            .json(&RedeemRequest { correo, premio })
            .map_err(|e| ApiError::Transport(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = decode::<RedeemResponse>(response).await?;
        reject_if_error(body.error.as_deref())?;
        Ok(body)
    }

    async fn list_rewards(&self) -> Result<Vec<Reward>, ApiError> {
        let url = format!("{}/premios", self.base_url);
        get_json(&url).await
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(format!("HTTP {}: {}", status, e)))?;

    parse_body(status, response.ok(), &text)
}

/// Cuerpo → resultado.
/// No-2xx: `Rejected` si trae `error`, si no `Transport`.
/// 2xx: un objeto con `error` también es `Rejected`; lo que no encaje en `T` es `Malformed`.
fn parse_body<T: DeserializeOwned>(status: u16, ok: bool, text: &str) -> Result<T, ApiError> {
    if !ok {
        return Err(error_from_body(status, text));
    }

    let value = serde_json::from_str::<serde_json::Value>(text)
        .map_err(|e| ApiError::Malformed(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        log::warn!("⚠️ [API] Rechazado por el backend (HTTP {}): {}", status, message);
        return Err(ApiError::Rejected(message.to_string()));
    }

    serde_json::from_value::<T>(value).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn error_from_body(status: u16, text: &str) -> ApiError {
    let backend_error = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));

    match backend_error {
        Some(message) => {
            log::warn!("⚠️ [API] Rechazado por el backend (HTTP {}): {}", status, message);
            ApiError::Rejected(message)
        }
        None => ApiError::Transport(format!("HTTP {}", status)),
    }
}

fn reject_if_error(error: Option<&str>) -> Result<(), ApiError> {
    match error {
        Some(message) => {
            log::warn!("⚠️ [API] Rechazado por el backend: {}", message);
            Err(ApiError::Rejected(message.to_string()))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_status_with_error_body_is_rejected() {
        let result = parse_body::<BalanceResponse>(200, true, r#"{"error":"Usuario no encontrado"}"#);
        assert_eq!(result, Err(ApiError::Rejected("Usuario no encontrado".to_string())));
    }

    #[test]
    fn test_ok_status_balance_body() {
        let result = parse_body::<BalanceResponse>(200, true, r#"{"puntos":"42"}"#);
        assert_eq!(result.map(|b| b.puntos), Ok(42));
    }

    #[test]
    fn test_ok_status_unparseable_body_is_malformed() {
        for body in ["<html>hola</html>", "", "{\"puntos\":"] {
            let result = parse_body::<BalanceResponse>(200, true, body);
            assert!(matches!(result, Err(ApiError::Malformed(_))), "{:?}: {:?}", body, result);
        }
    }

    #[test]
    fn test_history_body_must_be_array() {
        let body = r#"[{"accion":"escaneo","detalle":"+5 puntos"}]"#;
        let entries = parse_body::<Vec<RawHistoryEntry>>(200, true, body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].detalle, "+5 puntos");

        let result = parse_body::<Vec<RawHistoryEntry>>(200, true, r#"{"x":1}"#);
        assert!(matches!(result, Err(ApiError::Malformed(_))));

        let result = parse_body::<Vec<RawHistoryEntry>>(200, true, r#"{"error":"Sin historial"}"#);
        assert_eq!(result, Err(ApiError::Rejected("Sin historial".to_string())));
    }

    #[test]
    fn test_error_status_goes_through_error_body() {
        let result = parse_body::<BalanceResponse>(404, false, r#"{"error":"Usuario no encontrado"}"#);
        assert_eq!(result, Err(ApiError::Rejected("Usuario no encontrado".to_string())));

        let result = parse_body::<BalanceResponse>(500, false, "");
        assert_eq!(result, Err(ApiError::Transport("HTTP 500".to_string())));
    }

    #[test]
    fn test_error_body_becomes_rejected() {
        let err = error_from_body(400, r#"{"error":"Puntos insuficientes"}"#);
        assert_eq!(err, ApiError::Rejected("Puntos insuficientes".to_string()));
    }

    #[test]
    fn test_non_json_error_is_transport() {
        let err = error_from_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err, ApiError::Transport("HTTP 502".to_string()));
    }

    #[test]
    fn test_reject_if_error() {
        assert!(reject_if_error(None).is_ok());
        assert_eq!(
            reject_if_error(Some("Premio agotado")),
            Err(ApiError::Rejected("Premio agotado".to_string()))
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::with_base_url("https://api.example.org/");
        assert_eq!(client.base_url, "https://api.example.org");
    }
}
