/// URL base del backend de reciclaje
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:5000 (por defecto)
/// - Producción: via BACKEND_URL env var
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

/// Ventana mínima entre dos refrescos de puntos (ms)
pub const POINTS_THROTTLE_MS: i64 = 8_000;

/// Intervalo del refresco periódico de puntos (ms)
pub const POINTS_POLL_INTERVAL_MS: u32 = 10_000;

/// Máximo de entradas del historial local optimista
pub const LOCAL_ACTIVITY_CAPACITY: usize = 50;

/// Claves de localStorage para la sesión
pub const STORAGE_KEY_CORREO: &str = "ecopuntos_correo";
pub const STORAGE_KEY_NOMBRE: &str = "ecopuntos_nombre";
