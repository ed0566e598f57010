use std::env;
use std::fs;
use std::path::Path;

/// Claves de .env que se exponen a `option_env!` (ver src/config.rs)
const FORWARDED_KEYS: &[&str] = &[
    "BACKEND_URL",
    "BACKEND_URL_DEVELOPMENT",
    "BACKEND_URL_PRODUCTION",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "POINTS_THROTTLE_MS",
    "POINTS_POLL_INTERVAL_MS",
    "TOAST_DURATION_MS",
    "MAX_VISIBLE_TOASTS",
    "MIN_PASSWORD_LENGTH",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    if !env_file.exists() {
        println!("cargo:warning=No .env file found. Using default values.");
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=.env no se pudo leer");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        if !FORWARDED_KEYS.contains(&key) {
            println!("cargo:warning=.env: clave desconocida '{}' ignorada", key);
            continue;
        }

        // El entorno del proceso tiene prioridad sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
