// ============================================================================
// ECOPUNTOS PWA - FRONTEND MVVM (RUST → WASM)
// ============================================================================
// - Views: funciones que renderizan DOM (sin lógica)
// - ViewModels: sincronización de puntos + auth
// - Services: HTTP y servicios de UI
// - State: State Management con Rc<RefCell>
// - Models: estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
mod dom;
mod views;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;

// Mantiene viva la app (y con ella el scheduler) mientras dure la página
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 EcoPuntos - backend: {} ({})", CONFIG.backend_url(), CONFIG.environment);

    let mut app = App::new()?;
    app.mount()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    Ok(())
}
