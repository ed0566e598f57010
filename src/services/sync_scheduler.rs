// ============================================================================
// SYNC SCHEDULER - Disparadores periódicos del refresco de puntos
// ============================================================================
// Intervalo fijo + foco de la ventana. Ambos solo llaman a `refresh_points`;
// la compuerta del controlador decide si hay petición real.
// ============================================================================

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Event};
use crate::services::api_client::RewardsApi;
use crate::utils::clock::Clock;
use crate::viewmodels::points_sync::PointsSyncController;

/// Dueño de los disparadores: al soltarlo se cancelan intervalo y listener
#[derive(Default)]
pub struct SyncScheduler {
    interval: Option<Interval>,
    focus_listener: Option<Closure<dyn FnMut(Event)>>,
}

impl SyncScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Arrancar disparadores. Una segunda llamada no registra nada nuevo.
    pub fn start<A, C>(&mut self, controller: PointsSyncController<A, C>, interval_ms: u32)
    where
        A: RewardsApi + 'static,
        C: Clock + 'static,
    {
        if self.is_running() {
            log::warn!("⚠️ [SYNC] Scheduler ya iniciado, ignorando llamada duplicada");
            return;
        }

        log::info!("⏰ [SYNC] Refresco de puntos cada {} segundos", interval_ms / 1000);

        let interval_controller = controller.clone();
        self.interval = Some(Interval::new(interval_ms, move || {
            trigger(&interval_controller, "intervalo");
        }));

        let Some(win) = window() else {
            return;
        };

        let focus_closure = Closure::wrap(Box::new(move |_event: Event| {
            trigger(&controller, "foco");
        }) as Box<dyn FnMut(Event)>);

        match win.add_event_listener_with_callback("focus", focus_closure.as_ref().unchecked_ref()) {
            Ok(()) => self.focus_listener = Some(focus_closure),
            Err(e) => log::error!("❌ [SYNC] No se pudo registrar listener de foco: {:?}", e),
        }
    }

    pub fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
        if let Some(listener) = self.focus_listener.take() {
            if let Some(win) = window() {
                let _ = win.remove_event_listener_with_callback("focus", listener.as_ref().unchecked_ref());
            }
        }
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.stop();
        log::info!("🔌 [SYNC] Scheduler detenido");
    }
}

fn trigger<A, C>(controller: &PointsSyncController<A, C>, source: &'static str)
where
    A: RewardsApi + 'static,
    C: Clock + 'static,
{
    log::debug!("🔄 [SYNC] Disparador: {}", source);
    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        controller.refresh_points().await;
    });
}
