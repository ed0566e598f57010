// ============================================================================
// APP - Raíz de composición: estado, suscripciones y scheduler
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{clear_children, get_element_by_id, require_element, toggle_class};
use crate::services::SyncScheduler;
use crate::state::{ActiveView, AppState};
use crate::views;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
    scheduler: SyncScheduler,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = require_element("app")?;
        let state = AppState::new(&CONFIG);

        if state.auth_vm.restore() {
            state.view.switch_to(state.landing_view());
        }

        Ok(Self {
            state,
            root,
            scheduler: SyncScheduler::new(),
        })
    }

    /// Primer render, suscripciones y disparadores de sincronización
    pub fn mount(&mut self) -> Result<(), JsValue> {
        render_into(&self.root, &self.state)?;
        self.subscribe();

        self.scheduler.start(
            self.state.points.clone(),
            CONFIG.sync_config.points_poll_interval_ms,
        );

        if self.state.auth.is_logged_in() {
            let state = self.state.clone();
            spawn_local(async move {
                state.points.refresh_points().await;
                state.points.refresh_history().await;
            });
        }
        Ok(())
    }

    fn subscribe(&self) {
        let state = &self.state;

        {
            let root = self.root.clone();
            let view_state = state.clone();
            state.view.subscribe(move |view| {
                if let Err(e) = render_into(&root, &view_state) {
                    log::error!("❌ [RENDER] Error re-renderizando {:?}: {:?}", view, e);
                }
                on_view_entered(&view_state, *view);
            });
        }

        state.points.on_points(|points| views::update_points_header(points));

        {
            let rewards_state = state.clone();
            state.points.on_rewards(move |points, rewards| {
                if let Err(e) = views::update_rewards_list(&rewards_state, points, rewards) {
                    log::error!("❌ [RENDER] Error en lista de premios: {:?}", e);
                }
            });
        }

        state.points.on_history(|entries| {
            if let Err(e) = views::update_history_list(entries) {
                log::error!("❌ [RENDER] Error en historial: {:?}", e);
            }
        });

        state.notifications.subscribe(|toasts| {
            if let Err(e) = views::update_toast_stack(toasts) {
                log::error!("❌ [RENDER] Error en toasts: {:?}", e);
            }
        });

        state.loading.subscribe(|loading| {
            if let Some(shell) = get_element_by_id("app-shell") {
                let _ = toggle_class(&shell, "is-loading", loading);
            }
        });
    }
}

fn render_into(root: &Element, state: &AppState) -> Result<(), JsValue> {
    clear_children(root);
    let app_view = views::render_app(state)?;
    root.append_child(&app_view)?;
    Ok(())
}

/// Cargas que dispara entrar en una vista
fn on_view_entered(state: &AppState, view: ActiveView) {
    let state = state.clone();
    match view {
        ActiveView::Rewards => spawn_local(async move {
            if let Err(e) = state.points.load_rewards().await {
                views::show_toast(&state, crate::services::ToastKind::Error, e.user_message());
            }
            state.points.refresh_points().await;
        }),
        ActiveView::History => spawn_local(async move {
            state.points.refresh_history().await;
        }),
        ActiveView::Scan | ActiveView::Login | ActiveView::Register => {}
    }
}
