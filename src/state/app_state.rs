// ============================================================================
// APP STATE - Raíz de estado y servicios compartidos
// ============================================================================
// Se construye una sola vez en el arranque y se pasa por referencia a vistas
// y handlers. Todos los campos son handles Rc: clonar AppState es barato.
// ============================================================================

use std::rc::Rc;
use crate::config::AppConfig;
use crate::services::{ApiClient, LoadingService, NotificationService};
use crate::state::{ActiveView, AuthState, ViewState};
use crate::utils::SystemClock;
use crate::viewmodels::{AuthViewModel, PointsSyncController};

/// Controlador de puntos en producción
pub type PointsController = PointsSyncController<ApiClient, SystemClock>;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub auth: AuthState,
    pub view: ViewState,
    pub points: PointsController,
    pub auth_vm: AuthViewModel,
    pub notifications: NotificationService,
    pub loading: LoadingService,
    pub toast_duration_ms: u32,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let api = ApiClient::with_base_url(config.backend_url());
        let auth = AuthState::new();
        let view = ViewState::new(ActiveView::Login);

        let points = PointsSyncController::new(
            Rc::new(api.clone()),
            Rc::new(SystemClock),
            auth.clone(),
            view.clone(),
            config.sync_config,
        );
        let auth_vm = AuthViewModel::new(api.clone(), auth.clone(), config.ui_config.min_password_length);

        Self {
            api,
            auth,
            view,
            points,
            auth_vm,
            notifications: NotificationService::new(config.ui_config.max_visible_toasts),
            loading: LoadingService::new(),
            toast_duration_ms: config.ui_config.toast_duration_ms,
        }
    }

    /// Vista inicial según haya sesión o no
    pub fn landing_view(&self) -> ActiveView {
        if self.auth.is_logged_in() {
            ActiveView::Scan
        } else {
            ActiveView::Login
        }
    }
}
