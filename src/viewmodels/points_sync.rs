// ============================================================================
// POINTS SYNC CONTROLLER - Saldo, total e historial contra el backend
// ============================================================================
// Única autoridad sobre PointsState y el historial mostrado. No toca el DOM:
// expone snapshots y avisa a los callbacks de render tras cada mutación.
//
// Ejecución cooperativa de un solo hilo: entre dos `.await` nada se intercala,
// así que marcar la compuerta antes de la red basta para excluir refrescos
// solapados de puntos.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use futures::future::join;
use crate::config::SyncConfig;
use crate::error::ApiError;
use crate::models::{HistoryEntry, LocalActivity, PointsState, Reward};
use crate::services::api_client::RewardsApi;
use crate::services::history_parser;
use crate::state::{ActiveView, AuthState, GateRejection, PointsStore, ViewState};
use crate::utils::clock::Clock;
use crate::utils::constants::LOCAL_ACTIVITY_CAPACITY;

type PointsCallback = Rc<dyn Fn(&PointsState)>;
type RewardsCallback = Rc<dyn Fn(&PointsState, &[Reward])>;
type HistoryCallback = Rc<dyn Fn(&[HistoryEntry])>;

#[derive(Default)]
struct RenderCallbacks {
    points: Vec<PointsCallback>,
    rewards: Vec<RewardsCallback>,
    history: Vec<HistoryCallback>,
}

/// Resultado de un refresco. Ninguna variante es un error que el caller deba
/// propagar; `Failed` ya quedó logueado y el estado previo intacto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    Unauthenticated,
    Throttled(GateRejection),
    Failed(ApiError),
    /// La sesión cambió mientras la petición estaba en vuelo; respuesta descartada
    Discarded,
}

pub struct PointsSyncController<A, C> {
    api: Rc<A>,
    clock: Rc<C>,
    auth: AuthState,
    view: ViewState,
    points: PointsStore,
    history: Rc<RefCell<Vec<HistoryEntry>>>,
    local_log: Rc<RefCell<VecDeque<LocalActivity>>>,
    rewards: Rc<RefCell<Vec<Reward>>>,
    callbacks: Rc<RefCell<RenderCallbacks>>,
    /// Se incrementa en cada `reset`; las respuestas de otra época se descartan
    epoch: Rc<Cell<u64>>,
    settings: SyncConfig,
}

impl<A, C> Clone for PointsSyncController<A, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            clock: self.clock.clone(),
            auth: self.auth.clone(),
            view: self.view.clone(),
            points: self.points.clone(),
            history: self.history.clone(),
            local_log: self.local_log.clone(),
            rewards: self.rewards.clone(),
            callbacks: self.callbacks.clone(),
            epoch: self.epoch.clone(),
            settings: self.settings,
        }
    }
}

impl<A: RewardsApi, C: Clock> PointsSyncController<A, C> {
    pub fn new(api: Rc<A>, clock: Rc<C>, auth: AuthState, view: ViewState, settings: SyncConfig) -> Self {
        Self {
            api,
            clock,
            auth,
            view,
            points: PointsStore::new(),
            history: Rc::new(RefCell::new(Vec::new())),
            local_log: Rc::new(RefCell::new(VecDeque::new())),
            rewards: Rc::new(RefCell::new(Vec::new())),
            callbacks: Rc::new(RefCell::new(RenderCallbacks::default())),
            epoch: Rc::new(Cell::new(0)),
            settings,
        }
    }

    // ==========================================
    // SNAPSHOTS
    // ==========================================

    pub fn points(&self) -> PointsState {
        self.points.get()
    }

    pub fn is_fetching(&self) -> bool {
        self.points.gate().is_fetching
    }

    /// Historial autoritativo (último fetch exitoso)
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.borrow().clone()
    }

    /// Lo que se muestra: el autoritativo, o el eco local si aquel está vacío
    pub fn display_history(&self) -> Vec<HistoryEntry> {
        let history = self.history.borrow();
        if !history.is_empty() {
            return history.clone();
        }
        self.local_log.borrow().iter().map(LocalActivity::to_entry).collect()
    }

    pub fn local_activity(&self) -> Vec<LocalActivity> {
        self.local_log.borrow().iter().cloned().collect()
    }

    pub fn rewards(&self) -> Vec<Reward> {
        self.rewards.borrow().clone()
    }

    // ==========================================
    // CALLBACKS DE RENDER
    // ==========================================

    pub fn on_points<F>(&self, callback: F)
    where
        F: Fn(&PointsState) + 'static,
    {
        self.callbacks.borrow_mut().points.push(Rc::new(callback));
    }

    /// Re-render de asequibilidad de premios (solo con la vista de premios activa)
    pub fn on_rewards<F>(&self, callback: F)
    where
        F: Fn(&PointsState, &[Reward]) + 'static,
    {
        self.callbacks.borrow_mut().rewards.push(Rc::new(callback));
    }

    pub fn on_history<F>(&self, callback: F)
    where
        F: Fn(&[HistoryEntry]) + 'static,
    {
        self.callbacks.borrow_mut().history.push(Rc::new(callback));
    }

    fn notify_points(&self) {
        let state = self.points();
        let callbacks: Vec<PointsCallback> = self.callbacks.borrow().points.clone();
        for callback in callbacks {
            callback(&state);
        }
        if self.view.is(ActiveView::Rewards) {
            self.notify_rewards();
        }
    }

    fn notify_rewards(&self) {
        let state = self.points();
        let rewards = self.rewards();
        let callbacks: Vec<RewardsCallback> = self.callbacks.borrow().rewards.clone();
        for callback in callbacks {
            callback(&state, &rewards);
        }
    }

    fn notify_history(&self) {
        let entries = self.display_history();
        let callbacks: Vec<HistoryCallback> = self.callbacks.borrow().history.clone();
        for callback in callbacks {
            callback(&entries);
        }
    }

    // ==========================================
    // SESIÓN
    // ==========================================

    /// Olvidar todo lo del usuario anterior (logout / nuevo login).
    /// Puntos y compuerta vuelven al estado de arranque; historial, eco local
    /// y catálogo quedan vacíos.
    pub fn reset(&self) {
        self.epoch.set(self.epoch.get() + 1);
        self.points.reset();
        self.history.borrow_mut().clear();
        self.local_log.borrow_mut().clear();
        self.rewards.borrow_mut().clear();
        log::info!("🧹 [SYNC] Estado de puntos reiniciado");

        self.notify_points();
        self.notify_history();
        self.notify_rewards();
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    // ==========================================
    // SINCRONIZACIÓN
    // ==========================================

    /// Refrescar saldo y total acumulado.
    /// Seguro de llamar desde cualquier disparador: como mucho una petición en
    /// vuelo y una por ventana de throttle.
    pub async fn refresh_points(&self) -> RefreshOutcome {
        let Some(correo) = self.auth.get_correo() else {
            return RefreshOutcome::Unauthenticated;
        };

        let now = self.clock.now_ms();
        if let Err(rejection) = self.points.try_begin_fetch(now, self.settings.points_throttle_ms) {
            log::debug!("⏳ [SYNC] Refresco de puntos omitido: {:?}", rejection);
            return RefreshOutcome::Throttled(rejection);
        }
        let epoch = self.epoch.get();

        let (balance, cumulative) = join(
            self.api.fetch_balance(&correo),
            self.api.fetch_cumulative(&correo),
        )
        .await;

        // La compuerta ya se reinició con la sesión nueva; no tocarla
        if !self.is_current(epoch) {
            log::warn!("⚠️ [SYNC] Puntos de {} descartados: la sesión cambió", correo);
            return RefreshOutcome::Discarded;
        }

        let outcome = match (balance, cumulative) {
            (Ok(balance), Ok(cumulative)) => {
                let state = PointsState {
                    balance: balance.puntos,
                    cumulative_total: cumulative.puntos_acumulados,
                };
                self.points.replace(state);
                log::info!("✅ [SYNC] Puntos: saldo {} / acumulado {}", state.balance, state.cumulative_total);
                RefreshOutcome::Updated
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("❌ [SYNC] Error refrescando puntos: {}", e);
                RefreshOutcome::Failed(e)
            }
        };

        self.points.finish_fetch();
        self.notify_points();
        outcome
    }

    /// Refrescar historial: reemplazo completo, sin merge.
    /// Sin compuerta: llamadas solapadas → gana la última respuesta.
    pub async fn refresh_history(&self) -> RefreshOutcome {
        let Some(correo) = self.auth.get_correo() else {
            return RefreshOutcome::Unauthenticated;
        };

        let epoch = self.epoch.get();
        let result = self.api.fetch_history(&correo).await;
        if !self.is_current(epoch) {
            log::warn!("⚠️ [HISTORIAL] Historial de {} descartado: la sesión cambió", correo);
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(raw_entries) => {
                let entries = history_parser::reconcile(&raw_entries);
                log::info!("📜 [HISTORIAL] {} movimientos", entries.len());
                *self.history.borrow_mut() = entries;
                self.notify_history();
                RefreshOutcome::Updated
            }
            Err(e) => {
                log::error!("❌ [HISTORIAL] Error refrescando historial: {}", e);
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Eco local inmediato de una acción; no toca PointsState
    pub fn record_local_activity(&self, item: &str, points: i64) {
        {
            let mut log = self.local_log.borrow_mut();
            log.push_front(LocalActivity {
                label: item.to_string(),
                points,
            });
            log.truncate(LOCAL_ACTIVITY_CAPACITY);
        }
        self.notify_history();
    }

    /// Cargar catálogo de premios; si falla se conserva el anterior
    pub async fn load_rewards(&self) -> Result<(), ApiError> {
        match self.api.list_rewards().await {
            Ok(rewards) => {
                log::info!("🎁 [PREMIOS] {} premios en catálogo", rewards.len());
                *self.rewards.borrow_mut() = rewards;
                self.notify_rewards();
                Ok(())
            }
            Err(e) => {
                log::error!("❌ [PREMIOS] Error cargando premios: {}", e);
                Err(e)
            }
        }
    }

    // ==========================================
    // ACCIONES QUE GANAN/GASTAN PUNTOS
    // ==========================================

    /// Registrar un residuo reciclado: eco local, alta en backend, refresco
    pub async fn register_scan(&self, item: &str, points: i64) -> Result<(), ApiError> {
        let correo = self.auth.get_correo().ok_or(ApiError::Unauthenticated)?;

        self.record_local_activity(item, points);
        self.api.add_points(&correo, points).await?;

        log::info!("♻️ [SCAN] '{}' registrado (+{} puntos)", item, points);
        self.refresh_points().await;
        self.refresh_history().await;
        Ok(())
    }

    /// Canjear un premio. Un rechazo del backend no cambia nada local.
    pub async fn redeem(&self, premio: &str) -> Result<String, ApiError> {
        let correo = self.auth.get_correo().ok_or(ApiError::Unauthenticated)?;

        let response = self.api.redeem(&correo, premio).await?;
        let mensaje = response
            .mensaje
            .unwrap_or_else(|| "Canje realizado".to_string());

        log::info!("🎉 [CANJE] '{}': {}", premio, mensaje);
        self.refresh_points().await;
        self.refresh_history().await;
        Ok(mensaje)
    }
}
