// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod auth_state;
pub mod points_state;
pub mod view_state;
pub mod app_state;

pub use reactivity::ReactiveState;
pub use auth_state::AuthState;
pub use points_state::{GateRejection, PointsStore, SyncGate};
pub use view_state::{ActiveView, ViewState};
pub use app_state::{AppState, PointsController};
