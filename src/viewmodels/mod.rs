pub mod points_sync;
pub mod auth_viewmodel;

pub use points_sync::{PointsSyncController, RefreshOutcome};
pub use auth_viewmodel::{AuthFailure, AuthViewModel, Field, FieldError};
