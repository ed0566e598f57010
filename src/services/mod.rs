// ============================================================================
// SERVICES - HTTP, parseo de historial y servicios de UI
// ============================================================================

pub mod api_client;
pub mod history_parser;
pub mod notification_service;
pub mod loading_service;
pub mod sync_scheduler;

pub use api_client::{ApiClient, RewardsApi};
pub use notification_service::{NotificationService, Toast, ToastKind};
pub use loading_service::{LoadingGuard, LoadingService};
pub use sync_scheduler::SyncScheduler;
