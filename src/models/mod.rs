pub mod points;
pub mod history;
pub mod reward;
pub mod auth;

pub use points::{PointsState, BalanceResponse, CumulativeResponse, AddPointsRequest};
pub use history::{RawHistoryEntry, HistoryEntry, HistoryKind, OccurredAt, LocalActivity};
pub use reward::{Reward, RedeemRequest, RedeemResponse, ClassifyResponse};
pub use auth::{LoginRequest, RegisterRequest, AuthResponse};
