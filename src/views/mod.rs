pub mod app;
pub mod points_header;
pub mod history;
pub mod rewards;
pub mod scan;
pub mod login;
pub mod toasts;

pub use app::render_app;
pub use points_header::update_points_header;
pub use history::update_history_list;
pub use rewards::update_rewards_list;
pub use toasts::{show_toast, update_toast_stack};
