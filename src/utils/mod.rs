// Utils compartidos

pub mod constants;
pub mod clock;
pub mod storage;

pub use constants::*;
pub use clock::{Clock, SystemClock};
