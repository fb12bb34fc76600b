//! Monster decision making.
//!
//! Every non-player actor carries an [`AiState`]. On each activation the turn
//! engine asks the state for one [`Command`](crate::action::Command) via
//! [`AiState::decide`]. Confusion and paralysis wrap the current state rather
//! than replacing it, and hand it back untouched when they wear off.

mod decide;
mod error;
mod state;

pub use error::AiError;
pub use state::{AiBehavior, AiState};
