pub mod manager;
pub mod state;

pub use manager::{ArmAutoReset, CancelAutoReset, SessionManager, AUTO_RESET_DELAY};
pub use state::{SessionState, SubmitOutcome};
