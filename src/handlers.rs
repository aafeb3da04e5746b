pub mod names;
pub mod score;

pub use names::{get_names, reset_session, set_names};
pub use score::{get_result, health_check, submit_score};

use crate::session::state::SessionState;
use std::sync::{Arc, Mutex};

/// 全ハンドラで共有するセッション状態
pub type SharedSessionState = Arc<Mutex<SessionState>>;
