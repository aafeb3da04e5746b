use crate::handlers::SharedSessionState;
use actix::prelude::*;
use std::time::Duration;

/// 結果確定から自動リセットまでの待ち時間
pub const AUTO_RESET_DELAY: Duration = Duration::from_secs(15);

/// セッション管理アクター
///
/// 自動リセットタイマーを所有する。有効なタイマーは常に1本だけで、
/// 再予約時は必ず既存のタイマーを破棄してから予約し直す。
pub struct SessionManager {
    state: SharedSessionState,
    reset_delay: Duration,
    reset_timer: Option<SpawnHandle>,
}

impl SessionManager {
    pub fn new(state: SharedSessionState) -> Self {
        Self::with_delay(state, AUTO_RESET_DELAY)
    }

    /// 遅延を差し替えて生成（テスト用）
    pub fn with_delay(state: SharedSessionState, reset_delay: Duration) -> Self {
        Self {
            state,
            reset_delay,
            reset_timer: None,
        }
    }
}

impl Actor for SessionManager {
    type Context = Context<Self>;
}

// メッセージ: 自動リセット予約
#[derive(Message)]
#[rtype(result = "()")]
pub struct ArmAutoReset {
    /// 予約時点のセッションID（発火時に照合する）
    pub session_id: u64,
}

impl Handler<ArmAutoReset> for SessionManager {
    type Result = ();

    fn handle(&mut self, msg: ArmAutoReset, ctx: &mut Self::Context) {
        // 既存のタイマーは破棄
        if let Some(handle) = self.reset_timer.take() {
            ctx.cancel_future(handle);
        }

        let armed_session_id = msg.session_id;
        self.reset_timer = Some(ctx.run_later(self.reset_delay, move |act, _ctx| {
            act.reset_timer = None;

            let mut state = act.state.lock().unwrap();
            // 手動リセット等でセッションが既に変わっていたら何もしない
            if state.session.session_id != armed_session_id {
                return;
            }
            state.reset();
            println!(
                "🔄 Auto-reset fired: new session_id={}",
                state.session.session_id
            );
        }));
    }
}

// メッセージ: 自動リセット解除（手動リセット時）
#[derive(Message)]
#[rtype(result = "()")]
pub struct CancelAutoReset;

impl Handler<CancelAutoReset> for SessionManager {
    type Result = ();

    fn handle(&mut self, _msg: CancelAutoReset, ctx: &mut Self::Context) {
        if let Some(handle) = self.reset_timer.take() {
            ctx.cancel_future(handle);
        }
    }
}
