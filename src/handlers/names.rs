use crate::handlers::SharedSessionState;
use crate::models::{ResetResponse, SetNamesRequest, SetNamesResponse};
use crate::session::manager::{CancelAutoReset, SessionManager};
use actix::Addr;
use actix_web::{web, HttpResponse, Responder};

/// GET /names - コンソールがポーリングする
pub async fn get_names(state: web::Data<SharedSessionState>) -> impl Responder {
    let names = state.lock().unwrap().names.clone();
    HttpResponse::Ok().json(names)
}

/// POST /names - タブレットからの名前登録
pub async fn set_names(
    state: web::Data<SharedSessionState>,
    req: web::Json<SetNamesRequest>,
) -> impl Responder {
    let req = req.into_inner();
    let names = state.lock().unwrap().set_names(req.player1, req.player2);
    println!(
        "📥 POST /names: P1=\"{}\", P2=\"{}\"",
        names.player1, names.player2
    );

    HttpResponse::Ok().json(SetNamesResponse {
        success: true,
        names,
    })
}

/// POST /reset - 手動リセット（ゲーム終了後に呼ばれる）
pub async fn reset_session(
    state: web::Data<SharedSessionState>,
    manager: web::Data<Addr<SessionManager>>,
) -> impl Responder {
    {
        let mut state = state.lock().unwrap();
        state.reset();
        println!(
            "🧹 Session reset: new session_id={}",
            state.session.session_id
        );
    }

    // 予約済みの自動リセットも解除
    manager.do_send(CancelAutoReset);

    HttpResponse::Ok().json(ResetResponse { success: true })
}
