use crate::db::models::MatchRecord;
use crate::handlers::SharedSessionState;
use crate::models::{
    ErrorResponse, HealthResponse, ResultResponse, ScoreEntry, SubmitScoreRequest,
    SubmitScoreResponse,
};
use crate::session::manager::{ArmAutoReset, SessionManager};
use actix::Addr;
use actix_web::{web, HttpResponse, Responder};
use sqlx::SqlitePool;

/// POST /submit-score - コンソールからのスコア送信
pub async fn submit_score(
    state: web::Data<SharedSessionState>,
    manager: web::Data<Addr<SessionManager>>,
    pool: web::Data<Option<SqlitePool>>,
    req: web::Json<SubmitScoreRequest>,
) -> impl Responder {
    let req = req.into_inner();

    // playerIndexは0か1のみ（それ以外は状態を変えずに400）
    let slot = match req.player_index.as_ref().and_then(|v| v.as_i64()) {
        Some(i @ (0 | 1)) => i as usize,
        _ => {
            println!(
                "❌ POST /submit-score: invalid playerIndex: {:?}",
                req.player_index
            );
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "playerIndex must be 0 or 1".to_string(),
            });
        }
    };

    // 欠損・不正値は弾かずに既定値へ寄せる
    let score = req
        .score
        .as_ref()
        .and_then(|v| v.as_i64())
        .unwrap_or(0)
        .max(0);
    let name = match req.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("Player {}", slot + 1),
    };
    let entry = ScoreEntry { name, score };

    println!(
        "📥 POST /submit-score: slot={}, name=\"{}\", score={}",
        slot, entry.name, entry.score
    );

    // スロット書き込み〜結果確定は同一クリティカルセクションで行う
    let (outcome, session_id) = {
        let mut state = state.lock().unwrap();
        let outcome = state.submit_score(slot, entry);
        (outcome, state.session.session_id)
    };

    if outcome.just_resolved {
        if let Some(result) = &outcome.result {
            println!(
                "🏁 Match resolved: winner=\"{}\" ({})",
                result.winner.name, result.winner.score
            );

            // 永続化は投げっぱなし（失敗してもレスポンスには影響させない）
            if let Some(pool) = pool.get_ref() {
                let pool = pool.clone();
                let record = MatchRecord::from_result(result);
                actix_web::rt::spawn(async move {
                    if let Err(e) = record.insert(&pool).await {
                        println!("❌ Failed to persist match result: {}", e);
                    }
                });
            }

            // 結果表示後の自動リセットを予約
            manager.do_send(ArmAutoReset { session_id });
        }
    }

    HttpResponse::Ok().json(SubmitScoreResponse {
        success: true,
        received: slot,
        both_submitted: outcome.both_submitted,
        result: outcome.result,
    })
}

/// GET /result - コンソールが結果をポーリングする
pub async fn get_result(state: web::Data<SharedSessionState>) -> impl Responder {
    let (result, session_id) = {
        let state = state.lock().unwrap();
        (state.session.result.clone(), state.session.session_id)
    };

    HttpResponse::Ok().json(ResultResponse {
        ready: result.is_some(),
        result,
        session_id,
    })
}

/// GET /health - 死活監視
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}
