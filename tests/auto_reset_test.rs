use actix::Actor;
use actix_web::{test, web, App};
use dance_score_server::handlers::{
    get_names, get_result, reset_session, set_names, submit_score, SharedSessionState,
};
use dance_score_server::models::{PlayerNames, ResultResponse};
use dance_score_server::session::manager::SessionManager;
use dance_score_server::session::state::SessionState;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

#[actix_rt::test]
async fn test_auto_reset_fires_after_delay() {
    let state: SharedSessionState = Arc::new(Mutex::new(SessionState::new()));
    // テストでは遅延を短縮
    let manager = SessionManager::with_delay(state.clone(), Duration::from_millis(100)).start();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(manager.clone()))
            .app_data(web::Data::new(None::<SqlitePool>))
            .route("/names", web::get().to(get_names))
            .route("/names", web::post().to(set_names))
            .route("/submit-score", web::post().to(submit_score))
            .route("/result", web::get().to(get_result)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/names")
        .set_json(json!({ "player1": "Alice", "player2": "Bob" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/submit-score")
        .set_json(json!({ "playerIndex": 0, "name": "Alice", "score": 900 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/submit-score")
        .set_json(json!({ "playerIndex": 1, "name": "Bob", "score": 750 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/result").to_request();
    let body: ResultResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.ready);
    let old_session_id = body.session_id;

    // タイマー発火を待つ
    sleep(Duration::from_millis(300)).await;

    let req = test::TestRequest::get().uri("/result").to_request();
    let body: ResultResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.ready);
    assert!(body.result.is_none());
    assert!(body.session_id > old_session_id);

    // 名前もまとめてクリアされる
    let req = test::TestRequest::get().uri("/names").to_request();
    let names: PlayerNames = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names.player1, "");
    assert_eq!(names.player2, "");
}

#[actix_rt::test]
async fn test_manual_reset_cancels_armed_timer() {
    let state: SharedSessionState = Arc::new(Mutex::new(SessionState::new()));
    let manager = SessionManager::with_delay(state.clone(), Duration::from_millis(200)).start();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(manager.clone()))
            .app_data(web::Data::new(None::<SqlitePool>))
            .route("/submit-score", web::post().to(submit_score))
            .route("/result", web::get().to(get_result))
            .route("/reset", web::post().to(reset_session)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/submit-score")
        .set_json(json!({ "playerIndex": 0, "name": "Alice", "score": 900 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/submit-score")
        .set_json(json!({ "playerIndex": 1, "name": "Bob", "score": 750 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // タイマー発火前に手動リセット
    let req = test::TestRequest::post().uri("/reset").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/result").to_request();
    let body: ResultResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.ready);
    let session_id_after_reset = body.session_id;

    // 元のタイマーが生きていれば発火しているはずの時間まで待つ
    sleep(Duration::from_millis(500)).await;

    // 二重リセットは起きない（セッションIDはそのまま）
    let req = test::TestRequest::get().uri("/result").to_request();
    let body: ResultResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.ready);
    assert_eq!(body.session_id, session_id_after_reset);
}

#[actix_rt::test]
async fn test_late_submission_does_not_rearm_timer() {
    let state: SharedSessionState = Arc::new(Mutex::new(SessionState::new()));
    let manager = SessionManager::with_delay(state.clone(), Duration::from_millis(600)).start();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(manager.clone()))
            .app_data(web::Data::new(None::<SqlitePool>))
            .route("/submit-score", web::post().to(submit_score))
            .route("/result", web::get().to(get_result)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/submit-score")
        .set_json(json!({ "playerIndex": 0, "name": "Alice", "score": 900 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/submit-score")
        .set_json(json!({ "playerIndex": 1, "name": "Bob", "score": 750 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // 確定から200ms後に再送信。タイマーが予約し直されるなら発火は800ms時点になる
    sleep(Duration::from_millis(200)).await;
    let req = test::TestRequest::post()
        .uri("/submit-score")
        .set_json(json!({ "playerIndex": 1, "name": "Bob", "score": 2000 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // 確定から700ms: 元のタイマー（600ms）が発火済みならリセットされている
    sleep(Duration::from_millis(500)).await;
    let req = test::TestRequest::get().uri("/result").to_request();
    let body: ResultResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.ready);
    assert!(body.result.is_none());
}

#[actix_rt::test]
async fn test_next_round_after_auto_reset() {
    let state: SharedSessionState = Arc::new(Mutex::new(SessionState::new()));
    let manager = SessionManager::with_delay(state.clone(), Duration::from_millis(100)).start();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(manager.clone()))
            .app_data(web::Data::new(None::<SqlitePool>))
            .route("/submit-score", web::post().to(submit_score))
            .route("/result", web::get().to(get_result)),
    )
    .await;

    // 1ラウンド目
    for (index, name, score) in [(0, "Alice", 900), (1, "Bob", 750)] {
        let req = test::TestRequest::post()
            .uri("/submit-score")
            .set_json(json!({ "playerIndex": index, "name": name, "score": score }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    sleep(Duration::from_millis(300)).await;

    // 2ラウンド目も同様に確定と自動リセットが働く
    for (index, name, score) in [(0, "Carol", 100), (1, "Dave", 200)] {
        let req = test::TestRequest::post()
            .uri("/submit-score")
            .set_json(json!({ "playerIndex": index, "name": name, "score": score }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get().uri("/result").to_request();
    let body: ResultResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.ready);
    assert_eq!(body.result.expect("ready").winner.name, "Dave");

    sleep(Duration::from_millis(300)).await;

    let req = test::TestRequest::get().uri("/result").to_request();
    let body: ResultResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.ready);
}
