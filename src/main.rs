use actix::Actor;
use actix_cors::Cors;
use actix_files as fs;
use actix_web::{web, App, HttpServer};
use dance_score_server::db::init_db;
use dance_score_server::handlers::{
    get_names, get_result, health_check, reset_session, set_names, submit_score,
    SharedSessionState,
};
use dance_score_server::session::manager::SessionManager;
use dance_score_server::session::state::SessionState;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("🕺 Starting Dance Score Server...");

    // 設定は環境変数から（PORT / DATABASE_URL）
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    // DATABASE_URL未設定なら永続化は丸ごと無効（コア動作には影響しない）
    let db_pool: Option<SqlitePool> = match std::env::var("DATABASE_URL") {
        Ok(url) => Some(init_db(&url).await.expect("Failed to initialize database")),
        Err(_) => {
            println!("ℹ️  DATABASE_URL not set: persistence disabled");
            None
        }
    };

    // タブレットUI配信用ディレクトリ
    tokio::fs::create_dir_all("public")
        .await
        .expect("Failed to create public directory");

    // 共有状態初期化
    let state: SharedSessionState = Arc::new(Mutex::new(SessionState::new()));

    // セッション管理アクター起動（自動リセットタイマーを所有）
    let session_manager = SessionManager::new(state.clone()).start();

    println!("✅ Server initialized");
    println!("🌐 Listening on http://0.0.0.0:{}", port);

    // HTTPサーバー起動
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(session_manager.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .route("/names", web::get().to(get_names))
            .route("/names", web::post().to(set_names))
            .route("/submit-score", web::post().to(submit_score))
            .route("/result", web::get().to(get_result))
            .route("/reset", web::post().to(reset_session))
            .route("/health", web::get().to(health_check))
            // タブレットUIの静的配信
            .service(fs::Files::new("/", "./public").index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
