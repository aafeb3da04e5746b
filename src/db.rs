pub mod models;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;

/// データベース接続プールを初期化
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    println!("🗄️  Initializing database: {}", database_url);

    // データベースファイルのディレクトリを作成
    if let Some(parent) = Path::new(database_url.trim_start_matches("sqlite://")).parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(sqlx::Error::Io)?;
    }

    // 接続プール作成（create_if_missingを有効化）
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&format!("{}?mode=rwc", database_url))
        .await?;

    // マイグレーション実行
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("✅ Database initialized successfully");

    Ok(pool)
}
