use crate::models::MatchResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// 確定した対戦結果のレコード
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1_name: String,
    pub player1_score: i64,
    pub player2_name: String,
    pub player2_score: i64,
    pub winner_name: String,
    pub winner_score: i64,
    pub finished_at: String,
}

impl MatchRecord {
    /// 確定した結果からレコードを作成
    pub fn from_result(result: &MatchResult) -> Self {
        Self {
            player1_name: result.player1.name.clone(),
            player1_score: result.player1.score,
            player2_name: result.player2.name.clone(),
            player2_score: result.player2.score,
            winner_name: result.winner.name.clone(),
            winner_score: result.winner.score,
            finished_at: Utc::now().to_rfc3339(),
        }
    }

    /// レコードをデータベースに挿入
    pub async fn insert(&self, pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO match_results
                (player1_name, player1_score, player2_name, player2_score,
                 winner_name, winner_score, finished_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.player1_name)
        .bind(self.player1_score)
        .bind(&self.player2_name)
        .bind(self.player2_score)
        .bind(&self.winner_name)
        .bind(self.winner_score)
        .bind(&self.finished_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// 新しい順に結果を取得
    pub async fn find_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<MatchRecord>, sqlx::Error> {
        let records = sqlx::query_as::<_, MatchRecord>(
            r#"
            SELECT player1_name, player1_score, player2_name, player2_score,
                   winner_name, winner_score, finished_at
            FROM match_results
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
