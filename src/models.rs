use chrono::Utc;
use serde::{Deserialize, Serialize};

// 現在のプレイヤー名（タブレットが登録、コンソールがポーリング）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNames {
    pub player1: String,
    pub player2: String,
    pub updated_at: i64, // unix millis
}

impl PlayerNames {
    /// 空の名前（名前は常に空文字、nullにはしない）
    pub fn empty() -> Self {
        Self {
            player1: String::new(),
            player2: String::new(),
            updated_at: Utc::now().timestamp_millis(),
        }
    }
}

// 1プレイヤー分のスコア
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i64,
}

// 対戦結果（両スロットが揃った瞬間に1度だけ確定）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: ScoreEntry,
    pub player1: ScoreEntry,
    pub player2: ScoreEntry,
}

impl MatchResult {
    /// 勝者判定（同点はplayer1の勝ち）
    pub fn decide(player1: ScoreEntry, player2: ScoreEntry) -> Self {
        let winner = if player1.score >= player2.score {
            player1.clone()
        } else {
            player2.clone()
        };
        Self {
            winner,
            player1,
            player2,
        }
    }
}

// 対戦セッション
#[derive(Debug, Clone)]
pub struct MatchSession {
    pub scores: [Option<ScoreEntry>; 2],
    pub result: Option<MatchResult>,
    pub session_id: u64, // リセットごとに単調増加
}

impl MatchSession {
    pub fn new(session_id: u64) -> Self {
        Self {
            scores: [None, None],
            result: None,
            session_id,
        }
    }

    pub fn is_both_submitted(&self) -> bool {
        self.scores.iter().all(|s| s.is_some())
    }
}

// POST /names リクエスト
#[derive(Debug, Deserialize)]
pub struct SetNamesRequest {
    pub player1: Option<String>,
    pub player2: Option<String>,
}

// POST /names レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct SetNamesResponse {
    pub success: bool,
    pub names: PlayerNames,
}

// POST /submit-score リクエスト
// playerIndex/score は型不正でもここでは弾かず、ハンドラ側で判定・補正する
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    #[serde(default)]
    pub player_index: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<serde_json::Value>,
}

// POST /submit-score レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreResponse {
    pub success: bool,
    /// 今回書き込んだスロット (0|1)
    pub received: usize,
    pub both_submitted: bool,
    pub result: Option<MatchResult>,
}

// GET /result レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub ready: bool,
    pub result: Option<MatchResult>,
    pub session_id: u64,
}

// POST /reset レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
}

// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// GET /health レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
