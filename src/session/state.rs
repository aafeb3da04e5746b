use crate::models::{MatchResult, MatchSession, PlayerNames, ScoreEntry};
use chrono::Utc;

/// セッション状態機械
///
/// Idle（スコアなし）→ OneSubmitted（片方のみ）→ Resolved（両方揃って結果確定）
/// → リセット（手動 or 自動）で Idle に戻る。
pub struct SessionState {
    pub names: PlayerNames,
    pub session: MatchSession,
}

/// スコア書き込みの結果
pub struct SubmitOutcome {
    pub both_submitted: bool,
    pub result: Option<MatchResult>,
    /// この書き込みで結果が確定したか（確定時のみ永続化＋タイマー起動）
    pub just_resolved: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            names: PlayerNames::empty(),
            session: MatchSession::new(1),
        }
    }

    /// 名前を丸ごと差し替え（前後の空白は除去、欠損は空文字扱い）
    pub fn set_names(&mut self, player1: Option<String>, player2: Option<String>) -> PlayerNames {
        self.names = PlayerNames {
            player1: player1.unwrap_or_default().trim().to_string(),
            player2: player2.unwrap_or_default().trim().to_string(),
            updated_at: Utc::now().timestamp_millis(),
        };
        self.names.clone()
    }

    /// スロットへスコアを書き込み、両方揃った遷移時に1度だけ結果を確定する
    ///
    /// 確定済みセッションへの再送信はスロットを上書きするだけで、
    /// 結果の再計算もタイマーの再起動も行わない。
    pub fn submit_score(&mut self, slot: usize, entry: ScoreEntry) -> SubmitOutcome {
        self.session.scores[slot] = Some(entry);

        let mut just_resolved = false;
        if self.session.result.is_none() {
            if let [Some(player1), Some(player2)] = &self.session.scores {
                self.session.result = Some(MatchResult::decide(player1.clone(), player2.clone()));
                just_resolved = true;
            }
        }

        SubmitOutcome {
            both_submitted: self.session.is_both_submitted(),
            result: self.session.result.clone(),
            just_resolved,
        }
    }

    /// 名前とセッションを初期状態に戻し、新しいセッションIDを発番する
    pub fn reset(&mut self) {
        self.names = PlayerNames::empty();
        self.session = MatchSession::new(self.session.session_id + 1);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
