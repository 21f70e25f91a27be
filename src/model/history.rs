use super::*;

// 回答履歴 (追記のみ, セッションのリセット時以外に削除しない)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerHistory {
    pub is_correct: bool,
    pub difficulty: Difficulty,
    pub timestamp: u64, // ms
    pub problem_id: String,
}
