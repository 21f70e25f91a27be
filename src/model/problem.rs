use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    // 難易度ごとの目標翻数 (下限, 上限)
    pub fn han_range(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (1, 3),
            Difficulty::Medium => (4, 6),
            Difficulty::Hard => (7, 13),
        }
    }

    pub fn contains(self, han: usize) -> bool {
        let (lo, hi) = self.han_range();
        lo <= han && han <= hi
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("unknown difficulty: {}", s)),
        }
    }
}

// 選択肢の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Fu,
    Han,
    Score,
}

impl OptionKind {
    pub fn label(self) -> &'static str {
        match self {
            OptionKind::Fu => "fu",
            OptionKind::Han => "han",
            OptionKind::Score => "score",
        }
    }
}

// 出題
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub hand: Hand,
    pub correct_fu: usize,
    pub correct_han: usize,
    pub correct_score: Score,
    pub fu_options: Vec<usize>,    // 昇順, 重複なし
    pub han_options: Vec<usize>,   // 同上
    pub score_options: Vec<Score>, // 同上
    pub difficulty: Difficulty,
}

// ユーザーの回答
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub fu: usize,
    pub han: usize,
    pub score: Score,
}

impl Problem {
    pub fn is_correct(&self, answer: &Answer) -> bool {
        answer.fu == self.correct_fu
            && answer.han == self.correct_han
            && answer.score == self.correct_score
    }
}
