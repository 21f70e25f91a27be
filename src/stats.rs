// 回答履歴の集計
use serde::{Deserialize, Serialize};

use crate::model::*;

const RECENT_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub total: usize,
    pub correct: usize,
    pub rate: f64, // 正答率 (%)
}

impl DifficultyStats {
    fn new(total: usize, correct: usize) -> Self {
        Self {
            total,
            correct,
            rate: calc_rate(correct, total),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedStatistics {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub rate: f64, // 正答率 (%)
    pub easy: DifficultyStats,
    pub medium: DifficultyStats,
    pub hard: DifficultyStats,
    pub recent_ten: Vec<bool>, // 直近10問の正誤 (古い順)
    pub current_streak: usize,
    pub best_streak: usize,
    pub total_study_time: u64, // 最初の回答から最後の回答までの秒数
}

impl ExtendedStatistics {
    pub fn by_difficulty(&self, difficulty: Difficulty) -> &DifficultyStats {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

fn calc_rate(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 * 100.0 / total as f64
    }
}

fn calc_difficulty_stats(history: &[AnswerHistory], difficulty: Difficulty) -> DifficultyStats {
    let mut total = 0;
    let mut correct = 0;
    for h in history.iter().filter(|h| h.difficulty == difficulty) {
        total += 1;
        if h.is_correct {
            correct += 1;
        }
    }
    DifficultyStats::new(total, correct)
}

// 履歴全体から毎回再計算する
pub fn calculate_extended_statistics(history: &[AnswerHistory]) -> ExtendedStatistics {
    let total = history.len();
    let correct = history.iter().filter(|h| h.is_correct).count();

    let recent_ten = history[total.saturating_sub(RECENT_SIZE)..]
        .iter()
        .map(|h| h.is_correct)
        .collect();

    let current_streak = history.iter().rev().take_while(|h| h.is_correct).count();

    let mut best_streak = 0;
    let mut run = 0;
    for h in history {
        if h.is_correct {
            run += 1;
            best_streak = best_streak.max(run);
        } else {
            run = 0;
        }
    }

    let total_study_time = match (history.first(), history.last()) {
        (Some(first), Some(last)) if total > 1 => {
            last.timestamp.saturating_sub(first.timestamp) / 1000
        }
        _ => 0,
    };

    ExtendedStatistics {
        total,
        correct,
        incorrect: total - correct,
        rate: calc_rate(correct, total),
        easy: calc_difficulty_stats(history, Difficulty::Easy),
        medium: calc_difficulty_stats(history, Difficulty::Medium),
        hard: calc_difficulty_stats(history, Difficulty::Hard),
        recent_ten,
        current_streak,
        best_streak,
        total_study_time,
    }
}

#[cfg(test)]
fn make_history(results: &[(bool, Difficulty)]) -> Vec<AnswerHistory> {
    results
        .iter()
        .enumerate()
        .map(|(i, &(is_correct, difficulty))| AnswerHistory {
            is_correct,
            difficulty,
            timestamp: 10_000 + i as u64 * 1500,
            problem_id: format!("problem-{}", i),
        })
        .collect()
}

#[test]
fn test_streak() {
    use Difficulty::*;
    let history = make_history(&[
        (true, Easy),
        (true, Easy),
        (false, Medium),
        (true, Medium),
        (true, Hard),
        (true, Easy),
    ]);
    let s = calculate_extended_statistics(&history);
    assert_eq!(s.total, 6);
    assert_eq!(s.correct, 5);
    assert_eq!(s.incorrect, 1);
    assert_eq!(s.current_streak, 3);
    assert_eq!(s.best_streak, 3);
    assert_eq!(s.recent_ten, vec![true, true, false, true, true, true]);
    assert_eq!(s.easy.total, 3);
    assert_eq!(s.medium, DifficultyStats::new(2, 1));
    assert_eq!(s.by_difficulty(Medium).rate, 50.0);
    assert_eq!(s.hard.rate, 100.0);
    // 7500ms
    assert_eq!(s.total_study_time, 7);
}

#[test]
fn test_empty_history() {
    let s = calculate_extended_statistics(&[]);
    assert_eq!(s, ExtendedStatistics::default());
    assert!(s.recent_ten.is_empty());
    assert_eq!(s.rate, 0.0);

    let s = calculate_extended_statistics(&make_history(&[(false, Difficulty::Hard)]));
    assert_eq!(s.total_study_time, 0);
    assert_eq!(s.current_streak, 0);
    assert_eq!(s.best_streak, 0);
}

#[test]
fn test_recent_ten() {
    let mut results = vec![(false, Difficulty::Easy); 5];
    results.extend(vec![(true, Difficulty::Easy); 8]);
    let s = calculate_extended_statistics(&make_history(&results));
    assert_eq!(s.recent_ten.len(), 10);
    assert_eq!(&s.recent_ten[..2], &[false, false]);
    assert!(s.recent_ten[2..].iter().all(|&c| c));
    assert_eq!(s.best_streak, 8);
    assert_eq!(s.current_streak, 8);
}
