// 回答の正誤判定と履歴の管理
use crate::model::*;
use crate::stats::{calculate_extended_statistics, ExtendedStatistics};
use crate::util::clock::{Clock, SystemClock};

pub struct QuizSession {
    history: Vec<AnswerHistory>,
    clock: Box<dyn Clock>,
}

impl QuizSession {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            history: vec![],
            clock,
        }
    }

    // 符, 翻, 点数のすべてが一致した場合のみ正解
    pub fn check_answer(&mut self, problem: &Problem, answer: &Answer) -> bool {
        let is_correct = problem.is_correct(answer);
        self.history.push(AnswerHistory {
            is_correct,
            difficulty: problem.difficulty,
            timestamp: self.clock.now_millis(),
            problem_id: problem.id.clone(),
        });
        is_correct
    }

    pub fn history(&self) -> &[AnswerHistory] {
        &self.history
    }

    pub fn statistics(&self) -> ExtendedStatistics {
        calculate_extended_statistics(&self.history)
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

#[cfg(test)]
fn sample_problem(difficulty: Difficulty) -> Problem {
    use crate::util::common::tiles_from_string;
    let mut closed = tiles_from_string("m234567p234s25534").unwrap();
    let winning_tile = closed.pop().unwrap();
    Problem {
        id: "problem-0-000000000".to_string(),
        hand: Hand {
            closed,
            melds: vec![],
            winning_tile,
            is_dealer: false,
            win_method: WinMethod::Tsumo,
            prevalent_wind: WE,
            seat_wind: WS,
            doras: vec![],
        },
        correct_fu: 20,
        correct_han: 5,
        correct_score: 8000,
        fu_options: vec![20, 25, 30, 40],
        han_options: vec![3, 4, 5, 6],
        score_options: vec![6400, 7700, 8000, 9600],
        difficulty,
    }
}

#[test]
fn test_check_answer() {
    use crate::util::clock::StepClock;

    let mut session = QuizSession::new(Box::new(StepClock::new(5000, 2000)));
    let p = sample_problem(Difficulty::Medium);

    let ok = Answer {
        fu: 20,
        han: 5,
        score: 8000,
    };
    assert!(session.check_answer(&p, &ok));
    // 符だけ違う場合も不正解
    assert!(!session.check_answer(&p, &Answer { fu: 30, ..ok }));
    assert!(session.check_answer(&sample_problem(Difficulty::Hard), &ok));

    let h = session.history();
    assert_eq!(h.len(), 3);
    assert_eq!(h[0].timestamp, 5000);
    assert_eq!(h[2].timestamp, 9000);
    assert_eq!(h[2].difficulty, Difficulty::Hard);
    assert_eq!(h[1].problem_id, p.id);

    let s = session.statistics();
    assert_eq!(s.correct, 2);
    assert_eq!(s.current_streak, 1);
    assert_eq!(s.total_study_time, 4);

    session.reset();
    assert!(session.history().is_empty());
    assert_eq!(session.statistics().total, 0);
}
