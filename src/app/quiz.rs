use std::fmt::Write;

use rand::prelude::*;

use mahjong_quiz::generate::ProblemGenerator;
use mahjong_quiz::hand::{calc_points, format_score, get_score_title};
use mahjong_quiz::model::*;
use mahjong_quiz::session::QuizSession;
use mahjong_quiz::stats::ExtendedStatistics;
use mahjong_quiz::util::clock::SystemClock;
use mahjong_quiz::util::common::{tiles_to_string, wind_to_char};
use mahjong_quiz::util::misc::*;
use mahjong_quiz::validate::validate_selection;

use mahjong_quiz::error;

use super::load_rule_settings;

// 標準入出力で出題と回答を繰り返す
#[derive(Debug)]
pub struct QuizApp {
    args: Vec<String>,
}

impl QuizApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) {
        let mut seed = None;
        let mut difficulty = None;
        let mut settings_path = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => seed = Some(next_value::<u64>(&mut it, s)),
                "-l" => difficulty = Some(next_value::<Difficulty>(&mut it, s)),
                "-f" => settings_path = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    return;
                }
            }
        }

        let settings = load_rule_settings(&settings_path);
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let mut generator = ProblemGenerator::with_rng(settings, rng, Box::new(SystemClock));
        let mut session = QuizSession::new(Box::new(SystemClock));

        println!("enter 'q' to quit");
        loop {
            let problem = match generator.generate(difficulty) {
                Ok(p) => p,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            print_problem(&problem);

            let answer = match read_answer(&problem) {
                Some(a) => a,
                None => break,
            };
            let is_correct = session.check_answer(&problem, &answer);
            println!("{}", if is_correct { "correct!" } else { "wrong..." });
            print_explanation(&generator, &problem);
            print_statistics(&session.statistics());
            println!();
        }

        print_statistics(&session.statistics());
    }
}

fn print_problem(problem: &Problem) {
    let h = &problem.hand;
    println!("[{}] {}", problem.difficulty, problem.id);
    println!(
        "wind: {}{}, {}, {}",
        wind_to_char(h.prevalent_wind),
        wind_to_char(h.seat_wind),
        if h.is_dealer { "dealer" } else { "non-dealer" },
        h.win_method
    );
    if !h.doras.is_empty() {
        println!("dora: {}", tiles_to_string(&h.doras));
    }
    println!("hand: {}", h);
}

// 'q'またはEOFの場合はNone
fn read_answer(problem: &Problem) -> Option<Answer> {
    let fu = read_selection(&problem.fu_options, OptionKind::Fu)?;
    let han = read_selection(&problem.han_options, OptionKind::Han)?;
    let score = read_selection(&problem.score_options, OptionKind::Score)?;
    Some(Answer { fu, han, score })
}

fn read_selection(options: &[usize], kind: OptionKind) -> Option<usize> {
    loop {
        println!("{}: {}", kind.label(), vec_to_string(options));
        let s = prompt()?;
        if s == "q" {
            return None;
        }
        let v = match s.parse::<usize>() {
            Ok(v) => v,
            Err(e) => {
                error!("{}: '{}'", e, s);
                continue;
            }
        };
        match validate_selection(v, options, kind) {
            Ok(()) => return Some(v),
            Err(e) => error!("{}", e),
        }
    }
}

fn print_explanation<R: Rng>(generator: &ProblemGenerator<R>, problem: &Problem) {
    let h = &problem.hand;
    let points = calc_points(problem.correct_fu, problem.correct_han, h.is_dealer);
    println!(
        "answer: {}fu {}han {} ({}) {}",
        problem.correct_fu,
        problem.correct_han,
        problem.correct_score,
        format_score(&points, h.is_dealer, h.win_method),
        get_score_title(problem.correct_fu, problem.correct_han)
    );

    match generator.engine().evaluate(h) {
        Ok(hs) => {
            let mut yakus = "".to_string();
            for y in &hs.yakus {
                let _ = write!(yakus, "{}({}), ", y.name, y.han);
            }
            if hs.n_dora > 0 {
                let _ = write!(yakus, "ドラ({}), ", hs.n_dora);
            }
            if hs.n_red > 0 && generator.engine().settings().red_dora {
                let _ = write!(yakus, "赤ドラ({}), ", hs.n_red);
            }
            println!("yakus: {}wait: {:?}", yakus, hs.wait);
        }
        Err(e) => error!("{}", e),
    }
}

fn print_statistics(stats: &ExtendedStatistics) {
    let recent: String = stats
        .recent_ten
        .iter()
        .map(|&c| if c { 'o' } else { 'x' })
        .collect();
    println!(
        "total: {}, correct: {} ({:.1}%), streak: {} (best: {}), recent: {}, time: {}s",
        stats.total,
        stats.correct,
        stats.rate,
        stats.current_streak,
        stats.best_streak,
        recent,
        stats.total_study_time
    );
    for d in Difficulty::ALL {
        let s = stats.by_difficulty(d);
        if s.total > 0 {
            println!("  {}: {}/{} ({:.1}%)", d, s.correct, s.total, s.rate);
        }
    }
}
