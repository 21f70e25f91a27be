use rand::prelude::*;

use mahjong_quiz::generate::ProblemGenerator;
use mahjong_quiz::model::*;
use mahjong_quiz::util::clock::SystemClock;
use mahjong_quiz::util::misc::*;

use mahjong_quiz::error;

use super::load_rule_settings;

// 生成した問題をJSON形式で1行ずつ出力
#[derive(Debug)]
pub struct GeneratorApp {
    args: Vec<String>,
}

impl GeneratorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn run(&mut self) {
        let mut n_problem: usize = 1;
        let mut seed = None;
        let mut difficulty = None;
        let mut settings_path = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-n" => n_problem = next_value(&mut it, s),
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

        for _ in 0..n_problem {
            if let Err(e) = Self::print_problem(&mut generator, difficulty) {
                error!("{}", e);
                return;
            }
        }
    }

    fn print_problem(generator: &mut ProblemGenerator, difficulty: Option<Difficulty>) -> Res {
        let problem = generator.generate(difficulty)?;
        println!("{}", serde_json::to_string(&problem)?);
        Ok(())
    }
}
