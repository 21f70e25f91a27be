use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufRead};

use mahjong_quiz::hand::{calc_points, calc_score, format_score, get_score_title, ScoringEngine};
use mahjong_quiz::model::*;
use mahjong_quiz::util::common::*;
use mahjong_quiz::util::misc::*;

use mahjong_quiz::error;

use super::load_rule_settings;

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
    settings: RuleSettings,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
            settings: RuleSettings::default(),
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut settings_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => self.detail = true,
                "-f" => file_path = next_value(&mut it, s),
                "-r" => settings_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if (file_path.is_empty() && exp.is_empty()) || (!file_path.is_empty() && !exp.is_empty()) {
            print_usage();
            return;
        }
        self.settings = load_rule_settings(&settings_path);

        if !exp.is_empty() {
            if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            return;
        }

        if let Err(e) = self.run_from_file(&file_path) {
            error!("{}", e);
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res {
        let mut calculator = Calculator::new(self.detail, self.settings);
        calculator.parse(exp)?;
        calculator.run();
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

#[derive(Debug)]
struct Calculator {
    detail: bool,
    engine: ScoringEngine,
    hand: Hand,
    // score verify
    verify: bool,
    fu: usize,
    han: usize,
    score: Score,
}

impl Calculator {
    fn new(detail: bool, settings: RuleSettings) -> Self {
        Self {
            detail,
            engine: ScoringEngine::new(settings),
            hand: Hand {
                closed: vec![],
                melds: vec![],
                winning_tile: Z8,
                is_dealer: true,
                win_method: WinMethod::Tsumo,
                prevalent_wind: WE,
                seat_wind: WE,
                doras: vec![],
            },
            verify: false,
            fu: 0,
            han: 0,
            score: 0,
        }
    }

    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').collect::<Vec<&str>>()[0]; // コメント削除
        let exps: Vec<&str> = input.split('/').collect();
        let len = exps.len();
        if len > 0 {
            self.parse_hand_meld(exps[0])?;
        }
        if len > 1 {
            self.parse_stage_info(exps[1])?;
        }
        if len > 2 {
            self.parse_score_verify(exps[2])?;
        }

        if self.detail {
            println!("{:?}", self.hand);
        }

        Ok(())
    }

    fn run(&self) -> Verify {
        let hs = match self.engine.evaluate(&self.hand) {
            Ok(hs) if hs.has_yaku() => hs,
            Ok(_) => {
                println!("no yaku");
                return self.verify_no_win();
            }
            Err(e) => {
                println!("{}", e);
                return self.verify_no_win();
            }
        };
        if self.detail {
            println!("{:?}", hs);
        }

        let mut yakus = "".to_string();
        for y in &hs.yakus {
            let _ = write!(yakus, "{}({}), ", y.name, y.han);
        }
        if hs.n_dora > 0 {
            let _ = write!(yakus, "ドラ({}), ", hs.n_dora);
        }
        if hs.n_red > 0 && self.engine.settings().red_dora {
            let _ = write!(yakus, "赤ドラ({}), ", hs.n_red);
        }
        println!("yakus: {}", yakus);

        let h = &self.hand;
        let points = calc_points(hs.fu, hs.han, h.is_dealer);
        let score = calc_score(&points, h.is_dealer, h.win_method);
        println!(
            "fu: {}, han: {}, wait: {:?}, score: {} ({}) {}",
            hs.fu,
            hs.han,
            hs.wait,
            score,
            format_score(&points, h.is_dealer, h.win_method),
            get_score_title(hs.fu, hs.han)
        );

        let verify = if self.verify {
            if hs.is_limit {
                // 役満以上は得点のみをチェック
                if score == self.score {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            } else {
                if hs.fu == self.fu && hs.han == self.han && score == self.score {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            }
        } else {
            Verify::Skip
        };
        println!("verify: {:?}", verify);
        verify
    }

    fn verify_no_win(&self) -> Verify {
        let verify = if self.verify {
            if self.score == 0 {
                Verify::Ok
            } else {
                Verify::Error
            }
        } else {
            Verify::Skip
        };
        println!("verify: {:?}", verify);
        verify
    }

    // 例: "ES,m5z7" => 東場南家, ドラ5m,中
    fn parse_stage_info(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        let len = exps.len();
        if len > 0 {
            let chars: Vec<char> = exps[0].chars().collect();
            if chars.len() != 2 {
                Err(format!("stage info len is not 2: {}", exps[0]))?;
            }
            let prevalent_wind = wind_from_char(chars[0])?;
            let seat_wind = wind_from_char(chars[1])?;

            self.hand.prevalent_wind = prevalent_wind;
            self.hand.seat_wind = seat_wind;
            self.hand.is_dealer = seat_wind == WE;
        }
        if len > 1 {
            self.hand.doras = tiles_from_string(exps[1])?;
        }
        Ok(())
    }

    // 手牌の最後の牌を和了牌とする. 末尾の'+'はロン
    fn parse_hand_meld(&mut self, input: &str) -> Res {
        let mut exp_hand = "".to_string();
        let mut exp_melds = vec![];
        for exp in input.split(',') {
            if exp_hand.is_empty() {
                if exp.ends_with('+') {
                    self.hand.win_method = WinMethod::Ron;
                }
                exp_hand = exp.replace('+', "");
            } else {
                exp_melds.push(exp.to_string());
            }
        }

        let mut tiles = tiles_from_string(&exp_hand)?;
        self.hand.winning_tile = tiles.pop().ok_or("empty hand")?;
        self.hand.closed = tiles;

        for exp_meld in &exp_melds {
            self.hand.melds.push(meld_from_string(exp_meld)?);
        }

        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 3 {
            Err(format!("invalid score verify info: {}", input))?;
        }
        self.fu = exps[0].parse::<usize>()?;
        self.han = exps[1].parse::<usize>()?;
        self.score = exps[2].parse::<Score>()?;
        self.verify = true;
        Ok(())
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run C EXPRESSION [-d] [-r SETTINGS]
    $ cargo run C -f FILE [-d] [-r SETTINGS]
Expression
    HAND[+][,MELD...]/WINDS[,DORAS]/FU,HAN,SCORE
    e.g. m234567p234s2553+/ES,p2/30,3,3900
Options
    -d: print debug info
    -f: read expresisons from file instead of a commandline expression
    -r: rule settings (json)
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.replace(' ', "");
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let mut calculator = Calculator::new(false, RuleSettings::default());
            calculator.parse(&e).unwrap();
            assert_ne!(Verify::Error, calculator.run(), "{}", exp);
        }
    }
}
