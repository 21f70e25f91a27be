// 点数計算問題の生成
mod option;
mod pattern;

use rand::prelude::*;

use crate::error::{QuizError, QuizResult};
use crate::hand::ScoringEngine;
use crate::model::*;
use crate::util::clock::{Clock, SystemClock};
use crate::validate::{validate_hand, validate_problem};
use crate::{debug, warn};

pub use option::{generate_options, FU_LADDER, MIN_OPTIONS};
pub use pattern::HandPattern;

const MAX_GENERATION_RETRIES: usize = 3;
const MAX_DORA_TILES: usize = 5;
const RED5_RATE: f64 = 0.3;
const ID_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

pub struct ProblemGenerator<R = StdRng> {
    engine: ScoringEngine,
    rng: R,
    clock: Box<dyn Clock>,
}

impl ProblemGenerator<StdRng> {
    pub fn new(settings: RuleSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy(), Box::new(SystemClock))
    }
}

impl<R: Rng> ProblemGenerator<R> {
    pub fn with_rng(settings: RuleSettings, rng: R, clock: Box<dyn Clock>) -> Self {
        Self {
            engine: ScoringEngine::new(settings),
            rng,
            clock,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    // 難易度を指定しない場合はランダムに選択
    // 計算エラーは即座に返却し,それ以外の失敗は上限回数まで再試行する
    pub fn generate(&mut self, difficulty: Option<Difficulty>) -> QuizResult<Problem> {
        let difficulty = difficulty.unwrap_or_else(|| self.select_difficulty());

        let mut last = None;
        for i in 0..MAX_GENERATION_RETRIES {
            match self.try_generate(difficulty) {
                Ok(p) => return Ok(p),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(
                        "generation attempt {}/{} failed: {}",
                        i + 1,
                        MAX_GENERATION_RETRIES,
                        e
                    );
                    last = Some(e);
                }
            }
        }

        Err(QuizError::Generation {
            message: format!(
                "failed to generate {} problem in {} attempts",
                difficulty, MAX_GENERATION_RETRIES
            ),
            source: last.map(Box::new),
        })
    }

    pub fn generate_options(&mut self, correct: usize, kind: OptionKind) -> Vec<usize> {
        generate_options(&mut self.rng, correct, kind)
    }

    fn try_generate(&mut self, difficulty: Difficulty) -> QuizResult<Problem> {
        let mut hand = self.draw_hand()?;
        let hs = self.engine.evaluate(&hand)?;
        if !hs.has_yaku() {
            return Err(QuizError::invalid_hand(format!("no yaku: {}", hand)));
        }
        self.adjust_dora(&mut hand, difficulty)?;

        let wc = hand.win_condition();
        let fu = self.engine.calculate_fu(&hand, &wc)?;
        let han = self.engine.calculate_han(&hand, &wc)?;
        let score = self
            .engine
            .calculate_score(fu, han, hand.is_dealer, hand.win_method)?;

        let problem = Problem {
            id: self.generate_id(),
            fu_options: self.generate_options(fu, OptionKind::Fu),
            han_options: self.generate_options(han, OptionKind::Han),
            score_options: self.generate_options(score, OptionKind::Score),
            hand,
            correct_fu: fu,
            correct_han: han,
            correct_score: score,
            difficulty,
        };
        validate_problem(&problem)?;
        debug!("{} {} fu:{} han:{} score:{}", problem.id, problem.hand, fu, han, score);

        Ok(problem)
    }

    fn draw_hand(&mut self) -> QuizResult<Hand> {
        let pattern = HandPattern::ALL[self.rng.gen_range(0..HandPattern::ALL.len())];
        let (mut tiles, melds) = pattern
            .build(&mut self.rng)
            .ok_or_else(|| QuizError::invalid_hand(format!("failed to build {} hand", pattern)))?;
        self.apply_red5(&mut tiles);

        let winning_tile = tiles.swap_remove(self.rng.gen_range(0..tiles.len()));
        let seat_wind = self.rng.gen_range(WE..=WN);
        let prevalent_wind = if self.rng.gen_bool(0.5) { WE } else { WS };
        let win_method = if self.rng.gen_bool(0.5) {
            WinMethod::Tsumo
        } else {
            WinMethod::Ron
        };

        let hand = Hand {
            closed: sort_tiles(&tiles),
            melds,
            winning_tile,
            is_dealer: seat_wind == WE,
            win_method,
            prevalent_wind,
            seat_wind,
            doras: vec![],
        };
        validate_hand(&hand)?;
        Ok(hand)
    }

    // 各色最大1枚, 手牌の5を赤5に置き換え (鳴きは対象外)
    fn apply_red5(&mut self, tiles: &mut [Tile]) {
        for ti in [TM, TP, TS] {
            if !self.rng.gen_bool(RED5_RATE) {
                continue;
            }
            if let Some(t) = tiles.iter_mut().find(|t| **t == Tile(ti, 5)) {
                *t = Tile(ti, 0);
            }
        }
    }

    // 翻数が難易度の範囲の中央値に満たない場合は手牌に含まれる牌をドラに追加
    // 中央値を超える牌は選択しない
    fn adjust_dora(&mut self, hand: &mut Hand, difficulty: Difficulty) -> QuizResult<()> {
        let (lo, hi) = difficulty.han_range();
        let target = (lo + hi) / 2;
        let wc = hand.win_condition();
        let mut han = self.engine.calculate_han(hand, &wc)?;
        let mut rejected = vec![]; // 追加しても中央値に近づかなかった牌

        while han < target && hand.doras.len() < MAX_DORA_TILES {
            let diff = target - han;
            let tt = tiles_to_tile_table(&hand.all_tiles());
            let mut candidates = vec![];
            for ti in 0..TYPE {
                for ni in 1..TNUM {
                    let n = tt[ti][ni];
                    let t = Tile(ti, ni);
                    if n > 0 && n <= diff && !hand.doras.contains(&t) && !rejected.contains(&t) {
                        candidates.push(t);
                    }
                }
            }
            let d = match candidates.choose(&mut self.rng) {
                Some(&d) => d,
                None => break,
            };

            hand.doras.push(d);
            let h = self.engine.calculate_han(hand, &wc)?;
            if h <= han || h > target {
                hand.doras.pop();
                rejected.push(d);
                continue;
            }
            han = h;
        }

        if !difficulty.contains(han) {
            warn!(
                "han {} is out of {} range ({}..={}): {}",
                han, difficulty, lo, hi, hand
            );
        }
        Ok(())
    }

    fn select_difficulty(&mut self) -> Difficulty {
        match self.rng.gen_range(0..100) {
            0..=39 => Difficulty::Easy,
            40..=74 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    fn generate_id(&mut self) -> String {
        let suffix: String = (0..ID_LEN)
            .map(|_| ID_CHARS[self.rng.gen_range(0..ID_CHARS.len())] as char)
            .collect();
        format!("problem-{}-{}", self.clock.now_millis(), suffix)
    }
}

#[cfg(test)]
fn seeded_generator(seed: u64, settings: RuleSettings) -> ProblemGenerator {
    use crate::util::clock::StepClock;
    ProblemGenerator::with_rng(
        settings,
        SeedableRng::seed_from_u64(seed),
        Box::new(StepClock::new(1_700_000_000_000, 1000)),
    )
}

#[test]
fn test_generate() {
    let mut g = seeded_generator(1, RuleSettings::default());
    let mut checker = ScoringEngine::new(RuleSettings::default());
    for d in Difficulty::ALL {
        for _ in 0..30 {
            let p = g.generate(Some(d)).unwrap();
            assert_eq!(p.difficulty, d);
            assert!(validate_problem(&p).is_ok());
            assert!(p.hand.doras.len() <= MAX_DORA_TILES);

            // ドラを追加した場合は中央値を超えない
            let (lo, hi) = d.han_range();
            if !p.hand.doras.is_empty() {
                assert!(p.correct_han <= (lo + hi) / 2, "{:?}", p);
            }

            let wc = p.hand.win_condition();
            assert_eq!(checker.calculate_fu(&p.hand, &wc).unwrap(), p.correct_fu);
            assert_eq!(checker.calculate_han(&p.hand, &wc).unwrap(), p.correct_han);
            let score = checker
                .calculate_score(p.correct_fu, p.correct_han, p.hand.is_dealer, p.hand.win_method)
                .unwrap();
            assert_eq!(score, p.correct_score);
            assert_eq!(p.hand.is_dealer, p.hand.seat_wind == WE);

            let parts: Vec<&str> = p.id.split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "problem");
            assert!(parts[1].parse::<u64>().is_ok());
            assert_eq!(parts[2].len(), ID_LEN);
            assert!(parts[2].bytes().all(|c| ID_CHARS.contains(&c)));
        }
    }
}

#[test]
fn test_adjust_dora() {
    let mut g = seeded_generator(11, RuleSettings::default());
    let mut checker = ScoringEngine::new(RuleSettings::default());
    let mut n_nudged = 0;
    for d in [Difficulty::Medium, Difficulty::Hard] {
        let (lo, hi) = d.han_range();
        let target = (lo + hi) / 2;
        for _ in 0..200 {
            let p = g.generate(Some(d)).unwrap();
            if p.hand.doras.is_empty() {
                continue;
            }
            n_nudged += 1;
            assert!(p.correct_han <= target, "{:?}", p);
            if p.correct_han == target || p.hand.doras.len() == MAX_DORA_TILES {
                continue;
            }

            // 中央値に届かない場合は残りの差に収まる牌が存在しない
            let gap = target - p.correct_han;
            let tt = tiles_to_tile_table(&p.hand.all_tiles());
            for ti in 0..TYPE {
                for ni in 1..TNUM {
                    let t = Tile(ti, ni);
                    if tt[ti][ni] == 0 || tt[ti][ni] > gap || p.hand.doras.contains(&t) {
                        continue;
                    }
                    let mut h = p.hand.clone();
                    h.doras.push(t);
                    let han = checker.calculate_han(&h, &h.win_condition()).unwrap();
                    assert!(han <= p.correct_han || han > target, "{:?} {}", p, t);
                }
            }
        }
    }
    assert!(n_nudged > 0);
}

#[test]
fn test_generate_deterministic() {
    let mut g1 = seeded_generator(42, RuleSettings::default());
    let mut g2 = seeded_generator(42, RuleSettings::default());
    for _ in 0..10 {
        assert_eq!(g1.generate(None).unwrap(), g2.generate(None).unwrap());
    }
}

#[test]
fn test_generate_red5() {
    // 赤ドラ無しでも赤5の牌は生成される
    let settings = RuleSettings {
        red_dora: false,
        ..RuleSettings::default()
    };
    let mut g = seeded_generator(3, settings);
    let mut n_red = 0;
    for _ in 0..50 {
        let p = g.generate(None).unwrap();
        let tt = tiles_to_tile_table(&p.hand.all_tiles());
        for ti in [TM, TP, TS] {
            assert!(tt[ti][0] <= 1);
            n_red += tt[ti][0];
        }
    }
    assert!(n_red > 0);
}

#[test]
fn test_select_difficulty() {
    let mut g = seeded_generator(5, RuleSettings::default());
    let mut counts = [0; 3];
    for _ in 0..1000 {
        match g.select_difficulty() {
            Difficulty::Easy => counts[0] += 1,
            Difficulty::Medium => counts[1] += 1,
            Difficulty::Hard => counts[2] += 1,
        }
    }
    assert!(counts.iter().all(|&c| c > 150));
    assert!(counts[0] > counts[2]);
}
