use std::collections::HashMap;

use super::parse::*;
use super::point::*;
use super::win::calc_tiles_to_normal_win;
use super::yaku::YakuContext;
use crate::error::{QuizError, QuizResult};
use crate::model::*;
use crate::validate::{validate_calculation_result, validate_hand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YakuHan {
    pub name: &'static str,
    pub han: usize,
}

// 和了形の中で最も高得点となる解釈の評価結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandScore {
    pub yakus: Vec<YakuHan>, // 役 (ドラ, 赤ドラは含まない)
    pub fu: usize,
    pub han: usize, // ドラ, 赤ドラを含む. 役満は一律13
    pub is_limit: bool,
    pub n_dora: usize,
    pub n_red: usize, // 赤5の枚数 (赤ドラ無しの場合も数える)
    pub wait: Wait,
}

impl HandScore {
    #[inline]
    pub fn has_yaku(&self) -> bool {
        !self.yakus.is_empty()
    }

    // 解釈の優劣の比較用 (役満, 基本点, 翻, 符)
    fn rank(&self) -> (bool, Point, usize, usize) {
        (
            self.is_limit,
            calc_base_point(self.fu, self.han),
            self.han,
            self.fu,
        )
    }
}

type ScoreKey = (usize, usize, bool, WinMethod); // (符, 翻, 親, 和了方法)

// 点数計算エンジン
// ルール設定は生成時に固定. 設定を変更する場合は新しいインスタンスを生成すること
#[derive(Debug)]
pub struct ScoringEngine {
    settings: RuleSettings,
    score_cache: HashMap<ScoreKey, Score>,
}

impl ScoringEngine {
    pub fn new(settings: RuleSettings) -> Self {
        Self {
            settings,
            score_cache: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    pub fn cache_size(&self) -> usize {
        self.score_cache.len()
    }

    pub fn evaluate(&self, hand: &Hand) -> QuizResult<HandScore> {
        self.evaluate_with(hand, &hand.win_condition())
    }

    // 手牌の和了条件をwcで置き換えて評価
    pub fn evaluate_with(&self, hand: &Hand, wc: &WinCondition) -> QuizResult<HandScore> {
        validate_hand(hand)?;

        let void_yaku = !self.settings.atozuke && hand.is_open() && !self.is_yaku_fixed(hand, wc);
        self.evaluate_best(hand, wc, void_yaku)
            .ok_or_else(|| QuizError::invalid_hand(format!("not a winning hand: {}", hand)))
    }

    // 符は20~110の範囲外の場合エラー
    // 么九牌の暗槓を複数含む手牌は役満でなくても110符を超えることがある
    pub fn calculate_fu(&self, hand: &Hand, wc: &WinCondition) -> QuizResult<usize> {
        let fu = self
            .evaluate_with(hand, wc)
            .map_err(|e| QuizError::calculation("failed to calculate fu", e))?
            .fu;
        validate_calculation_result(fu, 20, 110, "fu")
            .map_err(|e| QuizError::calculation("failed to calculate fu", e))?;
        Ok(fu)
    }

    pub fn calculate_han(&self, hand: &Hand, wc: &WinCondition) -> QuizResult<usize> {
        let han = self
            .evaluate_with(hand, wc)
            .map_err(|e| QuizError::calculation("failed to calculate han", e))?
            .han;
        validate_calculation_result(han, 0, 100, "han")
            .map_err(|e| QuizError::calculation("failed to calculate han", e))?;
        Ok(han)
    }

    pub fn calculate_score(
        &mut self,
        fu: usize,
        han: usize,
        is_dealer: bool,
        win_method: WinMethod,
    ) -> QuizResult<Score> {
        let key = (fu, han, is_dealer, win_method);
        if let Some(&score) = self.score_cache.get(&key) {
            return Ok(score);
        }

        let wrap = |e| QuizError::calculation("failed to calculate score", e);
        validate_calculation_result(fu, 20, 110, "fu").map_err(wrap)?;
        validate_calculation_result(han, 1, 100, "han").map_err(wrap)?;

        let points = calc_points(fu, han, is_dealer);
        let score = calc_score(&points, is_dealer, win_method);
        validate_calculation_result(score, 1000, 192000, "score").map_err(wrap)?;

        self.score_cache.insert(key, score);
        Ok(score)
    }

    // 和了形のすべての解釈から最も高得点となるものを返却
    // 和了形でない場合はNone
    fn evaluate_best(&self, hand: &Hand, wc: &WinCondition, void_yaku: bool) -> Option<HandScore> {
        let tt = hand.concealed_table();
        let mut phs = parse_into_normal_win(&tt);
        if hand.melds.is_empty() {
            phs.append(&mut parse_into_chiitoitsu_win(&tt));
            phs.append(&mut parse_into_kokusimusou_win(&tt));
        }

        let all_tiles = hand.all_tiles();
        let n_dora: usize = hand
            .doras
            .iter()
            .map(|d| {
                let d = d.to_normal();
                all_tiles.iter().filter(|t| t.to_normal() == d).count()
            })
            .sum();
        let n_red = all_tiles.iter().filter(|t| t.is_red5()).count();
        let n_bonus = n_dora + if self.settings.red_dora { n_red } else { 0 };

        let is_drawn = wc.is_drawn();
        let pm = parse_melds(&hand.melds);
        let mut best: Option<HandScore> = None;
        for ph in &phs {
            for (mut ph, wait) in parse_win_patterns(ph, hand.winning_tile, is_drawn) {
                ph.extend(pm.iter().copied());
                match ph.len() {
                    0 | 5 | 7 => {} // 国士, 通常, 七対子
                    _ => continue,  // 無効な和了形
                }

                let ctx = YakuContext::new(
                    tt,
                    ph,
                    wait,
                    wc.prevalent_wind,
                    wc.seat_wind,
                    is_drawn,
                    self.settings.kuitan,
                );
                let fu = ctx.calc_fu();
                let yakuman = ctx.calc_yakuman();
                let sc = if !yakuman.is_empty() {
                    HandScore {
                        yakus: yakuman
                            .iter()
                            .map(|y| YakuHan {
                                name: y.name,
                                han: 13,
                            })
                            .collect(),
                        fu,
                        han: 13,
                        is_limit: true,
                        n_dora,
                        n_red,
                        wait,
                    }
                } else {
                    let (yakus, fan) = if void_yaku {
                        (vec![], 0)
                    } else {
                        ctx.calc_yaku()
                    };
                    HandScore {
                        yakus: yakus
                            .iter()
                            .map(|y| YakuHan {
                                name: y.name,
                                han: y.fan(ctx.is_open()),
                            })
                            .collect(),
                        fu,
                        han: fan + n_bonus,
                        is_limit: false,
                        n_dora,
                        n_red,
                        wait,
                    }
                };

                if best.as_ref().map_or(true, |b| sc.rank() > b.rank()) {
                    best = Some(sc);
                }
            }
        }

        best
    }

    // 後付けなしの場合の役の確定判定
    // 聴牌時のすべての和了牌(5枚目となる牌は除く)で役が成立する場合にtrue
    fn is_yaku_fixed(&self, hand: &Hand, wc: &WinCondition) -> bool {
        let mut visible = hand.closed.clone();
        for m in &hand.melds {
            visible.extend(m.tiles.iter().copied());
        }
        let vt = tiles_to_tile_table(&visible);

        let waits = calc_tiles_to_normal_win(&tiles_to_tile_table(&hand.closed));
        for wt in waits {
            if vt[wt.0][wt.1] >= TILE {
                continue; // 5枚目
            }
            let mut h = hand.clone();
            h.winning_tile = wt;
            if let Some(sc) = self.evaluate_best(&h, wc, false) {
                if !sc.has_yaku() {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
fn make_hand(exp: &str, melds: &[&str], win_method: WinMethod) -> Hand {
    use crate::util::common::{meld_from_string, tiles_from_string};
    let mut closed = tiles_from_string(exp).unwrap();
    let winning_tile = closed.pop().unwrap();
    Hand {
        closed,
        melds: melds.iter().map(|m| meld_from_string(m).unwrap()).collect(),
        winning_tile,
        is_dealer: false,
        win_method,
        prevalent_wind: WE,
        seat_wind: WS,
        doras: vec![],
    }
}

#[test]
fn test_pinfu_tsumo() {
    let mut engine = ScoringEngine::new(RuleSettings::default());
    let hand = make_hand("m234567p234s25534", &[], WinMethod::Tsumo);
    let wc = hand.win_condition();
    assert_eq!(engine.calculate_fu(&hand, &wc).unwrap(), 20);
    assert_eq!(engine.calculate_han(&hand, &wc).unwrap(), 5);
    assert_eq!(engine.calculate_score(20, 5, false, WinMethod::Tsumo).unwrap(), 8000);

    let hs = engine.evaluate(&hand).unwrap();
    assert_eq!(hs.wait, Wait::Ryanmen);
    let names: Vec<_> = hs.yakus.iter().map(|y| y.name).collect();
    assert_eq!(names, vec!["門前清自摸和", "平和", "断么九", "三色同順"]);

    // ロンの場合は30符
    let mut wc = wc;
    wc.win_method = WinMethod::Ron;
    assert_eq!(engine.calculate_fu(&hand, &wc).unwrap(), 30);
    assert_eq!(engine.calculate_han(&hand, &wc).unwrap(), 4);
}

#[test]
fn test_chiitoitsu() {
    let mut engine = ScoringEngine::new(RuleSettings::default());
    let hand = make_hand("m1133p2266s4499z11", &[], WinMethod::Ron);
    let wc = hand.win_condition();
    assert_eq!(engine.calculate_fu(&hand, &wc).unwrap(), 25);
    assert_eq!(engine.calculate_han(&hand, &wc).unwrap(), 2);
    assert_eq!(engine.calculate_score(25, 2, false, WinMethod::Ron).unwrap(), 1600);
}

#[test]
fn test_red_and_dora() {
    let hand = make_hand("m234067p234s25534", &[], WinMethod::Tsumo);
    let wc = hand.win_condition();

    let on = ScoringEngine::new(RuleSettings::default());
    let off = ScoringEngine::new(RuleSettings {
        red_dora: false,
        ..RuleSettings::default()
    });
    let han_on = on.calculate_han(&hand, &wc).unwrap();
    let han_off = off.calculate_han(&hand, &wc).unwrap();
    assert_eq!(han_on, 6);
    assert_eq!(han_on - han_off, 1);

    // ドラは赤5も数える
    let mut hand = hand;
    hand.doras = vec![Tile(TM, 5), Tile(TZ, DR)];
    let hs = off.evaluate(&hand).unwrap();
    assert_eq!(hs.n_dora, 1);
    assert_eq!(hs.n_red, 1);
    assert_eq!(hs.han, 6);
}

#[test]
fn test_open_hand() {
    // 喰いタン, 喰い平和形は30符
    let hand = make_hand("m2355s456678m4", &["p234"], WinMethod::Ron);
    let wc = hand.win_condition();
    let engine = ScoringEngine::new(RuleSettings::default());
    assert_eq!(engine.calculate_fu(&hand, &wc).unwrap(), 30);
    assert_eq!(engine.calculate_han(&hand, &wc).unwrap(), 1);

    let no_kuitan = ScoringEngine::new(RuleSettings {
        kuitan: false,
        ..RuleSettings::default()
    });
    assert_eq!(no_kuitan.calculate_han(&hand, &wc).unwrap(), 0);
    assert!(!no_kuitan.evaluate(&hand).unwrap().has_yaku());

    // 後付けなし: 1m待ちでは役がないので無効
    let no_atozuke = ScoringEngine::new(RuleSettings {
        atozuke: false,
        ..RuleSettings::default()
    });
    assert_eq!(no_atozuke.calculate_han(&hand, &wc).unwrap(), 0);

    // 役牌のポンで役が確定している場合は有効
    let hand = make_hand("m2355s456m4", &["p234", "z777"], WinMethod::Ron);
    let wc = hand.win_condition();
    assert_eq!(no_atozuke.calculate_han(&hand, &wc).unwrap(), 1);
}

#[test]
fn test_limit_hand() {
    let hand = make_hand("m111999p1119s111p9", &[], WinMethod::Ron);
    let engine = ScoringEngine::new(RuleSettings::default());
    let hs = engine.evaluate(&hand).unwrap();
    assert!(hs.is_limit);
    assert_eq!(hs.han, 13);
    assert_eq!(hs.wait, Wait::Tanki);
}

#[test]
fn test_score_cache() {
    let mut engine = ScoringEngine::new(RuleSettings::default());
    assert_eq!(engine.calculate_score(30, 2, false, WinMethod::Tsumo).unwrap(), 2000);
    assert_eq!(engine.calculate_score(30, 4, true, WinMethod::Tsumo).unwrap(), 11700);
    assert_eq!(engine.calculate_score(30, 4, true, WinMethod::Tsumo).unwrap(), 11700);
    assert_eq!(engine.cache_size(), 2);
    for fu in [20, 40, 110] {
        assert_eq!(engine.calculate_score(fu, 5, false, WinMethod::Ron).unwrap(), 8000);
        assert_eq!(engine.calculate_score(fu, 5, true, WinMethod::Tsumo).unwrap(), 12000);
    }

    let e = engine.calculate_score(120, 1, false, WinMethod::Ron).unwrap_err();
    assert!(e.is_fatal());
    assert!(engine.calculate_score(30, 0, false, WinMethod::Ron).is_err());
}

#[test]
fn test_invalid_hand() {
    let engine = ScoringEngine::new(RuleSettings::default());
    let mut hand = make_hand("m234567p234s25534", &[], WinMethod::Tsumo);
    hand.closed.pop();
    let wc = hand.win_condition();
    let e = engine.calculate_fu(&hand, &wc).unwrap_err();
    assert_eq!(e.kind(), crate::error::ErrorKind::Calculation);

    // 和了形ではない
    let hand = make_hand("m134567p234s25534", &[], WinMethod::Tsumo);
    let e = engine.evaluate(&hand).unwrap_err();
    assert_eq!(e.kind(), crate::error::ErrorKind::InvalidHand);
}

#[test]
fn test_fu_over_limit() {
    // 20 + 暗槓(么九)32x3 + 自風の雀頭2 + 単騎2 = 120符
    let hand = make_hand("z22", &["m1111", "p9999", "z7777", "s123"], WinMethod::Ron);
    let engine = ScoringEngine::new(RuleSettings::default());
    let hs = engine.evaluate(&hand).unwrap();
    assert!(!hs.is_limit);
    assert_eq!(hs.fu, 120);

    let e = engine.calculate_fu(&hand, &hand.win_condition()).unwrap_err();
    assert!(e.is_fatal());
}
