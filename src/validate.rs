// 手牌・問題・計算結果の妥当性検証
use std::fmt;

use crate::error::{QuizError, QuizResult};
use crate::model::*;

pub fn validate_tile(tile: &Tile) -> QuizResult<()> {
    let Tile(ti, ni) = *tile;
    if ti >= TYPE {
        return Err(QuizError::invalid_hand(format!(
            "invalid tile type: {}",
            ti
        )));
    }
    if ti == TZ {
        if !(WE..=DR).contains(&ni) {
            return Err(QuizError::invalid_hand(format!(
                "invalid honor tile: z{}",
                ni
            )));
        }
    } else if ni >= TNUM {
        return Err(QuizError::invalid_hand(format!(
            "invalid suit tile number: {}",
            tile
        )));
    }
    Ok(())
}

fn validate_meld(meld: &Meld) -> QuizResult<()> {
    let n = meld.meld_type.tile_count();
    if meld.tiles.len() != n {
        return Err(QuizError::invalid_hand(format!(
            "{:?} must have {} tiles: {}",
            meld.meld_type, n, meld
        )));
    }
    for t in &meld.tiles {
        validate_tile(t)?;
    }

    let mut ts: Vec<Tile> = meld.tiles.iter().map(|t| t.to_normal()).collect();
    ts.sort();
    let ok = match meld.meld_type {
        MeldType::Chi => {
            ts[0].is_suit()
                && ts[0].0 == ts[2].0
                && ts[0].0 == ts[1].0
                && ts[1].1 == ts[0].1 + 1
                && ts[2].1 == ts[0].1 + 2
        }
        _ => ts.iter().all(|t| *t == ts[0]),
    };
    if !ok {
        return Err(QuizError::invalid_hand(format!("malformed meld: {}", meld)));
    }
    Ok(())
}

fn validate_wind(wind: Tnum, label: &str) -> QuizResult<()> {
    if !(WE..=WN).contains(&wind) {
        return Err(QuizError::invalid_hand(format!(
            "invalid {}: {}",
            label, wind
        )));
    }
    Ok(())
}

pub fn validate_hand(hand: &Hand) -> QuizResult<()> {
    // 槓子を3枚と数えて 13枚 + 和了牌1枚 = 14枚
    let total = hand.logical_tile_count();
    if total != HAND_SIZE {
        return Err(QuizError::invalid_hand(format!(
            "wrong tile count: {} (expected {})",
            total, HAND_SIZE
        )));
    }

    if hand.winning_tile == Z8 {
        return Err(QuizError::invalid_hand("winning tile is missing"));
    }
    validate_tile(&hand.winning_tile)?;
    for t in &hand.closed {
        validate_tile(t)?;
    }
    for m in &hand.melds {
        validate_meld(m)?;
    }
    for d in &hand.doras {
        validate_tile(d)?;
    }
    validate_wind(hand.prevalent_wind, "prevalent wind")?;
    validate_wind(hand.seat_wind, "seat wind")?;

    // 同種の牌は4枚まで
    let tt = tiles_to_tile_table(&hand.all_tiles());
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if tt[ti][ni] > TILE {
                return Err(QuizError::invalid_hand(format!(
                    "more than {} copies of {}",
                    TILE,
                    Tile(ti, ni)
                )));
            }
        }
        if ti != TZ && tt[ti][0] > 1 {
            return Err(QuizError::invalid_hand(format!(
                "more than one red five in type {}",
                ti
            )));
        }
    }

    Ok(())
}

fn validate_options<T: PartialOrd + PartialEq + fmt::Display>(
    options: &[T],
    correct: &T,
    label: &str,
) -> QuizResult<()> {
    if options.len() < 4 {
        return Err(QuizError::invalid_hand(format!(
            "{} options must have at least 4 values: {}",
            label,
            options.len()
        )));
    }
    if !options.windows(2).all(|w| w[0] < w[1]) {
        return Err(QuizError::invalid_hand(format!(
            "{} options must be sorted and distinct",
            label
        )));
    }
    if !options.contains(correct) {
        return Err(QuizError::invalid_hand(format!(
            "{} options do not contain the correct value {}",
            label, correct
        )));
    }
    Ok(())
}

pub fn validate_problem(problem: &Problem) -> QuizResult<()> {
    validate_hand(&problem.hand)?;

    if problem.correct_fu < 20 || problem.correct_fu > 110 {
        return Err(QuizError::invalid_hand(format!(
            "invalid fu: {}",
            problem.correct_fu
        )));
    }
    if problem.correct_han < 1 || problem.correct_han > 100 {
        return Err(QuizError::invalid_hand(format!(
            "invalid han: {}",
            problem.correct_han
        )));
    }
    if problem.correct_score < 1000 {
        return Err(QuizError::invalid_hand(format!(
            "invalid score: {}",
            problem.correct_score
        )));
    }

    validate_options(&problem.fu_options, &problem.correct_fu, "fu")?;
    validate_options(&problem.han_options, &problem.correct_han, "han")?;
    validate_options(&problem.score_options, &problem.correct_score, "score")?;
    Ok(())
}

pub fn validate_calculation_result(
    value: usize,
    min: usize,
    max: usize,
    label: &'static str,
) -> QuizResult<()> {
    if value < min || value > max {
        return Err(QuizError::OutOfRange {
            label,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// 選択された値が選択肢に含まれているか
pub fn validate_selection(value: usize, options: &[usize], kind: OptionKind) -> QuizResult<()> {
    if !options.contains(&value) {
        let opts: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        return Err(QuizError::InvalidSelection {
            message: format!(
                "{} {} is not one of [{}]",
                kind.label(),
                value,
                opts.join(", ")
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
fn sample_hand() -> Hand {
    use crate::util::common::tiles_from_string;
    let mut closed = tiles_from_string("m234567p234s67888").unwrap();
    let winning_tile = closed.pop().unwrap();
    Hand {
        closed,
        melds: vec![],
        winning_tile,
        is_dealer: false,
        win_method: WinMethod::Ron,
        prevalent_wind: WE,
        seat_wind: WS,
        doras: vec![],
    }
}

#[test]
fn test_validate_tile() {
    assert!(validate_tile(&Tile(TM, 0)).is_ok());
    assert!(validate_tile(&Tile(TZ, DR)).is_ok());
    assert!(validate_tile(&Tile(TZ, 0)).is_err());
    assert!(validate_tile(&Tile(TZ, 8)).is_err());
    assert!(validate_tile(&Tile(TS, 10)).is_err());
    assert!(validate_tile(&Tile(4, 1)).is_err());
}

#[test]
fn test_validate_hand() {
    let hand = sample_hand();
    assert!(validate_hand(&hand).is_ok());

    let mut h = hand.clone();
    h.closed.pop();
    let e = validate_hand(&h).unwrap_err();
    assert_eq!(e.kind(), crate::error::ErrorKind::InvalidHand);

    let mut h = hand.clone();
    h.winning_tile = Z8;
    assert!(validate_hand(&h).is_err());

    let mut h = hand.clone();
    h.seat_wind = 5;
    assert!(validate_hand(&h).is_err());

    // 5枚目の牌
    let mut h = hand.clone();
    h.closed = vec![Tile(TM, 1); 13];
    h.winning_tile = Tile(TM, 2);
    assert!(validate_hand(&h).is_err());

    let mut h = hand;
    h.closed.truncate(10);
    h.melds = vec![Meld::new(MeldType::Chi, vec![Tile(TM, 1), Tile(TM, 2), Tile(TM, 4)])];
    assert!(validate_hand(&h).is_err());
}

#[test]
fn test_validate_calculation_result() {
    assert!(validate_calculation_result(30, 20, 110, "fu").is_ok());
    match validate_calculation_result(120, 20, 110, "fu") {
        Err(QuizError::OutOfRange { label, value, .. }) => {
            assert_eq!(label, "fu");
            assert_eq!(value, 120);
        }
        r => panic!("unexpected: {:?}", r),
    }
}

#[test]
fn test_validate_selection() {
    assert!(validate_selection(30, &[20, 30, 40, 50], OptionKind::Fu).is_ok());
    let e = validate_selection(25, &[20, 30, 40, 50], OptionKind::Fu).unwrap_err();
    assert_eq!(e.kind(), crate::error::ErrorKind::InvalidSelection);
}
