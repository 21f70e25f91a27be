use super::misc::vec_count;
use crate::model::*;

pub fn tile_type_from_char(ch: char) -> Result<Type, String> {
    match ch {
        'm' => Ok(TM),
        'p' => Ok(TP),
        's' => Ok(TS),
        'z' => Ok(TZ),
        _ => Err(format!("invalid tile type char: {}", ch)),
    }
}

pub fn tile_type_to_char(ti: Type) -> char {
    ['m', 'p', 's', 'z'].get(ti).copied().unwrap_or('?')
}

pub fn tile_number_from_char(ch: char) -> Result<Tnum, String> {
    match ch.to_digit(10) {
        Some(i) => Ok(i as Tnum),
        None => Err(format!("invalid tile number char: {}", ch)),
    }
}

pub fn wind_from_char(ch: char) -> Result<Tnum, String> {
    Ok(match ch {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => return Err(format!("invalid wind char: {}", ch)),
    })
}

pub fn wind_to_char(ni: Tnum) -> char {
    match ni {
        WE => 'E',
        WS => 'S',
        WW => 'W',
        WN => 'N',
        _ => '?',
    }
}

pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, String> {
    let mut tiles = vec![];
    let mut ti = None;
    for ch in exp.chars() {
        match ch {
            'm' | 'p' | 's' | 'z' => ti = Some(tile_type_from_char(ch)?),
            '0'..='9' => {
                let ti = ti.ok_or("tile number befor tile type")?;
                tiles.push(Tile(ti, tile_number_from_char(ch)?));
            }
            _ => return Err(format!("invalid char: '{}'", ch)),
        }
    }
    Ok(tiles)
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut res = String::new();
    let mut last_ti = None;
    for t in tiles {
        if last_ti != Some(t.0) {
            last_ti = Some(t.0);
            res.push(tile_type_to_char(t.0));
        }
        res.push_str(&t.1.to_string());
    }
    res
}

// 例: "m123" => チー, "z555" => ポン, "p5550+" => 明槓, "s7777" => 暗槓
// 槓子は末尾の'+'の有無で明槓と暗槓を区別する (順子と刻子は常に鳴き)
pub fn meld_from_string(exp: &str) -> Result<Meld, String> {
    let (body, open) = match exp.strip_suffix('+') {
        Some(b) => (b, true),
        None => (exp, false),
    };
    let tiles = tiles_from_string(body)?;
    if tiles.is_empty() {
        return Err(format!("invalid meld: '{}'", exp));
    }
    if tiles.iter().any(|t| t.0 != tiles[0].0) {
        return Err(format!("mixed tile types in meld: '{}'", exp));
    }

    let mut nis: Vec<Tnum> = tiles.iter().map(|t| t.to_normal().1).collect();
    nis.sort();
    let diffs: Vec<usize> = nis.windows(2).map(|w| w[1] - w[0]).collect();

    let meld_type = if diffs.len() == 2 && vec_count(&diffs, &1) == 2 && tiles[0].is_suit() {
        MeldType::Chi
    } else if diffs.len() == 2 && vec_count(&diffs, &0) == 2 {
        MeldType::Pon
    } else if diffs.len() == 3 && vec_count(&diffs, &0) == 3 {
        if open {
            MeldType::Minkan
        } else {
            MeldType::Ankan
        }
    } else {
        return Err(format!("invalid meld: '{}'", exp));
    };

    Ok(Meld::new(meld_type, tiles))
}

pub fn meld_to_string(m: &Meld) -> String {
    let mut res = tiles_to_string(&m.tiles);
    if m.meld_type == MeldType::Minkan {
        res.push('+');
    }
    res
}

#[test]
fn test_tiles_to_string() {
    let hand_str = "p34777s1230567z66";
    let hand = tiles_from_string(hand_str).unwrap();
    assert_eq!(hand.len(), 14);
    assert_eq!(hand[8], Tile(TS, 0));
    assert_eq!(tiles_to_string(&hand), hand_str);
    assert!(tiles_from_string("12m").is_err());
    assert!(tiles_from_string("m1x").is_err());
}

#[test]
fn test_meld_from_string() {
    assert_eq!(meld_from_string("m312").unwrap().meld_type, MeldType::Chi);
    assert_eq!(meld_from_string("z555").unwrap().meld_type, MeldType::Pon);
    assert_eq!(meld_from_string("p5550+").unwrap().meld_type, MeldType::Minkan);
    assert_eq!(meld_from_string("s7777").unwrap().meld_type, MeldType::Ankan);
    assert!(meld_from_string("z123").is_err());
    assert!(meld_from_string("m124").is_err());
    assert!(meld_from_string("m1p23").is_err());

    let m = meld_from_string("p5550+").unwrap();
    assert_eq!(meld_to_string(&m), "p5550+");
}

#[test]
fn test_wind_char() {
    assert_eq!(wind_from_char('S').unwrap(), WS);
    assert_eq!(wind_to_char(WN), 'N');
    assert!(wind_from_char('X').is_err());
}
