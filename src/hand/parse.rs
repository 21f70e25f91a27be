use crate::model::*;
use crate::util::misc::cartesian_product;

use super::win::{calc_possibole_pairs, is_kokushimusou_win};

use SetPairType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPairType {
    Pair,      // 雀頭
    Shuntsu,   // 順子
    Koutsu,    // 刻子
    RonKoutsu, // ロン和了で完成した刻子 (明刻扱い)
    Chi,       // チー
    Pon,       // ポン
    Minkan,    // 明槓
    Ankan,     // 暗槓
}

impl SetPairType {
    #[inline]
    pub fn is_triplet(self) -> bool {
        matches!(self, Koutsu | RonKoutsu | Pon | Minkan | Ankan)
    }

    #[inline]
    pub fn is_sequence(self) -> bool {
        matches!(self, Shuntsu | Chi)
    }
}

// Tileは順子、チーの場合は先頭の牌. 赤5は通常の5に変換済み
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPair(pub SetPairType, pub Tile);

pub type ParsedHand = Vec<SetPair>;

// 待ちの形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    Ryanmen, // 両面
    Penchan, // 辺張
    Kanchan, // 嵌張
    Tanki,   // 単騎
    Shanpon, // 双碰
}

impl Wait {
    // 符が付く待ち
    #[inline]
    pub fn has_fu(self) -> bool {
        matches!(self, Wait::Penchan | Wait::Kanchan | Wait::Tanki)
    }
}

// 鳴きをSetPairに変換したリストを返却
pub fn parse_melds(melds: &[Meld]) -> ParsedHand {
    let mut res = vec![];

    for m in melds {
        let t = m
            .tiles
            .iter()
            .map(|t| t.to_normal())
            .min()
            .unwrap_or(Z8);
        res.push(match m.meld_type {
            MeldType::Chi => SetPair(Chi, t),
            MeldType::Pon => SetPair(Pon, t),
            MeldType::Minkan => SetPair(Minkan, t),
            MeldType::Ankan => SetPair(Ankan, t),
        });
    }

    res
}

// 牌種を順子と刻子に分解
// 三連刻の場合2通り(刻子3つ, 順子3つ)の分割が存在する　四連刻は役満(四暗刻)なので無視
// 予め分解可能であることを確認しておくこと
// TileRowが空(すべて0)の場合は分解可能とみなし[[]]を返却
fn parse_row_into_sets(tr: &TileRow, ti: Type) -> Vec<ParsedHand> {
    let mut ph = vec![];
    let (mut n0, mut n1, mut n2);

    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];

        // 刻子
        if n0 >= 3 {
            ph.push(SetPair(Koutsu, Tile(ti, i)));
        }

        // 順子 (字牌はn=0となる)
        let n = n0 % 3;
        for _ in 0..n {
            ph.push(SetPair(Shuntsu, Tile(ti, i)))
        }
        n0 = n1.saturating_sub(n);
        n1 = n2.saturating_sub(n);
    }
    if n0 == 3 {
        ph.push(SetPair(Koutsu, Tile(ti, 8)));
    }
    if n1 == 3 {
        ph.push(SetPair(Koutsu, Tile(ti, 9)));
    }

    if ti == TZ || ph.len() < 3 {
        return vec![ph];
    }

    // 三連刻チェック
    let (mut i, mut n) = (0, 0);
    for SetPair(tp, t) in &ph {
        if let Koutsu = tp {
            if i + n == t.1 {
                n += 1;
                if n == 3 {
                    break;
                }
            } else {
                i = t.1;
                n = 1;
            }
        }
    }

    // 三連刻なし
    if n != 3 {
        return vec![ph];
    }

    let mut ph2 = vec![];
    for &SetPair(tp, t) in &ph {
        if let Koutsu = tp {
            if i <= t.1 && t.1 < i + 3 {
                continue;
            }
        }
        ph2.push(SetPair(tp, t));
    }
    let sp = SetPair(Shuntsu, Tile(ti, i));
    ph2.push(sp);
    ph2.push(sp);
    ph2.push(sp);

    vec![ph, ph2]
}

// 手牌が完成形(七対子・国士無双は除く)なら面子+雀頭に分解して返却
pub fn parse_into_normal_win(hand: &TileTable) -> Vec<ParsedHand> {
    let pairs = calc_possibole_pairs(hand);
    if pairs.is_empty() {
        return vec![];
    }

    let mut phs_list = vec![];

    // 雀頭を含む列
    let pair_ti = pairs[0].0;
    let mut tr = hand[pair_ti];
    let mut phs = vec![];
    for pair in pairs {
        tr[pair.1] -= 2;
        let mut phs2 = parse_row_into_sets(&tr, pair_ti);
        tr[pair.1] += 2;
        for ph in &mut phs2 {
            ph.push(SetPair(Pair, pair));
        }
        phs.append(&mut phs2);
    }
    phs_list.push(phs);

    // 雀頭を含まない列
    for ti in 0..TYPE {
        if ti != pair_ti {
            phs_list.push(parse_row_into_sets(&hand[ti], ti));
        }
    }

    // それぞれの列の分割のすべての組み合わせ(直積)を求める
    let mut res = vec![];
    for v in cartesian_product(&phs_list) {
        let mut ph = vec![];
        for v2 in v {
            ph.extend(v2);
        }
        res.push(ph);
    }

    res
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却
pub fn parse_into_chiitoitsu_win(hand: &TileTable) -> Vec<ParsedHand> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            let t = hand[ti][ni];
            if t == 0 {
                continue;
            } else if t == 2 {
                res.push(SetPair(Pair, Tile(ti, ni)));
            } else {
                return vec![];
            }
        }
    }

    if res.len() == 7 {
        vec![res]
    } else {
        vec![] // 鳴き有り
    }
}

// 手牌が完成形(国士無双)なら空のParsedHandが入ったリストを返却
pub fn parse_into_kokusimusou_win(hand: &TileTable) -> Vec<ParsedHand> {
    if is_kokushimusou_win(hand) {
        vec![vec![]]
    } else {
        vec![]
    }
}

// 和了牌がどの面子(雀頭)を完成させたかの解釈ごとに(分解, 待ち)を返却
// ロン和了で刻子が完成した場合はRonKoutsuに置き換える
// 国士無双(空の分解)は単騎待ちとして扱う
pub fn parse_win_patterns(
    ph: &ParsedHand,
    winning_tile: Tile,
    is_drawn: bool,
) -> Vec<(ParsedHand, Wait)> {
    if ph.is_empty() {
        return vec![(vec![], Wait::Tanki)];
    }

    let wt = winning_tile.to_normal();
    let mut res: Vec<(ParsedHand, Wait)> = vec![];
    for (i, &SetPair(tp, t)) in ph.iter().enumerate() {
        let mut ph2 = ph.clone();
        let wait = match tp {
            Pair if t == wt => Wait::Tanki,
            Koutsu if t == wt => {
                if !is_drawn {
                    ph2[i] = SetPair(RonKoutsu, t);
                }
                Wait::Shanpon
            }
            Shuntsu if t.0 == wt.0 && t.1 <= wt.1 && wt.1 <= t.1 + 2 => {
                if wt.1 == t.1 + 1 {
                    Wait::Kanchan
                } else if (wt.1 == t.1 && t.1 == 7) || (wt.1 == t.1 + 2 && t.1 == 1) {
                    Wait::Penchan
                } else {
                    Wait::Ryanmen
                }
            }
            _ => continue,
        };
        if !res.iter().any(|(p, w)| *w == wait && *p == ph2) {
            res.push((ph2, wait));
        }
    }

    res
}

#[cfg(test)]
fn parse_str(exp: &str) -> Vec<ParsedHand> {
    use crate::util::common::tiles_from_string;
    let tt = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
    parse_into_normal_win(&tt)
}

#[test]
fn test_parse_normal_win() {
    // 三連刻は2通り
    let phs = parse_str("m111222333p789z11");
    assert_eq!(phs.len(), 2);

    let phs = parse_str("m123p456s789z11122");
    assert_eq!(phs.len(), 1);
    assert!(phs[0].contains(&SetPair(Koutsu, Tile(TZ, WE))));
    assert!(phs[0].contains(&SetPair(Pair, Tile(TZ, WS))));

    assert!(parse_str("m1234p456s789z1122").is_empty());
}

#[test]
fn test_parse_melds() {
    let melds = vec![
        Meld::new(MeldType::Chi, vec![Tile(TP, 0), Tile(TP, 3), Tile(TP, 4)]),
        Meld::new(MeldType::Ankan, vec![Tile(TZ, DR); 4]),
    ];
    assert_eq!(
        parse_melds(&melds),
        vec![SetPair(Chi, Tile(TP, 3)), SetPair(Ankan, Tile(TZ, DR))]
    );
}

#[test]
fn test_win_patterns() {
    let phs = parse_str("m123789p45699s789");
    assert_eq!(phs.len(), 1);
    let ph = &phs[0];

    // 3m: 辺張
    let pats = parse_win_patterns(ph, Tile(TM, 3), true);
    assert_eq!(pats.len(), 1);
    assert_eq!(pats[0].1, Wait::Penchan);

    // 7m: 789mの辺張
    let pats = parse_win_patterns(ph, Tile(TM, 7), true);
    assert_eq!(pats[0].1, Wait::Penchan);

    // 5p: 嵌張
    let pats = parse_win_patterns(ph, Tile(TP, 5), true);
    assert_eq!(pats[0].1, Wait::Kanchan);

    // 9p: 単騎
    let pats = parse_win_patterns(ph, Tile(TP, 9), true);
    assert_eq!(pats[0].1, Wait::Tanki);

    // 9s: 78sの両面
    let pats = parse_win_patterns(ph, Tile(TS, 9), true);
    assert_eq!(pats[0].1, Wait::Ryanmen);

    // シャンポンのロンは明刻
    let phs = parse_str("m123p456s789z11122");
    let pats = parse_win_patterns(&phs[0], Tile(TZ, WE), false);
    assert_eq!(pats.len(), 1);
    assert_eq!(pats[0].1, Wait::Shanpon);
    assert!(pats[0].0.contains(&SetPair(RonKoutsu, Tile(TZ, WE))));
}
