use super::parse::parse_into_chiitoitsu_win;
use crate::model::*;

// [完成形判定 (面子, 雀頭)]

// それぞれの牌種について"枚数を3で割った余り"と"余り数の集計"を返却
pub fn calc_mods_cnts(hand: &TileTable) -> ([usize; 4], [usize; 3]) {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = hand[ti][1..10].iter().sum();
        mods[ti] %= 3;
    }

    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        cnts[mods[ti]] += 1;
    }

    (mods, cnts)
}

// 雀頭+面子形で構成されているかの判定
pub fn is_sets_pair(tr: &TileRow, ti: Type) -> bool {
    !calc_pair_candidate(tr, ti).is_empty()
}

// 面子のみで構成されているかの判定
pub fn is_sets(tr: &TileRow, ti: Type) -> bool {
    let (mut n0, mut n1, mut n2);
    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];
        let n = n0 % 3;
        if (ti == TZ && n != 0) || (n1 < n || n2 < n) {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// 牌種が完成面子+雀頭の場合において雀頭候補となる牌を返す
// [1,4,7], [2,5,8], [3,6,9] のいずれか
pub fn calc_pair_candidate_index(tr: &TileRow) -> Vec<Tnum> {
    // 面子の和は3で割り切れるので余りの値によって雀頭候補を絞り込める
    let mut sum = 0;
    for i in 1..TNUM {
        sum += i * tr[i];
    }
    let mod3 = sum % 3;
    (1..4).map(|i| 3 * i - mod3).collect()
}

// 牌種が完成面子+雀頭のみで構成されている場合,雀頭のリストを返す.
// 基本的に1つだが,3113,3111113のような形の場合2つ
pub fn calc_pair_candidate(tr: &TileRow, ti: Type) -> Vec<Tile> {
    let mut tr = *tr;
    let mut res = vec![];
    for ni in calc_pair_candidate_index(&tr) {
        if tr[ni] < 2 {
            continue;
        }
        tr[ni] -= 2;
        if is_sets(&tr, ti) {
            res.push(Tile(ti, ni));
        }
        tr[ni] += 2;
    }

    res
}

// 14 - (副露数) * 3 枚の手牌において和了形である場合,雀頭候補のリストを返却
pub fn calc_possibole_pairs(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    let mut res = vec![];

    if cnts[1] != 0 || cnts[2] != 1 {
        return vec![];
    }

    for ti in 0..TYPE {
        if mods[ti] == 2 {
            let pairs = calc_pair_candidate(&hand[ti], ti);
            if pairs.is_empty() {
                return vec![];
            }
            res = pairs;
        } else if !is_sets(&hand[ti], ti) {
            return vec![];
        }
    }

    res
}

// [和了形判定]

// 通常形
pub fn is_normal_win(hand: &TileTable) -> bool {
    !calc_possibole_pairs(hand).is_empty()
}

// 七対子
pub fn is_chiitoitsu_win(hand: &TileTable) -> bool {
    !parse_into_chiitoitsu_win(hand).is_empty()
}

// 国士無双
pub fn is_kokushimusou_win(hand: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TZ {
        if hand[ti][1] == 0 || hand[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if hand[ti][ni] != 0 {
                return false;
            }
        }
        count += hand[ti][1] + hand[ti][9]
    }
    for ni in 1..8 {
        if hand[TZ][ni] == 0 {
            return false;
        }
        count += hand[TZ][ni]
    }

    count == 14
}

// [和了牌判定]
// 13 - (副露数) * 3 枚の手牌について通常形の和了牌のリストを返却
// 聴牌していない場合は空のリストを返却
pub fn calc_tiles_to_normal_win(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    let mut res = vec![];
    if cnts[1] == 0 && cnts[2] == 2 {
        // 雀頭候補が別種の牌(2つ)ある場合
        let mut ti_mod2 = vec![];
        for ti in 0..TYPE {
            if mods[ti] == 2 {
                ti_mod2.push(ti);
            } else if !is_sets(&hand[ti], ti) {
                return vec![];
            }
        }
        for i in 0..2 {
            let (ti0, ti1) = (ti_mod2[i], ti_mod2[1 - i]);
            if is_sets_pair(&hand[ti0], ti0) {
                let mut tr = hand[ti1];
                for ni in 1..TNUM {
                    if ti1 == TZ && ni > DR {
                        break;
                    }
                    tr[ni] += 1;
                    if is_sets(&tr, ti1) {
                        res.push(Tile(ti1, ni));
                    }
                    tr[ni] -= 1;
                }
            }
        }
    }
    if cnts[1] == 1 && cnts[2] == 0 {
        // 雀頭候補が1つの牌種のみの場合
        for ti in 0..TYPE {
            if mods[ti] == 1 {
                let mut tr = hand[ti];
                for ni in 1..TNUM {
                    if ti == TZ && ni > DR {
                        break;
                    }
                    tr[ni] += 1;
                    if is_sets_pair(&tr, ti) {
                        res.push(Tile(ti, ni));
                    }
                    tr[ni] -= 1;
                }
            } else if !is_sets(&hand[ti], ti) {
                return vec![];
            }
        }
    }

    res
}

#[test]
fn test_win() {
    use crate::util::common::tiles_from_string;

    let tt = tiles_to_tile_table(&tiles_from_string("m123456789p11s789").unwrap());
    assert!(is_normal_win(&tt));
    assert!(!is_chiitoitsu_win(&tt));

    let tt = tiles_to_tile_table(&tiles_from_string("m112233p445566z77").unwrap());
    assert!(is_normal_win(&tt)); // 二盃口
    assert!(is_chiitoitsu_win(&tt));

    let tt = tiles_to_tile_table(&tiles_from_string("m19p19s19z12345677").unwrap());
    assert!(is_kokushimusou_win(&tt));
    assert!(!is_normal_win(&tt));

    // 赤5を含む場合
    let tt = tiles_to_tile_table(&tiles_from_string("m340p456s678z11").unwrap());
    assert!(is_normal_win(&tt)); // 副露3つ分を除いた形
}

#[test]
fn test_tiles_to_normal_win() {
    use crate::util::common::tiles_from_string;

    // 23m 両面 + 九蓮形
    let tt = tiles_to_tile_table(&tiles_from_string("m1112345678999").unwrap());
    let wins = calc_tiles_to_normal_win(&tt);
    assert_eq!(wins.len(), 9);

    let tt = tiles_to_tile_table(&tiles_from_string("m23p456s789z111z22").unwrap());
    assert_eq!(calc_tiles_to_normal_win(&tt), vec![Tile(TM, 1), Tile(TM, 4)]);

    let tt = tiles_to_tile_table(&tiles_from_string("m2p456s789z111z222").unwrap());
    assert_eq!(calc_tiles_to_normal_win(&tt), vec![Tile(TM, 2)]);
}
