use crate::model::{Point, Points, Score, WinMethod};

// 100点単位に切り上げ
fn ceil(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// 満貫以上の場合は固定の基本点
pub fn calc_base_point(fu: usize, han: usize) -> Point {
    match han {
        13.. => 8000 * (han / 13), // 役満 (数え役満を含む)
        11..=12 => 8000,
        10 => 6000, // 三倍満
        8..=9 => 4000, // 倍満
        6..=7 => 3000, // 跳満
        5 => 2000, // 満貫
        4 if fu >= 40 => 2000,
        3 if fu >= 70 => 2000,
        _ => fu * 2_usize.pow(han as u32 + 2),
    }
}

pub fn get_score_title(fu: usize, han: usize) -> String {
    match calc_base_point(fu, han) {
        2000 => "満貫".to_string(),
        3000 => "跳満".to_string(),
        4000 => "倍満".to_string(),
        6000 => "三倍満".to_string(),
        8000 => "役満".to_string(),
        b if b > 8000 && b % 8000 == 0 => format!("{}倍役満", b / 8000),
        _ => "".to_string(),
    }
}

// (ロン, ツモ和了の子の支払い, ツモ和了の親の支払い)を返却
// 親の和了の場合, ツモ和了の親の支払いは0
// 支払いごとに100点単位に切り上げてから合計する
pub fn calc_points(fu: usize, han: usize, is_dealer: bool) -> Points {
    let base = calc_base_point(fu, han);
    if is_dealer {
        (ceil(base * 6), ceil(base * 2), 0)
    } else {
        (ceil(base * 4), ceil(base), ceil(base * 2))
    }
}

// 和了者が受け取る合計点
pub fn calc_score(points: &Points, is_dealer: bool, win_method: WinMethod) -> Score {
    match win_method {
        WinMethod::Ron => points.0,
        WinMethod::Tsumo => {
            if is_dealer {
                points.1 * 3
            } else {
                points.1 * 2 + points.2
            }
        }
    }
}

// 表示用の点数 例: "7700", "3900 all", "500-1000"
pub fn format_score(points: &Points, is_dealer: bool, win_method: WinMethod) -> String {
    match win_method {
        WinMethod::Ron => points.0.to_string(),
        WinMethod::Tsumo => {
            if is_dealer {
                format!("{} all", points.1)
            } else {
                format!("{}-{}", points.1, points.2)
            }
        }
    }
}

#[test]
fn test_points() {
    // 子 30符2翻 ツモ
    let p = calc_points(30, 2, false);
    assert_eq!(p, (2000, 500, 1000));
    assert_eq!(calc_score(&p, false, WinMethod::Tsumo), 2000);
    assert_eq!(format_score(&p, false, WinMethod::Tsumo), "500-1000");

    // 親 30符4翻 ツモ
    let p = calc_points(30, 4, true);
    assert_eq!(p, (11600, 3900, 0));
    assert_eq!(calc_score(&p, true, WinMethod::Tsumo), 11700);
    assert_eq!(format_score(&p, true, WinMethod::Tsumo), "3900 all");

    // 子 40符3翻 ロン / ツモ
    let p = calc_points(40, 3, false);
    assert_eq!(format_score(&p, false, WinMethod::Ron), "5200");
    assert_eq!(format_score(&p, false, WinMethod::Tsumo), "1300-2600");
    assert_eq!(calc_score(&p, false, WinMethod::Tsumo), 5200);

    // 子 30符3翻 ツモ: 1000-2000
    assert_eq!(calc_score(&calc_points(30, 3, false), false, WinMethod::Tsumo), 4000);
}

#[test]
fn test_limit_tiers() {
    for fu in [20, 30, 110] {
        assert_eq!(calc_points(fu, 5, false).0, 8000);
        assert_eq!(calc_points(fu, 5, true).0, 12000);
    }
    assert_eq!(calc_points(40, 4, false).0, 8000);
    assert_eq!(calc_points(70, 3, false).0, 8000);
    assert_eq!(calc_points(60, 3, false).0, 7700);
    assert_eq!(calc_points(30, 7, false).0, 12000);
    assert_eq!(calc_points(30, 9, true).0, 24000);
    assert_eq!(calc_points(30, 10, false).0, 24000);
    assert_eq!(calc_points(30, 12, true).0, 48000);
    assert_eq!(calc_points(30, 13, false).0, 32000);
    assert_eq!(calc_points(30, 26, true).0, 96000);

    assert_eq!(get_score_title(30, 1), "");
    assert_eq!(get_score_title(40, 4), "満貫");
    assert_eq!(get_score_title(30, 6), "跳満");
    assert_eq!(get_score_title(30, 13), "役満");
    assert_eq!(get_score_title(30, 26), "2倍役満");
}
