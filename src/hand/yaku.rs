use std::fmt;

use crate::model::*;

use super::parse::{ParsedHand, SetPair, SetPairType, Wait};
use super::win::is_kokushimusou_win;

use SetPairType::*;

#[derive(Debug)]
pub struct YakuContext {
    hand: TileTable,         // 元々の手牌(鳴きは含まない, 和了牌を含む) 国士, 九蓮宝燈の判定などに使用
    parsed_hand: ParsedHand, // 鳴きを含むすべての面子
    pair_tile: Tile,         // 雀頭の牌
    wait: Wait,              // 待ちの形
    is_drawn: bool,          // ツモ和了
    is_open: bool,           // 鳴きの有無 (暗槓は含まない)
    prevalent_wind: Tnum,    // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    seat_wind: Tnum,         // 自風 (同上)
    kuitan: bool,            // 喰いタン有無
    counts: Counts,          // 面子や牌種別のカウント
    iipeikou_count: usize,   // 一盃口, 二盃口用
    yakuhai_check: TileRow,  // 役牌面子のカウント(雀頭は含まない)
}

impl YakuContext {
    pub fn new(
        hand: TileTable,
        parsed_hand: ParsedHand,
        wait: Wait,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        is_drawn: bool,
        kuitan: bool,
    ) -> Self {
        let pair_tile = get_pair(&parsed_hand);
        let counts = count_type(&parsed_hand);
        let iipeikou_count = count_iipeikou(&parsed_hand);
        let yakuhai_check = check_yakuhai(&parsed_hand);
        let is_open = counts.chi + counts.pon + counts.minkan != 0;

        Self {
            hand,
            parsed_hand,
            pair_tile,
            wait,
            is_drawn,
            is_open,
            prevalent_wind,
            seat_wind,
            kuitan,
            counts,
            iipeikou_count,
            yakuhai_check,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // 役満に該当する役の一覧を返却
    pub fn calc_yakuman(&self) -> Vec<&'static Yaku> {
        YAKUMAN_LIST.iter().filter(|y| (y.func)(self)).collect()
    }

    // (役一覧, 翻数)を返却. 役満は含まない
    // 鳴きありで食い下がりのない役(fan_open == 0)は成立しない
    pub fn calc_yaku(&self) -> (Vec<&'static Yaku>, usize) {
        let mut yaku = vec![];
        let mut fan = 0;
        for y in YAKU_LIST {
            let f = y.fan(self.is_open);
            if f != 0 && (y.func)(self) {
                yaku.push(y);
                fan += f;
            }
        }
        (yaku, fan)
    }

    pub fn calc_fu(&self) -> usize {
        if is_chiitoitsu(self) {
            return 25;
        }
        if is_pinfu(self) && self.is_drawn {
            return 20;
        }

        // 副底
        let mut fu = 20;

        // 和了り方
        fu += if self.is_drawn {
            2 // ツモ
        } else if !self.is_open {
            10 // 門前ロン
        } else {
            0
        };

        // 面子, 雀頭
        for SetPair(tp, t) in &self.parsed_hand {
            match tp {
                Pair => {
                    if t.is_doragon()
                        || (t.is_wind() && (t.1 == self.prevalent_wind || t.1 == self.seat_wind))
                    {
                        fu += 2;
                    }
                }
                Koutsu => fu += if t.is_end() { 8 } else { 4 },
                RonKoutsu | Pon => fu += if t.is_end() { 4 } else { 2 },
                Minkan => fu += if t.is_end() { 16 } else { 8 },
                Ankan => fu += if t.is_end() { 32 } else { 16 },
                Shuntsu | Chi => {}
            }
        }

        // 待ちの形
        if self.wait.has_fu() {
            fu += 2;
        }

        let fu = (fu + 9) / 10 * 10; // １の位は切り上げ
        if self.is_open && fu == 20 {
            30 // 喰い平和形
        } else {
            fu
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    pair: usize,
    shuntsu: usize,
    koutsu: usize,
    ron_koutsu: usize,
    chi: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntu + chi
    koutsu_total: usize,  // koutsu + ron_koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // tile Type Indices counts
}

fn get_pair(ph: &ParsedHand) -> Tile {
    for &SetPair(tp, t) in ph {
        if let Pair = tp {
            return t;
        }
    }
    Z8 // 雀頭なし(国士無双)
}

fn count_type(ph: &ParsedHand) -> Counts {
    let mut cnt = Counts::default();
    for SetPair(tp, t) in ph {
        match tp {
            Pair => cnt.pair += 1,
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            RonKoutsu => cnt.ron_koutsu += 1,
            Chi => cnt.chi += 1,
            Pon => cnt.pon += 1,
            Minkan => cnt.minkan += 1,
            Ankan => cnt.ankan += 1,
        }
        cnt.tis[t.0] += 1;
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chi;
    cnt.koutsu_total = cnt.koutsu + cnt.ron_koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

fn count_iipeikou(ph: &ParsedHand) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for SetPair(tp, t) in ph {
        if let Shuntsu = tp {
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] % 2 == 0 {
                n += 1;
            }
        }
    }

    n
}

fn check_yakuhai(ph: &ParsedHand) -> TileRow {
    let mut tr = TileRow::default();
    for SetPair(tp, t) in ph {
        if tp.is_triplet() && t.is_hornor() {
            tr[t.1] += 1;
        }
    }

    tr
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext) -> bool,
    pub fan_close: usize, // 鳴きなしの翻
    pub fan_open: usize,  // 鳴きありの翻(食い下がり) 0は鳴きありで不成立
}

impl Yaku {
    #[inline]
    pub fn fan(&self, is_open: bool) -> usize {
        if is_open {
            self.fan_open
        } else {
            self.fan_close
        }
    }
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.fan_close, self.fan_open)
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
        }
    };
}

// 翻数は役満として固定値を返すため一律13
pub static YAKUMAN_LIST: &[Yaku] = &[
    yaku!("国士無双", is_kokushimusou, 13, 0),
    yaku!("四暗刻", is_suuankou, 13, 0),
    yaku!("大三元", is_daisangen, 13, 13),
    yaku!("小四喜", is_shousuushii, 13, 13),
    yaku!("大四喜", is_daisuushii, 13, 13),
    yaku!("緑一色", is_ryuuiisou, 13, 13),
    yaku!("字一色", is_tuuiisou, 13, 13),
    yaku!("清老頭", is_chinroutou, 13, 13),
    yaku!("四槓子", is_suukantsu, 13, 13),
    yaku!("九蓮宝燈", is_chuurenpoutou, 13, 0),
];

pub static YAKU_LIST: &[Yaku] = &[
    yaku!("門前清自摸和", is_menzentsumo, 1, 0),
    yaku!("平和", is_pinfu, 1, 0),
    yaku!("断么九", is_tanyaochuu, 1, 1),
    yaku!("一盃口", is_iipeikou, 1, 0),
    yaku!("二盃口", is_ryanpeikou, 3, 0),
    yaku!("一気通貫", is_ikkitsuukan, 2, 1),
    yaku!("三色同順", is_sanshokudoujun, 2, 1),
    yaku!("三色同刻", is_sanshokudoukou, 2, 2),
    yaku!("チャンタ", is_chanta, 2, 1),
    yaku!("純チャン", is_junchan, 3, 2),
    yaku!("混老頭", is_honroutou, 2, 2),
    yaku!("対々和", is_toitoihou, 2, 2),
    yaku!("三暗刻", is_sanankou, 2, 2),
    yaku!("三槓子", is_sankantsu, 2, 2),
    yaku!("小三元", is_shousangen, 2, 2),
    yaku!("混一色", is_honiisou, 3, 2),
    yaku!("清一色", is_chiniisou, 6, 5),
    yaku!("七対子", is_chiitoitsu, 2, 0),
    yaku!("場風", is_bakaze, 1, 1),
    yaku!("自風", is_jikaze, 1, 1),
    yaku!("白", is_haku, 1, 1),
    yaku!("發", is_hatsu, 1, 1),
    yaku!("中", is_chun, 1, 1),
];

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 以下の役は排他的(包含関係)であり右側を優先
//     一盃口, 二盃口
//     チャンタ, 純チャンタ
//     混老頭, 清老頭
//     混一色, 清一色
//     三暗刻, 四暗刻
//     三槓子, 四槓子

// 門前清自摸和
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.is_drawn
}

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] == 1
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] == 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] == 1
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] == 1
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    if ctx.parsed_hand.is_empty() {
        return false; // 国士対策
    }
    if ctx.is_open && !ctx.kuitan {
        return false;
    }

    for SetPair(tp, t) in &ctx.parsed_hand {
        if tp.is_sequence() {
            if t.1 == 1 || t.1 == 7 {
                return false;
            }
        } else if t.is_end() {
            return false;
        }
    }

    true
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu != 4 || ctx.is_open {
        return false;
    }

    let pt = &ctx.pair_tile;
    if pt.is_doragon() || (pt.is_wind() && (pt.1 == ctx.prevalent_wind || pt.1 == ctx.seat_wind))
    {
        return false;
    }

    ctx.wait == Wait::Ryanmen
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut f147 = [[false; 3]; 3];
    for SetPair(tp, t) in &ctx.parsed_hand {
        if tp.is_sequence() {
            match t.1 {
                1 | 4 | 7 => f147[t.0][t.1 / 3] = true,
                _ => {}
            }
        }
    }

    f147.iter().any(|f| f[0] && f[1] && f[2])
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for SetPair(tp, t) in &ctx.parsed_hand {
        if tp.is_sequence() {
            mps[t.1][t.0] = true;
        }
    }

    mps.iter().any(|f| f[0] && f[1] && f[2])
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    if ctx.counts.koutsu_total < 3 {
        return false;
    }

    let mut mps = [[false; 3]; TNUM];
    for SetPair(tp, t) in &ctx.parsed_hand {
        if tp.is_triplet() && t.is_suit() {
            mps[t.1][t.0] = true;
        }
    }

    mps.iter().any(|f| f[0] && f[1] && f[2])
}

// チャンタ
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let mut has_hornor = false;
    for SetPair(tp, t) in &ctx.parsed_hand {
        if tp.is_sequence() {
            if t.1 != 1 && t.1 != 7 {
                return false;
            }
        } else if t.is_hornor() {
            has_hornor = true;
        } else if !t.is_terminal() {
            return false;
        }
    }

    has_hornor
}

// 純チャン
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    for SetPair(tp, t) in &ctx.parsed_hand {
        if tp.is_sequence() {
            if t.1 != 1 && t.1 != 7 {
                return false;
            }
        } else if !t.is_terminal() {
            return false;
        }
    }

    true
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 || ctx.parsed_hand.is_empty() {
        return false;
    }

    let mut has_hornor = false;
    let mut has_terminal = false;
    for SetPair(_, t) in &ctx.parsed_hand {
        if t.is_hornor() {
            has_hornor = true;
        } else if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_hornor && has_terminal
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 || ctx.parsed_hand.is_empty() {
        return false;
    }

    ctx.parsed_hand.iter().all(|SetPair(_, t)| t.is_terminal())
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 3
}

// 四暗刻 (シャンポン待ちのロンは三暗刻)
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 3
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

fn count_suits(ctx: &YakuContext) -> usize {
    let tis = &ctx.counts.tis;
    [TM, TP, TS].iter().filter(|&&ti| tis[ti] > 0).count()
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    count_suits(ctx) == 1 && ctx.counts.tis[TZ] > 0
}

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    count_suits(ctx) == 1 && ctx.counts.tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.is_doragon()
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && ctx.pair_tile.is_wind()
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    if ctx.parsed_hand.is_empty() {
        return false;
    }

    for SetPair(tp, t) in &ctx.parsed_hand {
        if tp.is_sequence() {
            if t.0 != TS || t.1 != 2 {
                return false; // 順子は234s以外は不可
            }
        } else if t.is_hornor() {
            if t.1 != DG {
                return false;
            }
        } else if t.0 != TS || !matches!(t.1, 2 | 3 | 4 | 6 | 8) {
            return false;
        }
    }

    true
}

// 字一色
fn is_tuuiisou(ctx: &YakuContext) -> bool {
    !ctx.parsed_hand.is_empty() && ctx.counts.tis[TZ] == ctx.parsed_hand.len()
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    if ctx.is_open || ctx.counts.kantsu_total != 0 {
        return false;
    }
    if ctx.parsed_hand.len() != 5 || !is_chiniisou(ctx) {
        return false;
    }

    let ti = ctx.pair_tile.0;
    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return false;
    }
    (2..9).all(|ni| h[ti][ni] != 0)
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    ctx.parsed_hand.is_empty() && is_kokushimusou_win(&ctx.hand)
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.parsed_hand.len() == 7
}

#[cfg(test)]
fn context_from_str(exp: &str, wt: Tile, is_drawn: bool) -> YakuContext {
    use super::parse::{parse_into_chiitoitsu_win, parse_into_normal_win, parse_win_patterns};
    use crate::util::common::tiles_from_string;

    let tt = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
    let mut phs = parse_into_normal_win(&tt);
    phs.append(&mut parse_into_chiitoitsu_win(&tt));
    let (ph, wait) = parse_win_patterns(&phs[0], wt, is_drawn).remove(0);
    YakuContext::new(tt, ph, wait, WE, WS, is_drawn, true)
}

#[cfg(test)]
fn yaku_names(ctx: &YakuContext) -> Vec<&'static str> {
    ctx.calc_yaku().0.iter().map(|y| y.name).collect()
}

#[test]
fn test_pinfu() {
    let ctx = context_from_str("m234567p234s23455", Tile(TS, 4), true);
    assert_eq!(
        yaku_names(&ctx),
        vec!["門前清自摸和", "平和", "断么九", "三色同順"]
    );
    assert_eq!(ctx.calc_fu(), 20);

    let ctx = context_from_str("m234567p234s23455", Tile(TS, 4), false);
    assert_eq!(ctx.calc_yaku().1, 4);
    assert_eq!(ctx.calc_fu(), 30);
}

#[test]
fn test_fu() {
    // 中の暗刻(8) + 嵌張(2) + 門前ロン(10) + 副底(20) = 40
    let ctx = context_from_str("m456p12399s789z777", Tile(TP, 2), false);
    assert_eq!(yaku_names(&ctx), vec!["中"]);
    assert_eq!(ctx.calc_fu(), 40);

    // 七対子
    let ctx = context_from_str("m1133p2266s4499z11", Tile(TZ, WE), true);
    assert_eq!(yaku_names(&ctx), vec!["門前清自摸和", "七対子"]);
    assert_eq!(ctx.calc_fu(), 25);
}

#[test]
fn test_yakuman() {
    let ctx = context_from_str("m111999p11199s111", Tile(TP, 9), true);
    let names: Vec<_> = ctx.calc_yakuman().iter().map(|y| y.name).collect();
    assert_eq!(names, vec!["四暗刻", "清老頭"]);

    let ctx = context_from_str("m11123455678999", Tile(TM, 5), false);
    let names: Vec<_> = ctx.calc_yakuman().iter().map(|y| y.name).collect();
    assert_eq!(names, vec!["九蓮宝燈"]);
}
