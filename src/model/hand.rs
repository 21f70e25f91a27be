use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinMethod {
    Tsumo, // 自摸和了
    Ron,   // 出和了
}

impl fmt::Display for WinMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinMethod::Tsumo => write!(f, "tsumo"),
            WinMethod::Ron => write!(f, "ron"),
        }
    }
}

// 和了手牌
// 生成後に変更されることはない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub closed: Vec<Tile>,    // 手牌(鳴きと和了牌は含まない)
    pub melds: Vec<Meld>,     // 鳴き
    pub winning_tile: Tile,   // 和了牌
    pub is_dealer: bool,      // 親番
    pub win_method: WinMethod, // ツモ or ロン
    pub prevalent_wind: Tnum, // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub seat_wind: Tnum,      // 自風 (同上)
    pub doras: Vec<Tile>,     // ドラ (注:ドラ表示牌ではなくドラそのもの)
}

impl Hand {
    pub fn win_condition(&self) -> WinCondition {
        WinCondition {
            is_dealer: self.is_dealer,
            win_method: self.win_method,
            prevalent_wind: self.prevalent_wind,
            seat_wind: self.seat_wind,
        }
    }

    // 暗槓以外の鳴きがある
    pub fn is_open(&self) -> bool {
        self.melds.iter().any(|m| m.is_open())
    }

    // 手牌 + 和了牌 (鳴きは含まない)
    pub fn concealed_tiles(&self) -> Vec<Tile> {
        let mut v = self.closed.clone();
        v.push(self.winning_tile);
        v
    }

    // 鳴きを含むすべての牌 (槓子は4枚)
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut v = self.concealed_tiles();
        for m in &self.melds {
            v.extend(m.tiles.iter().copied());
        }
        v
    }

    // 槓子を3枚として数えた枚数
    pub fn logical_tile_count(&self) -> usize {
        self.closed.len() + 1 + self.melds.len() * 3
    }

    // 手牌 + 和了牌のTileTable
    pub fn concealed_table(&self) -> TileTable {
        tiles_to_tile_table(&self.concealed_tiles())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let closed: Vec<String> = sort_tiles(&self.closed)
            .iter()
            .map(|t| t.to_string())
            .collect();
        write!(f, "[{}]", closed.join(" "))?;
        for m in &self.melds {
            write!(f, " {}", m)?;
        }
        write!(f, " +{} ({})", self.winning_tile, self.win_method)
    }
}

// 手牌の内容に依存しない和了条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinCondition {
    pub is_dealer: bool,
    pub win_method: WinMethod,
    pub prevalent_wind: Tnum,
    pub seat_wind: Tnum,
}

impl WinCondition {
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.win_method == WinMethod::Tsumo
    }
}

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        // 0は赤5のフラグなので本来の5をたてる
        tt[t.0][5] += 1;
    }
}

pub fn dec_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] -= 1;
    if t.1 == 0 {
        tt[t.0][5] -= 1;
    }
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

#[test]
fn test_hand_counts() {
    let hand = Hand {
        closed: vec![Tile(TM, 1); 7],
        melds: vec![
            Meld::new(MeldType::Pon, vec![Tile(TZ, DW); 3]),
            Meld::new(MeldType::Ankan, vec![Tile(TP, 0), Tile(TP, 5), Tile(TP, 5), Tile(TP, 5)]),
        ],
        winning_tile: Tile(TM, 1),
        is_dealer: false,
        win_method: WinMethod::Ron,
        prevalent_wind: WE,
        seat_wind: WS,
        doras: vec![],
    };
    assert_eq!(hand.logical_tile_count(), 14);
    assert_eq!(hand.all_tiles().len(), 15);
    assert!(hand.is_open());

    let tt = hand.concealed_table();
    assert_eq!(tt[TM][1], 8);

    let wc = hand.win_condition();
    assert!(!wc.is_drawn());
    assert_eq!(wc.seat_wind, WS);
}
