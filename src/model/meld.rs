use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldType {
    Chi,    // チー (順子)
    Pon,    // ポン (明刻)
    Minkan, // 明槓
    Ankan,  // 暗槓
}

impl MeldType {
    // 面子を構成する牌の枚数
    pub fn tile_count(self) -> usize {
        match self {
            MeldType::Chi | MeldType::Pon => 3,
            MeldType::Minkan | MeldType::Ankan => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
}

impl Meld {
    pub fn new(meld_type: MeldType, tiles: Vec<Tile>) -> Self {
        Self { meld_type, tiles }
    }

    // 暗槓以外の鳴きは門前を崩す
    #[inline]
    pub fn is_open(&self) -> bool {
        self.meld_type != MeldType::Ankan
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.tiles.iter().map(|t| t.to_string()).collect();
        write!(f, "{:?}({})", self.meld_type, s.join("|"))
    }
}
