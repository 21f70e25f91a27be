use serde::{de, ser};

use super::*;
use crate::util::common::{tile_number_from_char, tile_type_from_char};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)
pub const Z8: Tile = Tile(TZ, UK); // unknown tile

impl Tile {
    pub fn from_symbol(s: &str) -> Result<Self, String> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(format!("invalid tile symbol: '{}'", s));
        }
        let t = tile_type_from_char(chars[0])?;
        let n = tile_number_from_char(chars[1])?;
        Ok(Self(t, n))
    }

    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    // 赤5
    #[inline]
    pub fn is_red5(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end()
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && WE <= self.1 && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // 赤5は通常の5の直前に並べる
    fn sort_key(&self) -> (Type, Tnum) {
        if self.is_red5() {
            (self.0, 9)
        } else {
            (self.0, self.1 * 2)
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = ['m', 'p', 's', 'z'];
        match ts.get(self.0) {
            Some(c) => write!(f, "{}{}", c, self.1),
            None => write!(f, "?{}", self.1),
        }
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as de::Deserializer<'de>>::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// 萬子 → 筒子 → 索子 → 風牌 → 三元牌 の順に並べた牌のリストを返却
pub fn sort_tiles(tiles: &[Tile]) -> Vec<Tile> {
    let mut v = tiles.to_vec();
    v.sort();
    v
}

// [TileTable]
// [ti][0]は赤5の枚数, [ti][5]は赤5を含む5の枚数
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

#[test]
fn test_tile_order() {
    let tiles = vec![
        Tile(TZ, DW),
        Tile(TM, 5),
        Tile(TP, 3),
        Tile(TM, 0),
        Tile(TM, 1),
        Tile(TZ, WE),
    ];
    let sorted = sort_tiles(&tiles);
    assert_eq!(
        sorted,
        vec![
            Tile(TM, 1),
            Tile(TM, 0),
            Tile(TM, 5),
            Tile(TP, 3),
            Tile(TZ, WE),
            Tile(TZ, DW),
        ]
    );
}

#[test]
fn test_tile_symbol() {
    assert_eq!(Tile::from_symbol("m0").unwrap(), Tile(TM, 0));
    assert_eq!(Tile::from_symbol("z7").unwrap(), Tile(TZ, DR));
    assert!(Tile::from_symbol("x1").is_err());
    assert!(Tile::from_symbol("m").is_err());

    let json = serde_json::to_string(&vec![Tile(TS, 0), Tile(TZ, WE)]).unwrap();
    assert_eq!(json, r#"["s0","z1"]"#);
    let tiles: Vec<Tile> = serde_json::from_str(&json).unwrap();
    assert_eq!(tiles, vec![Tile(TS, 0), Tile(TZ, WE)]);
}
