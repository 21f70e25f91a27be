use rand::prelude::*;

use crate::model::*;

const MAX_DRAW_TRY: usize = 100;

// 出題する手牌の組み立てパターン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPattern {
    Tanyao,     // 断么九
    Honitsu,    // 混一色
    Chinitsu,   // 清一色
    Toitoi,     // 対々和
    Chiitoitsu, // 七対子
}

impl HandPattern {
    pub const ALL: [HandPattern; 5] = [
        HandPattern::Tanyao,
        HandPattern::Honitsu,
        HandPattern::Chinitsu,
        HandPattern::Toitoi,
        HandPattern::Chiitoitsu,
    ];

    // (手牌14枚から鳴きを除いたもの, 鳴き)を返却
    // 同じ牌が5枚以上になる組み合わせを引き直しても失敗した場合はNone
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Option<(Vec<Tile>, Vec<Meld>)> {
        let mut b = HandBuilder::default();
        match self {
            HandPattern::Tanyao => {
                for _ in 0..3 {
                    b.add_with(rng, |r| shuntsu(random_suit(r), r.gen_range(2..=6)))?;
                }
                b.add_with(rng, |r| koutsu(Tile(random_suit(r), r.gen_range(2..=8))))?;
                b.add_with(rng, |r| pair(Tile(random_suit(r), r.gen_range(2..=8))))?;
            }
            HandPattern::Honitsu => {
                let ti = random_suit(rng);
                for _ in 0..2 {
                    b.add_with(rng, |r| shuntsu(ti, r.gen_range(1..=7)))?;
                }
                b.add_with(rng, |r| koutsu(Tile(TZ, r.gen_range(DW..=DR))))?;
                b.add_with(rng, |r| koutsu(Tile(ti, r.gen_range(1..=9))))?;
                b.add_with(rng, |r| pair(Tile(TZ, r.gen_range(WE..=WN))))?;
            }
            HandPattern::Chinitsu => {
                let ti = random_suit(rng);
                for _ in 0..4 {
                    b.add_with(rng, |r| {
                        if r.gen_bool(0.5) {
                            shuntsu(ti, r.gen_range(1..=7))
                        } else {
                            koutsu(Tile(ti, r.gen_range(1..=9)))
                        }
                    })?;
                }
                b.add_with(rng, |r| pair(Tile(ti, r.gen_range(1..=9))))?;
            }
            HandPattern::Toitoi => {
                // 四暗刻にならないように1つ以上はポン
                let n_pon = rng.gen_range(1..=2);
                for i in 0..4 {
                    let ts = b.add_with(rng, |r| koutsu(Tile(random_suit(r), r.gen_range(1..=9))))?;
                    if i < n_pon {
                        b.into_meld(MeldType::Pon, ts);
                    }
                }
                b.add_with(rng, |r| pair(Tile(random_suit(r), r.gen_range(1..=9))))?;
            }
            HandPattern::Chiitoitsu => {
                let mut kinds = vec![];
                for ti in [TM, TP, TS] {
                    for ni in 1..=9 {
                        kinds.push(Tile(ti, ni));
                    }
                }
                for &t in kinds.choose_multiple(rng, 7) {
                    b.add(&pair(t));
                }
            }
        }

        Some((b.tiles, b.melds))
    }
}

impl std::fmt::Display for HandPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandPattern::Tanyao => "tanyao",
            HandPattern::Honitsu => "honitsu",
            HandPattern::Chinitsu => "chinitsu",
            HandPattern::Toitoi => "toitoi",
            HandPattern::Chiitoitsu => "chiitoitsu",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Default)]
struct HandBuilder {
    tt: TileTable,     // 鳴きを含む枚数
    tiles: Vec<Tile>,  // 鳴き以外
    melds: Vec<Meld>,
}

impl HandBuilder {
    fn can_add(&self, ts: &[Tile]) -> bool {
        let mut tt = self.tt;
        for &t in ts {
            inc_tile(&mut tt, t);
            if tt[t.0][t.1] > TILE {
                return false;
            }
        }
        true
    }

    fn add(&mut self, ts: &[Tile]) {
        for &t in ts {
            inc_tile(&mut self.tt, t);
            self.tiles.push(t);
        }
    }

    // 牌が5枚以上になる場合は引き直し
    fn add_with<R, F>(&mut self, rng: &mut R, mut f: F) -> Option<Vec<Tile>>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> Vec<Tile>,
    {
        for _ in 0..MAX_DRAW_TRY {
            let ts = f(rng);
            if self.can_add(&ts) {
                self.add(&ts);
                return Some(ts);
            }
        }
        None
    }

    // 直前に追加した面子を鳴きに移動
    fn into_meld(&mut self, meld_type: MeldType, ts: Vec<Tile>) {
        let n = self.tiles.len() - ts.len();
        self.tiles.truncate(n);
        self.melds.push(Meld::new(meld_type, ts));
    }
}

fn random_suit<R: Rng + ?Sized>(rng: &mut R) -> Type {
    rng.gen_range(TM..=TS)
}

fn shuntsu(ti: Type, start: Tnum) -> Vec<Tile> {
    vec![Tile(ti, start), Tile(ti, start + 1), Tile(ti, start + 2)]
}

fn koutsu(t: Tile) -> Vec<Tile> {
    vec![t; 3]
}

fn pair(t: Tile) -> Vec<Tile> {
    vec![t; 2]
}

#[test]
fn test_build_patterns() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(7);
    for _ in 0..50 {
        for p in HandPattern::ALL {
            let (tiles, melds) = p.build(&mut rng).unwrap();
            assert_eq!(tiles.len() + melds.len() * 3, HAND_SIZE, "{}", p);

            let mut all = tiles.clone();
            for m in &melds {
                all.extend(m.tiles.iter().copied());
            }
            let tt = tiles_to_tile_table(&all);
            for ti in 0..TYPE {
                assert!(tt[ti][1..].iter().all(|&n| n <= TILE));
            }

            match p {
                HandPattern::Tanyao => assert!(all.iter().all(|t| t.is_simple())),
                HandPattern::Chinitsu => assert!(all.iter().all(|t| t.0 == all[0].0)),
                HandPattern::Toitoi => assert!(!melds.is_empty()),
                _ => {}
            }
        }
    }
}
