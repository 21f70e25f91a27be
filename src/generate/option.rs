use std::collections::BTreeSet;

use rand::prelude::*;

use crate::model::*;

// 符の選択肢
pub const FU_LADDER: [usize; 11] = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

pub const MIN_OPTIONS: usize = 4;
const MAX_HAN_OPTION: usize = 13;
const MIN_SCORE_OPTION: Score = 1000;
const MAX_SCORE_TRY: usize = 1000;

// 正解を含む昇順で重複のない選択肢を返却
pub fn generate_options<R: Rng + ?Sized>(rng: &mut R, correct: usize, kind: OptionKind) -> Vec<usize> {
    let mut options = BTreeSet::new();
    options.insert(correct);

    match kind {
        OptionKind::Fu => {
            // 正解の前後の値
            if let Some(i) = FU_LADDER.iter().position(|&f| f == correct) {
                if i > 0 {
                    options.insert(FU_LADDER[i - 1]);
                }
                if i + 1 < FU_LADDER.len() {
                    options.insert(FU_LADDER[i + 1]);
                }
            }
            while options.len() < MIN_OPTIONS {
                options.insert(FU_LADDER[rng.gen_range(0..FU_LADDER.len())]);
            }
        }
        OptionKind::Han => {
            if correct > 1 {
                options.insert(correct - 1);
            }
            if correct < MAX_HAN_OPTION {
                options.insert(correct + 1);
            }
            while options.len() < MIN_OPTIONS {
                options.insert(rng.gen_range(1..=MAX_HAN_OPTION));
            }
        }
        OptionKind::Score => {
            // 正解の±30%の範囲で100点単位
            let range = correct as f64 * 0.3;
            for _ in 0..MAX_SCORE_TRY {
                if options.len() >= MIN_OPTIONS {
                    break;
                }
                let offset = if range > 0.0 {
                    rng.gen_range(-range..=range)
                } else {
                    0.0
                };
                let v = ((correct as f64 + offset) / 100.0).round() as usize * 100;
                options.insert(v.max(MIN_SCORE_OPTION));
            }
            let mut v = correct.max(MIN_SCORE_OPTION);
            while options.len() < MIN_OPTIONS {
                v += 100;
                options.insert(v);
            }
        }
    }

    options.into_iter().collect()
}

#[test]
fn test_generate_options() {
    let mut rng: StdRng = SeedableRng::seed_from_u64(0);
    for _ in 0..100 {
        for &fu in &FU_LADDER {
            let opts = generate_options(&mut rng, fu, OptionKind::Fu);
            assert!(opts.contains(&fu));
            assert!(opts.len() >= MIN_OPTIONS);
            assert!(opts.windows(2).all(|w| w[0] < w[1]));
            assert!(opts.iter().all(|f| FU_LADDER.contains(f)));
        }

        for han in 1..=13 {
            let opts = generate_options(&mut rng, han, OptionKind::Han);
            assert!(opts.contains(&han));
            assert!(opts.len() >= MIN_OPTIONS);
            assert!(opts.windows(2).all(|w| w[0] < w[1]));
        }

        for score in [1000, 1500, 2000, 7700, 11700, 48000] {
            let opts = generate_options(&mut rng, score, OptionKind::Score);
            assert!(opts.contains(&score));
            assert!(opts.len() >= MIN_OPTIONS);
            assert!(opts.windows(2).all(|w| w[0] < w[1]));
            assert!(opts.iter().all(|&s| s >= 1000 && s % 100 == 0));
        }
    }

    // 隣接する値は必ず含まれる
    let opts = generate_options(&mut rng, 30, OptionKind::Fu);
    assert!(opts.contains(&25) && opts.contains(&40));
    let opts = generate_options(&mut rng, 13, OptionKind::Han);
    assert!(opts.contains(&12));
}
