// 手牌の役や点数計算を行うモジュール
mod engine;
mod parse;
mod point;
mod win;
mod yaku;

pub use self::{
    engine::{HandScore, ScoringEngine, YakuHan},
    parse::Wait,
    point::{calc_points, calc_score, format_score, get_score_title},
    win::{calc_tiles_to_normal_win, is_chiitoitsu_win, is_kokushimusou_win, is_normal_win},
};
