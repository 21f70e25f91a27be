// 点数計算クイズのデータモデル
mod define;
mod hand;
mod history;
mod meld;
mod problem;
mod setting;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use hand::*;
pub use history::*;
pub use meld::*;
pub use problem::*;
pub use setting::*;
pub use tile::*;
