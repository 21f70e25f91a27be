#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::useless_format)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::single_match)]
#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod generate;
pub mod hand;
pub mod model;
pub mod session;
pub mod stats;
pub mod util;
pub mod validate;

pub use error::{ErrorKind, QuizError, QuizResult};
pub use generate::ProblemGenerator;
pub use hand::{format_score, HandScore, ScoringEngine};
pub use session::QuizSession;
pub use stats::{calculate_extended_statistics, ExtendedStatistics};
