#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::useless_format)]
#![allow(clippy::collapsible_else_if)]

mod app;

use mahjong_quiz::error;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "C" => {
            // Calculator (点数計算モード)
            app::CalculatorApp::new(args2).run();
        }
        "G" => {
            // Generator (問題生成モード)
            app::GeneratorApp::new(args2).run();
        }
        "Q" => {
            // Quiz (出題モード)
            app::QuizApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
