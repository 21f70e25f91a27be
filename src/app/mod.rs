// mainから直接呼び出すアプリケーションの動作モード(C, G, Q)のモジュール

mod calculator;
mod generator;
mod quiz;

pub use calculator::CalculatorApp;
pub use generator::GeneratorApp;
pub use quiz::QuizApp;

use mahjong_quiz::model::RuleSettings;
use mahjong_quiz::util::misc::Res;
use mahjong_quiz::{info, warn};

fn read_rule_settings(path: &str) -> Res<RuleSettings> {
    let s = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&s)?)
}

// ファイルが存在しないか不正な場合はデフォルト設定
pub fn load_rule_settings(path: &str) -> RuleSettings {
    if path.is_empty() {
        return RuleSettings::default();
    }

    match read_rule_settings(path) {
        Ok(s) => {
            info!("rule settings loaded: {:?}", s);
            s
        }
        Err(e) => {
            warn!("failed to load rule settings '{}': {}, using defaults", path, e);
            RuleSettings::default()
        }
    }
}

#[test]
fn test_load_rule_settings() {
    let path = std::env::temp_dir().join("mahjong_quiz_settings_test.json");
    std::fs::write(&path, r#"{"kuitan": false, "atozuke": false}"#).unwrap();
    let s = load_rule_settings(path.to_str().unwrap());
    assert!(s.red_dora);
    assert!(!s.kuitan);
    assert!(!s.atozuke);

    std::fs::write(&path, "{broken").unwrap();
    assert_eq!(load_rule_settings(path.to_str().unwrap()), RuleSettings::default());
    std::fs::remove_file(&path).ok();

    assert_eq!(load_rule_settings("no/such/file.json"), RuleSettings::default());
}
