use super::*;

// 点数計算のルール設定
// エンジンの生成時に渡し,以降は変更しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub red_dora: bool, // 赤ドラ有無
    pub kuitan: bool,   // 喰いタン有無
    pub atozuke: bool,  // 後付け有無
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            red_dora: true,
            kuitan: true,
            atozuke: true,
        }
    }
}

#[test]
fn test_settings_json() {
    let s: RuleSettings = serde_json::from_str(r#"{"red_dora": false}"#).unwrap();
    assert_eq!(
        s,
        RuleSettings {
            red_dora: false,
            kuitan: true,
            atozuke: true,
        }
    );
}
