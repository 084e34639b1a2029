//! 入出力の型定義
//!
//! - ShoeAttributes: 上流（画像解析・分類モデル）から渡される靴の特徴
//! - MatchResult: 靴下の提案結果（フラットなJSONとして返す）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 分類モデルのラベルと信頼度（0〜100）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeWithConfidence {
    pub label: String,
    pub confidence: f64,
}

impl AttributeWithConfidence {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// 靴の特徴
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoeAttributes {
    pub height: String,                               // high-top / mid-top / low-top
    pub colors: Vec<String>,                          // 先頭が主色、2番目が副色
    pub design: String,                               // solid / striped / patterned
    pub gender: String,
    pub season: Option<String>,                       // 未指定なら照合時に現在の月から決定
    pub category: Option<AttributeWithConfidence>,
    pub sub_category: Option<AttributeWithConfidence>,
}

impl Default for ShoeAttributes {
    fn default() -> Self {
        Self {
            height: String::new(),
            colors: Vec::new(),
            design: String::new(),
            gender: "unisex".into(),
            season: None,
            category: None,
            sub_category: None,
        }
    }
}

impl ShoeAttributes {
    /// 主色（色がなければ空文字列）
    pub fn primary_color(&self) -> &str {
        self.colors.first().map(String::as_str).unwrap_or("")
    }

    /// 副色（2色目がなければ空文字列）
    pub fn secondary_color(&self) -> &str {
        self.colors.get(1).map(String::as_str).unwrap_or("")
    }
}

/// 季節
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// 月（1〜12）から季節を決定
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 照合の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    SpecialCombo,
    StandardRules,
    Fallback,
    Error,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::SpecialCombo => "special_combo",
            MatchType::StandardRules => "standard_rules",
            MatchType::Fallback => "fallback",
            MatchType::Error => "error",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// どのルールが一致したか
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchDetails {
    pub shoe_rule_matched: bool,
    pub color_rule_matched: bool,
    pub design_rule_matched: bool,
    pub special_combo_matched: bool,
    pub rules_applied: Vec<String>,
    /// いずれかの項目をフォールバックで補完した
    pub fallback_used: bool,
    /// 照合失敗時の理由
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// 靴下の提案結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub sock_types: Vec<String>,
    pub sock_colors: Vec<String>,
    pub patterns: Vec<String>,
    pub materials: Vec<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub style_tip: String,
    pub match_type: MatchType,
    /// 0.0〜1.0（小数第2位で丸め）
    pub confidence: f64,
    pub match_details: MatchDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shoe_attributes_default_gender() {
        let attrs: ShoeAttributes = serde_json::from_str(r#"{"colors": ["black"]}"#).unwrap();
        assert_eq!(attrs.gender, "unisex");
        assert_eq!(attrs.primary_color(), "black");
        assert_eq!(attrs.secondary_color(), "");
        assert!(attrs.season.is_none());
    }

    #[test]
    fn test_shoe_attributes_deserialize_classifier_labels() {
        let json = r#"{
            "height": "high-top",
            "colors": ["white", "red"],
            "design": "striped",
            "gender": "women",
            "category": {"label": "Sneakers", "confidence": 92.5},
            "sub_category": {"label": "Athletic", "confidence": 71.0}
        }"#;
        let attrs: ShoeAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.secondary_color(), "red");
        assert_eq!(attrs.category.unwrap().label, "Sneakers");
        assert_eq!(attrs.sub_category.unwrap().confidence, 71.0);
    }

    #[test]
    fn test_season_from_month() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Fall);
        assert_eq!(Season::from_month(11).to_string(), "fall");
    }

    #[test]
    fn test_match_type_serialize() {
        let json = serde_json::to_string(&MatchType::SpecialCombo).unwrap();
        assert_eq!(json, "\"special_combo\"");
        let parsed: MatchType = serde_json::from_str("\"standard_rules\"").unwrap();
        assert_eq!(parsed, MatchType::StandardRules);
    }

    #[test]
    fn test_match_result_omits_empty_error() {
        let result = MatchResult {
            sock_types: vec!["crew".into()],
            sock_colors: vec![],
            patterns: vec![],
            materials: vec![],
            primary_color: "black".into(),
            secondary_color: String::new(),
            style_tip: String::new(),
            match_type: MatchType::Fallback,
            confidence: 0.0,
            match_details: MatchDetails::default(),
            error: None,
        };
        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"match_type\":\"fallback\""));
        assert!(!json.contains("\"error\""));
        assert!(!json.contains("\"reason\""));
    }
}
