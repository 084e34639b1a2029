//! ルール設定の型定義
//!
//! 設定ファイル（JSON）のトップレベルキー:
//! `shoe_rules` / `color_rules` / `design_rules` / `special_combinations` / `fallback`
//!
//! 個々のルールのフィールドはすべて省略可能で、欠けたものや型の合わないものは空として扱う。
//! オブジェクトでないルールは読み飛ばし、`ParseReport::skipped` に記録する。

use crate::error::{Error, Result};
use crate::lenient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 欠落時に警告を出す必須セクション
pub const REQUIRED_SECTIONS: [&str; 3] = ["shoe_rules", "color_rules", "fallback"];

/// 単一の文字列またはリスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    /// 大文字小文字を区別せずに含まれるか
    pub fn contains_ignore_case(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        self.as_slice().iter().any(|v| v.to_lowercase() == value)
    }
}

/// 優先度を持つルール
pub trait RulePriority {
    fn priority(&self) -> Option<f64>;
}

/// 靴カテゴリのルール
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoeRule {
    #[serde(deserialize_with = "lenient::string")]
    pub category: String,
    #[serde(deserialize_with = "lenient::one_or_many")]
    pub subcategories: OneOrMany,
    #[serde(deserialize_with = "lenient::one_or_many")]
    pub gender: OneOrMany,
    #[serde(deserialize_with = "lenient::string_list")]
    pub recommended_socks: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub material: Vec<String>,
    #[serde(deserialize_with = "lenient::priority")]
    pub priority: Option<f64>,
}

impl Default for ShoeRule {
    fn default() -> Self {
        Self {
            category: String::new(),
            subcategories: OneOrMany::default(),
            gender: OneOrMany::One("unisex".into()),
            recommended_socks: Vec::new(),
            material: Vec::new(),
            priority: None,
        }
    }
}

impl RulePriority for ShoeRule {
    fn priority(&self) -> Option<f64> {
        self.priority
    }
}

/// 色のルール
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRule {
    #[serde(deserialize_with = "lenient::string")]
    pub primary: String,
    #[serde(deserialize_with = "lenient::optional_one_or_many")]
    pub secondary: Option<OneOrMany>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub recommended_colors: Vec<String>,
    #[serde(deserialize_with = "lenient::priority")]
    pub priority: Option<f64>,
}

impl RulePriority for ColorRule {
    fn priority(&self) -> Option<f64> {
        self.priority
    }
}

/// デザイン（柄）のルール
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignRule {
    #[serde(deserialize_with = "lenient::string")]
    pub design: String,
    #[serde(deserialize_with = "lenient::string_list")]
    pub recommended_patterns: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub material: Vec<String>,
    #[serde(deserialize_with = "lenient::priority")]
    pub priority: Option<f64>,
}

impl RulePriority for DesignRule {
    fn priority(&self) -> Option<f64> {
        self.priority
    }
}

/// 特別な組み合わせ（1色または2色）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialCombination {
    #[serde(deserialize_with = "lenient::string_list")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub recommendations: ComboRecommendations,
}

/// 特別な組み合わせの提案内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboRecommendations {
    #[serde(deserialize_with = "lenient::string_list")]
    pub sock_types: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub sock_colors: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub patterns: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub materials: Vec<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub style_tip: Option<String>,
}

/// どのルールにも一致しなかった項目の既定値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallback {
    #[serde(deserialize_with = "lenient::string_list")]
    pub sock_types: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub patterns: Vec<String>,
    #[serde(deserialize_with = "fallback_material")]
    pub material: String,
    /// 単一の文字列も1要素として読む
    #[serde(deserialize_with = "lenient::string_list")]
    pub style_tip: Vec<String>,
}

impl Default for Fallback {
    fn default() -> Self {
        Self {
            sock_types: Vec::new(),
            colors: Vec::new(),
            patterns: Vec::new(),
            material: DEFAULT_MATERIAL.into(),
            style_tip: Vec::new(),
        }
    }
}

impl Fallback {
    /// スタイルのヒントを1つの文にまとめる
    pub fn style_tip_text(&self) -> String {
        self.style_tip.join(" ")
    }
}

/// `fallback.material` が未指定または空のときの値
pub const DEFAULT_MATERIAL: &str = "default_material";

fn fallback_material<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    let material = lenient::string(deserializer)?;
    if material.trim().is_empty() {
        Ok(DEFAULT_MATERIAL.into())
    } else {
        Ok(material)
    }
}

/// ルール設定全体
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleConfig {
    pub shoe_rules: Vec<ShoeRule>,
    pub color_rules: Vec<ColorRule>,
    pub design_rules: Vec<DesignRule>,
    pub special_combinations: Vec<SpecialCombination>,
    pub fallback: Fallback,
}

/// 読み込み時に見つかった設定の不備
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// 存在しなかった必須セクション
    pub missing_sections: Vec<&'static str>,
    /// 読み飛ばしたルールや型の合わないセクション（例: `color_rules[2]`）
    pub skipped: Vec<String>,
}

impl RuleConfig {
    /// JSON文字列から読み込む
    ///
    /// JSONとして不正、またはトップレベルがオブジェクトでない場合のみエラー。
    /// セクションが配列でない、ルールがオブジェクトでない場合はその部分だけを空として扱う。
    pub fn parse(json: &str) -> Result<(Self, ParseReport)> {
        let value: Value = serde_json::from_str(json)?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::Config("トップレベルはオブジェクトである必要があります".into()))?;

        let mut report = ParseReport {
            missing_sections: REQUIRED_SECTIONS
                .iter()
                .copied()
                .filter(|section| !object.contains_key(*section))
                .collect(),
            skipped: Vec::new(),
        };

        let fallback = match object.get("fallback") {
            None => Fallback::default(),
            Some(value @ Value::Object(_)) => {
                Fallback::deserialize(value).unwrap_or_else(|_| {
                    report.skipped.push("fallback".into());
                    Fallback::default()
                })
            }
            Some(_) => {
                report.skipped.push("fallback".into());
                Fallback::default()
            }
        };

        let config = Self {
            shoe_rules: section(object, "shoe_rules", &mut report.skipped),
            color_rules: section(object, "color_rules", &mut report.skipped),
            design_rules: section(object, "design_rules", &mut report.skipped),
            special_combinations: section(object, "special_combinations", &mut report.skipped),
            fallback,
        };

        Ok((config, report))
    }

    /// ルール件数の合計
    pub fn rule_count(&self) -> usize {
        self.shoe_rules.len()
            + self.color_rules.len()
            + self.design_rules.len()
            + self.special_combinations.len()
    }
}

/// ルールの配列を1件ずつ読み込む
fn section<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &str,
    skipped: &mut Vec<String>,
) -> Vec<T> {
    let items = match object.get(key) {
        None => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            skipped.push(key.to_string());
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                skipped.push(format!("{}[{}]", key, index));
                return None;
            }
            match T::deserialize(item) {
                Ok(rule) => Some(rule),
                Err(_) => {
                    skipped.push(format!("{}[{}]", key, index));
                    None
                }
            }
        })
        .collect()
}
