//! 上流（画像解析・属性分類モデル）の出力を ShoeAttributes に変換する
//!
//! 分類モデルのラベルは信頼度が閾値（既定 60%）以上のものだけを採用する。

use crate::config::Config;
use crate::error::{Result, SockMatchError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sock_match_common::{AttributeWithConfidence, ShoeAttributes};
use std::collections::BTreeMap;

/// レポートに含める補助的な分類項目
pub const DESCRIPTOR_KEYS: [&str; 5] = ["Material", "Closure", "ToeStyle", "HeelHeight", "Insole"];

/// 上流の解析結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamAnalysis {
    pub colors: Vec<String>,
    pub height: Option<String>,
    pub design: Option<String>,
    pub model_properties: BTreeMap<String, PredictedLabel>,
    pub error: Option<String>,
}

/// 分類モデルの予測（信頼度は "94.6" / "94.6%" / 数値）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictedLabel {
    pub label: String,
    pub confidence: RawConfidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawConfidence {
    Number(f64),
    Text(String),
}

impl Default for RawConfidence {
    fn default() -> Self {
        RawConfidence::Text("0".into())
    }
}

impl RawConfidence {
    /// パーセント値として解釈（解釈できなければ None）
    pub fn percent(&self) -> Option<f64> {
        lazy_static::lazy_static! {
            static ref PERCENT_RE: Regex = Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*%?\s*$").unwrap();
        }

        match self {
            RawConfidence::Number(value) => Some(*value),
            RawConfidence::Text(text) => PERCENT_RE
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok()),
        }
    }
}

/// 変換オプション
#[derive(Debug, Clone)]
pub struct IntakeOptions {
    pub min_label_confidence: f64,
    pub default_gender: String,
}

impl Default for IntakeOptions {
    fn default() -> Self {
        Self {
            min_label_confidence: 60.0,
            default_gender: "unisex".into(),
        }
    }
}

impl From<&Config> for IntakeOptions {
    fn from(config: &Config) -> Self {
        Self {
            min_label_confidence: config.min_label_confidence,
            default_gender: config.default_gender.clone(),
        }
    }
}

/// 変換結果
#[derive(Debug, Clone)]
pub struct ShoeProfile {
    pub attributes: ShoeAttributes,
    /// 採用された補助的な分類項目（Material など）
    pub descriptors: BTreeMap<String, AttributeWithConfidence>,
}

/// 信頼度が閾値以上のラベルだけを取り出す
pub fn safe_label(
    properties: &BTreeMap<String, PredictedLabel>,
    key: &str,
    min_confidence: f64,
) -> Option<AttributeWithConfidence> {
    let predicted = properties.get(key)?;
    let label = predicted.label.trim();
    let confidence = predicted.confidence.percent().unwrap_or(0.0);

    if confidence >= min_confidence && !label.is_empty() && !label.eq_ignore_ascii_case("nan") {
        Some(AttributeWithConfidence::new(label, confidence))
    } else {
        None
    }
}

/// ラベルの表記を統一（小文字、アンダースコアを空白に、連続空白を1つに）
pub fn normalize_label(value: &str) -> String {
    lazy_static::lazy_static! {
        static ref SPACES_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let lowered = value.to_lowercase().replace('_', " ");
    SPACES_RE.replace_all(lowered.trim(), " ").into_owned()
}

/// 上流の解析結果を靴の特徴に変換
pub fn to_shoe_profile(analysis: &UpstreamAnalysis, options: &IntakeOptions) -> Result<ShoeProfile> {
    if let Some(error) = analysis.error.as_deref().filter(|e| !e.is_empty()) {
        return Err(SockMatchError::UpstreamFailure(error.to_string()));
    }

    let properties = &analysis.model_properties;
    let min = options.min_label_confidence;

    let gender = safe_label(properties, "Gender", min)
        .map(|g| g.label.to_lowercase())
        .unwrap_or_else(|| options.default_gender.to_lowercase());

    let colors: Vec<String> = analysis
        .colors
        .iter()
        .map(|c| normalize_label(c))
        .filter(|c| !c.is_empty())
        .collect();

    let attributes = ShoeAttributes {
        height: analysis
            .height
            .as_deref()
            .map(normalize_label)
            .unwrap_or_else(|| "low".into()),
        colors,
        design: analysis
            .design
            .as_deref()
            .map(normalize_label)
            .unwrap_or_else(|| "solid".into()),
        gender,
        season: None,
        category: safe_label(properties, "Category", min),
        sub_category: safe_label(properties, "SubCategory", min),
    };

    let descriptors = DESCRIPTOR_KEYS
        .iter()
        .filter_map(|key| safe_label(properties, key, min).map(|attr| (key.to_string(), attr)))
        .collect();

    tracing::debug!(
        category = ?attributes.category.as_ref().map(|c| &c.label),
        sub_category = ?attributes.sub_category.as_ref().map(|c| &c.label),
        gender = %attributes.gender,
        "上流の解析結果を変換しました"
    );

    Ok(ShoeProfile {
        attributes,
        descriptors,
    })
}
