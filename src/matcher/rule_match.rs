//! 個別ルールの照合
//!
//! - 特別な組み合わせ・靴カテゴリ・デザイン: 設定順で最初に一致したものを採用
//! - 色: 全ルールを採点して最高点を採用

use super::StyleMatcher;
use crate::error::{Result, SockMatchError};
use serde::{Deserialize, Serialize};
use sock_match_common::{
    fuzzy, AttributeWithConfidence, ColorRule, ComboRecommendations, DesignRule, ShoeRule,
};

/// 特別な組み合わせの色一致の閾値（これを超えること）
pub const SPECIAL_COMBO_THRESHOLD: u8 = 70;
/// 色ルールの主色の閾値（これ未満は除外）
pub const COLOR_RULE_THRESHOLD: u8 = 70;
/// デザインルールの閾値（これを超えること）
pub const DESIGN_RULE_THRESHOLD: u8 = 80;

const PRIMARY_WEIGHT: f64 = 0.7;
const SECONDARY_WEIGHT: f64 = 0.3;

/// 一致した靴カテゴリのルールと、採用した性別
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeMatch {
    #[serde(flatten)]
    pub rule: ShoeRule,
    pub selected_gender: String,
}

impl StyleMatcher {
    /// 特別な組み合わせを照合
    ///
    /// 色が1つも指定されていない組み合わせは設定不備としてエラーにする。
    pub fn match_special(&self, colors: &[String]) -> Result<Option<&ComboRecommendations>> {
        let primary = colors.first().map(String::as_str).unwrap_or("");
        let secondary = colors.get(1).map(String::as_str).unwrap_or("");

        for (index, combo) in self.config().special_combinations.iter().enumerate() {
            let Some(first) = combo.colors.first() else {
                return Err(SockMatchError::MatchingFailure(format!(
                    "special_combinations[{}] に色が指定されていません",
                    index
                )));
            };

            if !fuzzy::exceeds(first, primary, SPECIAL_COMBO_THRESHOLD) {
                continue;
            }

            let second_matched = match combo.colors.get(1) {
                Some(second) => fuzzy::exceeds(second, secondary, SPECIAL_COMBO_THRESHOLD),
                None => true,
            };

            if second_matched {
                return Ok(Some(&combo.recommendations));
            }
        }

        Ok(None)
    }

    /// 靴カテゴリのルールを照合
    ///
    /// カテゴリとサブカテゴリの両方がある場合のみ照合する。
    pub fn match_shoe(
        &self,
        category: Option<&AttributeWithConfidence>,
        sub_category: Option<&AttributeWithConfidence>,
        gender: &str,
    ) -> Option<ShoeMatch> {
        let (category, sub_category) = (category?, sub_category?);
        let category_label = category.label.to_lowercase();
        let gender = gender.to_lowercase();

        self.config()
            .shoe_rules
            .iter()
            .find(|rule| {
                rule.category.to_lowercase() == category_label
                    && rule.subcategories.contains_ignore_case(&sub_category.label)
            })
            .map(|rule| {
                let selected_gender = if rule.gender.contains_ignore_case(&gender) {
                    gender.clone()
                } else {
                    "unisex".to_string()
                };
                ShoeMatch {
                    rule: rule.clone(),
                    selected_gender,
                }
            })
    }

    /// 色のルールを照合（最高点のルール、同点なら先のもの）
    pub fn match_color(&self, colors: &[String]) -> Option<&ColorRule> {
        let primary = colors.first().map(String::as_str).unwrap_or("");
        let secondary = colors.get(1);

        let mut best_match = None;
        let mut highest_score = 0.0;

        for rule in &self.config().color_rules {
            let primary_score = fuzzy::ratio(&rule.primary, primary);
            if primary_score < COLOR_RULE_THRESHOLD {
                continue;
            }

            let secondary_score = match (&rule.secondary, secondary) {
                (Some(candidates), Some(actual)) => candidates
                    .as_slice()
                    .iter()
                    .map(|candidate| fuzzy::ratio(candidate, actual))
                    .max()
                    .unwrap_or(0),
                _ => 0,
            };

            let total_score = f64::from(primary_score) * PRIMARY_WEIGHT
                + f64::from(secondary_score) * SECONDARY_WEIGHT
                + rule.priority.unwrap_or(0.0);

            if total_score > highest_score {
                highest_score = total_score;
                best_match = Some(rule);
            }
        }

        best_match
    }

    /// デザインのルールを照合
    pub fn match_design(&self, design: &str) -> Option<&DesignRule> {
        self.config()
            .design_rules
            .iter()
            .find(|rule| fuzzy::exceeds(&rule.design, design, DESIGN_RULE_THRESHOLD))
    }
}
