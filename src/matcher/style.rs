//! スタイルのヒント文の生成

use super::ShoeMatch;
use sock_match_common::{ColorRule, DesignRule, ShoeAttributes};

/// どのルールにも一致しなかったときの文
pub const NO_MATCH_TIP: &str =
    "No direct style rules matched; fallback suggestions provided for versatility.";

/// 一致したルールごとに一文ずつ組み立てる
pub fn style_tip(
    attributes: &ShoeAttributes,
    season: &str,
    shoe_match: Option<&ShoeMatch>,
    color_match: Option<&ColorRule>,
    design_match: Option<&DesignRule>,
) -> String {
    let mut parts = Vec::new();

    if let Some(shoe) = shoe_match {
        let label = attributes
            .sub_category
            .as_ref()
            .or(attributes.category.as_ref())
            .map(|attr| attr.label.as_str())
            .unwrap_or(shoe.rule.category.as_str());
        parts.push(format!("chosen to complement your '{}' shoes", label));
    }
    if color_match.is_some() {
        let primary = match attributes.primary_color() {
            "" => "unknown color",
            color => color,
        };
        parts.push(format!("coordinated with the color '{}'", primary));
    }
    if design_match.is_some() {
        parts.push(format!("styled to match the '{}' design theme", attributes.design));
    }

    if parts.is_empty() {
        return NO_MATCH_TIP.to_string();
    }

    format!(
        "Suggested socks are {}; ideal for the {} season.",
        parts.join(", "),
        season
    )
}

/// 特別な組み合わせ用（設定に style_tip がない場合）
pub fn special_combo_tip(colors: &[String], season: &str) -> String {
    let pairing = colors
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" and ");
    format!(
        "A curated pairing for '{}' shoes; ideal for the {} season.",
        pairing, season
    )
}
