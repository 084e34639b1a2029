//! 信頼度の算出
//!
//! 一致したカテゴリの重みだけで正規化する（1つだけ一致して優先度が 5 以上なら 1.0）。

use sock_match_common::{ColorRule, DesignRule, RulePriority, ShoeRule};

const SHOE_WEIGHT: f64 = 0.4;
const COLOR_WEIGHT: f64 = 0.4;
const DESIGN_WEIGHT: f64 = 0.2;

/// この優先度で寄与が最大になる
const FULL_PRIORITY: f64 = 5.0;
/// 優先度未指定のルールの扱い
const DEFAULT_PRIORITY: f64 = 1.0;

/// 特別な組み合わせに一致したときの固定値
pub const SPECIAL_COMBO_CONFIDENCE: f64 = 0.85;

/// 一致したルールから信頼度（0.0〜1.0）を算出
pub fn confidence(
    shoe_match: Option<&ShoeRule>,
    color_match: Option<&ColorRule>,
    design_match: Option<&DesignRule>,
) -> f64 {
    let components = [
        (shoe_match.map(RulePriority::priority), SHOE_WEIGHT),
        (color_match.map(RulePriority::priority), COLOR_WEIGHT),
        (design_match.map(RulePriority::priority), DESIGN_WEIGHT),
    ];

    let (score, total_weight) = components
        .iter()
        .filter_map(|(priority, weight)| priority.map(|p| (priority_factor(p), *weight)))
        .fold((0.0, 0.0), |(score, total), (factor, weight)| {
            (score + weight * factor, total + weight)
        });

    if total_weight > 0.0 {
        round2(score / total_weight)
    } else {
        0.0
    }
}

fn priority_factor(priority: Option<f64>) -> f64 {
    let factor = priority.unwrap_or(DEFAULT_PRIORITY) / FULL_PRIORITY;
    if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    }
}

/// 小数第2位で丸める
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
