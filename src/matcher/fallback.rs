//! フォールバック補完
//!
//! ルールで埋まらなかった項目を設定の `fallback` セクションで補う。

use super::scoring::round2;
use sock_match_common::{Fallback, MatchDetails, MatchResult, MatchType, ShoeAttributes};

/// 一部でもフォールバックを使ったときの信頼度の係数
pub const PARTIAL_FALLBACK_PENALTY: f64 = 0.8;

/// フォールバック補完前の提案
#[derive(Debug, Clone, Default)]
pub struct DraftRecommendation {
    pub sock_types: Vec<String>,
    pub sock_colors: Vec<String>,
    pub patterns: Vec<String>,
    pub materials: Vec<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub style_tip: Option<String>,
    pub match_type: Option<MatchType>,
    pub confidence: f64,
    pub match_details: MatchDetails,
}

/// 空の項目をフォールバックで補完する
pub fn apply_fallback(draft: DraftRecommendation, fallback: &Fallback) -> MatchResult {
    let needs_fallback = draft.sock_types.is_empty()
        || draft.sock_colors.is_empty()
        || draft.patterns.is_empty()
        || draft.materials.is_empty();

    let confidence = if needs_fallback {
        round2(draft.confidence * PARTIAL_FALLBACK_PENALTY)
    } else {
        draft.confidence
    };

    let materials = if draft.materials.is_empty() {
        vec![fallback.material.clone()]
    } else {
        draft.materials
    };

    let mut match_details = draft.match_details;
    match_details.fallback_used = match_details.fallback_used || needs_fallback;

    MatchResult {
        sock_types: or_fallback(draft.sock_types, &fallback.sock_types),
        sock_colors: or_fallback(draft.sock_colors, &fallback.colors),
        patterns: or_fallback(draft.patterns, &fallback.patterns),
        materials,
        primary_color: draft.primary_color,
        secondary_color: draft.secondary_color,
        style_tip: draft
            .style_tip
            .filter(|tip| !tip.is_empty())
            .unwrap_or_else(|| fallback.style_tip_text()),
        match_type: draft.match_type.unwrap_or(MatchType::Fallback),
        confidence,
        match_details,
        error: None,
    }
}

/// 照合に失敗したときの結果（フォールバックのみ、信頼度 0.0）
pub fn failure_result(attributes: &ShoeAttributes, fallback: &Fallback, reason: &str) -> MatchResult {
    MatchResult {
        sock_types: fallback.sock_types.clone(),
        sock_colors: fallback.colors.clone(),
        patterns: fallback.patterns.clone(),
        materials: vec![fallback.material.clone()],
        primary_color: attributes.primary_color().to_string(),
        secondary_color: attributes.secondary_color().to_string(),
        style_tip: fallback.style_tip_text(),
        match_type: MatchType::Fallback,
        confidence: 0.0,
        match_details: MatchDetails {
            fallback_used: true,
            reason: Some(reason.to_string()),
            ..Default::default()
        },
        error: Some(reason.to_string()),
    }
}

fn or_fallback(values: Vec<String>, fallback: &[String]) -> Vec<String> {
    if values.is_empty() {
        fallback.to_vec()
    } else {
        values
    }
}
