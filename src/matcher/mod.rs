//! 靴下マッチングエンジン
//!
//! ## 処理フロー
//! 1. 季節の決定（未指定なら現在の月から）
//! 2. 特別な組み合わせ（一致したら即確定、他のルールは評価しない）
//! 3. 靴カテゴリ・色・デザインの各ルールを独立に照合
//! 4. 信頼度の算出とフォールバック補完
//!
//! ルール設定は読み込み後に変更しないため、`Arc` で複数のマッチャー・スレッド間で共有できる。

mod fallback;
mod rule_match;
mod scoring;
mod style;

pub use fallback::{apply_fallback, failure_result, DraftRecommendation, PARTIAL_FALLBACK_PENALTY};
pub use rule_match::{
    ShoeMatch, COLOR_RULE_THRESHOLD, DESIGN_RULE_THRESHOLD, SPECIAL_COMBO_THRESHOLD,
};
pub use scoring::{confidence, round2, SPECIAL_COMBO_CONFIDENCE};
pub use style::{special_combo_tip, style_tip, NO_MATCH_TIP};

use crate::error::Result;
use crate::rules::{load_rules, load_rules_strict};
use chrono::Datelike;
use rayon::prelude::*;
use sock_match_common::{
    ComboRecommendations, MatchDetails, MatchResult, MatchType, RuleConfig, Season, ShoeAttributes,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct StyleMatcher {
    config: Arc<RuleConfig>,
}

impl StyleMatcher {
    pub fn new(config: Arc<RuleConfig>) -> Self {
        Self { config }
    }

    /// ルール設定ファイルから作成（欠落セクションは警告のみ）
    pub fn from_path(path: &Path) -> Result<Self> {
        let loaded = load_rules(path)?;
        Ok(Self::new(Arc::new(loaded.config)))
    }

    /// ルール設定ファイルから作成（欠落セクションはエラー）
    pub fn from_path_strict(path: &Path) -> Result<Self> {
        let config = load_rules_strict(path)?;
        Ok(Self::new(Arc::new(config)))
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// 靴の特徴から靴下を提案する
    ///
    /// 失敗してもエラーは返さず、フォールバックのみの結果（信頼度 0.0）に変換する。
    pub fn recommend(&self, attributes: &ShoeAttributes) -> MatchResult {
        match self.try_recommend(attributes) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "マッチングに失敗しました。フォールバックを返します");
                failure_result(attributes, &self.config.fallback, &e.to_string())
            }
        }
    }

    /// 複数の靴をまとめて照合（入力順を保持）
    pub fn recommend_batch(&self, attributes: &[ShoeAttributes]) -> Vec<MatchResult> {
        attributes
            .par_iter()
            .map(|attrs| self.recommend(attrs))
            .collect()
    }

    /// フォールバック補完（設定の fallback セクションを使用）
    pub fn apply_fallback(&self, draft: DraftRecommendation) -> MatchResult {
        apply_fallback(draft, &self.config.fallback)
    }

    fn try_recommend(&self, attributes: &ShoeAttributes) -> Result<MatchResult> {
        let season = resolve_season(attributes);
        let mut details = MatchDetails::default();

        if let Some(combo) = self.match_special(&attributes.colors)? {
            details.special_combo_matched = true;
            details.rules_applied = vec!["special_combination".into()];
            tracing::debug!(colors = ?attributes.colors, "特別な組み合わせに一致");
            return Ok(special_result(attributes, combo, &season, details));
        }

        let shoe_match = self.match_shoe(
            attributes.category.as_ref(),
            attributes.sub_category.as_ref(),
            &attributes.gender,
        );
        let color_match = self.match_color(&attributes.colors);
        let design_match = self.match_design(&attributes.design);

        if shoe_match.is_some() {
            details.shoe_rule_matched = true;
            details.rules_applied.push("shoe_rule".into());
        }
        if color_match.is_some() {
            details.color_rule_matched = true;
            details.rules_applied.push("color_rule".into());
        }
        if design_match.is_some() {
            details.design_rule_matched = true;
            details.rules_applied.push("design_rule".into());
        }

        let confidence = confidence(
            shoe_match.as_ref().map(|m| &m.rule),
            color_match,
            design_match,
        );
        debug_assert!((0.0..=1.0).contains(&confidence));

        tracing::debug!(
            rules_applied = ?details.rules_applied,
            confidence,
            "標準ルールで照合"
        );

        let shoe_materials = shoe_match.iter().flat_map(|m| m.rule.material.iter());
        let design_materials = design_match.iter().flat_map(|rule| rule.material.iter());
        let mut seen = HashSet::new();
        let materials: Vec<String> = shoe_materials
            .chain(design_materials)
            .filter(|material| seen.insert(material.as_str()))
            .cloned()
            .collect();

        let draft = DraftRecommendation {
            sock_types: shoe_match
                .as_ref()
                .map(|m| m.rule.recommended_socks.clone())
                .unwrap_or_default(),
            sock_colors: color_match
                .map(|rule| rule.recommended_colors.clone())
                .unwrap_or_default(),
            patterns: design_match
                .map(|rule| rule.recommended_patterns.clone())
                .unwrap_or_default(),
            materials,
            primary_color: attributes.primary_color().to_string(),
            secondary_color: attributes.secondary_color().to_string(),
            style_tip: Some(style_tip(
                attributes,
                &season,
                shoe_match.as_ref(),
                color_match,
                design_match,
            )),
            match_type: Some(MatchType::StandardRules),
            confidence,
            match_details: details,
        };

        Ok(self.apply_fallback(draft))
    }
}

/// 季節を決定（指定がなければ現在の月から）
pub fn resolve_season(attributes: &ShoeAttributes) -> String {
    attributes
        .season
        .as_deref()
        .map(str::trim)
        .filter(|season| !season.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| current_season().to_string())
}

/// 現在の季節
pub fn current_season() -> Season {
    Season::from_month(chrono::Local::now().month())
}

/// 特別な組み合わせの結果（フォールバック補完はしない）
fn special_result(
    attributes: &ShoeAttributes,
    combo: &ComboRecommendations,
    season: &str,
    details: MatchDetails,
) -> MatchResult {
    MatchResult {
        sock_types: combo.sock_types.clone(),
        sock_colors: combo.sock_colors.clone(),
        patterns: combo.patterns.clone(),
        materials: combo.materials.clone(),
        primary_color: attributes.primary_color().to_string(),
        secondary_color: attributes.secondary_color().to_string(),
        style_tip: combo
            .style_tip
            .clone()
            .unwrap_or_else(|| special_combo_tip(&attributes.colors, season)),
        match_type: MatchType::SpecialCombo,
        confidence: SPECIAL_COMBO_CONFIDENCE,
        match_details: details,
        error: None,
    }
}
