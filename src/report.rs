//! 提案レポート
//!
//! 上流の解析結果 → 靴の特徴 → 照合結果 を1つのレスポンスにまとめる。
//! 変換に失敗した場合は `match_type = "error"` でフォールバックの提案を返す。

use crate::error::Result;
use crate::intake::{to_shoe_profile, IntakeOptions, ShoeProfile, UpstreamAnalysis};
use crate::matcher::{resolve_season, StyleMatcher};
use serde::{Deserialize, Serialize};
use sock_match_common::{Fallback, MatchDetails, MatchResult, MatchType};
use std::collections::BTreeMap;
use std::path::Path;

/// 提案レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub shoe_analysis: Option<ShoeAnalysis>,
    pub recommendations: Recommendations,
    pub metadata: ReportMetadata,
    pub style_tip: Option<String>,
    pub error: Option<String>,
}

/// 靴の解析結果のまとめ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeAnalysis {
    pub category: String,
    pub sub_category: String,
    pub gender: String,
    pub height: String,
    pub primary_color: String,
    pub accent_color: Option<String>,
    pub secondary_color: Option<String>,
    pub design: String,
    pub season: String,
    #[serde(default)]
    pub descriptors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub types: Vec<String>,
    pub colors: Vec<String>,
    pub patterns: Vec<String>,
    pub materials: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub match_type: MatchType,
    pub confidence: f64,
    pub season: Option<String>,
    pub match_details: Option<MatchDetails>,
    pub fallback_used: bool,
}

/// フォルダ単位の出力の1件
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub file_name: String,
    #[serde(flatten)]
    pub report: RecommendationReport,
}

/// 上流の解析結果から提案レポートを作成
pub fn build_report(
    matcher: &StyleMatcher,
    analysis: &UpstreamAnalysis,
    options: &IntakeOptions,
) -> RecommendationReport {
    match to_shoe_profile(analysis, options) {
        Ok(profile) => success_report(matcher, profile),
        Err(e) => {
            tracing::error!(error = %e, "提案の作成に失敗しました");
            error_report(&matcher.config().fallback, &e.to_string())
        }
    }
}

/// JSONファイルを読み込んで提案レポートを作成
///
/// 読み込み・パースの失敗もエラーレポートとして返す。
pub fn report_for_file(
    matcher: &StyleMatcher,
    path: &Path,
    options: &IntakeOptions,
) -> RecommendationReport {
    match read_analysis(path) {
        Ok(analysis) => build_report(matcher, &analysis, options),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "解析結果を読み込めません");
            error_report(&matcher.config().fallback, &e.to_string())
        }
    }
}

fn read_analysis(path: &Path) -> Result<UpstreamAnalysis> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn success_report(matcher: &StyleMatcher, profile: ShoeProfile) -> RecommendationReport {
    let ShoeProfile {
        mut attributes,
        descriptors,
    } = profile;

    let season = resolve_season(&attributes);
    attributes.season = Some(season.clone());

    let result = matcher.recommend(&attributes);

    let shoe_analysis = ShoeAnalysis {
        category: label_or_unknown(attributes.category.as_ref().map(|c| c.label.as_str())),
        sub_category: label_or_unknown(attributes.sub_category.as_ref().map(|c| c.label.as_str())),
        gender: attributes.gender.clone(),
        height: attributes.height.clone(),
        primary_color: attributes
            .colors
            .first()
            .cloned()
            .unwrap_or_else(|| "neutral".into()),
        accent_color: attributes.colors.get(1).cloned(),
        secondary_color: attributes.colors.get(2).cloned(),
        design: attributes.design.clone(),
        season: season.clone(),
        descriptors: descriptors
            .into_iter()
            .map(|(key, attr)| (key, attr.label))
            .collect(),
    };

    let MatchResult {
        sock_types,
        sock_colors,
        patterns,
        materials,
        style_tip,
        match_type,
        confidence,
        match_details,
        error,
        ..
    } = result;

    RecommendationReport {
        shoe_analysis: Some(shoe_analysis),
        recommendations: Recommendations {
            types: sock_types,
            colors: sock_colors,
            patterns,
            materials,
        },
        metadata: ReportMetadata {
            match_type,
            confidence,
            season: Some(season),
            fallback_used: match_details.fallback_used,
            match_details: Some(match_details),
        },
        style_tip: Some(style_tip),
        error,
    }
}

/// エラー時のレポート（設定のフォールバックのみ）
pub fn error_report(fallback: &Fallback, reason: &str) -> RecommendationReport {
    RecommendationReport {
        shoe_analysis: None,
        recommendations: Recommendations {
            types: fallback.sock_types.clone(),
            colors: fallback.colors.clone(),
            patterns: fallback.patterns.clone(),
            materials: vec![fallback.material.clone()],
        },
        metadata: ReportMetadata {
            match_type: MatchType::Error,
            confidence: 0.0,
            season: None,
            match_details: None,
            fallback_used: true,
        },
        style_tip: None,
        error: Some(reason.to_string()),
    }
}

fn label_or_unknown(label: Option<&str>) -> String {
    label.unwrap_or("unknown").to_string()
}
