//! ルール設定ファイルの読み込み
//!
//! 必須セクション（shoe_rules / color_rules / fallback）が欠けている場合は
//! 警告を出して空の既定値で補う。`load_rules_strict` はエラーにする。

use crate::error::{SockMatchError, Result};
use sock_match_common::{ParseReport, RuleConfig};
use std::path::Path;

/// 読み込んだルール設定と見つかった不備
#[derive(Debug, Clone)]
pub struct LoadedRules {
    pub config: RuleConfig,
    pub missing_sections: Vec<&'static str>,
    /// 型が合わず読み飛ばしたルール・セクション
    pub skipped: Vec<String>,
}

impl LoadedRules {
    pub fn is_complete(&self) -> bool {
        self.missing_sections.is_empty()
    }
}

/// ルール設定ファイルを読み込む
pub fn load_rules(path: &Path) -> Result<LoadedRules> {
    if !path.exists() {
        return Err(SockMatchError::ConfigNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let (config, report) = RuleConfig::parse(&content)
        .map_err(|e| SockMatchError::ConfigParseError(format!("{}: {}", path.display(), e)))?;

    let ParseReport {
        missing_sections,
        skipped,
    } = report;

    for section in &missing_sections {
        tracing::warn!(
            section = *section,
            path = %path.display(),
            "ルール設定にセクションがありません。空の既定値を使用します"
        );
    }

    for entry in &skipped {
        tracing::warn!(
            entry = %entry,
            path = %path.display(),
            "ルール設定の形式が不正なため読み飛ばします"
        );
    }

    tracing::info!(
        path = %path.display(),
        shoe_rules = config.shoe_rules.len(),
        color_rules = config.color_rules.len(),
        design_rules = config.design_rules.len(),
        special_combinations = config.special_combinations.len(),
        total = config.rule_count(),
        "ルール設定を読み込みました"
    );

    Ok(LoadedRules {
        config,
        missing_sections,
        skipped,
    })
}

/// 必須セクションの欠落をエラーとして扱う読み込み
pub fn load_rules_strict(path: &Path) -> Result<RuleConfig> {
    let loaded = load_rules(path)?;
    if !loaded.is_complete() {
        return Err(SockMatchError::MissingSections(
            loaded.missing_sections.iter().map(|s| s.to_string()).collect(),
        ));
    }
    Ok(loaded.config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_file() {
        let err = load_rules(Path::new("/nonexistent/rules/12345.json")).unwrap_err();
        assert!(matches!(err, SockMatchError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_rules(&path).unwrap_err();
        assert!(matches!(err, SockMatchError::ConfigParseError(_)));
    }

    #[test]
    fn test_load_non_object_document() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"["shoe_rules"]"#).unwrap();

        let err = load_rules(&path).unwrap_err();
        assert!(matches!(err, SockMatchError::ConfigParseError(_)));
    }

    #[test]
    fn test_missing_sections_degrade() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{"color_rules": [{"primary": "black"}]}"#).unwrap();

        let loaded = load_rules(&path).unwrap();
        assert_eq!(loaded.missing_sections, vec!["shoe_rules", "fallback"]);
        assert_eq!(loaded.config.color_rules.len(), 1);
        assert!(!loaded.is_complete());
    }

    #[test]
    fn test_strict_rejects_missing_sections() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{"shoe_rules": [], "color_rules": []}"#).unwrap();

        let err = load_rules_strict(&path).unwrap_err();
        match err {
            SockMatchError::MissingSections(sections) => assert_eq!(sections, vec!["fallback"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_rule_does_not_reject_file() {
        use crate::matcher::StyleMatcher;
        use sock_match_common::{MatchType, ShoeAttributes};

        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"{
                "shoe_rules": null,
                "color_rules": [
                    {"primary": "black", "secondary": "white",
                     "recommended_colors": ["charcoal"], "priority": 2.5},
                    42
                ],
                "design_rules": [{"design": "solid", "recommended_patterns": ["ribbed"], "material": null}],
                "fallback": {"sock_types": ["crew"], "colors": ["grey"], "patterns": ["solid"]}
            }"#,
        )
        .unwrap();

        let loaded = load_rules(&path).unwrap();
        assert!(loaded.is_complete());
        assert_eq!(loaded.skipped, vec!["shoe_rules", "color_rules[1]"]);

        let matcher = StyleMatcher::new(std::sync::Arc::new(loaded.config));
        let result = matcher.recommend(&ShoeAttributes {
            colors: vec!["black".into(), "white".into()],
            design: "solid".into(),
            season: Some("spring".into()),
            ..Default::default()
        });

        assert_eq!(result.match_type, MatchType::StandardRules);
        assert_eq!(result.sock_colors, vec!["charcoal".to_string()]);
        assert_eq!(result.patterns, vec!["ribbed".to_string()]);
        assert_eq!(result.sock_types, vec!["crew".to_string()]);
        assert_eq!(result.materials, vec!["default_material".to_string()]);
        // (0.4 * 0.5 + 0.2 * 0.2) / 0.6 = 0.4、フォールバックで 0.8 倍
        assert_eq!(result.confidence, 0.32);
        assert!(result.error.is_none());
    }
}
