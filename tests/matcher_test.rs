//! 同梱のルール設定（config/style_config.json）を使った照合テスト

use sock_match::matcher::{StyleMatcher, NO_MATCH_TIP};
use sock_match_common::{AttributeWithConfidence, MatchType, ShoeAttributes};
use std::path::PathBuf;

fn sample_rules() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("style_config.json")
}

fn matcher() -> StyleMatcher {
    StyleMatcher::from_path_strict(&sample_rules()).expect("同梱のルール設定を読み込めません")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn shoe(category: &str, sub_category: &str, gender: &str) -> ShoeAttributes {
    ShoeAttributes {
        category: Some(AttributeWithConfidence::new(category, 90.0)),
        sub_category: Some(AttributeWithConfidence::new(sub_category, 80.0)),
        gender: gender.into(),
        season: Some("summer".into()),
        ..Default::default()
    }
}

/// カテゴリなし、色とデザインのみ一致
#[test]
fn test_color_and_design_without_category() {
    let attrs = ShoeAttributes {
        height: "high-top".into(),
        colors: strings(&["black", "white"]),
        design: "solid".into(),
        season: Some("winter".into()),
        ..Default::default()
    };
    let result = matcher().recommend(&attrs);

    assert_eq!(result.match_type, MatchType::StandardRules);
    assert_eq!(result.sock_colors, strings(&["black", "charcoal", "white"]));
    assert_eq!(result.patterns, strings(&["solid", "ribbed"]));
    assert_eq!(result.sock_types, strings(&["crew", "ankle"]));
    assert_eq!(result.materials, strings(&["cotton"]));
    assert_eq!(result.primary_color, "black");
    assert_eq!(result.secondary_color, "white");
    // (0.4 * 0.6 + 0.2 * 0.2) / 0.6 = 0.47、靴下の種類がフォールバックなので 0.8 倍
    assert_eq!(result.confidence, 0.38);
    assert_eq!(result.match_details.rules_applied, strings(&["color_rule", "design_rule"]));
    assert!(!result.match_details.shoe_rule_matched);
    assert!(result.match_details.fallback_used);
    assert!(result.style_tip.ends_with("ideal for the winter season."));
    assert!(result.error.is_none());
}

/// すべてのルールに一致し、フォールバック不要
#[test]
fn test_full_match_without_penalty() {
    let attrs = ShoeAttributes {
        colors: strings(&["white", "black"]),
        design: "striped".into(),
        ..shoe("Sneakers", "Athletic", "women")
    };
    let result = matcher().recommend(&attrs);

    assert_eq!(result.match_type, MatchType::StandardRules);
    assert_eq!(result.sock_types, strings(&["ankle", "no-show"]));
    assert_eq!(result.sock_colors, strings(&["white", "light grey"]));
    assert_eq!(result.patterns, strings(&["solid"]));
    assert_eq!(result.materials, strings(&["cotton", "polyester", "cotton blend"]));
    assert_eq!(result.confidence, 0.52);
    assert!(!result.match_details.fallback_used);
    assert_eq!(
        result.match_details.rules_applied,
        strings(&["shoe_rule", "color_rule", "design_rule"])
    );
    assert_eq!(
        result.style_tip,
        "Suggested socks are chosen to complement your 'Athletic' shoes, \
         coordinated with the color 'white', styled to match the 'striped' design theme; \
         ideal for the summer season."
    );
}

#[test]
fn test_special_combination_short_circuits() {
    let attrs = ShoeAttributes {
        colors: strings(&["red", "white"]),
        design: "striped".into(),
        ..shoe("Sneakers", "Athletic", "men")
    };
    let result = matcher().recommend(&attrs);

    assert_eq!(result.match_type, MatchType::SpecialCombo);
    assert_eq!(result.confidence, 0.85);
    assert_eq!(result.sock_colors, strings(&["red", "black"]));
    assert_eq!(result.match_details.rules_applied, strings(&["special_combination"]));
    assert!(result.match_details.special_combo_matched);
    assert!(!result.match_details.shoe_rule_matched);
    assert!(!result.match_details.fallback_used);
}

#[test]
fn test_special_combination_uses_configured_tip() {
    let attrs = ShoeAttributes {
        colors: strings(&["yellow", "black"]),
        ..Default::default()
    };
    let result = matcher().recommend(&attrs);

    assert_eq!(result.match_type, MatchType::SpecialCombo);
    assert_eq!(result.patterns, strings(&["striped"]));
    assert_eq!(result.style_tip, "Echo the bold yellow with a striped accent.");
}

#[test]
fn test_nothing_matches() {
    let attrs = ShoeAttributes {
        colors: strings(&["xyznonexistent"]),
        design: "xyznonexistent".into(),
        season: Some("fall".into()),
        ..Default::default()
    };
    let result = matcher().recommend(&attrs);

    assert_eq!(result.sock_types, strings(&["crew", "ankle"]));
    assert_eq!(result.sock_colors, strings(&["black", "white", "grey"]));
    assert_eq!(result.patterns, strings(&["solid"]));
    assert_eq!(result.materials, strings(&["cotton"]));
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.style_tip, NO_MATCH_TIP);
    assert!(result.match_details.rules_applied.is_empty());
    assert!(result.match_details.fallback_used);
}

#[test]
fn test_gender_not_listed_selects_unisex() {
    let attrs = ShoeAttributes {
        colors: strings(&["brown"]),
        design: "solid".into(),
        ..shoe("Shoes", "oxford", "women")
    };
    let matcher = matcher();
    let shoe_match = matcher
        .match_shoe(attrs.category.as_ref(), attrs.sub_category.as_ref(), &attrs.gender)
        .expect("靴カテゴリのルールに一致しません");
    assert_eq!(shoe_match.selected_gender, "unisex");

    let result = matcher.recommend(&attrs);
    assert_eq!(result.sock_types, strings(&["dress", "over-the-calf"]));
    assert_eq!(result.sock_colors, strings(&["brown", "burgundy", "olive"]));
    assert_eq!(result.materials, strings(&["cotton", "silk blend"]));
    // (0.4 * 1.0 + 0.4 * 0.4 + 0.2 * 0.2) / 1.0
    assert_eq!(result.confidence, 0.6);
}

#[test]
fn test_recommend_is_deterministic() {
    let attrs = ShoeAttributes {
        colors: strings(&["navy", "white"]),
        design: "patterned".into(),
        ..shoe("Boots", "Ankle", "men")
    };
    let matcher = matcher();
    let first = matcher.recommend(&attrs);
    let second = matcher.recommend(&attrs);
    assert_eq!(first, second);
}

#[test]
fn test_batch_keeps_input_order() {
    let inputs = vec![
        ShoeAttributes {
            colors: strings(&["red"]),
            ..Default::default()
        },
        ShoeAttributes {
            colors: strings(&["xyznonexistent"]),
            design: "xyznonexistent".into(),
            ..Default::default()
        },
        ShoeAttributes {
            colors: strings(&["brown"]),
            ..Default::default()
        },
    ];
    let results = matcher().recommend_batch(&inputs);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].match_type, MatchType::SpecialCombo);
    assert_eq!(results[1].confidence, 0.0);
    assert_eq!(results[2].sock_colors, strings(&["brown", "burgundy", "olive"]));
}

#[test]
fn test_matcher_is_shared_across_threads() {
    let matcher = std::sync::Arc::new(matcher());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let matcher = matcher.clone();
            std::thread::spawn(move || {
                matcher
                    .recommend(&ShoeAttributes {
                        colors: strings(&["red"]),
                        ..Default::default()
                    })
                    .confidence
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0.85);
    }
}
