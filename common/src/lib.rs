//! Sock Match Common Library
//!
//! CLIと他のフロントエンドで共有されるルール定義・入出力型・ユーティリティ

pub mod types;
pub mod rules;
pub mod fuzzy;
pub mod lenient;
pub mod error;

pub use types::{
    AttributeWithConfidence, MatchDetails, MatchResult, MatchType, Season, ShoeAttributes,
};
pub use rules::{
    ColorRule, ComboRecommendations, DesignRule, Fallback, OneOrMany, ParseReport, RuleConfig,
    RulePriority, ShoeRule, SpecialCombination, DEFAULT_MATERIAL, REQUIRED_SECTIONS,
};
pub use fuzzy::{exceeds, ratio};
pub use error::{Error, Result};
