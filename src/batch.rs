//! 靴の特徴JSONの読み込み（単体またはリスト）

use crate::error::{Result, SockMatchError};
use serde::Deserialize;
use sock_match_common::ShoeAttributes;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AttributesInput {
    Many(Vec<ShoeAttributes>),
    One(ShoeAttributes),
}

impl AttributesInput {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SockMatchError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 季節が未指定のものにだけ指定の季節を設定
    pub fn with_default_season(self, season: Option<&str>) -> Self {
        let Some(season) = season else {
            return self;
        };
        let fill = |mut attrs: ShoeAttributes| {
            if attrs.season.is_none() {
                attrs.season = Some(season.to_string());
            }
            attrs
        };
        match self {
            AttributesInput::Many(list) => AttributesInput::Many(list.into_iter().map(fill).collect()),
            AttributesInput::One(attrs) => AttributesInput::One(fill(attrs)),
        }
    }

    pub fn into_vec(self) -> Vec<ShoeAttributes> {
        match self {
            AttributesInput::Many(list) => list,
            AttributesInput::One(attrs) => vec![attrs],
        }
    }
}
