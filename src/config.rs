use crate::error::{SockMatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ルール設定ファイルのパスを上書きする環境変数
pub const RULES_PATH_ENV: &str = "SOCK_MATCH_RULES";

/// 既定のルール設定ファイル（カレントディレクトリ基準）
pub const DEFAULT_RULES_PATH: &str = "config/style_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules_path: Option<PathBuf>,
    /// 分類ラベルを採用する最低信頼度（%）
    pub min_label_confidence: f64,
    pub default_gender: String,
    /// 必須セクションが欠けたルール設定を拒否する
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SockMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sock-match").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            rules_path: None,
            min_label_confidence: 60.0,
            default_gender: "unisex".into(),
            strict: false,
        }
    }

    /// ルール設定ファイルのパスを決定
    ///
    /// 優先順: 引数 > 環境変数 > 設定ファイル > 既定パス
    pub fn resolve_rules_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(RULES_PATH_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        self.rules_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_PATH))
    }

    pub fn set_rules_path(&mut self, path: PathBuf) -> Result<()> {
        self.rules_path = Some(path);
        self.save()
    }
}
