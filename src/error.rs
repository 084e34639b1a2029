use thiserror::Error;

#[derive(Error, Debug)]
pub enum SockMatchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ルール設定ファイルが見つかりません: {0}")]
    ConfigNotFound(String),

    #[error("ルール設定ファイルの解析に失敗: {0}")]
    ConfigParseError(String),

    #[error("ルール設定に必須セクションがありません: {}", .0.join(", "))]
    MissingSections(Vec<String>),

    #[error("マッチング処理エラー: {0}")]
    MatchingFailure(String),

    #[error("上流の解析結果が不正: {0}")]
    UpstreamFailure(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SockMatchError>;
