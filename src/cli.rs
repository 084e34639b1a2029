use crate::logging::LogFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sock-match")]
#[command(about = "靴の解析結果から靴下を提案するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力（-v: info, -vv: debug, -vvv: trace）
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// ログ形式 (pretty/compact/json)
    #[arg(long, default_value = "compact", global = true)]
    pub log_format: LogFormat,

    /// ルール設定ファイル（省略時: 環境変数 SOCK_MATCH_RULES → 設定ファイル → config/style_config.json）
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// 必須セクションが欠けたルール設定をエラーにする
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 靴の特徴JSON（単体またはリスト）を照合
    Match {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 季節を指定（入力に季節がないものに適用）
        #[arg(short, long)]
        season: Option<String>,
    },

    /// 上流の解析結果JSON（ファイルまたはフォルダ）から提案レポートを作成
    Recommend {
        /// 解析結果JSONファイル、またはそれを含むフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 性別ラベルがないときの既定値
        #[arg(short, long)]
        gender: Option<String>,

        /// 分類ラベルを採用する最低信頼度（%）
        #[arg(long)]
        min_confidence: Option<f64>,
    },

    /// ルール設定の概要を表示
    Rules,

    /// 設定を表示/編集
    Config {
        /// ルール設定ファイルのパスを保存
        #[arg(long)]
        set_rules_path: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
