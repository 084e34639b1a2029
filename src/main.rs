use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use sock_match::batch::AttributesInput;
use sock_match::cli::{Cli, Commands};
use sock_match::config::Config;
use sock_match::intake::IntakeOptions;
use sock_match::logging::{init_logging, LogConfig};
use sock_match::matcher::StyleMatcher;
use sock_match::report::{report_for_file, ReportEntry};
use sock_match::{rules, scanner};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format))?;

    let mut config = Config::load().context("設定ファイルを読み込めません")?;
    let rules_path = config.resolve_rules_path(cli.rules.as_deref());
    let strict = cli.strict || config.strict;

    match cli.command {
        Commands::Match { input, output, season } => {
            let matcher = build_matcher(&rules_path, strict)?;

            let attributes = AttributesInput::from_file(&input)
                .with_context(|| format!("入力を読み込めません: {}", input.display()))?
                .with_default_season(season.as_deref());

            match attributes {
                AttributesInput::One(attrs) => {
                    write_json(&matcher.recommend(&attrs), output.as_deref())?;
                }
                AttributesInput::Many(list) => {
                    tracing::info!(count = list.len(), "照合を開始します");
                    write_json(&matcher.recommend_batch(&list), output.as_deref())?;
                }
            }
        }

        Commands::Recommend { input, output, gender, min_confidence } => {
            let matcher = build_matcher(&rules_path, strict)?;

            let mut options = IntakeOptions::from(&config);
            if let Some(gender) = gender {
                options.default_gender = gender;
            }
            if let Some(min) = min_confidence {
                options.min_label_confidence = min;
            }

            if input.is_file() {
                let report = report_for_file(&matcher, &input, &options);
                write_json(&report, output.as_deref())?;
            } else {
                let inputs = scanner::collect_inputs(&input)
                    .with_context(|| format!("入力を解決できません: {}", input.display()))?;
                if inputs.is_empty() {
                    tracing::warn!(folder = %input.display(), "解析結果JSONが見つかりません");
                }

                let entries: Vec<ReportEntry> = inputs
                    .par_iter()
                    .map(|file| ReportEntry {
                        file_name: file.file_name.clone(),
                        report: report_for_file(&matcher, &file.path, &options),
                    })
                    .collect();
                write_json(&entries, output.as_deref())?;
            }
        }

        Commands::Rules => {
            let loaded = rules::load_rules(&rules_path)
                .with_context(|| format!("ルール設定を読み込めません: {}", rules_path.display()))?;
            let rules = &loaded.config;

            println!("ルール設定: {}", rules_path.display());
            println!("  靴カテゴリルール: {}件", rules.shoe_rules.len());
            println!("  色ルール: {}件", rules.color_rules.len());
            println!("  デザインルール: {}件", rules.design_rules.len());
            println!("  特別な組み合わせ: {}件", rules.special_combinations.len());
            println!("  合計: {}件", rules.rule_count());
            println!("  フォールバック素材: {}", rules.fallback.material);
            if !loaded.skipped.is_empty() {
                println!("⚠ 形式が不正で読み飛ばした項目: {}", loaded.skipped.join(", "));
            }
            if loaded.is_complete() {
                println!("✔ 必須セクションはすべてあります");
            } else {
                println!("⚠ 欠落セクション: {}", loaded.missing_sections.join(", "));
                if strict {
                    anyhow::bail!("strict モードでは欠落セクションのあるルール設定を使用できません");
                }
            }
        }

        Commands::Config { set_rules_path, show } => {
            if let Some(path) = set_rules_path {
                config.set_rules_path(path)?;
                println!("✔ ルール設定ファイルのパスを保存しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!(
                    "  ルール設定ファイル: {}",
                    config
                        .rules_path
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  使用中のルール設定: {}", config.resolve_rules_path(None).display());
                println!("  最低信頼度: {}%", config.min_label_confidence);
                println!("  既定の性別: {}", config.default_gender);
                println!("  strict: {}", if config.strict { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

fn build_matcher(rules_path: &Path, strict: bool) -> Result<StyleMatcher> {
    let matcher = if strict {
        StyleMatcher::from_path_strict(rules_path)
    } else {
        StyleMatcher::from_path(rules_path)
    };
    matcher.with_context(|| format!("ルール設定を読み込めません: {}", rules_path.display()))
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("出力を書き込めません: {}", path.display()))?;
            eprintln!("✔ 結果を保存: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
