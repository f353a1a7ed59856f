// LangWitch: 基于词库字典树的语言检测

pub mod cli;
pub mod config;
pub mod detect;
pub mod dictionary_utils;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

pub use config::{DetectorConfig, LanguageEntry};
pub use detect::{
    build_trie, detect, detect_detailed, normalize, DetectionEngine, DetectionMatrix,
    DetectionOptions, DetectionReport, FuzzyMode, ScoringPolicy, TieBreak, Verdict,
    VocabularyTrie,
};

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("读取标准输入失败")?;
    Ok(input)
}

pub fn run() -> Result<()> {
    // 日志输出到 stderr，stdout 只输出检测结果
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = cli::CliArgs::parse();
    if args.init {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => DetectorConfig::config_path()?,
        };
        config::init_config(&path)?;
        println!("已生成默认配置: {}", path.display());
        return Ok(());
    }

    let (mut config, base_dir) = match &args.config {
        Some(path) => {
            let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (DetectorConfig::load_from_path(path)?, base_dir)
        }
        None => (DetectorConfig::load()?, DetectorConfig::app_dir()?),
    };
    if let Some(mode) = args.fuzzy {
        config.fuzzy_mode = mode;
    }

    let engine = dictionary_utils::build_engine(&config, &base_dir)?;
    tracing::info!("检测引擎就绪: {:?}", engine.languages());

    let text = if args.text.is_empty() {
        read_stdin()?
    } else {
        args.text.join(" ")
    };

    let report = engine.detect_detailed(&text);
    println!("{}", cli::render_verdict(&report));
    if args.matrix {
        print!("{}", cli::render_matrix(&report));
    }

    Ok(())
}
