// 命令行参数解析与结果输出

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Parser;

use crate::detect::{DetectionReport, FuzzyMode};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "langwitch", about = "基于词库字典树的语言检测", version)]
pub struct CliArgs {
    /// 配置文件路径，缺省时使用用户配置目录下的 config.json
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// 输出逐词分数、矩阵与贡献词
    #[arg(short, long)]
    pub matrix: bool,

    /// 覆盖配置中的模糊匹配模式
    #[arg(long, value_enum)]
    pub fuzzy: Option<FuzzyMode>,

    /// 在配置路径写入默认配置后退出
    #[arg(long)]
    pub init: bool,

    /// 待检测文本，为空时从 stdin 读取
    #[arg(trailing_var_arg = true)]
    pub text: Vec<String>,
}

/// 格式化检测结果（与原界面输出一致）
pub fn render_verdict(report: &DetectionReport) -> String {
    format!(
        "Language: {}\nConfidence: {:.1}%",
        report.verdict.language,
        report.verdict.confidence * 100.0
    )
}

/// 格式化逐词分数与矩阵
pub fn render_matrix(report: &DetectionReport) -> String {
    let matrix = &report.matrix;
    let languages = matrix.languages();
    let mut out = String::new();

    let _ = writeln!(out, "Tokens:");
    for token in &report.tokens {
        let scores: Vec<String> = languages
            .iter()
            .zip(&token.scores)
            .filter(|&(_, &score)| score > 0)
            .map(|(lang, score)| format!("{}={}", lang, score))
            .collect();
        let _ = writeln!(
            out,
            "  {} [{}..{}] ({}): {}",
            token.token,
            token.start,
            token.end,
            token.normalized,
            if scores.is_empty() {
                "-".to_string()
            } else {
                scores.join(", ")
            }
        );
    }

    let width = languages.iter().map(|l| l.len()).max().unwrap_or(0).max(4);
    let _ = write!(out, "Matrix:\n  {:width$}", "", width = width);
    for lang in languages {
        let _ = write!(out, " {:>width$}", lang, width = width);
    }
    let _ = writeln!(out);
    for (row, lang) in languages.iter().enumerate() {
        let _ = write!(out, "  {:width$}", lang, width = width);
        for col in 0..languages.len() {
            let _ = write!(out, " {:>width$}", matrix.get(row, col), width = width);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Contributors:");
    for (row, l1) in languages.iter().enumerate() {
        for (col, l2) in languages.iter().enumerate() {
            let Some(words) = matrix.contributors(row, col) else {
                continue;
            };
            if words.is_empty() {
                continue;
            }
            let words: Vec<&str> = words.iter().map(String::as_str).collect();
            let _ = writeln!(out, "  {} / {}: {}", l1, l2, words.join(" "));
        }
    }

    out
}
