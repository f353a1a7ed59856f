//! 语言检测主引擎
//!
//! 组合分词、逐词打分、矩阵累计，得出最终语言和置信度

use std::time::Instant;

use crate::detect::scorer::LanguageScorer;
use crate::detect::tokenizer::Tokenizer;
use crate::detect::trie::VocabularyTrie;
use crate::detect::types::{DetectionMatrix, DetectionOptions, TokenMatch, Verdict};

/// 诊断版检测结果
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DetectionReport {
    pub verdict: Verdict,
    pub matrix: DetectionMatrix,
    pub tokens: Vec<TokenMatch>,
}

/// 检测文本语言（默认选项）
pub fn detect(text: &str, tries: &[VocabularyTrie]) -> Verdict {
    detect_detailed(text, tries, DetectionOptions::default()).verdict
}

/// 检测文本语言，返回完整矩阵与贡献词
///
/// 纯函数：结果只取决于输入文本和（只读的）词库
pub fn detect_detailed(
    text: &str,
    tries: &[VocabularyTrie],
    options: DetectionOptions,
) -> DetectionReport {
    let languages: Vec<String> = tries.iter().map(|t| t.name().to_string()).collect();
    let mut matrix = DetectionMatrix::new(languages);

    // 1. 不含任何字母：直接判定为 Unknown
    if !Tokenizer::has_alphabetic(text) {
        return DetectionReport {
            verdict: Verdict::unknown(),
            matrix,
            tokens: Vec::new(),
        };
    }

    // 2-4. 分词、打分、累计
    let scorer = LanguageScorer::new(tries);
    let tokens: Vec<TokenMatch> = Tokenizer::tokenize(text)
        .into_iter()
        .map(|token| scorer.score_token(&token))
        .collect();

    for token in &tokens {
        let detected = token.detected();
        if !detected.is_empty() {
            matrix.record(&detected, &token.token, options.scoring_policy);
        }
    }

    // 5-6. 选出最佳语言，计算置信度
    let verdict = verdict_from_matrix(&matrix, options);

    DetectionReport {
        verdict,
        matrix,
        tokens,
    }
}

fn verdict_from_matrix(matrix: &DetectionMatrix, options: DetectionOptions) -> Verdict {
    let Some(best) = matrix.best(options.tie_break) else {
        return Verdict::unknown();
    };

    let best_score = matrix.get(best, best);
    // 没有任何自身票时不做猜测
    if best_score <= 0.0 {
        return Verdict::unknown();
    }

    let total = matrix.upper_total();
    let confidence = if total > 0.0 { best_score / total } else { 0.0 };

    Verdict {
        language: matrix.languages()[best].clone(),
        confidence,
    }
}

/// 检测引擎（持有各语言词库，构建完成后只读）
pub struct DetectionEngine {
    tries: Vec<VocabularyTrie>,
    options: DetectionOptions,
}

impl DetectionEngine {
    pub fn new(tries: Vec<VocabularyTrie>, options: DetectionOptions) -> Self {
        Self { tries, options }
    }

    pub fn options(&self) -> DetectionOptions {
        self.options
    }

    pub fn tries(&self) -> &[VocabularyTrie] {
        &self.tries
    }

    /// 已配置的语言名称（按配置顺序）
    pub fn languages(&self) -> Vec<&str> {
        self.tries.iter().map(|t| t.name()).collect()
    }

    pub fn detect(&self, text: &str) -> Verdict {
        self.detect_detailed(text).verdict
    }

    pub fn detect_detailed(&self, text: &str) -> DetectionReport {
        let start = Instant::now();
        let report = detect_detailed(text, &self.tries, self.options);
        tracing::debug!(
            "检测完成: {} (置信度 {:.3}, {} 个词, 耗时 {}us)",
            report.verdict.language,
            report.verdict.confidence,
            report.tokens.len(),
            start.elapsed().as_micros()
        );
        report
    }
}
