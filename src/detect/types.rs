//! 检测类型定义

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 未能判定语言时的结果名称
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// 单词命中方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// 原拼写精确命中
    Exact,
    /// 归一化拼写命中
    Normalized,
    /// 编辑距离模糊命中
    Fuzzy,
}

impl MatchKind {
    /// 命中分数：精确 2，归一化/模糊 1
    pub fn score(self) -> u8 {
        match self {
            MatchKind::Exact => 2,
            MatchKind::Normalized | MatchKind::Fuzzy => 1,
        }
    }
}

/// 模糊匹配模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyMode {
    /// 关闭模糊匹配（默认）
    #[default]
    #[value(alias = "off")]
    Disabled,
    /// 编辑距离 ≤ 1
    Strict,
    /// 编辑距离 ≤ 2
    Permissive,
}

impl FuzzyMode {
    /// 允许的最大编辑距离，关闭时为 None
    pub fn threshold(self) -> Option<usize> {
        match self {
            FuzzyMode::Disabled => None,
            FuzzyMode::Strict => Some(1),
            FuzzyMode::Permissive => Some(2),
        }
    }
}

/// 矩阵计分策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// 每个命中语言自身 +1，每对命中语言互相 +0.5（默认）
    #[default]
    SelfAndCross,
    /// 仅一种语言命中时自身 +2；多种语言命中时每个有序语言对 +1
    UniqueSelf,
}

/// 对角线平分时的取舍策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// 按语言名字典序取第一个（默认）
    #[default]
    Alphabetical,
    /// 按配置中的语言顺序取第一个
    ConfigOrder,
}

/// 检测选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetectionOptions {
    #[serde(default)]
    pub scoring_policy: ScoringPolicy,
    #[serde(default)]
    pub tie_break: TieBreak,
}

/// 检测结论
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// 语言名称，无法判定时为 "Unknown"
    pub language: String,
    /// 置信度 [0.0, 1.0]：胜出语言自身票数占全部证据的比例，不是校准过的概率
    pub confidence: f64,
}

impl Verdict {
    pub fn unknown() -> Self {
        Self {
            language: UNKNOWN_LANGUAGE.to_string(),
            confidence: 0.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.language == UNKNOWN_LANGUAGE
    }
}

/// 单个词的逐语言命中情况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMatch {
    /// 原始词
    pub token: String,
    /// 在原文中的字节区间 [start, end)
    pub start: usize,
    pub end: usize,
    /// 归一化后的词
    pub normalized: String,
    /// 与语言列表同序的分数 (0/1/2)
    pub scores: Vec<u8>,
}

impl TokenMatch {
    /// 分数非零的语言下标
    pub fn detected(&self) -> Vec<usize> {
        self.scores
            .iter()
            .enumerate()
            .filter_map(|(i, score)| (*score > 0).then_some(i))
            .collect()
    }
}

/// 语言 × 语言 检测矩阵
///
/// 对角线为自身票，非对角线为歧义词的交叉票；每个格子记录贡献词。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionMatrix {
    languages: Vec<String>,
    cells: Vec<f64>,
    contributors: Vec<BTreeSet<String>>,
}

impl DetectionMatrix {
    pub fn new(languages: Vec<String>) -> Self {
        let n = languages.len();
        Self {
            languages,
            cells: vec![0.0; n * n],
            contributors: vec![BTreeSet::new(); n * n],
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn size(&self) -> usize {
        self.languages.len()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.languages.len() + col
    }

    /// 格子 (row, col) 的累计值，越界返回 0
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.size() || col >= self.size() {
            return 0.0;
        }
        self.cells[self.index(row, col)]
    }

    /// 格子 (row, col) 的贡献词
    pub fn contributors(&self, row: usize, col: usize) -> Option<&BTreeSet<String>> {
        if row >= self.size() || col >= self.size() {
            return None;
        }
        self.contributors.get(self.index(row, col))
    }

    /// 按语言名取格子值
    pub fn value_of(&self, row: &str, col: &str) -> f64 {
        match (self.position(row), self.position(col)) {
            (Some(r), Some(c)) => self.get(r, c),
            _ => 0.0,
        }
    }

    pub fn position(&self, language: &str) -> Option<usize> {
        self.languages.iter().position(|l| l == language)
    }

    /// 累加并记录贡献词
    pub fn add(&mut self, row: usize, col: usize, amount: f64, word: &str) {
        let idx = self.index(row, col);
        self.cells[idx] += amount;
        self.contributors[idx].insert(word.to_string());
    }

    /// 按策略记录一个词的命中集合
    pub fn record(&mut self, detected: &[usize], word: &str, policy: ScoringPolicy) {
        match policy {
            ScoringPolicy::SelfAndCross => {
                for &lang in detected {
                    self.add(lang, lang, 1.0, word);
                }
                for (i, &l1) in detected.iter().enumerate() {
                    for &l2 in &detected[i + 1..] {
                        self.add(l1, l2, 0.5, word);
                        self.add(l2, l1, 0.5, word);
                    }
                }
            }
            ScoringPolicy::UniqueSelf => match detected {
                [] => {}
                [only] => self.add(*only, *only, 2.0, word),
                _ => {
                    for &l1 in detected {
                        for &l2 in detected {
                            if l1 != l2 {
                                self.add(l1, l2, 1.0, word);
                            }
                        }
                    }
                }
            },
        }
    }

    /// 对角线及其上方格子之和（每个无序语言对只计一次）
    pub fn upper_total(&self) -> f64 {
        let n = self.size();
        let mut total = 0.0;
        for row in 0..n {
            for col in row..n {
                total += self.get(row, col);
            }
        }
        total
    }

    /// 对角线最大的语言下标，平分时按 `tie_break` 取舍
    pub fn best(&self, tie_break: TieBreak) -> Option<usize> {
        let mut order: Vec<usize> = (0..self.size()).collect();
        if tie_break == TieBreak::Alphabetical {
            order.sort_by(|&a, &b| self.languages[a].cmp(&self.languages[b]));
        }

        let mut best: Option<usize> = None;
        for idx in order {
            match best {
                Some(b) if self.get(idx, idx) <= self.get(b, b) => {}
                _ => best = Some(idx),
            }
        }
        best
    }
}
