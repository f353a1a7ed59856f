//! 语言词库字典树
//!
//! 每种语言一棵树，同一棵树里同时保存单词的原拼写和归一化拼写：
//! - 原拼写终点标记 `exact`
//! - 归一化拼写（仅当与原拼写不同）终点标记 `normalized`
//!
//! 查询分三级，命中即返回：精确 (2) → 归一化 (1) → 模糊 (1)

use std::collections::BTreeMap;

use crate::detect::edit_distance::DistanceRow;
use crate::detect::normalize::normalize;
use crate::detect::types::{FuzzyMode, MatchKind};

/// 字典树节点
///
/// 子节点按字符稀疏存储，节点所代表的字符即父节点中的键
#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    /// 原拼写单词终点
    exact: bool,
    /// 归一化拼写单词终点
    normalized: bool,
}

impl TrieNode {
    /// 沿路径逐字符下降，缺失节点时返回 None
    fn walk<I>(&self, chars: I) -> Option<&TrieNode>
    where
        I: IntoIterator<Item = char>,
    {
        let mut current = self;
        for ch in chars {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    /// 沿路径下降，按需创建节点，返回终点节点
    fn walk_or_insert<I>(&mut self, chars: I) -> &mut TrieNode
    where
        I: IntoIterator<Item = char>,
    {
        let mut current = self;
        for ch in chars {
            current = current.children.entry(ch).or_default();
        }
        current
    }

    fn is_word_end(&self) -> bool {
        self.exact || self.normalized
    }
}

/// 单一语言的词库
#[derive(Debug)]
pub struct VocabularyTrie {
    name: String,
    root: TrieNode,
    fuzzy_mode: FuzzyMode,
    word_count: usize,
}

/// 创建空词库
pub fn build_trie(language_name: &str) -> VocabularyTrie {
    VocabularyTrie::new(language_name)
}

impl VocabularyTrie {
    pub fn new(language_name: impl Into<String>) -> Self {
        Self {
            name: language_name.into(),
            root: TrieNode::default(),
            fuzzy_mode: FuzzyMode::Disabled,
            word_count: 0,
        }
    }

    /// 设置模糊匹配模式（构建阶段使用）
    pub fn with_fuzzy_mode(mut self, mode: FuzzyMode) -> Self {
        self.fuzzy_mode = mode;
        self
    }

    pub fn set_fuzzy_mode(&mut self, mode: FuzzyMode) {
        self.fuzzy_mode = mode;
    }

    pub fn fuzzy_mode(&self) -> FuzzyMode {
        self.fuzzy_mode
    }

    /// 语言名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 已插入的单词数（含重复插入）
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// 插入单词
    ///
    /// 原拼写总是插入；归一化拼写仅在与原拼写不同且非空时插入。
    /// 空词直接忽略。
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        self.root.walk_or_insert(word.chars()).exact = true;

        let normalized = normalize(word);
        if !normalized.is_empty() && normalized != word {
            self.root.walk_or_insert(normalized.chars()).normalized = true;
        }

        self.word_count += 1;
    }

    /// 查询命中分数：2 精确，1 归一化或模糊，0 未命中
    pub fn match_score(&self, token: &str) -> u8 {
        self.lookup(token).map(MatchKind::score).unwrap_or(0)
    }

    /// 三级查询
    pub fn lookup(&self, token: &str) -> Option<MatchKind> {
        if token.is_empty() {
            return None;
        }

        // 1. 精确匹配
        if self
            .root
            .walk(token.chars())
            .is_some_and(|node| node.exact)
        {
            return Some(MatchKind::Exact);
        }

        // 2. 归一化匹配（即使与原词相同也要查，以命中仅以归一化形式存在的词）
        let normalized = normalize(token);
        if normalized.is_empty() {
            return None;
        }
        if self
            .root
            .walk(normalized.chars())
            .is_some_and(|node| node.normalized)
        {
            return Some(MatchKind::Normalized);
        }

        // 3. 模糊匹配
        let threshold = self.fuzzy_mode.threshold()?;
        match self.closest_distance(&normalized, threshold) {
            Some(distance) if distance <= threshold => Some(MatchKind::Fuzzy),
            _ => None,
        }
    }

    /// 在整棵树中寻找与 `target` 编辑距离最小的单词终点
    ///
    /// 返回不超过 `threshold` 的最小距离；没有候选时返回 None。
    /// 剪枝：路径长度超过 `target_len + threshold + 1`，
    /// 或当前行下界已超过阈值时不再深入。
    pub fn closest_distance(&self, target: &str, threshold: usize) -> Option<usize> {
        let target: Vec<char> = target.chars().collect();
        let max_depth = target.len() + threshold + 1;
        let start = DistanceRow::start(&target);

        let mut best: Option<usize> = None;
        let mut stack: Vec<(&TrieNode, DistanceRow, usize)> = vec![(&self.root, start, 0)];

        while let Some((node, row, depth)) = stack.pop() {
            if depth > 0 && node.is_word_end() {
                let distance = row.distance();
                if distance <= threshold && best.map_or(true, |b| distance < b) {
                    best = Some(distance);
                    if distance == 0 {
                        break;
                    }
                }
            }

            if depth >= max_depth || row.lower_bound() > threshold {
                continue;
            }

            for (&ch, child) in &node.children {
                stack.push((child, row.advance(ch, &target), depth + 1));
            }
        }

        best
    }
}
