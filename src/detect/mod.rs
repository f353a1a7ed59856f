//! 语言检测引擎
//!
//! 每种语言一棵词库字典树，不依赖任何统计模型。
//!
//! ## 处理流程
//! 1. 检查输入是否含字母（不含则为 Unknown）
//! 2. 按空白分词
//! 3. 逐词归一化（去重音、小写），查询各语言词库（精确/归一化/模糊）
//! 4. 命中集合累计到 语言×语言 矩阵，并记录贡献词
//! 5. 对角线最大者胜出，置信度为其自身票占全部证据的比例

mod edit_distance;
mod engine;
mod normalize;
mod scorer;
mod tokenizer;
mod trie;
mod types;

pub use edit_distance::levenshtein;
pub use engine::{detect, detect_detailed, DetectionEngine, DetectionReport};
pub use normalize::normalize;
pub use scorer::LanguageScorer;
pub use tokenizer::{Token, Tokenizer};
pub use trie::{build_trie, VocabularyTrie};
pub use types::{
    DetectionMatrix, DetectionOptions, FuzzyMode, MatchKind, ScoringPolicy, TieBreak,
    TokenMatch, Verdict, UNKNOWN_LANGUAGE,
};
