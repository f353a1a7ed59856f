//! 逐词语言打分

use crate::detect::normalize::normalize;
use crate::detect::tokenizer::Token;
use crate::detect::trie::VocabularyTrie;
use crate::detect::types::TokenMatch;

/// 语言打分器
///
/// 对一个词依次查询每种语言的词库，得到逐语言分数
pub struct LanguageScorer<'a> {
    tries: &'a [VocabularyTrie],
}

impl<'a> LanguageScorer<'a> {
    pub fn new(tries: &'a [VocabularyTrie]) -> Self {
        Self { tries }
    }

    /// 为一个词打分
    ///
    /// 词只归一化一次，各语言词库用归一化结果查询
    pub fn score_token(&self, token: &Token<'_>) -> TokenMatch {
        let normalized = normalize(token.text);
        let scores = self
            .tries
            .iter()
            .map(|trie| trie.match_score(&normalized))
            .collect();

        TokenMatch {
            token: token.text.to_string(),
            start: token.start,
            end: token.end,
            normalized,
            scores,
        }
    }
}
