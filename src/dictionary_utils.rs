// 词库工具函数
//
// 词库文件格式：UTF-8，每行一个词，无表头
// 启动时一次性加载到各语言字典树，之后只读

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DetectorConfig;
use crate::detect::{DetectionEngine, VocabularyTrie};

const UTF8_BOM: char = '\u{feff}';

/// 标准化词汇（去除首尾空白和 BOM）
pub fn normalize_entry(line: &str) -> &str {
    line.trim_start_matches(UTF8_BOM).trim()
}

/// 解析词库内容，跳过空行
pub fn parse_words(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(normalize_entry)
        .filter(|word| !word.is_empty())
}

/// 将词库内容插入字典树，返回插入的词数
pub fn insert_words(trie: &mut VocabularyTrie, content: &str) -> usize {
    let mut count = 0;
    for word in parse_words(content) {
        trie.insert(word);
        count += 1;
    }
    count
}

/// 从文件加载词库到字典树
pub fn load_words_from_file(path: &Path, trie: &mut VocabularyTrie) -> Result<usize> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取词库文件: {:?}", path))?;
    let count = insert_words(trie, &content);
    tracing::info!("词库加载完成: {} ({} 个词, {:?})", trie.name(), count, path);
    Ok(count)
}

/// 按配置构建所有语言的字典树
///
/// 单个词库缺失时仅记录警告，该语言保持为空词库
pub fn build_language_tries(config: &DetectorConfig, base_dir: &Path) -> Result<Vec<VocabularyTrie>> {
    config.validate()?;

    let mut tries = Vec::with_capacity(config.languages.len());
    for entry in &config.languages {
        let mut trie = VocabularyTrie::new(entry.name.as_str()).with_fuzzy_mode(config.fuzzy_mode);
        let path = config.resolve_dictionary(entry, base_dir);

        if let Err(e) = load_words_from_file(&path, &mut trie) {
            tracing::warn!("{} 词库加载失败，使用空词库: {:#}", entry.name, e);
        }
        tries.push(trie);
    }

    Ok(tries)
}

/// 按配置构建检测引擎
pub fn build_engine(config: &DetectorConfig, base_dir: &Path) -> Result<DetectionEngine> {
    let tries = build_language_tries(config, base_dir)?;
    Ok(DetectionEngine::new(tries, config.options()))
}
