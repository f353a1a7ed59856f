// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::detect::{DetectionOptions, FuzzyMode, ScoringPolicy, TieBreak};

const APP_DIR_NAME: &str = "LangWitch";
const CONFIG_FILENAME: &str = "config.json";

// ============================================================================
// 语言配置
// ============================================================================

/// 单个语言：名称 + 词库文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// 语言名称（检测结果中显示）
    pub name: String,
    /// 词库文件路径，相对路径基于 `dictionary_dir`
    pub dictionary: PathBuf,
}

impl LanguageEntry {
    pub fn new(name: &str, dictionary: &str) -> Self {
        Self {
            name: name.to_string(),
            dictionary: PathBuf::from(dictionary),
        }
    }
}

fn default_languages() -> Vec<LanguageEntry> {
    vec![
        LanguageEntry::new("English", "english.txt"),
        LanguageEntry::new("French", "french.txt"),
        LanguageEntry::new("German", "german.txt"),
        LanguageEntry::new("Spanish", "spanish.txt"),
        LanguageEntry::new("Italian", "italian.txt"),
    ]
}

// ============================================================================
// 检测器配置
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// 语言列表（顺序即 ConfigOrder 平分取舍顺序）
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageEntry>,
    /// 词库目录，None 表示使用配置目录
    #[serde(default)]
    pub dictionary_dir: Option<PathBuf>,
    /// 矩阵计分策略
    #[serde(default)]
    pub scoring_policy: ScoringPolicy,
    /// 平分取舍策略
    #[serde(default)]
    pub tie_break: TieBreak,
    /// 模糊匹配模式
    #[serde(default)]
    pub fuzzy_mode: FuzzyMode,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self {
            languages: default_languages(),
            dictionary_dir: None,
            scoring_policy: ScoringPolicy::default(),
            tie_break: TieBreak::default(),
            fuzzy_mode: FuzzyMode::default(),
        }
    }

    pub fn options(&self) -> DetectionOptions {
        DetectionOptions {
            scoring_policy: self.scoring_policy,
            tie_break: self.tie_break,
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            anyhow::bail!("语言列表不能为空");
        }

        for (i, lang) in self.languages.iter().enumerate() {
            if lang.name.trim().is_empty() {
                anyhow::bail!("第 {} 个语言名称为空", i + 1);
            }
            if self.languages[..i].iter().any(|l| l.name == lang.name) {
                anyhow::bail!("语言名称重复: {}", lang.name);
            }
        }

        Ok(())
    }

    /// 解析词库文件的实际路径
    ///
    /// 绝对路径原样返回；相对路径基于 `dictionary_dir`，未设置时基于 `base_dir`
    pub fn resolve_dictionary(&self, entry: &LanguageEntry, base_dir: &Path) -> PathBuf {
        if entry.dictionary.is_absolute() {
            return entry.dictionary.clone();
        }
        let dir = self.dictionary_dir.as_deref().unwrap_or(base_dir);
        dir.join(&entry.dictionary)
    }

    pub fn app_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        let app_dir = config_dir.join(APP_DIR_NAME);
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join(CONFIG_FILENAME))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);

        if !path.exists() {
            tracing::warn!("配置文件不存在，使用默认配置");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        let config: DetectorConfig = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {:?}", path))?;
        config.validate()?;

        tracing::info!(
            "配置加载成功: {} 种语言, 计分策略 {:?}, 模糊匹配 {:?}",
            config.languages.len(),
            config.scoring_policy,
            config.fuzzy_mode
        );
        Ok(config)
    }

    /// 写入配置文件
    ///
    /// 先写同目录下的 `.partial` 文件并落盘，再 rename 覆盖目标
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let partial = path.with_extension("json.partial");
        let written = write_synced(&partial, &content)
            .and_then(|()| std::fs::rename(&partial, path).map_err(Into::into));
        if let Err(err) = written {
            if partial.exists() {
                if let Err(cleanup_err) = std::fs::remove_file(&partial) {
                    tracing::warn!("清理未完成的配置文件失败: {}", cleanup_err);
                }
            }
            return Err(err).with_context(|| format!("保存配置文件失败: {:?}", path));
        }

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }
}

fn write_synced(path: &Path, content: &str) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

/// 在 `path` 生成默认配置文件，已存在时报错而不覆盖
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("配置文件已存在: {:?}", path);
    }
    DetectorConfig::new().save_to_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_languages() {
        let config = DetectorConfig::default();
        let names: Vec<&str> = config.languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["English", "French", "German", "Spanish", "Italian"]);
        assert_eq!(config.scoring_policy, ScoringPolicy::SelfAndCross);
        assert_eq!(config.tie_break, TieBreak::Alphabetical);
        assert_eq!(config.fuzzy_mode, FuzzyMode::Disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{ "fuzzy_mode": "strict", "tie_break": "config_order" }"#)
                .unwrap();
        assert_eq!(config.fuzzy_mode, FuzzyMode::Strict);
        assert_eq!(config.tie_break, TieBreak::ConfigOrder);
        assert_eq!(config.languages.len(), 5);
        assert_eq!(config.scoring_policy, ScoringPolicy::SelfAndCross);
    }

    #[test]
    fn test_policy_names() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{ "scoring_policy": "unique_self" }"#).unwrap();
        assert_eq!(config.scoring_policy, ScoringPolicy::UniqueSelf);
        assert_eq!(config.options().scoring_policy, ScoringPolicy::UniqueSelf);
    }

    #[test]
    fn test_validate_rejects_bad_languages() {
        let mut config = DetectorConfig::new();
        config.languages.push(LanguageEntry::new("English", "other.txt"));
        assert!(config.validate().is_err());

        config.languages.clear();
        assert!(config.validate().is_err());

        config.languages.push(LanguageEntry::new("  ", "x.txt"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_dictionary() {
        let mut config = DetectorConfig::new();
        let entry = config.languages[0].clone();
        let base = Path::new("/base");

        assert_eq!(
            config.resolve_dictionary(&entry, base),
            PathBuf::from("/base/english.txt")
        );

        config.dictionary_dir = Some(PathBuf::from("/dicts"));
        assert_eq!(
            config.resolve_dictionary(&entry, base),
            PathBuf::from("/dicts/english.txt")
        );

        let absolute = LanguageEntry::new("Dutch", "/abs/dutch.txt");
        assert_eq!(
            config.resolve_dictionary(&absolute, base),
            PathBuf::from("/abs/dutch.txt")
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DetectorConfig::new();
        config.fuzzy_mode = FuzzyMode::Permissive;
        config.languages.truncate(2);
        config.save_to_path(&path).unwrap();

        // 再次保存覆盖旧文件，且不留下未完成的文件
        config.save_to_path(&path).unwrap();
        assert!(!path.with_extension("json.partial").exists());

        let loaded = DetectorConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = DetectorConfig::load_from_path(&dir.path().join("missing.json")).unwrap();
        assert_eq!(loaded, DetectorConfig::new());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(DetectorConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DetectorConfig::new();
        config.languages.clear();
        assert!(config.save_to_path(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_init_config_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        init_config(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.partial").exists());
        assert_eq!(DetectorConfig::load_from_path(&path).unwrap(), DetectorConfig::new());
    }

    #[test]
    fn test_init_config_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "fuzzy_mode": "strict" }"#).unwrap();

        assert!(init_config(&path).is_err());
        let loaded = DetectorConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.fuzzy_mode, FuzzyMode::Strict);
    }
}
