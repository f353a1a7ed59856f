//! 分词器
//!
//! 按空白切分输入文本，标点不做处理（由归一化丢弃）

/// Token
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// 在原文中的起始字节索引
    pub start: usize,
    /// 在原文中的结束字节索引（不含）
    pub end: usize,
}

/// 分词器
pub struct Tokenizer;

impl Tokenizer {
    /// 按空白分词
    pub fn tokenize(text: &str) -> Vec<Token<'_>> {
        let mut tokens = Vec::new();
        let mut current_start: Option<usize> = None;

        for (idx, ch) in text.char_indices() {
            match (ch.is_whitespace(), current_start) {
                (true, Some(start)) => {
                    tokens.push(Token {
                        text: &text[start..idx],
                        start,
                        end: idx,
                    });
                    current_start = None;
                }
                (false, None) => current_start = Some(idx),
                _ => {}
            }
        }

        // 处理最后一个 token
        if let Some(start) = current_start {
            tokens.push(Token {
                text: &text[start..],
                start,
                end: text.len(),
            });
        }

        tokens
    }

    /// 文本中是否含有任何字母（ASCII 或其它文字）
    pub fn has_alphabetic(text: &str) -> bool {
        text.chars().any(char::is_alphabetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_whitespace() {
        let tokens = Tokenizer::tokenize("  hello   world\tbonjour\n");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["hello", "world", "bonjour"]);
        assert_eq!(tokens[0].start, 2);
        assert_eq!(tokens[0].end, 7);
    }

    #[test]
    fn test_tokenize_keeps_punctuation() {
        let tokens = Tokenizer::tokenize("très, bien!");
        assert_eq!(tokens[0].text, "très,");
        assert_eq!(tokens[1].text, "bien!");
        assert_eq!(tokens[1].end, "très, bien!".len());
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Tokenizer::tokenize("").is_empty());
        assert!(Tokenizer::tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_has_alphabetic() {
        assert!(Tokenizer::has_alphabetic("123 a"));
        assert!(Tokenizer::has_alphabetic("été"));
        assert!(Tokenizer::has_alphabetic("ß"));
        assert!(!Tokenizer::has_alphabetic("123 !?"));
        assert!(!Tokenizer::has_alphabetic(""));
    }
}
