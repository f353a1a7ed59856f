//! 词形归一化
//!
//! 将单词折叠为纯 ASCII 小写形式：
//! - ASCII 字母转小写保留
//! - 带重音的拉丁字母折叠为基础字母（é → e, Ñ → n）
//! - 特殊字母单独映射（ß → s）
//! - 其它字符（数字、标点、非拉丁文字）静默丢弃

use unicode_normalization::UnicodeNormalization;

/// 无法通过 NFD 分解得到基础字母的特殊字符
fn fold_special(ch: char) -> Option<char> {
    match ch {
        'ß' | 'ẞ' => Some('s'),
        _ => None,
    }
}

/// 归一化单词
///
/// 纯函数，不可失败；无法识别的输入只会得到更短或空的结果。
/// 输出只含 `a-z`，因此 `normalize(normalize(s)) == normalize(s)`。
pub fn normalize(token: &str) -> String {
    let mut result = String::with_capacity(token.len());

    for ch in token.chars() {
        if ch.is_ascii() {
            if ch.is_ascii_alphabetic() {
                result.push(ch.to_ascii_lowercase());
            }
            continue;
        }

        if let Some(base) = fold_special(ch) {
            result.push(base);
            continue;
        }

        // NFD 分解后首字符为基础字母，其余为组合附加符号
        for part in std::iter::once(ch).nfd() {
            if part.is_ascii_alphabetic() {
                result.push(part.to_ascii_lowercase());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_lowercase() {
        assert_eq!(normalize("Hello"), "hello");
        assert_eq!(normalize("WORLD"), "world");
    }

    #[test]
    fn test_drop_non_letters() {
        assert_eq!(normalize("don't!"), "dont");
        assert_eq!(normalize("abc123"), "abc");
        assert_eq!(normalize("1234"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(normalize("très"), "tres");
        assert_eq!(normalize("Ça"), "ca");
        assert_eq!(normalize("señor"), "senor");
        assert_eq!(normalize("Über"), "uber");
        assert_eq!(normalize("perché"), "perche");
        assert_eq!(normalize("ÀÁÂÃÄÅ"), "aaaaaa");
        assert_eq!(normalize("ýÿ"), "yy");
    }

    #[test]
    fn test_fold_eszett() {
        assert_eq!(normalize("Straße"), "strase");
    }

    #[test]
    fn test_drop_unknown_scripts() {
        // 非拉丁文字直接丢弃
        assert_eq!(normalize("привет"), "");
        assert_eq!(normalize("你好abc"), "abc");
        assert_eq!(normalize("æøå"), "a");
    }

    #[test]
    fn test_idempotent() {
        for s in ["très", "Straße", "Hello, World!", "naïve café", "ÆØÅ", "", "x1y2"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "输入: {}", s);
        }
    }
}
