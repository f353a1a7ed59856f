//! 编辑距离
//!
//! Levenshtein 距离：替换、插入、删除代价均为 1
//!
//! 字典树模糊查询只用 `DistanceRow`；`levenshtein` 是对外的整串参考实现，
//! `DistanceRow` 逐字符累积的结果必须与它一致（见 `test_row_matches_levenshtein`）。

/// 计算两个字符串的 Levenshtein 距离（按字符），`DistanceRow` 的参考结果
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// 增量编辑距离行
///
/// 字典树深度优先遍历时，每下降一层只需在父节点的行上追加一个字符，
/// 不必对整条路径重新计算。`cells[j]` 表示当前路径与 `target` 前 `j` 个字符的距离。
#[derive(Debug, Clone)]
pub struct DistanceRow {
    cells: Vec<usize>,
}

impl DistanceRow {
    /// 空路径对应的初始行
    pub fn start(target: &[char]) -> Self {
        Self {
            cells: (0..=target.len()).collect(),
        }
    }

    /// 路径追加字符 `ch` 后得到的新行
    pub fn advance(&self, ch: char, target: &[char]) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        cells.push(self.cells[0] + 1);

        for (j, &tc) in target.iter().enumerate() {
            let cost = if tc == ch { 0 } else { 1 };
            let deletion = self.cells[j + 1] + 1;
            let insertion = cells[j] + 1;
            let substitution = self.cells[j] + cost;
            cells.push(deletion.min(insertion).min(substitution));
        }

        Self { cells }
    }

    /// 当前路径与完整 `target` 的距离
    pub fn distance(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }

    /// 本行最小值：任何以当前路径为前缀的单词，距离都不会低于它
    pub fn lower_bound(&self) -> usize {
        self.cells.iter().copied().min().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_distance(path: &str, target: &str) -> usize {
        let target: Vec<char> = target.chars().collect();
        let mut row = DistanceRow::start(&target);
        for ch in path.chars() {
            row = row.advance(ch, &target);
        }
        row.distance()
    }

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("hello", "helo"), 1);
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abcd", ""), 4);
    }

    #[test]
    fn test_levenshtein_symmetric() {
        assert_eq!(levenshtein("flaw", "lawn"), levenshtein("lawn", "flaw"));
        assert_eq!(levenshtein("très", "tres"), 1);
    }

    #[test]
    fn test_row_matches_levenshtein() {
        let pairs = [
            ("kitten", "sitting"),
            ("hello", "helo"),
            ("", "abc"),
            ("abc", ""),
            ("bonjour", "bonjoru"),
            ("straße", "strasse"),
            ("xyzzy", "hello"),
        ];
        for (a, b) in pairs {
            assert_eq!(row_distance(a, b), levenshtein(a, b), "{} / {}", a, b);
        }
    }

    #[test]
    fn test_row_lower_bound() {
        let target: Vec<char> = "hello".chars().collect();
        let row = DistanceRow::start(&target)
            .advance('x', &target)
            .advance('y', &target)
            .advance('z', &target);
        // "xyz" 无论如何延长，与 "hello" 的距离都至少为 3
        assert_eq!(row.lower_bound(), 3);
        assert!(row.distance() >= row.lower_bound());
    }
}
