//! Combination Context - Value Objects

use serde::{Deserialize, Serialize};

use super::CombinationError;

/// 片段对键的分隔符（持久化格式）
pub const PAIR_SEPARATOR: &str = "|||";

const ESCAPE: u8 = b'\\';
const PIPE: u8 = b'|';

/// 片段标识（通常是素材文件名）
///
/// 不透明字符串，按字节精确比较
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SegmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SegmentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 相邻片段对
///
/// 结构化的两字段键，按值比较，顺序敏感：`(a, b) != (b, a)`。
/// 只在落盘时编码为字符串，见 [`PairKey::encode`]。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    first: SegmentId,
    second: SegmentId,
}

impl PairKey {
    pub fn new(first: SegmentId, second: SegmentId) -> Self {
        Self { first, second }
    }

    /// 编码为 `<first>|||<second>`
    ///
    /// 两个分量中的 `\` 与 `|` 会被转义为 `\\` 与 `\|`，
    /// 因此不含这两个字符的标识编码结果与旧格式完全一致。
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(
            self.first.as_str().len() + self.second.as_str().len() + PAIR_SEPARATOR.len(),
        );
        escape_into(self.first.as_str(), &mut out);
        out.push_str(PAIR_SEPARATOR);
        escape_into(self.second.as_str(), &mut out);
        out
    }

    /// 解析 [`PairKey::encode`] 的输出
    ///
    /// 第一个未转义的 `|||` 是分隔符；未转义的单个 `|` 按字面处理，
    /// `\` 只在后跟 `\` 或 `|` 时视为转义。找不到分隔符时返回 `None`。
    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = raw.as_bytes();
        let separator = PAIR_SEPARATOR.as_bytes();
        let mut first = Vec::with_capacity(bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            if is_escape_at(bytes, i) {
                first.push(bytes[i + 1]);
                i += 2;
            } else if bytes[i..].starts_with(separator) {
                let second = unescape(&bytes[i + separator.len()..]);
                return Some(Self {
                    first: SegmentId(String::from_utf8(first).ok()?),
                    second: SegmentId(String::from_utf8(second).ok()?),
                });
            } else {
                first.push(bytes[i]);
                i += 1;
            }
        }

        None
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

fn escape_into(value: &str, out: &mut String) {
    for ch in value.chars() {
        if ch == '\\' || ch == '|' {
            out.push('\\');
        }
        out.push(ch);
    }
}

fn is_escape_at(bytes: &[u8], i: usize) -> bool {
    bytes[i] == ESCAPE && matches!(bytes.get(i + 1), Some(&ESCAPE) | Some(&PIPE))
}

fn unescape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if is_escape_at(bytes, i) {
            out.push(bytes[i + 1]);
            i += 2;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

/// 三段组合（前段、中段、后段）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub front: SegmentId,
    pub mid: SegmentId,
    pub end: SegmentId,
}

impl Combination {
    pub fn new(
        front: impl Into<SegmentId>,
        mid: impl Into<SegmentId>,
        end: impl Into<SegmentId>,
    ) -> Self {
        Self {
            front: front.into(),
            mid: mid.into(),
            end: end.into(),
        }
    }

    /// 前中片段对
    pub fn front_mid(&self) -> PairKey {
        PairKey::new(self.front.clone(), self.mid.clone())
    }

    /// 中后片段对
    pub fn mid_end(&self) -> PairKey {
        PairKey::new(self.mid.clone(), self.end.clone())
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} + {}", self.front, self.mid, self.end)
    }
}

/// 项目名称
///
/// 每个项目拥有独立的组合引擎和数据文件，名称会作为目录名使用。
///
/// 不变量:
/// - 非空，且不超过 64 字符
/// - 只包含 ASCII 字母、数字、`_`、`-`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub const MAX_LEN: usize = 64;

    pub fn new(name: impl Into<String>) -> Result<Self, CombinationError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name.len() <= Self::MAX_LEN
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(CombinationError::InvalidProjectName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(a: &str, b: &str) -> PairKey {
        PairKey::new(a.into(), b.into())
    }

    #[test]
    fn test_plain_ids_encode_in_legacy_format() {
        assert_eq!(key("front_01.mp4", "mid_02.mp4").encode(), "front_01.mp4|||mid_02.mp4");
    }

    #[test]
    fn test_pair_key_is_order_sensitive() {
        assert_ne!(key("a", "b"), key("b", "a"));
        assert_ne!(key("a", "b").encode(), key("b", "a").encode());
    }

    #[test]
    fn test_separator_inside_id_does_not_collide() {
        // 旧的直接拼接下两者都会得到 "a|||b|||c"
        let left = key("a|||b", "c");
        let right = key("a", "b|||c");
        assert_ne!(left.encode(), right.encode());
        assert_eq!(PairKey::decode(&left.encode()), Some(left));
        assert_eq!(PairKey::decode(&right.encode()), Some(right));
    }

    #[test]
    fn test_decode_handles_escapes_and_unicode() {
        let original = key("片头\\一|号.mp4", "中段|");
        assert_eq!(PairKey::decode(&original.encode()), Some(original));
    }

    #[test]
    fn test_decode_legacy_entries() {
        assert_eq!(PairKey::decode("f1|||m1"), Some(key("f1", "m1")));
        assert_eq!(PairKey::decode("a|b|||c"), Some(key("a|b", "c")));
        assert_eq!(
            PairKey::decode("C:\\clips\\a.mp4|||b.mp4"),
            Some(key("C:\\clips\\a.mp4", "b.mp4"))
        );
        assert_eq!(PairKey::decode("|||"), Some(key("", "")));
    }

    #[test]
    fn test_decode_without_separator() {
        assert_eq!(PairKey::decode("no-separator"), None);
        assert_eq!(PairKey::decode("a||b"), None);
        assert_eq!(PairKey::decode(""), None);
    }

    #[test]
    fn test_combination_pairs() {
        let c = Combination::new("f", "m", "e");
        assert_eq!(c.front_mid(), key("f", "m"));
        assert_eq!(c.mid_end(), key("m", "e"));
    }

    #[test]
    fn test_project_name_validation() {
        assert!(ProjectName::new("default").is_ok());
        assert!(ProjectName::new("shop-2024_A").is_ok());
        assert!(ProjectName::new("").is_err());
        assert!(ProjectName::new("../etc").is_err());
        assert!(ProjectName::new("a b").is_err());
        assert!(ProjectName::new("x".repeat(65)).is_err());
    }
}
