//! リソースタグ

use serde::{Deserialize, Serialize};

/// キーと値のペア
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// `Name` タグ
    pub fn name(value: impl Into<String>) -> Self {
        Self::new("Name", value)
    }
}

/// `Name` タグを先頭にしたタグ列を作る
///
/// `extra` に `Name` が含まれていても先頭の `Name` が優先され、重複分は捨てる。
pub fn named_tags(name: &str, extra: &[Tag]) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(extra.len() + 1);
    tags.push(Tag::name(name));
    tags.extend(extra.iter().filter(|t| t.key != "Name").cloned());
    tags
}

/// タグ列から `Name` を取り出す
pub fn name_tag(tags: &[Tag]) -> Option<&str> {
    tags.iter()
        .find(|t| t.key == "Name")
        .map(|t| t.value.as_str())
}
