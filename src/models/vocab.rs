use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 输入词条
///
/// 输入文件中的对象至少包含 `label`，其余字段忽略。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl VocabEntry {
    /// 只有词条、没有释义的条目
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            definition: None,
        }
    }
}

/// 输出词条：释义一定存在且非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinedEntry {
    pub label: String,
    pub definition: String,
}

/// 单批结果：词条（原样）→ 释义或 null
pub type DefinitionMap = HashMap<String, Option<String>>;
