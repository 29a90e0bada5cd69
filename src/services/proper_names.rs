//! 专有名词过滤 - 业务能力层
//!
//! 在调用 LLM 之前，离线排除已知的人名/地名，避免无意义的远程请求。

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use crate::error::FileError;

/// 专有名词过滤器
///
/// 加载后只读。列表缺失时为空集，即所有词条都不算专有名词。
#[derive(Debug, Clone, Default)]
pub struct ProperNameFilter {
    names: HashSet<String>,
}

impl ProperNameFilter {
    /// 从名字列表构建（统一转为小写）
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// 从文本文件加载，每行一个名字
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| FileError::ProperNamesUnavailable {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_names(content.lines()))
    }

    /// 加载失败时退化为空过滤器，不中断流程
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(filter) => {
                info!("✓ 已加载 {} 个专有名词", filter.len());
                filter
            }
            Err(e) => {
                warn!("⚠️ {}，不做专有名词预过滤", e);
                Self::default()
            }
        }
    }

    /// 词条是否为已知专有名词（忽略大小写）
    pub fn is_proper_name(&self, label: &str) -> bool {
        self.names.contains(&label.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
