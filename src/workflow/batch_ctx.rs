//! 批次处理上下文
//!
//! 封装"我正在处理第几批、覆盖哪些词条"这一信息

use std::fmt::Display;

/// 批次处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCtx {
    /// 批次编号（从1开始）
    pub batch_num: usize,

    /// 批次总数
    pub total_batches: usize,

    /// 本批第一个词条在输入中的位置（从0开始）
    pub offset: usize,

    /// 本批词条数
    pub len: usize,
}

impl BatchCtx {
    /// 创建新的批次上下文
    pub fn new(batch_num: usize, total_batches: usize, offset: usize, len: usize) -> Self {
        Self {
            batch_num,
            total_batches,
            offset,
            len,
        }
    }
}

impl Display for BatchCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[批次 #{}/{} 词条 {}-{}]",
            self.batch_num,
            self.total_batches,
            self.offset + 1,
            self.offset + self.len
        )
    }
}
