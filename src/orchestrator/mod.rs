//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batcher` - 批次划分
//! - 把输入词条切成定长、连续的批次
//!
//! ### `batch_processor` - 批量词条处理器
//! - 管理一次运行的生命周期（初始化、运行、写出）
//! - 逐批调度：预过滤 → 请求释义 → 归并
//! - 输出进度与最终统计
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<VocabEntry>)
//!     ↓
//! batcher (切分为 &[VocabEntry])
//!     ↓
//! workflow::reconciler (归并单个批次)
//!     ↓
//! services (能力层：proper_names / llm_service)
//! ```

pub mod batch_processor;
pub mod batcher;

pub use batch_processor::App;
pub use batcher::Batcher;
