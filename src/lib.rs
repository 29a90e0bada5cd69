//! # Vocab Definer
//!
//! 为英语词汇列表批量补全简短的西班牙语释义，同时剔除专有名词、缩写等非通用词汇。
//!
//! ## 架构设计
//!
//! ### ① 基础能力（Services）
//! - `ProperNameFilter` - 本地专有名词预过滤
//! - `DefinitionService` - 向 LLM 请求一批词条的释义（超时 + 重试）
//!
//! ### ② 流程层（Workflow）
//! - `BatchPlan` - 一批词条的预处理结果
//! - `reconcile` - 把 LLM 结果归并为保留 / 丢弃
//!
//! ### ③ 编排层（Orchestration）
//! - `Batcher` - 定长分批
//! - `App` - 一次完整运行：加载 → 逐批处理 → 写出 → 统计
//!
//! ## 模块结构

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DefinedEntry, DefinitionMap, VocabEntry};
pub use orchestrator::{App, Batcher};
pub use services::{ChatTransport, DefinitionRequest, DefinitionService, ProperNameFilter};
pub use workflow::{reconcile, BatchPlan, RunSummary, Tally};
