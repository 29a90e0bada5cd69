/// 日志工具模块
///
/// 提供日志初始化以及批处理各阶段的输出辅助函数
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::{BatchCtx, BatchOutcome, Progress, RunSummary};

/// 初始化全局日志
///
/// 默认级别为 `info`，可通过 `RUST_LOG` 覆盖。重复调用时静默忽略。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 词汇释义补全");
    info!("📄 输入文件: {}", config.input_path);
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!("📊 每批词条数: {}", config.batch_size);
    info!("{}", "=".repeat(60));
}

/// 记录词条加载信息
///
/// # 参数
/// - `total`: 词条总数
/// - `total_batches`: 批次总数
pub fn log_entries_loaded(total: usize, total_batches: usize) {
    info!("✓ 读取到 {} 个词条", total);
    info!("📋 将分 {} 批依次处理\n", total_batches);
}

/// 记录批次开始信息
///
/// # 参数
/// - `ctx`: 批次上下文
/// - `pre_filtered`: 被专有名词过滤掉的词条数
/// - `request_len`: 实际发送的词条数
pub fn log_batch_start(ctx: &BatchCtx, pre_filtered: usize, request_len: usize) {
    info!(
        "📦 {} 开始处理: {} 个词条，预过滤 {} 个，发送 {} 个",
        ctx, ctx.len, pre_filtered, request_len
    );
}

/// 记录单批归并结果
pub fn log_batch_done(ctx: &BatchCtx, outcome: &BatchOutcome) {
    info!("✅ {} 完成: 保留 {} 丢弃 {}", ctx, outcome.kept, outcome.dropped);
}

/// 记录处理进度
pub fn log_progress(progress: &Progress) {
    info!(
        "📈 进度: {}/{} (保留 {} 丢弃 {})",
        progress.processed, progress.total, progress.kept, progress.dropped
    );
}

/// 记录被丢弃的词条（仅 debug 级别）
pub fn log_dropped(ctx: &BatchCtx, dropped: &[String]) {
    if !dropped.is_empty() {
        debug!("{} 丢弃: {:?}", ctx, dropped);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 原始总数 {}，保留 {}，丢弃 {}",
        summary.total, summary.kept, summary.dropped
    );
    info!("{}", "=".repeat(60));
    info!("\n结果已写入: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("moverse rápidamente", 7), "moverse...");
        assert_eq!(truncate_text("corto", 10), "corto");
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
