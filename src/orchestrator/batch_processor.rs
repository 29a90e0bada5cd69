//! 批量词条处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整运行的调度。
//!
//! ## 核心流程
//!
//! 1. **初始化**：解析 API 密钥（缺失即终止），创建释义服务
//! 2. **加载**：读取输入词条，加载专有名词列表（失败则不过滤）
//! 3. **分批处理**：逐批预过滤、请求释义、归并结果，每批输出进度
//! 4. **写出**：全部批次成功后一次性写出保留的词条
//! 5. **统计**：输出原始总数、保留数、丢弃数
//!
//! ## 设计特点
//!
//! - **严格串行**：一次只处理一批，保证输出顺序与输入一致
//! - **失败即停**：任何一批重试耗尽都会终止整次运行，且不写输出文件
//! - **无断点续跑**：失败后需要从头重新运行

use tracing::{error, warn};

use crate::config::Config;
use crate::credentials::resolve_api_key;
use crate::error::AppResult;
use crate::models::{load_vocab_entries, write_defined_entries, DefinitionMap, VocabEntry};
use crate::orchestrator::batcher::Batcher;
use crate::services::{ChatTransport, DefinitionService, OpenAiTransport, ProperNameFilter};
use crate::utils::logging::{
    log_batch_done, log_batch_start, log_dropped, log_entries_loaded, log_progress, log_startup, print_final_stats,
};
use crate::workflow::{reconcile, BatchCtx, BatchPlan, RunSummary, Tally};

/// 应用主结构
pub struct App {
    config: Config,
    definer: DefinitionService,
}

impl App {
    /// 初始化应用
    ///
    /// 找不到 API 密钥时直接返回配置错误，不处理任何批次。
    pub fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let api_key = resolve_api_key(&config.secrets_path)?;
        let transport = OpenAiTransport::new(&api_key, &config.llm_api_base_url);
        let definer = DefinitionService::new(&config, Box::new(transport));

        Ok(Self { config, definer })
    }

    /// 使用指定的传输层创建应用
    ///
    /// 超时和重试策略取自配置。
    pub fn with_transport(config: Config, transport: Box<dyn ChatTransport>) -> Self {
        let definer = DefinitionService::new(&config, transport);
        Self { config, definer }
    }

    /// 使用指定的释义服务创建应用
    pub fn with_service(config: Config, definer: DefinitionService) -> Self {
        Self { config, definer }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunSummary> {
        let entries = load_vocab_entries(&self.config.input_path).await?;
        let total = entries.len();
        if entries.is_empty() {
            warn!("⚠️ 输入文件中没有词条");
        }

        let filter = ProperNameFilter::load_or_empty(&self.config.proper_names_path);
        let batcher = Batcher::new(self.config.batch_size);
        log_entries_loaded(total, batcher.batch_count(total));

        let tally = self.process_all_batches(&entries, &filter, &batcher).await?;

        write_defined_entries(&self.config.output_path, &tally.kept).await?;

        let summary = tally.summary(total);
        print_final_stats(&summary, &self.config.output_path);

        Ok(summary)
    }

    /// 依次处理所有批次
    async fn process_all_batches(
        &self,
        entries: &[VocabEntry],
        filter: &ProperNameFilter,
        batcher: &Batcher,
    ) -> AppResult<Tally> {
        let total = entries.len();
        let total_batches = batcher.batch_count(total);
        let mut tally = Tally::default();

        for (idx, batch) in batcher.batches(entries).enumerate() {
            let ctx = BatchCtx::new(idx + 1, total_batches, idx * batcher.size(), batch.len());
            let plan = BatchPlan::prepare(batch, filter);
            log_batch_start(&ctx, plan.pre_filtered_count(), plan.labels().len());

            // 全部被预过滤时不调用 LLM
            let results = if plan.needs_request() {
                self.definer
                    .request_definitions(plan.labels())
                    .await
                    .map_err(|e| {
                        error!("{} ❌ 释义请求失败，终止运行: {}", ctx, e);
                        e
                    })?
            } else {
                DefinitionMap::new()
            };

            let outcome = reconcile(&plan, &results, &mut tally);

            log_batch_done(&ctx, &outcome);
            log_dropped(&ctx, &tally.dropped[tally.dropped.len() - outcome.dropped..]);
            log_progress(&tally.progress(total));
        }

        Ok(tally)
    }
}
