//! 批次结果归并 - 流程层
//!
//! 把一批原始词条和 LLM 返回的映射合并成"保留 / 丢弃"两部分。
//! 累加状态放在 [`Tally`] 中，由调用方在批次循环里传递。

use std::collections::HashSet;

use crate::models::{DefinedEntry, DefinitionMap, VocabEntry};
use crate::services::ProperNameFilter;

/// 一批词条的预处理结果
///
/// 记录每个词条是否被专有名词过滤器排除，以及需要发送给 LLM 的词条。
#[derive(Debug, Clone)]
pub struct BatchPlan<'a> {
    entries: &'a [VocabEntry],
    pre_filtered: Vec<bool>,
    labels: Vec<String>,
}

impl<'a> BatchPlan<'a> {
    /// 预过滤一批词条
    ///
    /// 发送列表保持原顺序并去重，同一词条只请求一次。
    pub fn prepare(entries: &'a [VocabEntry], filter: &ProperNameFilter) -> Self {
        let pre_filtered: Vec<bool> = entries
            .iter()
            .map(|entry| filter.is_proper_name(&entry.label))
            .collect();

        let mut seen = HashSet::new();
        let labels = entries
            .iter()
            .zip(&pre_filtered)
            .filter(|(_, excluded)| !**excluded)
            .map(|(entry, _)| entry.label.as_str())
            .filter(|label| seen.insert(*label))
            .map(str::to_string)
            .collect();

        Self {
            entries,
            pre_filtered,
            labels,
        }
    }

    /// 需要发送给 LLM 的词条
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// 是否需要调用 LLM
    pub fn needs_request(&self) -> bool {
        !self.labels.is_empty()
    }

    /// 被专有名词过滤器排除的词条数
    pub fn pre_filtered_count(&self) -> usize {
        self.pre_filtered.iter().filter(|excluded| **excluded).count()
    }
}

/// 累计的保留 / 丢弃结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub kept: Vec<DefinedEntry>,
    pub dropped: Vec<String>,
}

impl Tally {
    /// 已处理的词条数
    pub fn processed(&self) -> usize {
        self.kept.len() + self.dropped.len()
    }

    pub fn progress(&self, total: usize) -> Progress {
        Progress {
            processed: self.processed(),
            kept: self.kept.len(),
            dropped: self.dropped.len(),
            total,
        }
    }

    pub fn summary(&self, total: usize) -> RunSummary {
        RunSummary {
            total,
            kept: self.kept.len(),
            dropped: self.dropped.len(),
        }
    }
}

/// 每批处理完成后的进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub kept: usize,
    pub dropped: usize,
    pub total: usize,
}

/// 整次运行的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub kept: usize,
    pub dropped: usize,
}

/// 单批归并结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub kept: usize,
    pub dropped: usize,
}

/// 归并一批结果
///
/// - 被预过滤的词条直接丢弃，不看 LLM 的结果
/// - 释义缺失、为 null 或去掉空白后为空的词条丢弃
/// - 其余词条保留，释义去掉首尾空白
///
/// 保留和丢弃列表都按批内原顺序追加。
pub fn reconcile(plan: &BatchPlan<'_>, results: &DefinitionMap, tally: &mut Tally) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (entry, excluded) in plan.entries.iter().zip(&plan.pre_filtered) {
        let definition = if *excluded {
            None
        } else {
            results
                .get(&entry.label)
                .and_then(|definition| definition.as_deref())
                .map(str::trim)
                .filter(|definition| !definition.is_empty())
        };

        match definition {
            Some(definition) => {
                tally.kept.push(DefinedEntry {
                    label: entry.label.clone(),
                    definition: definition.to_string(),
                });
                outcome.kept += 1;
            }
            None => {
                tally.dropped.push(entry.label.clone());
                outcome.dropped += 1;
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(labels: &[&str]) -> Vec<VocabEntry> {
        labels.iter().map(|label| VocabEntry::new(*label)).collect()
    }

    fn results(pairs: &[(&str, Option<&str>)]) -> DefinitionMap {
        pairs
            .iter()
            .map(|(label, definition)| (label.to_string(), definition.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_prepare_excludes_proper_names() {
        let batch = entries(&["Paris", "run", "XKCD"]);
        let filter = ProperNameFilter::from_names(["paris"]);

        let plan = BatchPlan::prepare(&batch, &filter);
        assert_eq!(plan.labels(), ["run".to_string(), "XKCD".to_string()]);
        assert_eq!(plan.pre_filtered_count(), 1);
        assert!(plan.needs_request());
    }

    #[test]
    fn test_prepare_deduplicates_labels() {
        let batch = entries(&["run", "walk", "run"]);
        let plan = BatchPlan::prepare(&batch, &ProperNameFilter::default());
        assert_eq!(plan.labels(), ["run".to_string(), "walk".to_string()]);
    }

    #[test]
    fn test_all_proper_names_need_no_request() {
        let batch = entries(&["Paris", "London"]);
        let filter = ProperNameFilter::from_names(["paris", "london"]);
        let plan = BatchPlan::prepare(&batch, &filter);
        assert!(!plan.needs_request());

        let mut tally = Tally::default();
        let outcome = reconcile(&plan, &DefinitionMap::new(), &mut tally);
        assert_eq!(outcome, BatchOutcome { kept: 0, dropped: 2 });
        assert_eq!(tally.dropped, vec!["Paris", "London"]);
    }

    #[test]
    fn test_scenario_paris_run_xkcd() {
        let batch = entries(&["Paris", "run", "XKCD"]);
        let filter = ProperNameFilter::from_names(["paris"]);
        let plan = BatchPlan::prepare(&batch, &filter);
        let results = results(&[
            ("run", Some("moverse rápidamente usando las piernas")),
            ("XKCD", None),
        ]);

        let mut tally = Tally::default();
        reconcile(&plan, &results, &mut tally);

        assert_eq!(
            tally.kept,
            vec![DefinedEntry {
                label: "run".to_string(),
                definition: "moverse rápidamente usando las piernas".to_string(),
            }]
        );
        assert_eq!(tally.dropped, vec!["Paris", "XKCD"]);
    }

    #[test]
    fn test_proper_name_dropped_even_if_service_defines_it() {
        let batch = entries(&["Paris"]);
        let filter = ProperNameFilter::from_names(["paris"]);
        let plan = BatchPlan::prepare(&batch, &filter);
        let results = results(&[("Paris", Some("capital de Francia"))]);

        let mut tally = Tally::default();
        reconcile(&plan, &results, &mut tally);
        assert!(tally.kept.is_empty());
        assert_eq!(tally.dropped, vec!["Paris"]);
    }

    #[test]
    fn test_all_defined_are_kept_trimmed() {
        let batch = entries(&["run", "walk"]);
        let plan = BatchPlan::prepare(&batch, &ProperNameFilter::default());
        let results = results(&[
            ("run", Some("  moverse rápidamente usando las piernas \n")),
            ("walk", Some("avanzar a pie con pasos regulares")),
        ]);

        let mut tally = Tally::default();
        reconcile(&plan, &results, &mut tally);

        assert!(tally.dropped.is_empty());
        assert_eq!(tally.kept[0].definition, "moverse rápidamente usando las piernas");
        assert_eq!(tally.kept[1].label, "walk");
    }

    #[test]
    fn test_null_omitted_and_blank_are_dropped() {
        let batch = entries(&["run", "NASA", "omitted", "blank"]);
        let plan = BatchPlan::prepare(&batch, &ProperNameFilter::default());
        let results = results(&[
            ("run", Some("correr")),
            ("NASA", None),
            ("blank", Some("   ")),
        ]);

        let mut tally = Tally::default();
        let outcome = reconcile(&plan, &results, &mut tally);

        assert_eq!(outcome, BatchOutcome { kept: 1, dropped: 3 });
        assert_eq!(tally.dropped, vec!["NASA", "omitted", "blank"]);
    }

    #[test]
    fn test_label_lookup_is_exact() {
        let batch = entries(&["Run"]);
        let plan = BatchPlan::prepare(&batch, &ProperNameFilter::default());
        let results = results(&[("run", Some("correr"))]);

        let mut tally = Tally::default();
        reconcile(&plan, &results, &mut tally);
        assert_eq!(tally.dropped, vec!["Run"]);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let batch = entries(&["Paris", "run", "XKCD", "run"]);
        let filter = ProperNameFilter::from_names(["paris"]);
        let plan = BatchPlan::prepare(&batch, &filter);
        let results = results(&[("run", Some("correr")), ("XKCD", None)]);

        let mut first = Tally::default();
        let mut second = Tally::default();
        reconcile(&plan, &results, &mut first);
        reconcile(&plan, &results, &mut second);
        assert_eq!(first, second);
        assert_eq!(first.kept.len(), 2);
    }

    #[test]
    fn test_outcome_counts_only_current_batch() {
        let filter = ProperNameFilter::from_names(["paris"]);
        let mut tally = Tally::default();

        let first = entries(&["XKCD", "NASA"]);
        reconcile(&BatchPlan::prepare(&first, &filter), &DefinitionMap::new(), &mut tally);

        let second = entries(&["run", "Paris", "omitted"]);
        let outcome = reconcile(
            &BatchPlan::prepare(&second, &filter),
            &results(&[("run", Some("correr"))]),
            &mut tally,
        );

        assert_eq!(outcome, BatchOutcome { kept: 1, dropped: 2 });
        let batch_dropped = &tally.dropped[tally.dropped.len() - outcome.dropped..];
        assert_eq!(batch_dropped, ["Paris".to_string(), "omitted".to_string()]);
        assert_eq!(tally.dropped.len(), 4);
    }

    #[test]
    fn test_tally_accumulates_across_batches() {
        let filter = ProperNameFilter::default();
        let mut tally = Tally::default();

        let first = entries(&["run", "XKCD"]);
        reconcile(
            &BatchPlan::prepare(&first, &filter),
            &results(&[("run", Some("correr"))]),
            &mut tally,
        );
        let second = entries(&["walk"]);
        reconcile(
            &BatchPlan::prepare(&second, &filter),
            &results(&[("walk", Some("caminar"))]),
            &mut tally,
        );

        assert_eq!(
            tally.progress(5),
            Progress {
                processed: 3,
                kept: 2,
                dropped: 1,
                total: 5
            }
        );
        let labels: Vec<&str> = tally.kept.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["run", "walk"]);
        assert_eq!(tally.summary(3), RunSummary { total: 3, kept: 2, dropped: 1 });
    }
}
