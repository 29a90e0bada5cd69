pub mod batch_ctx;
pub mod reconciler;

pub use batch_ctx::BatchCtx;
pub use reconciler::{reconcile, BatchOutcome, BatchPlan, Progress, RunSummary, Tally};
