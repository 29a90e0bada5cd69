pub mod logging;
pub mod retry;

pub use retry::{retry_with_backoff, Exhausted, RetryPolicy};
