//! 指数退避重试
//!
//! 与具体请求无关：只负责"调用、失败、等待、再调用"，
//! 由调用方决定操作本身和最终错误如何包装。

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

/// 重试策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// 最多尝试次数（含首次）
    pub max_attempts: u32,
    /// 第一次失败后的等待时间
    pub initial_backoff: Duration,
    /// 每次失败后等待时间的倍数
    pub multiplier: f64,
    /// 等待时间上限
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(1500),
            multiplier: 2.0,
            max_backoff: Duration::from_secs(12),
        }
    }
}

impl RetryPolicy {
    /// 第 `failed_attempts` 次失败之后的等待时间（从 1 开始计数）
    pub fn backoff_after(&self, failed_attempts: u32) -> Duration {
        let exponent = failed_attempts.saturating_sub(1);
        let factor = self.multiplier.powi(i32::try_from(exponent).unwrap_or(i32::MAX));
        let secs = self.initial_backoff.as_secs_f64() * factor;
        if !secs.is_finite() || secs >= self.max_backoff.as_secs_f64() {
            self.max_backoff
        } else {
            Duration::from_secs_f64(secs)
        }
    }
}

/// 最后一次失败的信息
#[derive(Debug)]
pub struct Exhausted<E> {
    /// 实际尝试次数
    pub attempts: u32,
    /// 最后一次的错误
    pub last_error: E,
}

/// 带指数退避的异步重试
///
/// 成功立即返回；失败时按 [`RetryPolicy::backoff_after`] 休眠后再试，
/// 直到用完 `max_attempts` 次，返回最后一次的错误。
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, Exhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(result) => return Ok(result),
            Err(e) if attempt >= max_attempts => {
                return Err(Exhausted {
                    attempts: attempt,
                    last_error: e,
                });
            }
            Err(e) => {
                let delay = policy.backoff_after(attempt);
                warn!(
                    "⚠️ 请求失败 (第 {}/{} 次): {}，{:.1} 秒后重试",
                    attempt,
                    max_attempts,
                    e,
                    delay.as_secs_f64()
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
