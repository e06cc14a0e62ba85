// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// 显式等待超时
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("condition not met within {0:?}")]
pub struct WaitTimeout(pub Duration);

/// 显式等待：反复探测直到条件满足或截止时间到达
///
/// `probe` 返回 `Some(value)` 表示条件成立。每次探测本身也受剩余时间约束，
/// 因此一次卡住的探测不会让等待超出上限。
pub async fn wait_for<T, F, Fut>(
    timeout: Duration,
    poll_interval: Duration,
    mut probe: F,
) -> Result<T, WaitTimeout>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if let Ok(Some(value)) = tokio::time::timeout(remaining, probe()).await {
            return Ok(value);
        }

        if Instant::now() + poll_interval > deadline {
            return Err(WaitTimeout(timeout));
        }
        tokio::time::sleep(poll_interval).await;
    }
}
