use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{BrowserError, WaitTimeout};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 有界轮询：反复探测条件，直到满足或超时
#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    timeout: Duration,
    interval: Duration,
}

impl Waiter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 至少探测一次；探测出错视为条件尚未满足
    pub async fn until<T, F, Fut>(&self, what: &str, mut probe: F) -> Result<T, WaitTimeout>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>, BrowserError>>,
    {
        // 超时过大时视为不设上限
        let deadline = Instant::now().checked_add(self.timeout);
        loop {
            match probe().await {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => {}
                Err(e) => debug!("等待 {} 时探测失败: {}", what, e),
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(WaitTimeout {
                            what: what.to_string(),
                            timeout: self.timeout,
                        });
                    }
                    self.interval.min(deadline - now)
                }
                None => self.interval,
            };
            sleep(pause).await;
        }
    }
}
