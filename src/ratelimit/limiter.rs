//! Named limiter instances per operation class.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::config::RateLimitConfig;

use super::window::{Decision, RateWindow};

/// Operation classes with independent quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Upload,
    Download,
    Preview,
    /// Catch-all for sensitive endpoints without a dedicated limiter.
    General,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Upload => "upload",
            Operation::Download => "download",
            Operation::Preview => "preview",
            Operation::General => "general",
        }
    }
}

/// A [`RateWindow`] bound to one operation class.
///
/// Quotas are immutable for the lifetime of the instance; each operation
/// class owns its own identifier map, so classes never share state.
pub struct OperationLimiter {
    operation: Operation,
    window: RateWindow,
}

impl OperationLimiter {
    pub fn new(operation: Operation, window: Duration, max_requests: u32) -> Self {
        Self {
            operation,
            window: RateWindow::new(window, max_requests),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Check and count one request for `identifier`.
    pub fn is_allowed(&self, identifier: &str) -> Decision {
        let decision = self.window.check(identifier);
        trace!(
            operation = self.operation.as_str(),
            identifier,
            allowed = decision.allowed,
            "Rate limit checked"
        );
        decision
    }

    fn sweep(&self) -> usize {
        self.window.sweep()
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> &RateWindow {
        &self.window
    }
}

/// The four gateway limiter instances.
pub struct LimiterSet {
    pub upload: Arc<OperationLimiter>,
    pub download: Arc<OperationLimiter>,
    pub preview: Arc<OperationLimiter>,
    pub general: Arc<OperationLimiter>,
}

impl LimiterSet {
    pub fn from_config(config: &RateLimitConfig) -> Self {
        let build = |operation: Operation, window_secs: u64, max_requests: u32| {
            Arc::new(OperationLimiter::new(
                operation,
                Duration::from_secs(window_secs),
                max_requests,
            ))
        };

        Self {
            upload: build(
                Operation::Upload,
                config.upload.window_secs,
                config.upload.max_requests,
            ),
            download: build(
                Operation::Download,
                config.download.window_secs,
                config.download.max_requests,
            ),
            preview: build(
                Operation::Preview,
                config.preview.window_secs,
                config.preview.max_requests,
            ),
            general: build(
                Operation::General,
                config.general.window_secs,
                config.general.max_requests,
            ),
        }
    }

    fn all(&self) -> [&Arc<OperationLimiter>; 4] {
        [&self.upload, &self.download, &self.preview, &self.general]
    }
}

/// Spawn the periodic sweeper that drops expired window entries.
///
/// Runs on a fixed interval independent of request traffic and takes the
/// same per-map lock as live checks. Stops on shutdown.
pub fn spawn_sweeper(
    limiters: Arc<LimiterSet>,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick of a tokio interval fires immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    for limiter in limiters.all() {
                        let removed = limiter.sweep();
                        if removed > 0 {
                            debug!(
                                operation = limiter.operation().as_str(),
                                removed,
                                "Swept expired rate limit windows"
                            );
                        }
                    }
                }
                _ = shutdown.recv() => {
                    debug!("Rate limit sweeper stopping");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_contract_quotas() {
        let limiters = LimiterSet::from_config(&RateLimitConfig::default());

        let expect = [
            (&limiters.upload, 900, 10),
            (&limiters.download, 300, 30),
            (&limiters.preview, 60, 50),
            (&limiters.general, 60, 100),
        ];
        for (limiter, window_secs, max) in expect {
            assert_eq!(limiter.window().window(), Duration::from_secs(window_secs));
            assert_eq!(limiter.window().max_requests(), max);
        }
    }

    #[test]
    fn upload_quota_exhausts_after_ten_requests() {
        let limiters = LimiterSet::from_config(&RateLimitConfig::default());

        for _ in 0..10 {
            assert!(limiters.upload.is_allowed("u1").allowed);
        }
        let denied = limiters.upload.is_allowed("u1");
        assert!(!denied.allowed);
        // Window just opened, so the reset is roughly the full 15 minutes out.
        let secs = denied.retry_after_secs();
        assert!((899..=900).contains(&secs), "retry_after_secs = {secs}");
    }

    #[test]
    fn operation_classes_do_not_share_state() {
        let limiters = LimiterSet::from_config(&RateLimitConfig::default());

        for _ in 0..10 {
            assert!(limiters.upload.is_allowed("u1").allowed);
        }
        assert!(!limiters.upload.is_allowed("u1").allowed);

        // Same identifier, different class: full quota available.
        assert!(limiters.download.is_allowed("u1").allowed);
        assert!(limiters.preview.is_allowed("u1").allowed);
        assert!(limiters.general.is_allowed("u1").allowed);
    }

    #[tokio::test]
    async fn sweeper_stops_on_shutdown() {
        let limiters = Arc::new(LimiterSet::from_config(&RateLimitConfig::default()));
        let (tx, rx) = broadcast::channel(1);

        let handle = spawn_sweeper(limiters, Duration::from_millis(10), rx);
        tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
