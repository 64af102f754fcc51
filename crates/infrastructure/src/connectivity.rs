//! Connectivity monitor
//!
//! Tracks backend reachability as a boolean signal. A background task
//! probes on an interval and publishes transitions over a watch channel;
//! the monitor performs no queueing itself - pending-sync state belongs
//! to the session store. The probe task is aborted when the monitor is
//! dropped, so teardown happens on every exit path of the owning view.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// One reachability check
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

/// Probe that considers any HTTP response from the backend as "online"
///
/// Even an error status means the network path is up; only transport
/// failures (DNS, refused, timeout) count as offline.
pub struct HttpProbe {
    client: Client,
    url: String,
}

impl HttpProbe {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create probe HTTP client")?;
        Ok(Self {
            client,
            url: base_url.into(),
        })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn is_reachable(&self) -> bool {
        self.client.head(&self.url).send().await.is_ok()
    }
}

/// Observable online/offline signal
///
/// Starts optimistic (online) and corrects itself on the first probe
/// tick, which fires immediately.
pub struct NetworkMonitor {
    rx: watch::Receiver<bool>,
    handle: JoinHandle<()>,
}

impl NetworkMonitor {
    /// Spawn the probe loop
    pub fn start(probe: Arc<dyn ReachabilityProbe>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(true);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let online = probe.is_reachable().await;
                tx.send_if_modified(|current| {
                    if *current != online {
                        if online {
                            info!("Connectivity restored");
                        } else {
                            warn!("Connectivity lost");
                        }
                        *current = online;
                        true
                    } else {
                        false
                    }
                });
            }
        });
        Self { rx, handle }
    }

    /// Current reachability state
    pub fn is_online(&self) -> bool {
        *self.rx.borrow()
    }

    /// Receiver that observes transitions (`changed().await`)
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }
}

impl Drop for NetworkMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlagProbe(AtomicBool);

    #[async_trait]
    impl ReachabilityProbe for FlagProbe {
        async fn is_reachable(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_monitor_publishes_transitions() {
        let probe = Arc::new(FlagProbe(AtomicBool::new(false)));
        let monitor = NetworkMonitor::start(probe.clone(), Duration::from_millis(10));
        let mut rx = monitor.subscribe();

        // Starts optimistic, goes offline on the first probe
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("offline transition observed")
            .unwrap();
        assert!(!monitor.is_online());

        probe.0.store(true, Ordering::SeqCst);
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("online transition observed")
            .unwrap();
        assert!(monitor.is_online());
    }

    #[tokio::test]
    async fn test_drop_tears_down_probe_task() {
        let probe = Arc::new(FlagProbe(AtomicBool::new(true)));
        let monitor = NetworkMonitor::start(probe, Duration::from_millis(10));
        let mut rx = monitor.subscribe();
        drop(monitor);

        // The aborted task drops its sender, closing the channel
        let closed = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
