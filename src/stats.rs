//! Lock-free statistics counters. The real SAS/metrics event pipeline is a
//! collaborator (§1); this module only defines the shape handlers report
//! through, plus an atomics-backed implementation good enough to observe
//! locally and in tests.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HssLatencyKind {
    Digest,
    Subscription,
}

/// The one mutable shared resource described in the concurrency model: all
/// handlers hold the same `Arc<dyn StatsHandle>` and update it without any
/// other synchronization between requests.
pub trait StatsHandle: Send + Sync {
    fn record_cache_latency(&self, elapsed: Duration);
    fn record_hss_latency(&self, elapsed: Duration, kind: HssLatencyKind);
    /// Recorded once per HSS `TOO_BUSY` / overload response; the HTTP stack
    /// uses this to throttle incoming load.
    fn record_overload_penalty(&self);
}

#[derive(Default)]
pub struct InMemoryStats {
    cache_latency_us_total: AtomicU64,
    cache_ops: AtomicU64,
    hss_digest_latency_us_total: AtomicU64,
    hss_digest_ops: AtomicU64,
    hss_subscription_latency_us_total: AtomicU64,
    hss_subscription_ops: AtomicU64,
    overload_penalties: AtomicU64,
}

impl InMemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_ops(&self) -> u64 {
        self.cache_ops.load(Ordering::Relaxed)
    }

    pub fn overload_penalties(&self) -> u64 {
        self.overload_penalties.load(Ordering::Relaxed)
    }

    pub fn mean_cache_latency(&self) -> Option<Duration> {
        let ops = self.cache_ops.load(Ordering::Relaxed);
        if ops == 0 {
            return None;
        }
        let total = self.cache_latency_us_total.load(Ordering::Relaxed);
        Some(Duration::from_micros(total / ops))
    }
}

impl StatsHandle for InMemoryStats {
    fn record_cache_latency(&self, elapsed: Duration) {
        self.cache_latency_us_total
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        self.cache_ops.fetch_add(1, Ordering::Relaxed);
    }

    fn record_hss_latency(&self, elapsed: Duration, kind: HssLatencyKind) {
        let micros = elapsed.as_micros() as u64;
        match kind {
            HssLatencyKind::Digest => {
                self.hss_digest_latency_us_total
                    .fetch_add(micros, Ordering::Relaxed);
                self.hss_digest_ops.fetch_add(1, Ordering::Relaxed);
            },
            HssLatencyKind::Subscription => {
                self.hss_subscription_latency_us_total
                    .fetch_add(micros, Ordering::Relaxed);
                self.hss_subscription_ops.fetch_add(1, Ordering::Relaxed);
            },
        }
    }

    fn record_overload_penalty(&self) {
        self.overload_penalties.fetch_add(1, Ordering::Relaxed);
    }
}

/// Times an async operation and reports it to a [`StatsHandle`], matching
/// the "start/stop pair on every async step" rule in the concurrency model.
pub async fn timed_cache_op<T, E>(
    stats: &dyn StatsHandle,
    fut: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let start = std::time::Instant::now();
    let result = fut.await;
    stats.record_cache_latency(start.elapsed());
    result
}

pub async fn timed_hss_op<T, E>(
    stats: &dyn StatsHandle,
    kind: HssLatencyKind,
    fut: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let start = std::time::Instant::now();
    let result = fut.await;
    stats.record_hss_latency(start.elapsed(), kind);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timed_cache_op_records_one_sample() {
        let stats = InMemoryStats::new();
        let result: Result<_, ()> = timed_cache_op(&stats, async { Ok(42) }).await;
        assert_eq!(result, Ok(42));
        assert_eq!(stats.cache_ops(), 1);
        assert!(stats.mean_cache_latency().is_some());
    }

    #[test]
    fn overload_penalty_counts() {
        let stats = InMemoryStats::new();
        stats.record_overload_penalty();
        stats.record_overload_penalty();
        assert_eq!(stats.overload_penalties(), 2);
    }
}
