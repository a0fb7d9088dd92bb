//! Concurrent access tests.
//!
//! These drive the shared registry from many tasks at once and check that no
//! update is lost and that each key resolves to a single counter.

use integration_tests::{fixtures, setup::TestContext};
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(3600);

/// 100 parallel adds of 1 sum to exactly 100
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_parallel_adds_are_not_lost() {
    let ctx = TestContext::new();

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let registry = ctx.registry.clone();
            tokio::spawn(async move { registry.record("test", 1, TTL) })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let server = ctx.server();
    assert_eq!(fixtures::sum(&server, "test").await, 100);
}

/// Concurrent first use of many keys with interleaved reads
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_parallel_writers_and_readers_across_keys() {
    let ctx = TestContext::new();
    let keys: Arc<Vec<String>> = Arc::new((0..10).map(|i| format!("key-{}", i)).collect());

    let mut handles = Vec::new();
    for i in 0..400 {
        let registry = ctx.registry.clone();
        let keys = keys.clone();
        handles.push(tokio::spawn(async move {
            let key = &keys[i % keys.len()];
            registry.record(key, 2, TTL);
            // Readers only ever see a non-negative partial sum
            assert!(registry.summarize(key) >= 2);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(ctx.registry.len(), 10);
    for key in keys.iter() {
        assert_eq!(ctx.registry.summarize(key), 80, "key {}", key);
    }
}

/// Sweeping while writers run never drops live events
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sweep_during_writes_keeps_live_events() {
    let ctx = TestContext::new();

    let writer = {
        let registry = ctx.registry.clone();
        tokio::spawn(async move {
            for _ in 0..1_000 {
                registry.record("busy", 1, TTL);
                tokio::task::yield_now().await;
            }
        })
    };
    let sweeper = {
        let registry = ctx.registry.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                registry.sweep_at(tokio::time::Instant::now());
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    sweeper.await.unwrap();

    assert_eq!(ctx.registry.summarize("busy"), 1_000);
}
