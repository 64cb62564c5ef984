//! Gated Refill Demo
//!
//! Many tasks read through one shared cache. Misses are loaded from a slow
//! "backend", but only when the shared limiter admits the load; shed misses
//! are reported instead of hammering the backend.
//!
//! Run with `cargo run --example gated_refill`. Set `RUST_LOG=recency_gate=trace`
//! to see every denial.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recency_gate::{CacheStore, Config, Limiter};

struct ReadThrough {
    cache: CacheStore<u64, Arc<String>>,
    limiter: Limiter,
    loads: AtomicU64,
    shed: AtomicU64,
}

impl ReadThrough {
    async fn fetch(&self, key: u64) -> Option<Arc<String>> {
        if let Some(value) = self.cache.get(&key) {
            return Some(value);
        }

        if !self.limiter.allow() {
            self.shed.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        // Pretend the backend is slow
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.loads.fetch_add(1, Ordering::Relaxed);

        let value = Arc::new(format!("record-{}", key));
        self.cache.put(key, Arc::clone(&value));
        Some(value)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "debug" for this crate, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_gate=debug,gated_refill=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    config.validate()?;

    let service = Arc::new(ReadThrough {
        cache: config.build_cache()?,
        limiter: config.build_limiter()?,
        loads: AtomicU64::new(0),
        shed: AtomicU64::new(0),
    });

    let mut tasks = Vec::new();
    for worker in 0..8u64 {
        let service = Arc::clone(&service);
        tasks.push(tokio::spawn(async move {
            let mut served = 0u32;
            for i in 0..50u64 {
                // Skewed key space: a few hot keys, a long tail
                let key = if i % 4 == 0 { worker * 100 + i } else { i % 5 };
                if service.fetch(key).await.is_some() {
                    served += 1;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            served
        }));
    }

    let mut served = 0;
    for task in tasks {
        served += task.await?;
    }

    let stats = service.cache.stats();
    info!(
        "served={} loads={} shed={} hit_rate={:.2}",
        served,
        service.loads.load(Ordering::Relaxed),
        service.shed.load(Ordering::Relaxed),
        stats.hit_rate()
    );
    info!("cache stats: {}", serde_json::to_string(&stats)?);
    info!("limiter stats: {}", serde_json::to_string(&service.limiter.stats())?);

    Ok(())
}
