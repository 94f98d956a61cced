//! Group Cache demo
//!
//! Registers one group backed by a small in-memory "slow database" and looks
//! up the keys given on the command line.
//!
//! ```text
//! CACHE_BYTES=16 RUST_LOG=group_cache=debug group_cache Tom Jack Tom Nobody
//! ```

use std::collections::HashMap;
use std::env;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use group_cache::{Config, Group, Registry};

const DEFAULT_KEYS: [&str; 5] = ["Tom", "Jack", "Tom", "Sam", "Nobody"];

/// Simulated latency of the backing database
const DB_LATENCY: Duration = Duration::from_millis(50);

fn slow_db() -> HashMap<String, String> {
    HashMap::from([
        ("Tom".to_string(), "630".to_string()),
        ("Jack".to_string(), "589".to_string()),
        ("Sam".to_string(), "567".to_string()),
    ])
}

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "group_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: group_name={}, cache_bytes={}",
        config.group_name, config.cache_bytes
    );

    let db = slow_db();
    let registry = Registry::new();
    registry
        .new_group(
            Group::builder(config.group_name.as_str())
                .cache_bytes(config.cache_bytes)
                .loader(move |key: &str| -> anyhow::Result<Vec<u8>> {
                    info!("[SlowDB] search key {}", key);
                    thread::sleep(DB_LATENCY);
                    db.get(key)
                        .map(|v| v.clone().into_bytes())
                        .ok_or_else(|| anyhow::anyhow!("{} not exist", key))
                }),
        )
        .context("failed to register demo group")?;

    let mut keys: Vec<String> = env::args().skip(1).collect();
    if keys.is_empty() {
        keys = DEFAULT_KEYS.iter().map(|k| k.to_string()).collect();
    }

    let group = registry
        .get_group(&config.group_name)
        .context("demo group missing from registry")?;

    for key in &keys {
        match group.get(key) {
            Ok(value) => info!("{} = {}", key, value),
            Err(err) => warn!("{}: {}", key, err),
        }
    }

    println!("{}", serde_json::to_string_pretty(&group.stats())?);
    Ok(())
}
