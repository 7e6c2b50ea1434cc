//! FastCache demo - fills a small cache and walks through hits, updates and eviction

use anyhow::Result;
use clap::Parser;
use fastcache::{CacheConfig, CacheStats, KeyMode, LruCache, SharedCache, DEFAULT_BLOCK_SIZE};
use tracing::{info, warn};

const KEYS: [&str; 5] = ["ONE", "TWO", "3", "4", "FIVE5"];
const VALUES: [&str; 5] = ["Lorem", "ipsum", "dolor", "amet", "numquam"];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of slots
    #[arg(short, long, default_value_t = 5)]
    capacity: usize,

    /// Bytes per slot
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Store keys and compare them on lookup
    #[arg(long)]
    verify_keys: bool,

    /// Run through a sharded SharedCache with this many shards
    #[arg(short, long)]
    shards: Option<usize>,
}

impl Args {
    fn config(&self) -> CacheConfig {
        let key_mode = if self.verify_keys {
            KeyMode::Verified
        } else {
            KeyMode::HashOnly
        };
        CacheConfig::new(self.capacity)
            .with_block_size(self.block_size)
            .with_key_mode(key_mode)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting fcdemo v{}", env!("CARGO_PKG_VERSION"));
    info!("Capacity: {} slots of {} bytes", args.capacity, args.block_size);

    let stats = match args.shards {
        Some(shards) => run_shared(args.config(), shards)?,
        None => run_single(args.config())?,
    };

    info!(
        "hits={} misses={} inserts={} updates={} evictions={} hit_ratio={:.2}",
        stats.hits(),
        stats.misses(),
        stats.inserts(),
        stats.updates(),
        stats.evictions(),
        stats.hit_ratio()
    );
    Ok(())
}

fn show(key: &str, value: Option<&[u8]>) {
    match value {
        Some(bytes) => info!("get({}) -> {}", key, String::from_utf8_lossy(bytes)),
        None => warn!("get({}) -> not found", key),
    }
}

fn run_single(config: CacheConfig) -> Result<CacheStats> {
    let mut cache = LruCache::with_config(config)?;

    for (key, value) in KEYS.iter().zip(VALUES) {
        let outcome = cache.set(*key, value.as_bytes());
        info!("set({}, {}) -> {:?}", key, value, outcome.action);
    }

    show(KEYS[0], cache.get(KEYS[0]));
    show(KEYS[4], cache.get(KEYS[4]));
    show("SIX", cache.get("SIX"));

    let outcome = cache.set(KEYS[3], VALUES[0].as_bytes());
    info!("set({}, {}) -> {:?}", KEYS[3], VALUES[0], outcome.action);

    println!("{}", cache.dump());
    Ok(*cache.stats())
}

fn run_shared(config: CacheConfig, shards: usize) -> Result<CacheStats> {
    let cache = SharedCache::with_shards(config, shards)?;
    info!("Running with {} shards", cache.shard_count());

    for (key, value) in KEYS.iter().zip(VALUES) {
        let outcome = cache.set(*key, value.as_bytes());
        info!("set({}, {}) -> {:?}", key, value, outcome.action);
    }

    show(KEYS[0], cache.get(KEYS[0]).as_deref());
    show(KEYS[4], cache.get(KEYS[4]).as_deref());
    show("SIX", cache.get("SIX").as_deref());

    let _ = cache.set(KEYS[3], VALUES[0].as_bytes());
    show(KEYS[3], cache.get(KEYS[3]).as_deref());

    info!("{} of {} slots in use", cache.len(), cache.capacity());
    Ok(cache.stats())
}
