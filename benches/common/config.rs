use std::env;

/// Configuration for benchmarks, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Number of generated requests per iteration (from BENCH_REQUESTS env var, defaults to 1000)
    pub requests: usize,

    /// Number of cache entries for policy checks (from BENCH_ENTRIES env var, defaults to 10000)
    pub entries: usize,

    /// Sample size for benchmarks (from BENCH_SAMPLE_SIZE env var, defaults to 100)
    pub sample_size: usize,
}

fn env_or(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            requests: env_or("BENCH_REQUESTS", 1000),
            entries: env_or("BENCH_ENTRIES", 10_000),
            sample_size: env_or("BENCH_SAMPLE_SIZE", 100),
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        let config = Self::default();
        eprintln!("Benchmark Configuration:");
        eprintln!("  Requests: {}", config.requests);
        eprintln!("  Entries: {}", config.entries);
        eprintln!("  Sample Size: {}", config.sample_size);
        config
    }
}
