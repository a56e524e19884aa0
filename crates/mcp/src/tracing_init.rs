//! `init_tracing` (spec.md §4.8, ambient logging): install a
//! `tracing_subscriber::fmt` layer driven by `RUST_LOG`/`EnvFilter`, the
//! pattern the retrieval pack's other MCP servers wire at their binary entry
//! points.

/// Install a process-global `tracing` subscriber. Call once, at startup.
///
/// Respects `RUST_LOG`; defaults to `info` when unset.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
