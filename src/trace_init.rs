#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Keeps the JSONL writer alive; pending lines are flushed when it drops.
#[cfg(feature = "trace")]
pub type TraceGuard = tracing_appender::non_blocking::WorkerGuard;

#[cfg(not(feature = "trace"))]
pub enum TraceGuard {}

#[cfg(feature = "trace")]
fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chord_core=debug"))
}

/// Install the global subscriber: JSONL under `log_dir` when given, readable
/// lines on stderr otherwise. `RUST_LOG` overrides the default filter.
///
/// Hold the returned guard until exit, or the last file lines are lost.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) -> Option<TraceGuard> {
    let mut file_guard = None;
    INIT.call_once(|| {
        match log_dir {
            Some(dir) => {
                let file_appender = tracing_appender::rolling::never(dir, "chord-trace.jsonl");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                file_guard = Some(guard);

                tracing_subscriber::fmt()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                    .with_env_filter(env_filter())
                    .init();
            }
            None => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_env_filter(env_filter())
                    .init();
            }
        }
        tracing::debug!(log_dir = ?log_dir, "tracing initialized");
    });
    file_guard
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: Option<&std::path::Path>) -> Option<TraceGuard> {
    None
}
