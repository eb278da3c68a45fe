//! JSON trace file for the form service, compiled in with the `trace` feature.

use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::OnceLock;

/// Trace file created inside the log directory.
pub const TRACE_FILE: &str = "teryt-trace.jsonl";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "teryt_lookup=debug,teryt_core=debug";

#[cfg(feature = "trace")]
static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Send trace events to `<log_dir>/teryt-trace.jsonl`.
///
/// Returns whether the trace subscriber is active. Only the first call does
/// any work; later calls report its outcome. Nothing is written when the
/// directory cannot be created or the host already set a global subscriber.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> bool {
    *INSTALLED.get_or_init(|| install(log_dir))
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> bool {
    false
}

#[cfg(feature = "trace")]
fn install(log_dir: &Path) -> bool {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    if let Err(e) = std::fs::create_dir_all(log_dir) {
        tracing::warn!(dir = %log_dir.display(), error = %e, "trace directory unavailable");
        return false;
    }
    let appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .try_init()
        .is_ok();
    if installed {
        // Events stop flushing once the guard drops; the service runs until exit.
        std::mem::forget(guard);
    }
    installed
}
