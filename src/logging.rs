//! File logging and the carousel's tracing spans
//!
//! The TUI owns the terminal, so everything goes to `.logs/` instead of
//! stdout. Transitions and the autoplay timer each run inside their own span;
//! span-close events are enabled, so every `transition` close line in the log
//! records how long the carousel stayed locked.

use std::path::Path;
use std::time::Duration;

use tracing::Span;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "coverflow";
/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "coverflow=debug,warn";

/// Install the global subscriber writing to `.logs/coverflow.YYYY-MM-DD`.
///
/// Keep the returned guard alive until shutdown; dropping it flushes the
/// non-blocking writer.
pub fn init_logging() -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(Path::new(LOG_DIR))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                // Audio runs on its own named thread
                .with_thread_names(true)
                .with_span_events(FmtSpan::CLOSE),
        )
        .try_init()?;

    tracing::info!(dir = LOG_DIR, filter = DEFAULT_FILTER, "Logging initialized");
    Ok(guard)
}

/// Span for one accepted navigation, open from lock until settle or cancel.
pub fn transition_span(epoch: u64, from: usize, to: usize) -> Span {
    tracing::debug_span!("transition", epoch, from, to)
}

/// Span for the lifetime of one autoplay timer.
pub fn autoplay_span(period: Duration) -> Span {
    tracing::debug_span!("autoplay", period_ms = period.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_spans_carry_their_fields() {
        let subscriber = tracing_subscriber::registry().with(EnvFilter::new("debug"));
        tracing::subscriber::with_default(subscriber, || {
            let transition = transition_span(3, 1, 2);
            let meta = transition.metadata().expect("span enabled");
            assert_eq!(meta.name(), "transition");
            for field in ["epoch", "from", "to"] {
                assert!(meta.fields().field(field).is_some(), "missing {field}");
            }

            let autoplay = autoplay_span(Duration::from_millis(4000));
            let meta = autoplay.metadata().expect("span enabled");
            assert_eq!(meta.name(), "autoplay");
            assert!(meta.fields().field("period_ms").is_some());
        });
    }
}
