use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// A tracing Layer that counts log events by level.
///
/// Clones share their counters, so a handle can be kept after the layer is
/// moved into a subscriber.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCounter {
    error_count: Arc<AtomicUsize>,
    warn_count: Arc<AtomicUsize>,
    info_count: Arc<AtomicUsize>,
    debug_count: Arc<AtomicUsize>,
    trace_count: Arc<AtomicUsize>,
}

impl DiagnosticCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total count of all log events
    pub fn total_count(&self) -> usize {
        let counts = self.counts_by_level();
        counts.error + counts.warn + counts.info + counts.debug + counts.trace
    }

    /// Get counts broken down by level
    pub fn counts_by_level(&self) -> LogCounts {
        LogCounts {
            error: self.error_count.load(Ordering::Relaxed),
            warn: self.warn_count.load(Ordering::Relaxed),
            info: self.info_count.load(Ordering::Relaxed),
            debug: self.debug_count.load(Ordering::Relaxed),
            trace: self.trace_count.load(Ordering::Relaxed),
        }
    }

    /// One-line summary of error and warning totals, if any were recorded
    pub fn summary(&self) -> Option<String> {
        let counts = self.counts_by_level();
        if counts.error == 0 && counts.warn == 0 {
            return None;
        }
        Some(format!(
            "{} error diagnostic(s), {} warning(s)",
            counts.error, counts.warn
        ))
    }
}

impl<S> Layer<S> for DiagnosticCounter
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let counter = match *event.metadata().level() {
            Level::ERROR => &self.error_count,
            Level::WARN => &self.warn_count,
            Level::INFO => &self.info_count,
            Level::DEBUG => &self.debug_count,
            Level::TRACE => &self.trace_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Breakdown of log counts by level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCounts {
    pub error: usize,
    pub warn: usize,
    pub info: usize,
    pub debug: usize,
    pub trace: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_counts_each_level() {
        let layer = DiagnosticCounter::new();
        let handle = layer.clone();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("Test error");
            tracing::warn!("Test warning");
            tracing::info!("Test info");
            tracing::debug!("Test debug");
            tracing::trace!("Test trace");
        });

        assert_eq!(
            handle.counts_by_level(),
            LogCounts { error: 1, warn: 1, info: 1, debug: 1, trace: 1 }
        );
        assert_eq!(handle.total_count(), 5);
    }

    #[test]
    fn test_summary() {
        let layer = DiagnosticCounter::new();
        assert_eq!(layer.summary(), None);

        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("No user data provided");
            tracing::info!("not counted in the summary");
        });

        assert_eq!(
            layer.summary().as_deref(),
            Some("1 error diagnostic(s), 0 warning(s)")
        );
    }
}
