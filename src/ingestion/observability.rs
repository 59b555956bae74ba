use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::IngestionError;
use crate::registry::City;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl IngestionSeverity {
    /// Severity assigned to a failed ingestion.
    pub fn for_error(err: &IngestionError) -> Self {
        if err.is_io() {
            IngestionSeverity::Critical
        } else {
            IngestionSeverity::Error
        }
    }
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// City whose dataset is being read.
    pub city: City,
    /// The input path used for ingestion.
    pub path: PathBuf,
}

/// Minimal stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of rows read from the source, before filtering.
    pub rows: usize,
    /// Whether the source carried the optional demographic columns.
    pub has_demographics: bool,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails.
    fn on_failure(
        &self,
        _ctx: &IngestionContext,
        _severity: IngestionSeverity,
        _error: &IngestionError,
    ) {
    }

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        self.on_failure(ctx, severity, error)
    }
}

/// Reports ingestion events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn shared() -> Arc<dyn IngestionObserver> {
        Arc::new(Self)
    }
}

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        info!(
            city = %ctx.city,
            path = %ctx.path.display(),
            rows = stats.rows,
            demographics = stats.has_demographics,
            "trip dataset loaded"
        );
    }

    // Callers report the error; only alerts log at ERROR.
    fn on_failure(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        debug!(
            city = %ctx.city,
            path = %ctx.path.display(),
            ?severity,
            %error,
            "trip dataset could not be loaded"
        );
    }

    fn on_alert(
        &self,
        ctx: &IngestionContext,
        severity: IngestionSeverity,
        error: &IngestionError,
    ) {
        error!(
            city = %ctx.city,
            path = %ctx.path.display(),
            ?severity,
            %error,
            "trip dataset unavailable"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Records the level of every event it sees.
    #[derive(Clone, Default)]
    struct Levels(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for Levels {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn failed_load_logs_a_single_error_line() {
        let levels = Levels::default();
        let subscriber = tracing_subscriber::registry().with(levels.clone());
        let ctx = IngestionContext {
            city: City::Chicago,
            path: PathBuf::from("chicago.csv"),
        };
        let err = IngestionError::Io(std::io::ErrorKind::NotFound.into());
        let severity = IngestionSeverity::for_error(&err);
        assert_eq!(severity, IngestionSeverity::Critical);

        tracing::subscriber::with_default(subscriber, || {
            TracingObserver.on_failure(&ctx, severity, &err);
            TracingObserver.on_alert(&ctx, severity, &err);
        });

        let levels = levels.0.lock().unwrap();
        let loud: Vec<&Level> = levels
            .iter()
            .filter(|l| **l == Level::WARN || **l == Level::ERROR)
            .collect();
        assert_eq!(loud, vec![&Level::ERROR]);
    }
}
