use std::time::Duration;

use tracing::{debug, info};

use crate::stats::ReportKind;

/// Execution events emitted by the engine.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        rows: usize,
        reports: usize,
        parallel: bool,
    },
    ReportStarted {
        kind: ReportKind,
    },
    ReportFinished {
        kind: ReportKind,
        elapsed: Duration,
    },
    RunFinished {
        elapsed: Duration,
    },
}

/// Observer hook for execution events.
///
/// With a parallel engine, events of different reports may interleave.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Logs execution events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunStarted {
                rows,
                reports,
                parallel,
            } => info!(rows, reports, parallel, "computing reports"),
            ExecutionEvent::ReportStarted { kind } => debug!(report = %kind, "report started"),
            ExecutionEvent::ReportFinished { kind, elapsed } => {
                debug!(report = %kind, ?elapsed, "report finished")
            }
            ExecutionEvent::RunFinished { elapsed } => info!(?elapsed, "reports done"),
        }
    }
}
