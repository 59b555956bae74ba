//! Execution engine for running a set of reports over one trip table.
//!
//! This module sits "above" [`crate::stats`] and provides:
//!
//! - Optional parallel execution of the aggregators on a dedicated rayon pool
//! - Per-report timing (the "This took N seconds." notice)
//! - Observer hooks for monitoring
//!
//! Aggregators only read the table, so running them concurrently is safe; results are always
//! returned in the requested order.

mod observer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::ExplorerResult;
use crate::stats::{Report, ReportKind};
use crate::types::DataSet;

pub use observer::{ExecutionEvent, ExecutionObserver, TracingExecutionObserver};

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used when `parallel` is set.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Run the reports concurrently instead of one after another.
    pub parallel: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            parallel: true,
        }
    }
}

/// One report together with how long it took to compute.
#[derive(Debug, Clone, Serialize)]
pub struct TimedReport {
    #[serde(flatten)]
    pub report: Report,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Runs [`ReportKind`]s over a [`DataSet`].
pub struct ExecutionEngine {
    pool: Option<ThreadPool>,
    observer: Option<Arc<dyn ExecutionObserver>>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// Fails if the worker pool cannot be created. With `num_threads == Some(0)` rayon picks
    /// the thread count itself.
    pub fn new(opts: ExecutionOptions) -> ExplorerResult<Self> {
        let pool = if opts.parallel {
            let n_threads = opts.num_threads.unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            });
            Some(ThreadPoolBuilder::new().num_threads(n_threads).build()?)
        } else {
            None
        };

        Ok(Self {
            pool,
            observer: None,
        })
    }

    /// Engine that runs reports on the calling thread.
    pub fn sequential() -> Self {
        Self {
            pool: None,
            observer: None,
        }
    }

    /// Attach an observer for execution events.
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Run `kinds` over `dataset`, returning one [`TimedReport`] per kind in the same order.
    pub fn run(&self, dataset: &DataSet, kinds: &[ReportKind]) -> Vec<TimedReport> {
        let start = Instant::now();
        self.emit(ExecutionEvent::RunStarted {
            rows: dataset.row_count(),
            reports: kinds.len(),
            parallel: self.is_parallel(),
        });

        let reports: Vec<TimedReport> = match &self.pool {
            Some(pool) => pool.install(|| {
                kinds
                    .par_iter()
                    .map(|kind| self.run_one(dataset, *kind))
                    .collect()
            }),
            None => kinds.iter().map(|kind| self.run_one(dataset, *kind)).collect(),
        };

        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
        });
        reports
    }

    fn run_one(&self, dataset: &DataSet, kind: ReportKind) -> TimedReport {
        self.emit(ExecutionEvent::ReportStarted { kind });
        let start = Instant::now();
        let report = kind.run(dataset);
        let elapsed = start.elapsed();
        self.emit(ExecutionEvent::ReportFinished { kind, elapsed });
        TimedReport { report, elapsed }
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(o) = &self.observer {
            o.on_event(&event);
        }
    }
}
