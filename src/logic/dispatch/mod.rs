//! Dispatch Module - Batched Prediction Runs
//!
//! Splits the visible rows into contiguous batches, fans out one request per
//! row inside a batch and waits for the whole batch to settle before the next
//! one starts. Results are handed to a [`ResultSink`] as they complete.

pub mod dispatcher;


pub use dispatcher::BatchDispatcher;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::mpsc;

use super::classifier::{ClassifyError, PredictionResult};
use super::normalize::NormalizedRecord;

// ============================================================================
// JOB
// ============================================================================

/// Owned snapshot of what one run works on
#[derive(Debug, Clone)]
pub struct DispatchJob {
    records: Vec<NormalizedRecord>,
    resolved: HashSet<usize>,
    visible_count: usize,
}

impl DispatchJob {
    /// `records[i]` is row `i`; rows in `resolved` are not requested again.
    pub fn new(records: Vec<NormalizedRecord>, visible_count: usize, resolved: HashSet<usize>) -> Self {
        Self {
            records,
            resolved,
            visible_count,
        }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_resolved(&self, index: usize) -> bool {
        self.resolved.contains(&index)
    }
}

// ============================================================================
// EVENTS & SINK
// ============================================================================

/// Progress of a run, emitted in completion order
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    Resolved { index: usize, result: PredictionResult },
    Failed { index: usize, error: ClassifyError },
    BatchSettled { batch: usize, succeeded: usize, failed: usize },
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("result sink closed")]
pub struct SinkClosed;

/// Receives dispatch events; the owner of the result store sits behind it.
pub trait ResultSink {
    fn deliver(&mut self, event: DispatchEvent) -> Result<(), SinkClosed>;
}

impl ResultSink for mpsc::UnboundedSender<DispatchEvent> {
    fn deliver(&mut self, event: DispatchEvent) -> Result<(), SinkClosed> {
        self.send(event).map_err(|_| SinkClosed)
    }
}

// ============================================================================
// REPORTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchReport {
    pub fn size(&self) -> usize {
        self.end - self.start
    }
}

#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub batches: Vec<BatchReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub aborted: bool,
}

impl DispatchReport {
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
            aborted: false,
        }
    }

    pub fn requested(&self) -> usize {
        self.batches.iter().map(|b| b.requested).sum()
    }

    pub fn succeeded(&self) -> usize {
        self.batches.iter().map(|b| b.succeeded).sum()
    }

    pub fn failed(&self) -> usize {
        self.batches.iter().map(|b| b.failed).sum()
    }

    pub fn skipped(&self) -> usize {
        self.batches.iter().map(|b| b.skipped).sum()
    }

    /// Wall-clock run time, `None` until the run has finished
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    pub(crate) fn finish(&mut self, aborted: bool) {
        self.aborted = aborted;
        self.finished_at = Some(Utc::now());
    }
}

impl Default for DispatchReport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Orchestration failures; remaining batches were not started.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("batch {batch} aborted the run: {source}")]
    BatchFailed {
        batch: usize,
        #[source]
        source: ClassifyError,
        report: DispatchReport,
    },

    #[error("result sink closed during batch {batch}")]
    SinkClosed { batch: usize, report: DispatchReport },
}

impl DispatchError {
    /// Partial report up to and including the failing batch
    pub fn report(&self) -> &DispatchReport {
        match self {
            DispatchError::BatchFailed { report, .. } => report,
            DispatchError::SinkClosed { report, .. } => report,
        }
    }
}
