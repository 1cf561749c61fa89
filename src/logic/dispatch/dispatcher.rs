use std::ops::Range;

use futures::stream::{FuturesUnordered, StreamExt};

use super::{BatchReport, DispatchError, DispatchEvent, DispatchJob, DispatchReport, ResultSink};
use crate::logic::classifier::{Classifier, ClassifyError};

/// Sequential batches, concurrent rows within a batch.
///
/// Re-entrancy is not guarded here; callers check `is_predicting` first.
#[derive(Debug, Clone, Copy)]
pub struct BatchDispatcher {
    batch_size: usize,
}

impl BatchDispatcher {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Contiguous batches covering `[0, min(visible_count, total_rows))`
    pub fn plan(&self, visible_count: usize, total_rows: usize) -> Vec<Range<usize>> {
        let end = visible_count.min(total_rows);
        (0..end)
            .step_by(self.batch_size)
            .map(|start| start..(start + self.batch_size).min(end))
            .collect()
    }

    /// Run every batch of `job`, delivering results to `sink` as they complete.
    pub async fn run<C, S>(&self, classifier: &C, job: &DispatchJob, sink: &mut S) -> Result<DispatchReport, DispatchError>
    where
        C: Classifier,
        S: ResultSink,
    {
        let mut report = DispatchReport::new();
        let batches = self.plan(job.visible_count(), job.records().len());

        tracing::info!(
            "Dispatching {} rows in {} batches of up to {}",
            batches.last().map(|b| b.end).unwrap_or(0),
            batches.len(),
            self.batch_size
        );

        for (batch_no, range) in batches.into_iter().enumerate() {
            let (stats, fatal, sink_closed) = self.run_batch(classifier, job, batch_no, range, sink).await;
            report.batches.push(stats);

            if let Some(source) = fatal {
                tracing::error!("Batch {} request error, aborting remaining batches: {}", batch_no, source);
                report.finish(true);
                return Err(DispatchError::BatchFailed { batch: batch_no, source, report });
            }
            if sink_closed {
                tracing::error!("Result sink closed during batch {}, aborting remaining batches", batch_no);
                report.finish(true);
                return Err(DispatchError::SinkClosed { batch: batch_no, report });
            }
        }

        report.finish(false);
        tracing::info!(
            "Prediction run finished: {} resolved, {} failed, {} skipped",
            report.succeeded(),
            report.failed(),
            report.skipped()
        );
        Ok(report)
    }

    /// Issue one request per unresolved row and wait for all of them to settle.
    async fn run_batch<C, S>(
        &self,
        classifier: &C,
        job: &DispatchJob,
        batch_no: usize,
        range: Range<usize>,
        sink: &mut S,
    ) -> (BatchReport, Option<ClassifyError>, bool)
    where
        C: Classifier,
        S: ResultSink,
    {
        let mut stats = BatchReport {
            index: batch_no,
            start: range.start,
            end: range.end,
            requested: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
        };

        let pending: Vec<usize> = range.filter(|&i| !job.is_resolved(i)).collect();
        stats.skipped = stats.size() - pending.len();
        stats.requested = pending.len();

        tracing::debug!(
            "Batch {} [{}..{}): {} requests, {} already resolved",
            batch_no, stats.start, stats.end, stats.requested, stats.skipped
        );

        let mut in_flight: FuturesUnordered<_> = pending
            .into_iter()
            .map(|index| async move {
                let outcome = classifier.classify(&job.records()[index]).await;
                (index, outcome)
            })
            .collect();

        let mut fatal = None;
        let mut sink_closed = false;

        while let Some((index, outcome)) = in_flight.next().await {
            let event = match outcome {
                Ok(result) => {
                    stats.succeeded += 1;
                    DispatchEvent::Resolved { index, result }
                }
                Err(error) => {
                    stats.failed += 1;
                    tracing::warn!("Prediction error for row {}: {}", index, error);
                    if error.is_fatal() && fatal.is_none() {
                        fatal = Some(error.clone());
                    }
                    DispatchEvent::Failed { index, error }
                }
            };

            if !sink_closed && sink.deliver(event).is_err() {
                sink_closed = true;
            }
        }

        if !sink_closed {
            let settled = DispatchEvent::BatchSettled {
                batch: batch_no,
                succeeded: stats.succeeded,
                failed: stats.failed,
            };
            sink_closed = sink.deliver(settled).is_err();
        }

        tracing::debug!("Batch {} settled: {} ok, {} failed", batch_no, stats.succeeded, stats.failed);
        (stats, fatal, sink_closed)
    }
}
