//! Dashboard State
//!
//! Everything the console renders, owned by one controller. All mutation of
//! results goes through [`DashboardState::apply`], which recomputes the
//! summary after every store write.

use std::collections::HashSet;

use super::classifier::PredictionResult;
use super::dataset::Dataset;
use super::dispatch::{DispatchEvent, DispatchJob, ResultSink, SinkClosed};
use super::normalize::normalize;
use super::store::ResultStore;
use super::summary::Summary;
use super::view::ViewWindow;

#[derive(Debug)]
pub struct DashboardState {
    dataset: Dataset,
    store: ResultStore,
    summary: Summary,
    window: ViewWindow,
    is_predicting: bool,
}

impl DashboardState {
    pub fn new(dataset: Dataset, window: ViewWindow) -> Self {
        Self {
            dataset,
            store: ResultStore::new(),
            summary: Summary::default(),
            window,
            is_predicting: false,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn window(&self) -> &ViewWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut ViewWindow {
        &mut self.window
    }

    pub fn is_predicting(&self) -> bool {
        self.is_predicting
    }

    pub fn set_predicting(&mut self, predicting: bool) {
        self.is_predicting = predicting;
    }

    /// Snapshot of the visible rows for one dispatch run
    pub fn dispatch_job(&self) -> DispatchJob {
        let visible_count = self.window.visible_count();
        let range = self.window.visible_range(self.dataset.len());
        let records = self.dataset.rows()[range].iter().map(normalize).collect();
        let resolved: HashSet<usize> = self.store.get_all().keys().copied().collect();
        DispatchJob::new(records, visible_count, resolved)
    }

    /// Write one result and recompute the summary. Returns `false` if the
    /// row was already resolved.
    pub fn record(&mut self, index: usize, result: PredictionResult) -> bool {
        let added = self.store.set(index, result);
        if added {
            self.summary = Summary::from_store(&self.store);
        }
        added
    }

    /// Apply a dispatch event
    pub fn apply(&mut self, event: DispatchEvent) {
        match event {
            DispatchEvent::Resolved { index, result } => {
                self.record(index, result);
            }
            DispatchEvent::Failed { index, .. } => {
                if !self.store.contains(index) {
                    tracing::debug!("Row {} remains pending", index);
                }
            }
            DispatchEvent::BatchSettled { batch, succeeded, failed } => {
                tracing::debug!(
                    "Batch {} settled ({} ok, {} failed), {} rows resolved",
                    batch, succeeded, failed, self.store.len()
                );
            }
        }
    }
}

impl ResultSink for DashboardState {
    fn deliver(&mut self, event: DispatchEvent) -> Result<(), SinkClosed> {
        self.apply(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::{Classifier, ClassifyError, Status};
    use crate::logic::classifier::types::PredictionLabel;
    use crate::logic::dataset::RawRecord;
    use crate::logic::dispatch::BatchDispatcher;
    use crate::logic::normalize::NormalizedRecord;

    /// Fails exactly one row (by `step`), alternates statuses otherwise.
    struct FailingRow(usize);

    impl Classifier for FailingRow {
        async fn classify(&self, record: &NormalizedRecord) -> Result<PredictionResult, ClassifyError> {
            let index = record.step as usize;
            tokio::task::yield_now().await;
            if index == self.0 {
                return Err(ClassifyError::Network("connection reset".into()));
            }
            Ok(PredictionResult {
                prediction: PredictionLabel::Class(0),
                fraud_probability: 10.0,
                status: if index % 2 == 0 { Status::Legitimate } else { Status::Fraud },
                explanation: None,
            })
        }
    }

    fn dataset(n: usize) -> Dataset {
        let rows = (0..n)
            .map(|i| {
                let step = i.to_string();
                RawRecord::from_pairs([("step", step.as_str()), ("type", "CASH_OUT"), ("amount", "10")])
            })
            .collect();
        Dataset::new(rows)
    }

    fn result(status: Status) -> PredictionResult {
        PredictionResult {
            prediction: PredictionLabel::Class(1),
            fraud_probability: 91.0,
            status,
            explanation: None,
        }
    }

    #[test]
    fn test_record_recomputes_summary() {
        let mut state = DashboardState::new(dataset(3), ViewWindow::new(3, 10));

        state.record(0, result(Status::Fraud));
        assert_eq!(state.summary().fraud, 1);

        state.apply(DispatchEvent::Resolved { index: 2, result: result(Status::ManualReview) });
        assert_eq!(state.summary(), Summary { fraud: 1, legit: 0, review: 1 });

        // Failure leaves everything as is.
        state.apply(DispatchEvent::Failed { index: 1, error: ClassifyError::Server(500) });
        assert_eq!(state.store().len(), 2);
        assert!(!state.store().contains(1));
    }

    #[test]
    fn test_duplicate_result_ignored() {
        let mut state = DashboardState::new(dataset(1), ViewWindow::new(1, 10));

        assert!(state.record(0, result(Status::Legitimate)));
        assert!(!state.record(0, result(Status::Fraud)));
        assert_eq!(state.summary(), Summary { fraud: 0, legit: 1, review: 0 });
    }

    #[test]
    fn test_dispatch_job_covers_visible_rows() {
        let mut state = DashboardState::new(dataset(10), ViewWindow::new(4, 10));
        state.record(1, result(Status::Fraud));

        let job = state.dispatch_job();
        assert_eq!(job.records().len(), 4);
        assert_eq!(job.visible_count(), 4);
        assert!(job.is_resolved(1));
        assert!(!job.is_resolved(0));

        state.window_mut().show_more(100);
        assert_eq!(state.dispatch_job().records().len(), 10);
    }

    #[tokio::test]
    async fn test_run_into_state_leaves_failed_row_pending() {
        let mut state = DashboardState::new(dataset(120), ViewWindow::new(120, 30));
        let job = state.dispatch_job();

        BatchDispatcher::new(50).run(&FailingRow(75), &job, &mut state).await.unwrap();

        assert_eq!(state.store().len(), 119);
        assert!(state.store().get(75).is_none());
        let summary = state.summary();
        assert_eq!(summary.total(), 119);
        assert!(summary.total() <= state.window().visible_count());
    }
}
