//! Summary Aggregator
//!
//! Three-way status count, always recomputed from the whole store.

use super::classifier::Status;
use super::store::ResultStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub fraud: usize,
    pub legit: usize,
    pub review: usize,
}

impl Summary {
    pub fn from_store(store: &ResultStore) -> Self {
        let mut summary = Summary::default();
        for result in store.get_all().values() {
            match result.status {
                Status::Fraud => summary.fraud += 1,
                Status::Legitimate => summary.legit += 1,
                Status::ManualReview => summary.review += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.fraud + self.legit + self.review
    }

    /// Count for one chart bucket
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Fraud => self.fraud,
            Status::Legitimate => self.legit,
            Status::ManualReview => self.review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::PredictionResult;
    use crate::logic::classifier::types::PredictionLabel;

    fn store_with(statuses: &[Status]) -> ResultStore {
        let mut store = ResultStore::new();
        for (i, status) in statuses.iter().enumerate() {
            store.set(i * 2, PredictionResult {
                prediction: PredictionLabel::Class(0),
                fraud_probability: 0.0,
                status: *status,
                explanation: None,
            });
        }
        store
    }

    #[test]
    fn test_empty_store() {
        assert_eq!(Summary::from_store(&ResultStore::new()), Summary::default());
    }

    #[test]
    fn test_partition_matches_store() {
        let statuses = [
            Status::Fraud,
            Status::Legitimate,
            Status::Legitimate,
            Status::ManualReview,
            Status::Legitimate,
            Status::Fraud,
        ];
        let store = store_with(&statuses);
        let summary = Summary::from_store(&store);

        assert_eq!(summary, Summary { fraud: 2, legit: 3, review: 1 });
        assert_eq!(summary.total(), store.len());
        assert_eq!(summary.count(Status::ManualReview), 1);
    }
}
