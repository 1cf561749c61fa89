//! Classifier Module - Prediction Endpoint Access
//!
//! This module handles:
//! - Wire types of the prediction endpoint
//! - The `Classifier` seam the dispatcher depends on
//! - The HTTP implementation (one row per request)

pub mod client;
pub mod types;

pub use client::HttpClassifier;
pub use types::{FeatureImpact, PredictionResult, Status};

use thiserror::Error;

use super::normalize::NormalizedRecord;

/// Classifies one normalized row.
///
/// The dispatcher only needs `&self`; implementations must tolerate many
/// overlapping calls.
#[allow(async_fn_in_trait)]
pub trait Classifier {
    async fn classify(&self, record: &NormalizedRecord) -> Result<PredictionResult, ClassifyError>;
}

/// Classifier errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty response collection")]
    EmptyResponse,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClassifyError {
    /// Errors that would repeat for every row; the dispatcher stops after the current batch.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClassifyError::InvalidRequest(_))
    }
}
