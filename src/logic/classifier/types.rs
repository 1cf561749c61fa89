//! Prediction Types
//!
//! Wire types returned by the prediction endpoint.
//! No logic here beyond labels and parsing.

use serde::{Deserialize, Serialize};

// ============================================================================
// STATUS
// ============================================================================

/// Classification status assigned by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    Fraud,
    Legitimate,
    ManualReview,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Fraud => "Fraud",
            Status::Legitimate => "Legitimate",
            Status::ManualReview => "Manual Review",
        }
    }

    /// Short row tag used by the table renderer
    pub fn tag(&self) -> &'static str {
        match self {
            Status::Fraud => "[FRAUD]",
            Status::Legitimate => "[LEGIT]",
            Status::ManualReview => "[REVIEW]",
        }
    }

    /// Parse a status label. Leading decoration such as `🚩 ` is ignored.
    pub fn parse(label: &str) -> Option<Self> {
        let plain = label.trim_start_matches(|c: char| !c.is_alphanumeric()).trim_end();
        match plain {
            "Fraud" => Some(Status::Fraud),
            "Legitimate" => Some(Status::Legitimate),
            "Manual Review" => Some(Status::ManualReview),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Status {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Status::parse(&value).ok_or_else(|| format!("unknown status: {}", value))
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// Model label: integer class from the reference backend, free text otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionLabel {
    Class(i64),
    Text(String),
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionLabel::Class(c) => write!(f, "{}", c),
            PredictionLabel::Text(t) => write!(f, "{}", t),
        }
    }
}

/// Signed contribution of one feature to the decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: String,
    pub impact: f64,
}

/// One classification returned by the endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: PredictionLabel,
    /// Percentage, 0-100
    pub fraud_probability: f64,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<FeatureImpact>>,
}
