//! Prediction API Client
//!
//! HTTP client for the fraud-prediction endpoint.
//! Each call posts a single-element array and expects a single-element array back.

use std::time::Duration;

use super::types::PredictionResult;
use super::{Classifier, ClassifyError};
use crate::logic::normalize::NormalizedRecord;

/// Prediction API client
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    endpoint_url: String,
    http_client: reqwest::Client,
}

impl HttpClassifier {
    /// Create new client
    pub fn new(endpoint_url: impl Into<String>, timeout: Duration) -> Result<Self, ClassifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifyError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            endpoint_url: endpoint_url.into(),
            http_client,
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

impl Classifier for HttpClassifier {
    async fn classify(&self, record: &NormalizedRecord) -> Result<PredictionResult, ClassifyError> {
        let response = self.http_client
            .post(&self.endpoint_url)
            .json(&[record])
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    ClassifyError::InvalidRequest(e.to_string())
                } else {
                    ClassifyError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("Prediction request rejected ({}): {}", status, error_text);
            return Err(ClassifyError::Server(status));
        }

        let results: Vec<PredictionResult> = response.json().await
            .map_err(|e| ClassifyError::Parse(e.to_string()))?;

        results.into_iter().next().ok_or(ClassifyError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::Status;
    use crate::logic::dataset::RawRecord;
    use crate::logic::normalize::normalize;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Scores by amount, mirroring the reference backend's thresholds.
    async fn predict(Json(rows): Json<Vec<Value>>) -> Result<Json<Value>, StatusCode> {
        if rows.len() != 1 {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        let amount = rows[0]["amount"].as_f64().unwrap_or(0.0);
        let (status, probability) = if amount >= 100_000.0 {
            ("🚩 Fraud", 95.0)
        } else if amount >= 10_000.0 {
            ("Manual Review", 60.0)
        } else {
            ("Legitimate", 2.5)
        };
        Ok(Json(json!([{
            "prediction": if amount >= 100_000.0 { 1 } else { 0 },
            "fraud_probability": probability,
            "status": status,
            "explanation": [{"feature": "amount", "impact": probability / 100.0}]
        }])))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/predict", post(predict))
            .route("/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/empty", post(|| async { Json(json!([])) }))
            .route("/garbage", post(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn record(amount: &str) -> NormalizedRecord {
        normalize(&RawRecord::from_pairs([("step", "1"), ("type", "TRANSFER"), ("amount", amount)]))
    }

    fn client(url: String) -> HttpClassifier {
        HttpClassifier::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_classify_single_row() {
        let base = spawn_server().await;
        let classifier = client(format!("{}/predict", base));

        let fraud = classifier.classify(&record("250000")).await.unwrap();
        assert_eq!(fraud.status, Status::Fraud);
        assert_eq!(fraud.fraud_probability, 95.0);

        let review = classifier.classify(&record("20000")).await.unwrap();
        assert_eq!(review.status, Status::ManualReview);

        let legit = classifier.classify(&record("12")).await.unwrap();
        assert_eq!(legit.status, Status::Legitimate);
    }

    #[tokio::test]
    async fn test_nan_fields_are_sent_as_null() {
        let base = spawn_server().await;
        let classifier = client(format!("{}/predict", base));

        // amount is null on the wire; the test server treats it as 0.
        let result = classifier.classify(&record("n/a")).await.unwrap();
        assert_eq!(result.status, Status::Legitimate);
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let base = spawn_server().await;
        let err = client(format!("{}/broken", base)).classify(&record("1")).await.unwrap_err();

        assert_eq!(err, ClassifyError::Server(500));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let base = spawn_server().await;
        let err = client(format!("{}/empty", base)).classify(&record("1")).await.unwrap_err();

        assert_eq!(err, ClassifyError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let base = spawn_server().await;
        let err = client(format!("{}/garbage", base)).classify(&record("1")).await.unwrap_err();

        assert!(matches!(err, ClassifyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}/predict", addr)).classify(&record("1")).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Network(_)));
    }
}
