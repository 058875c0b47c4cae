use aws_lambda_events::sqs::SqsMessage;
use lambda_runtime::tracing;
use serde::{Deserialize, Serialize};

use crate::error::ProcessError;

/// Body of an upload notification as it arrives through the queue: the
/// upstream event bus wraps the object location in
/// `detail.requestParameters`.
#[derive(Debug, Deserialize)]
struct NotificationBody {
    detail: NotificationDetail,
}

#[derive(Debug, Deserialize)]
struct NotificationDetail {
    #[serde(rename = "requestParameters")]
    request_parameters: RequestParameters,
}

#[derive(Debug, Deserialize)]
struct RequestParameters {
    #[serde(rename = "bucketName")]
    bucket_name: String,
    key: String,
}

/// A validated notification: where the uploaded object lives, plus the
/// queue bookkeeping needed to acknowledge the message later.
#[derive(Debug, PartialEq, Eq)]
pub struct UploadNotification {
    pub bucket: String,
    pub key: String,
    pub message_id: String,
    pub receipt_handle: String,
}

impl UploadNotification {
    #[tracing::instrument(skip(record), fields(message_id = record.message_id.as_deref().unwrap_or_default()))]
    pub fn from_record(record: &SqsMessage) -> Result<Self, ProcessError> {
        let receipt_handle = record
            .receipt_handle
            .clone()
            .ok_or_else(|| ProcessError::malformed("no receipt handle on record"))?;

        let body = record
            .body
            .as_deref()
            .ok_or_else(|| ProcessError::malformed("no body on record"))?;

        let body: NotificationBody = serde_json::from_str(body)
            .map_err(|e| ProcessError::malformed(&e.to_string()))?;

        let RequestParameters { bucket_name, key } = body.detail.request_parameters;
        if bucket_name.is_empty() || key.is_empty() {
            return Err(ProcessError::malformed("empty bucket or key"));
        }

        Ok(Self {
            bucket: bucket_name,
            key,
            message_id: record.message_id.clone().unwrap_or_default(),
            receipt_handle,
        })
    }

    /// Composite identifier for the object; also the record-store key.
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    /// Name for the local copy of the object, the final segment of the key.
    pub fn file_name(&self) -> &str {
        self.key
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("object")
    }
}

/// Overall classification returned by the analysis service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

/// Scores for one analyzed object. The four scores are per-category
/// confidences and sum to roughly 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentResult {
    pub overall: SentimentLabel,
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
    pub mixed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_body(body: &str) -> SqsMessage {
        SqsMessage {
            message_id: Some("message-1".to_string()),
            receipt_handle: Some("receipt-1".to_string()),
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn parses_upload_notification() {
        let body = r#"{
            "detail": {
                "eventName": "PutObject",
                "requestParameters": {
                    "bucketName": "docs",
                    "key": "report.txt"
                }
            }
        }"#;

        let notification = UploadNotification::from_record(&record_with_body(body)).unwrap();
        assert_eq!(notification.bucket, "docs");
        assert_eq!(notification.key, "report.txt");
        assert_eq!(notification.message_id, "message-1");
        assert_eq!(notification.receipt_handle, "receipt-1");
    }

    #[test]
    fn rejects_body_without_request_parameters() {
        let body = r#"{"detail": {"eventName": "PutObject"}}"#;
        let err = UploadNotification::from_record(&record_with_body(body)).unwrap_err();
        assert!(matches!(err, ProcessError::MalformedMessage { .. }));
    }

    #[test]
    fn rejects_non_json_body() {
        let err = UploadNotification::from_record(&record_with_body("not json")).unwrap_err();
        assert!(matches!(err, ProcessError::MalformedMessage { .. }));
    }

    #[test]
    fn rejects_record_without_body() {
        let record = SqsMessage {
            message_id: Some("message-1".to_string()),
            receipt_handle: Some("receipt-1".to_string()),
            ..Default::default()
        };
        let err = UploadNotification::from_record(&record).unwrap_err();
        assert!(matches!(err, ProcessError::MalformedMessage { .. }));
    }

    #[test]
    fn rejects_record_without_receipt_handle() {
        let record = SqsMessage {
            message_id: Some("message-1".to_string()),
            body: Some(
                r#"{"detail": {"requestParameters": {"bucketName": "docs", "key": "report.txt"}}}"#
                    .to_string(),
            ),
            ..Default::default()
        };
        let err = UploadNotification::from_record(&record).unwrap_err();
        assert!(matches!(err, ProcessError::MalformedMessage { .. }));
    }

    #[test]
    fn rejects_empty_bucket_or_key() {
        let body = r#"{"detail": {"requestParameters": {"bucketName": "", "key": "report.txt"}}}"#;
        let err = UploadNotification::from_record(&record_with_body(body)).unwrap_err();
        assert!(matches!(err, ProcessError::MalformedMessage { .. }));
    }

    #[test]
    fn uri_is_the_composite_object_identifier() {
        let body = r#"{"detail": {"requestParameters": {"bucketName": "docs", "key": "reports/2024/q1.txt"}}}"#;
        let notification = UploadNotification::from_record(&record_with_body(body)).unwrap();
        assert_eq!(notification.uri(), "s3://docs/reports/2024/q1.txt");
    }

    #[test]
    fn file_name_is_the_final_key_segment() {
        let body = r#"{"detail": {"requestParameters": {"bucketName": "docs", "key": "reports/2024/q1.txt"}}}"#;
        let notification = UploadNotification::from_record(&record_with_body(body)).unwrap();
        assert_eq!(notification.file_name(), "q1.txt");
    }

    #[test]
    fn file_name_falls_back_for_trailing_slash_keys() {
        let body = r#"{"detail": {"requestParameters": {"bucketName": "docs", "key": "reports/"}}}"#;
        let notification = UploadNotification::from_record(&record_with_body(body)).unwrap();
        assert_eq!(notification.file_name(), "object");
    }

    #[test]
    fn labels_display_in_upper_case() {
        assert_eq!(SentimentLabel::Positive.to_string(), "POSITIVE");
        assert_eq!(SentimentLabel::Mixed.to_string(), "MIXED");
    }
}
