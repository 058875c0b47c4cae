use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{context::Context, process};

/// Processes the sqs event.
///
/// Every record in the batch is processed independently; one record's
/// failure never stops the others. Records that fail stay in the queue
/// (their messages are not deleted) and the invocation as a whole fails,
/// naming them, so the platform redelivers. Successful records were
/// already deleted and are not reprocessed.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handler(ctx: Context, event: LambdaEvent<SqsEvent>) -> Result<(), Error> {
    let record_count = event.payload.records.len();
    tracing::info!("processing {record_count} queue records");

    let mut failed: Vec<String> = Vec::new();
    for record in event.payload.records {
        let message_id = record.message_id.clone().unwrap_or_default();
        let event_source = record.event_source_arn.clone().unwrap_or_default();

        match process::process_record(&ctx, &record).await {
            Ok(process::Outcome::Completed) => {
                tracing::info!(message_id = %message_id, event_source = %event_source, "record processed");
            }
            Ok(process::Outcome::CompletedAckFailed) => {
                tracing::warn!(
                    message_id = %message_id,
                    event_source = %event_source,
                    "record processed but its message was not deleted"
                );
            }
            Err(err) => {
                tracing::error!(error = ?err, message_id = %message_id, event_source = %event_source, "error processing record");
                failed.push(message_id);
            }
        }
    }

    if !failed.is_empty() {
        return Err(anyhow::anyhow!(
            "{} of {} records failed: [{}]",
            failed.len(),
            record_count,
            failed.join(", ")
        )
        .into());
    }

    tracing::trace!("processing complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SentimentLabel, SentimentResult};
    use crate::service;
    use aws_lambda_events::sqs::SqsMessage;
    use std::sync::Arc;

    fn record(message_id: &str, key: &str) -> SqsMessage {
        SqsMessage {
            message_id: Some(message_id.to_string()),
            receipt_handle: Some(format!("{message_id}-receipt")),
            body: Some(format!(
                r#"{{"detail": {{"requestParameters": {{"bucketName": "docs", "key": "{key}"}}}}}}"#
            )),
            ..Default::default()
        }
    }

    fn event(records: Vec<SqsMessage>) -> LambdaEvent<SqsEvent> {
        LambdaEvent::new(SqsEvent { records }, lambda_runtime::Context::default())
    }

    fn neutral_result() -> SentimentResult {
        SentimentResult {
            overall: SentimentLabel::Neutral,
            positive: 0.1,
            negative: 0.1,
            neutral: 0.7,
            mixed: 0.1,
        }
    }

    #[tokio::test]
    async fn a_failing_record_does_not_stop_the_batch() {
        let mut s3 = service::s3::S3::default();
        s3.expect_object_size()
            .withf(|_, key| key == "broken.txt")
            .returning(|_, _| Err(anyhow::anyhow!("stat failed")));
        s3.expect_object_size()
            .withf(|_, key| key == "report.txt")
            .returning(|_, _| Ok(42));
        s3.expect_download_to_path()
            .withf(|_, key, _| key == "report.txt")
            .times(1)
            .returning(|_, _, dest| {
                std::fs::write(dest, "perfectly fine").unwrap();
                Ok(14)
            });

        let mut comprehend = service::comprehend::Comprehend::default();
        comprehend
            .expect_detect_sentiment()
            .times(1)
            .returning(|_| Ok(neutral_result()));

        let mut db = service::db::DB::default();
        db.expect_put_sentiment()
            .withf(|id, _| id == "s3://docs/report.txt")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut sqs = service::sqs::SQS::default();
        sqs.expect_delete_message()
            .withf(|receipt| receipt == "message-2-receipt")
            .times(1)
            .returning(|_| Ok(()));

        let ctx = Context {
            s3: Arc::new(s3),
            comprehend: Arc::new(comprehend),
            db: Arc::new(db),
            sqs: Arc::new(sqs),
        };

        let result = handler(
            ctx,
            event(vec![
                record("message-1", "broken.txt"),
                record("message-2", "report.txt"),
            ]),
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("1 of 2 records failed"));
        assert!(err.to_string().contains("message-1"));
    }

    #[tokio::test]
    async fn a_fully_successful_batch_completes() {
        let mut s3 = service::s3::S3::default();
        s3.expect_object_size().times(2).returning(|_, _| Ok(42));
        s3.expect_download_to_path()
            .times(2)
            .returning(|_, _, dest| {
                std::fs::write(dest, "perfectly fine").unwrap();
                Ok(14)
            });

        let mut comprehend = service::comprehend::Comprehend::default();
        comprehend
            .expect_detect_sentiment()
            .times(2)
            .returning(|_| Ok(neutral_result()));

        let mut db = service::db::DB::default();
        db.expect_put_sentiment().times(2).returning(|_, _| Ok(()));

        let mut sqs = service::sqs::SQS::default();
        sqs.expect_delete_message().times(2).returning(|_| Ok(()));

        let ctx = Context {
            s3: Arc::new(s3),
            comprehend: Arc::new(comprehend),
            db: Arc::new(db),
            sqs: Arc::new(sqs),
        };

        let result = handler(
            ctx,
            event(vec![
                record("message-1", "notes.txt"),
                record("message-2", "report.txt"),
            ]),
        )
        .await;

        assert!(result.is_ok());
    }
}
