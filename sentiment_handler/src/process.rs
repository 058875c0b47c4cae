use std::path::Path;

use aws_lambda_events::sqs::SqsMessage;
use lambda_runtime::tracing;

use crate::{
    context::Context, error::ProcessError, models::UploadNotification, service::s3::DownloadError,
};

/// Largest object we will submit for analysis, respecting the analysis
/// service's input limits.
pub const MAX_OBJECT_SIZE_BYTES: i64 = 104_857_600; // 100 MiB

/// Terminal state of one successfully persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The record was persisted and its message deleted from the queue.
    Completed,
    /// The record was persisted but its message could not be deleted; the
    /// redelivered message will overwrite the same record.
    CompletedAckFailed,
}

/// Runs one notification record through the pipeline: parse, size check,
/// fetch into scratch storage, analyze, persist, acknowledge. Scratch
/// storage is removed whichever way this returns.
#[tracing::instrument(skip(ctx, record), fields(message_id = record.message_id.as_deref().unwrap_or_default()))]
pub async fn process_record(ctx: &Context, record: &SqsMessage) -> Result<Outcome, ProcessError> {
    let notification = UploadNotification::from_record(record)?;
    let uri = notification.uri();

    tracing::info!(uri = %uri, "processing upload notification");

    let size = ctx
        .s3
        .object_size(&notification.bucket, &notification.key)
        .await
        .map_err(|source| ProcessError::SizeUnknown {
            uri: uri.clone(),
            source,
        })?;

    if size >= MAX_OBJECT_SIZE_BYTES {
        return Err(ProcessError::SizeExceeded {
            uri,
            size,
            limit: MAX_OBJECT_SIZE_BYTES,
        });
    }

    let scratch = tempfile::tempdir().map_err(|e| ProcessError::Fetch {
        uri: uri.clone(),
        source: anyhow::Error::new(e).context("could not create scratch directory"),
    })?;

    let outcome = analyze_and_persist(ctx, &notification, scratch.path()).await;

    // Drop would remove the directory too, but closing explicitly gets any
    // removal failure into the logs instead of vanishing with the guard.
    if let Err(err) = scratch.close() {
        tracing::warn!(error = ?err, "could not remove scratch directory");
    }

    outcome
}

async fn analyze_and_persist(
    ctx: &Context,
    notification: &UploadNotification,
    scratch: &Path,
) -> Result<Outcome, ProcessError> {
    let uri = notification.uri();
    let local_path = scratch.join(notification.file_name());

    let bytes = ctx
        .s3
        .download_to_path(&notification.bucket, &notification.key, &local_path)
        .await
        .map_err(|err| match err {
            DownloadError::NotFound { .. } => ProcessError::ObjectMissing { uri: uri.clone() },
            DownloadError::Other(source) => ProcessError::Fetch {
                uri: uri.clone(),
                source,
            },
        })?;

    tracing::info!(bytes = bytes, path = %local_path.display(), "downloaded object for analysis");

    let text = tokio::fs::read_to_string(&local_path)
        .await
        .map_err(|e| ProcessError::Analysis {
            uri: uri.clone(),
            source: anyhow::Error::new(e).context("could not read the downloaded object as text"),
        })?;

    let sentiment = ctx
        .comprehend
        .detect_sentiment(&text)
        .await
        .map_err(|source| ProcessError::Analysis {
            uri: uri.clone(),
            source,
        })?;

    tracing::info!(overall = %sentiment.overall, "overall sentiment");

    ctx.db
        .put_sentiment(&uri, &sentiment)
        .await
        .map_err(|source| ProcessError::Persist {
            id: uri.clone(),
            source,
        })?;

    // Only a durably written record may take its message off the queue.
    if let Err(source) = ctx.sqs.delete_message(&notification.receipt_handle).await {
        let err = ProcessError::Ack {
            message_id: notification.message_id.clone(),
            source,
        };
        tracing::error!(error = ?err, "record persisted but its message could not be deleted; it will be redelivered");
        return Ok(Outcome::CompletedAckFailed);
    }

    Ok(Outcome::Completed)
}
