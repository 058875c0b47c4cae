use std::path::Path;

use anyhow::Context;
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;

/// Download failure, with a missing object distinguished from other causes.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("s3://{bucket}/{key} does not exist")]
    NotFound { bucket: String, key: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Streams a given object from the bucket into a local file.
#[tracing::instrument(skip(client, dest))]
pub async fn download_to_path(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    dest: &Path,
) -> Result<u64, DownloadError> {
    let resp = match client.get_object().bucket(bucket).key(key).send().await {
        Ok(resp) => resp,
        Err(e) => {
            if e.as_service_error().map(|e| e.is_no_such_key()) == Some(true) {
                return Err(DownloadError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                });
            }

            return Err(anyhow::Error::new(e)
                .context(format!("could not get s3://{bucket}/{key}"))
                .into());
        }
    };

    let mut body = resp.body.into_async_read();
    let mut file = tokio::fs::File::create(dest)
        .await
        .context(format!("could not create {}", dest.display()))?;

    let bytes = tokio::io::copy(&mut body, &mut file)
        .await
        .context(format!("could not write s3://{bucket}/{key} to disk"))?;

    Ok(bytes)
}
