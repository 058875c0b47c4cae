use anyhow::Context;
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;

/// Looks up the object's size without fetching it.
#[tracing::instrument(skip(client))]
pub async fn object_size(client: &s3::Client, bucket: &str, key: &str) -> anyhow::Result<i64> {
    let resp = client
        .head_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .context(format!("could not stat s3://{bucket}/{key}"))?;

    resp.content_length()
        .context(format!("no content length reported for s3://{bucket}/{key}"))
}
