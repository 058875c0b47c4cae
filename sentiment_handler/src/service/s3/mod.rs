mod download;
mod size;

use std::path::Path;

use anyhow::Result;
use aws_sdk_s3 as s3;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;

pub use download::DownloadError;

#[cfg(test)]
pub use MockS3Client as S3;
#[cfg(not(test))]
pub use S3Client as S3;

#[derive(Clone, Debug)]
pub struct S3Client {
    /// Inner S3 client
    inner: s3::Client,
}

#[cfg_attr(test, automock)]
impl S3Client {
    pub fn new(inner: s3::Client) -> Self {
        Self { inner }
    }

    /// Size of the object in bytes. Any lookup failure is an error; a size
    /// that cannot be determined never passes through as a value.
    #[tracing::instrument(skip(self))]
    pub async fn object_size(&self, bucket: &str, key: &str) -> Result<i64> {
        size::object_size(&self.inner, bucket, key).await
    }

    /// Streams the object to `dest`, returning the number of bytes written.
    /// A missing object is reported as [DownloadError::NotFound].
    #[tracing::instrument(skip(self, dest))]
    pub async fn download_to_path(
        &self,
        bucket: &str,
        key: &str,
        dest: &Path,
    ) -> Result<u64, DownloadError> {
        download::download_to_path(&self.inner, bucket, key, dest).await
    }
}
