mod delete_message;

use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockSqsClient as SQS;
#[cfg(not(test))]
pub use SqsClient as SQS;

#[derive(Clone, Debug)]
pub struct SqsClient {
    inner: aws_sdk_sqs::Client,
    queue_url: String,
}

#[cfg_attr(test, automock)]
impl SqsClient {
    pub fn new(inner: aws_sdk_sqs::Client, queue_url: &str) -> Self {
        Self {
            inner,
            queue_url: queue_url.to_string(),
        }
    }

    /// Deletes a processed message from the queue.
    #[tracing::instrument(skip(self, receipt_handle))]
    pub async fn delete_message(&self, receipt_handle: &str) -> anyhow::Result<()> {
        delete_message::delete_message(&self.inner, &self.queue_url, receipt_handle).await
    }
}
