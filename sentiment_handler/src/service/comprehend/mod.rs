mod detect;

use anyhow::Result;
use aws_sdk_comprehend as comprehend;
use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;

use crate::models::SentimentResult;

#[cfg(test)]
pub use MockComprehendClient as Comprehend;
#[cfg(not(test))]
pub use ComprehendClient as Comprehend;

#[derive(Clone, Debug)]
pub struct ComprehendClient {
    /// Inner Comprehend client
    inner: comprehend::Client,
}

#[cfg_attr(test, automock)]
impl ComprehendClient {
    pub fn new(inner: comprehend::Client) -> Self {
        Self { inner }
    }

    /// Scores the text with a fixed English language hint.
    #[tracing::instrument(skip(self, text), fields(text_bytes = text.len()))]
    pub async fn detect_sentiment(&self, text: &str) -> Result<SentimentResult> {
        detect::detect_sentiment(&self.inner, text).await
    }
}
