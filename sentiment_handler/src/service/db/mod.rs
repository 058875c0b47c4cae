mod put_sentiment;

use lambda_runtime::tracing;
#[allow(unused_imports)]
use mockall::automock;

use crate::models::SentimentResult;

#[cfg(test)]
pub use MockDbClient as DB;
#[cfg(not(test))]
pub use DbClient as DB;

#[derive(Clone, Debug)]
pub struct DbClient {
    inner: aws_sdk_dynamodb::Client,
    table: String,
}

#[cfg_attr(test, automock)]
impl DbClient {
    pub fn new(inner: aws_sdk_dynamodb::Client, table: &str) -> Self {
        Self {
            inner,
            table: table.to_string(),
        }
    }

    /// Upserts the sentiment record for `id`; later writes win.
    #[tracing::instrument(skip(self, sentiment))]
    pub async fn put_sentiment(&self, id: &str, sentiment: &SentimentResult) -> anyhow::Result<()> {
        put_sentiment::put_sentiment(&self.inner, &self.table, id, sentiment).await
    }
}
