use anyhow::Context;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use lambda_runtime::tracing;

use crate::models::SentimentResult;

/// Writes the sentiment record for one object. `put_item` replaces any
/// previous record for the id, so a redelivered message settles on the
/// latest scores instead of accumulating duplicates.
#[tracing::instrument(skip(client, sentiment))]
pub async fn put_sentiment(
    client: &aws_sdk_dynamodb::Client,
    table: &str,
    id: &str,
    sentiment: &SentimentResult,
) -> anyhow::Result<()> {
    client
        .put_item()
        .table_name(table)
        .item("id", AttributeValue::S(id.to_string()))
        .item("last_modified", AttributeValue::S(Utc::now().to_rfc3339()))
        .item(
            "overall_sentiment",
            AttributeValue::S(sentiment.overall.to_string()),
        )
        .item("positive", AttributeValue::N(sentiment.positive.to_string()))
        .item("negative", AttributeValue::N(sentiment.negative.to_string()))
        .item("neutral", AttributeValue::N(sentiment.neutral.to_string()))
        .item("mixed", AttributeValue::N(sentiment.mixed.to_string()))
        .send()
        .await
        .context(format!("could not put sentiment record {id} to {table}"))?;

    Ok(())
}
