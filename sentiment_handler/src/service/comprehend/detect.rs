use anyhow::{Context, Result};
use aws_sdk_comprehend as comprehend;
use aws_sdk_comprehend::types::{LanguageCode, SentimentType};
use lambda_runtime::tracing;

use crate::models::{SentimentLabel, SentimentResult};

/// Submits the text for sentiment analysis and maps the response into our
/// closed label set. A response missing the label or the scores is an error.
#[tracing::instrument(skip(client, text))]
pub async fn detect_sentiment(
    client: &comprehend::Client,
    text: &str,
) -> Result<SentimentResult> {
    let resp = client
        .detect_sentiment()
        .text(text)
        .language_code(LanguageCode::En)
        .send()
        .await
        .context("sentiment detection call failed")?;

    let overall = match resp.sentiment() {
        Some(SentimentType::Positive) => SentimentLabel::Positive,
        Some(SentimentType::Negative) => SentimentLabel::Negative,
        Some(SentimentType::Neutral) => SentimentLabel::Neutral,
        Some(SentimentType::Mixed) => SentimentLabel::Mixed,
        other => anyhow::bail!("unrecognized overall sentiment {other:?} in response"),
    };

    let score = resp
        .sentiment_score()
        .context("no sentiment score in response")?;

    Ok(SentimentResult {
        overall,
        positive: score.positive().unwrap_or_default(),
        negative: score.negative().unwrap_or_default(),
        neutral: score.neutral().unwrap_or_default(),
        mixed: score.mixed().unwrap_or_default(),
    })
}
