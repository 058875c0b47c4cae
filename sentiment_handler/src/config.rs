use anyhow::Context;

/// The configuration parameters for the application.
///
/// These are pulled from environment variables, which is how the function's
/// deployment provides them.
///
/// Log verbosity is not part of this struct; the subscriber reads `RUST_LOG`
/// directly at initialization.
#[derive(Debug, Clone)]
pub struct Config {
    /// The table holding one sentiment record per analyzed object
    pub sentiment_table: String,

    /// The url of the queue delivering upload notifications
    pub sentiment_queue: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let sentiment_table =
            std::env::var("SENTIMENT_TABLE").context("SENTIMENT_TABLE must be provided")?;
        let sentiment_queue =
            std::env::var("SENTIMENT_QUEUE").context("SENTIMENT_QUEUE must be provided")?;
        Ok(Config {
            sentiment_table,
            sentiment_queue,
        })
    }
}
