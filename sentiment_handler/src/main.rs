#![recursion_limit = "256"]

use std::sync::Arc;

use aws_config::meta::region::RegionProviderChain;
use aws_lambda_events::event::sqs::SqsEvent;
use aws_sdk_s3::config::Region;
use lambda_runtime::{
    Error, LambdaEvent, run, service_fn,
    tracing::{self},
};
use sentiment_entrypoint::SentimentEntrypoint;

use sentiment_handler::{config::Config, context::Context, handler::handler, service};

#[tokio::main]
async fn main() -> Result<(), Error> {
    SentimentEntrypoint::default().init();
    tracing::trace!("initiating lambda");

    let config = Config::from_env()?;

    let region_provider = RegionProviderChain::default_provider().or_else(Region::new("us-east-1"));
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    let ctx = Context {
        s3: Arc::new(service::s3::S3::new(aws_sdk_s3::Client::new(&aws_config))),
        comprehend: Arc::new(service::comprehend::Comprehend::new(
            aws_sdk_comprehend::Client::new(&aws_config),
        )),
        db: Arc::new(service::db::DB::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            &config.sentiment_table,
        )),
        sqs: Arc::new(service::sqs::SQS::new(
            aws_sdk_sqs::Client::new(&aws_config),
            &config.sentiment_queue,
        )),
    };

    let func = service_fn(move |event: LambdaEvent<SqsEvent>| handler(ctx.clone(), event));
    run(func).await
}
