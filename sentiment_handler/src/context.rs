use std::sync::Arc;

use crate::service;

/// Handles for the external collaborators, built once per cold start and
/// cloned into each invocation.
#[derive(Clone)]
pub struct Context {
    pub s3: Arc<service::s3::S3>,
    pub comprehend: Arc<service::comprehend::Comprehend>,
    pub db: Arc<service::db::DB>,
    pub sqs: Arc<service::sqs::SQS>,
}
