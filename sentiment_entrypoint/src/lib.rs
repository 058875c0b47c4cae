#![deny(missing_docs)]
//! This crate provides a standardized initialization process that should be used across entrypoint crates.
//! This is used to provide consistent behaviour with e.g. tracing configurations

use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// The current environment the application is running in
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// The binary is running on a developer machine
    Local,
}

impl Environment {
    /// Attempt to construct a new [Environment] from the `ENVIRONMENT` variable
    pub fn new_from_env() -> Result<Self, UnknownValue> {
        let value = std::env::var("ENVIRONMENT")
            .map_err(|_| UnknownValue("ENVIRONMENT is not set".to_string()))?;
        Self::from_str(&value)
    }

    /// Attempt to create a new [Environment] falling back to production if we fail to construct
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}

/// unit struct which defines the behaviour for instantiation
#[derive(Debug)]
pub struct SentimentEntrypoint {
    env: Environment,
}

impl Default for SentimentEntrypoint {
    fn default() -> Self {
        SentimentEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [SentimentEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl SentimentEntrypoint {
    /// create a new instance of [Self] from an input [Environment]
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    ///
    /// Verbosity is taken from `RUST_LOG`. Local runs get a human-readable
    /// formatter; deployed runs get flattened json for the log aggregator.
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_environments() {
        assert_eq!(
            Environment::from_str("prod").unwrap(),
            Environment::Production
        );
        assert_eq!(Environment::from_str("dev").unwrap(), Environment::Develop);
        assert_eq!(Environment::from_str("local").unwrap(), Environment::Local);
    }

    #[test]
    fn rejects_unknown_environments() {
        assert!(Environment::from_str("staging").is_err());
        assert!(Environment::from_str("").is_err());
    }

    #[test]
    fn displays_short_names() {
        assert_eq!(Environment::Production.to_string(), "prod");
        assert_eq!(Environment::Develop.to_string(), "dev");
        assert_eq!(Environment::Local.to_string(), "local");
    }
}
