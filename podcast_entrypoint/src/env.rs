use std::str::FromStr;

use thiserror::Error;

/// Where the lambda is deployed, as set by `ENVIRONMENT`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Assumed when nothing is configured
    #[default]
    Production,
    /// Shared dev or staging stack
    Develop,
    /// A developer machine, e.g. `cargo lambda watch`
    Local,
}

/// A value of `ENVIRONMENT` that names no [Environment]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown environment {0:?}, expected prod, dev or local")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Environment::Production),
            "dev" | "develop" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}
