#![deny(missing_docs)]
//! Process start-up shared by the podcast lambdas.
//!
//! [load_dotenv] runs before the lambda reads its config. [init_tracing] runs right after,
//! with the [LogFormat] derived from the configured [Environment].

mod env;

pub use env::{Environment, UnknownEnvironment};

use tracing_subscriber::EnvFilter;

/// How log events are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line and coloured, for a terminal
    Pretty,
    /// One flattened json object per event, for CloudWatch
    Json,
}

impl From<Environment> for LogFormat {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Local => LogFormat::Pretty,
            Environment::Production | Environment::Develop => LogFormat::Json,
        }
    }
}

/// Loads `.env` from the working directory if there is one
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// Routes panics through tracing and installs the global subscriber.
/// Call once per process, before the first span is entered.
pub fn init_tracing(format: LogFormat) {
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Pretty => builder.with_ansi(true).pretty().init(),
        LogFormat::Json => builder
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
            .init(),
    }
}
