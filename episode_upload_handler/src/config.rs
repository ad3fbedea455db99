use aws_config::{BehaviorVersion, Region, SdkConfig, meta::region::RegionProviderChain};
use podcast_entrypoint::{Environment, UnknownEnvironment};
use thiserror::Error;

pub const USER_PASSWORD: &str = "USER_PASSWORD";
pub const EPISODE_TABLE_NAME: &str = "EPISODE_TABLE_NAME";
pub const MEDIA_BUCKET: &str = "MEDIA_BUCKET";
pub const VERBOSE: &str = "VERBOSE";
pub const ENVIRONMENT: &str = "ENVIRONMENT";

const DEFAULT_EPISODE_TABLE_NAME: &str = "ccc-podcast";
const DEFAULT_MEDIA_BUCKET: &str = "kwksolutions.com";

#[derive(Debug, Error)]
pub enum ConfigErr {
    /// A required variable could not be read
    #[error("An error occurred while reading envvar: {var_name}. Err: {err}")]
    Missing {
        var_name: &'static str,
        err: std::env::VarError,
    },
    #[error("envvar ENVIRONMENT is invalid: {0}")]
    InvalidEnvironment(#[from] UnknownEnvironment),
}

/// Everything the lambda reads from its environment. Built once at cold start.
#[derive(Clone)]
pub struct Config {
    /// The shared secret callers must present
    pub user_password: String,
    pub episode_table_name: String,
    pub media_bucket: String,
    /// Trace a summary of each incoming event
    pub verbose: bool,
    /// Picks the log format. Production when unset.
    pub environment: Environment,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("user_password", &"<redacted>")
            .field("episode_table_name", &self.episode_table_name)
            .field("media_bucket", &self.media_bucket)
            .field("verbose", &self.verbose)
            .field("environment", &self.environment)
            .finish()
    }
}

impl Config {
    #[tracing::instrument(err)]
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Builds the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&'static str) -> Result<String, std::env::VarError>,
    {
        let required = |var_name: &'static str| {
            lookup(var_name).map_err(|err| ConfigErr::Missing { var_name, err })
        };
        let optional = |var_name: &'static str, default: &str| {
            lookup(var_name).unwrap_or_else(|_| default.to_string())
        };

        Ok(Self {
            user_password: required(USER_PASSWORD)?,
            episode_table_name: optional(EPISODE_TABLE_NAME, DEFAULT_EPISODE_TABLE_NAME),
            media_bucket: optional(MEDIA_BUCKET, DEFAULT_MEDIA_BUCKET),
            verbose: lookup(VERBOSE)
                .ok()
                .and_then(|val| val.parse::<bool>().ok())
                .unwrap_or(false),
            environment: match lookup(ENVIRONMENT) {
                Ok(val) => val.parse::<Environment>()?,
                Err(_) => Environment::default(),
            },
        })
    }
}

pub async fn load_aws_config() -> SdkConfig {
    let region_provider = RegionProviderChain::default_provider().or_else(Region::new("us-east-1"));
    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await
}
