use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// The only content type an episode media file may be uploaded with
pub const MEDIA_CONTENT_TYPE: &str = "audio/mpeg";

/// How long an [UploadAuthorization] stays valid
pub const UPLOAD_TTL: Duration = Duration::from_secs(300);

const MEDIA_KEY_PREFIX: &str = "ccc/media/ccc";

/// Key of an episode record. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpisodeNum(u64);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("episode number must be a positive integer, got {0:?}")]
pub struct InvalidEpisodeNum(pub String);

impl EpisodeNum {
    pub fn new(num: u64) -> Result<Self, InvalidEpisodeNum> {
        if num == 0 {
            return Err(InvalidEpisodeNum(num.to_string()));
        }
        Ok(Self(num))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for EpisodeNum {
    type Err = InvalidEpisodeNum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = s
            .trim()
            .parse::<u64>()
            .map_err(|_| InvalidEpisodeNum(s.to_string()))?;
        Self::new(num).map_err(|_| InvalidEpisodeNum(s.to_string()))
    }
}

impl Display for EpisodeNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The attributes this lambda owns on an episode record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeMetadata {
    pub episode_num: EpisodeNum,
    /// Already percent-decoded
    pub description: String,
    /// Opaque, caller supplied
    pub pub_date: String,
}

/// A fully parsed request which has not been authenticated yet
#[derive(Clone, PartialEq, Eq)]
pub struct EpisodeUpload {
    pub metadata: EpisodeMetadata,
    pub password: String,
}

impl std::fmt::Debug for EpisodeUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpisodeUpload")
            .field("metadata", &self.metadata)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Object key of an episode's media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaKey(String);

impl MediaKey {
    pub fn new(episode_num: EpisodeNum, pub_date: &str) -> Self {
        Self(format!(
            "{MEDIA_KEY_PREFIX}-{:03}-{pub_date}.mp3",
            episode_num.get()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MediaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an [UploadAuthorization] must permit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadGrant {
    pub key: MediaKey,
    pub content_type: &'static str,
    pub expires_in: Duration,
}

impl UploadGrant {
    pub fn for_episode(metadata: &EpisodeMetadata) -> Self {
        Self {
            key: MediaKey::new(metadata.episode_num, &metadata.pub_date),
            content_type: MEDIA_CONTENT_TYPE,
            expires_in: UPLOAD_TTL,
        }
    }
}

/// Endpoint and form fields for a direct-to-storage upload
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UploadAuthorization {
    pub url: String,
    pub fields: BTreeMap<String, String>,
}

/// Why the request could not be parsed
#[derive(Debug, Error)]
pub enum InputErr {
    #[error("request has no body")]
    MissingBody,
    #[error("request body is not valid: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidEpisodeNum(#[from] InvalidEpisodeNum),
}

/// The remote collaborator which failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    RecordStore,
    UploadSigner,
}

impl Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dependency::RecordStore => write!(f, "record store"),
            Dependency::UploadSigner => write!(f, "upload signer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EpisodeUploadErr {
    #[error(transparent)]
    InputError(#[from] InputErr),
    #[error("password does not match")]
    AuthError,
    #[error("{dependency} failed: {source:?}")]
    DependencyError {
        dependency: Dependency,
        source: anyhow::Error,
    },
}

impl EpisodeUploadErr {
    pub fn status_code(&self) -> u16 {
        match self {
            EpisodeUploadErr::InputError(_) => 400,
            EpisodeUploadErr::AuthError => 403,
            EpisodeUploadErr::DependencyError { .. } => 500,
        }
    }

    /// The message returned to the caller. Never includes internal details.
    pub fn public_message(&self) -> &'static str {
        match self {
            EpisodeUploadErr::InputError(_) => "must supply required parameters",
            EpisodeUploadErr::AuthError => "forbidden",
            EpisodeUploadErr::DependencyError {
                dependency: Dependency::RecordStore,
                ..
            } => "Problem saving episode",
            EpisodeUploadErr::DependencyError {
                dependency: Dependency::UploadSigner,
                ..
            } => "Problem creating presigned URL",
        }
    }
}
