//! Interfaces the episode upload domain needs from the outside world

use crate::domain::models::{
    EpisodeMetadata, EpisodeUpload, EpisodeUploadErr, UploadAuthorization, UploadGrant,
};

/// Storage of episode records
#[cfg_attr(test, mockall::automock(type Err = anyhow::Error;))]
pub trait EpisodeRepo: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    /// Sets the description and pub date of the episode, creating the record if needed.
    /// Must not touch any other attribute of an existing record.
    fn upsert_episode(
        &self,
        metadata: EpisodeMetadata,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;
}

/// Something able to mint short lived upload authorizations for object storage
#[cfg_attr(test, mockall::automock(type Err = anyhow::Error;))]
pub trait UploadSigner: Send + Sync + 'static {
    /// the error type that can occur
    type Err: Send;

    fn presign_upload(
        &self,
        grant: UploadGrant,
    ) -> impl Future<Output = Result<UploadAuthorization, Self::Err>> + Send;
}

/// The api the inbound adapter calls
pub trait EpisodeUploadService: Send + Sync + 'static {
    /// authenticate, persist the metadata and authorize the media upload
    fn upload_episode(
        &self,
        upload: EpisodeUpload,
    ) -> impl Future<Output = Result<UploadAuthorization, EpisodeUploadErr>> + Send;
}
