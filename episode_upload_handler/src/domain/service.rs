use crate::domain::{
    models::{Dependency, EpisodeUpload, EpisodeUploadErr, UploadAuthorization, UploadGrant},
    ports::{EpisodeRepo, EpisodeUploadService, UploadSigner},
};

#[cfg(test)]
mod tests;

/// Concrete [EpisodeUploadService] over abstract storage and signing
pub struct EpisodeUploadImpl<R, S> {
    episodes: R,
    signer: S,
    /// The shared secret every caller must present
    password: String,
}

impl<R, S> EpisodeUploadImpl<R, S>
where
    R: EpisodeRepo,
    anyhow::Error: From<R::Err>,
    S: UploadSigner,
    anyhow::Error: From<S::Err>,
{
    pub fn new(episodes: R, signer: S, password: impl Into<String>) -> Self {
        EpisodeUploadImpl {
            episodes,
            signer,
            password: password.into(),
        }
    }

    /// Exact byte comparison against the configured secret
    fn authorize_caller(&self, password: &str) -> Result<(), EpisodeUploadErr> {
        if password.as_bytes() != self.password.as_bytes() {
            return Err(EpisodeUploadErr::AuthError);
        }
        Ok(())
    }
}

impl<R, S> EpisodeUploadService for EpisodeUploadImpl<R, S>
where
    R: EpisodeRepo,
    anyhow::Error: From<R::Err>,
    S: UploadSigner,
    anyhow::Error: From<S::Err>,
{
    #[tracing::instrument(err(Debug), skip(self, upload), fields(episode_num = %upload.metadata.episode_num))]
    async fn upload_episode(
        &self,
        upload: EpisodeUpload,
    ) -> Result<UploadAuthorization, EpisodeUploadErr> {
        let EpisodeUpload { metadata, password } = upload;

        if let Err(e) = self.authorize_caller(&password) {
            tracing::warn!("rejected request with invalid password");
            return Err(e);
        }

        let grant = UploadGrant::for_episode(&metadata);

        self.episodes
            .upsert_episode(metadata)
            .await
            .map_err(|e| EpisodeUploadErr::DependencyError {
                dependency: Dependency::RecordStore,
                source: anyhow::Error::from(e),
            })?;

        tracing::trace!(key=%grant.key, "episode saved, presigning upload");

        // the record above stays written if signing fails
        self.signer
            .presign_upload(grant)
            .await
            .map_err(|e| EpisodeUploadErr::DependencyError {
                dependency: Dependency::UploadSigner,
                source: anyhow::Error::from(e),
            })
    }
}
