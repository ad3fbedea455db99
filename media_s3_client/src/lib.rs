use std::time::Duration;

use anyhow::Context;
use aws_config::SdkConfig;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};

mod post_policy;

pub use post_policy::{PostPolicyRequest, PresignedPost, UPLOAD_ID_FIELD, post_endpoint, sign};

/// Issues upload authorizations for the media bucket.
/// Signing happens locally, the only remote call is credential resolution.
#[derive(Clone, Debug)]
pub struct MediaS3 {
    credentials: SharedCredentialsProvider,
    region: String,
}

impl MediaS3 {
    pub fn new(aws_config: &SdkConfig) -> anyhow::Result<Self> {
        let credentials = aws_config
            .credentials_provider()
            .context("aws config has no credentials provider")?;
        let region = aws_config
            .region()
            .context("aws config has no region")?
            .to_string();

        Ok(Self::new_from_parts(credentials, region))
    }

    pub fn new_from_parts(credentials: SharedCredentialsProvider, region: String) -> Self {
        Self {
            credentials,
            region,
        }
    }

    /// Creates a presigned POST which allows uploading exactly `key` with `content_type`
    /// until `expires_in` has elapsed. Each call is signed with a fresh upload id.
    #[tracing::instrument(skip(self))]
    pub async fn presigned_post(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> anyhow::Result<PresignedPost> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .context("failed to resolve aws credentials")?;

        let upload_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(upload_id = %upload_id, "signing post policy");

        post_policy::sign(
            &PostPolicyRequest {
                bucket,
                key,
                content_type,
                expires_in,
                upload_id: &upload_id,
            },
            &credentials,
            &self.region,
            chrono::Utc::now(),
        )
        .context("failed to sign post policy")
    }
}
