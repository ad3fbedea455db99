//! [UploadSigner] issuing presigned S3 POST uploads into the media bucket

use media_s3_client::{MediaS3, PresignedPost};

use crate::domain::{
    models::{UploadAuthorization, UploadGrant},
    ports::UploadSigner,
};

#[derive(Debug, Clone)]
pub struct S3UploadSigner {
    inner: MediaS3,
    /// media storage bucket
    bucket: String,
}

impl S3UploadSigner {
    pub fn new(inner: MediaS3, bucket: &str) -> Self {
        Self {
            inner,
            bucket: bucket.to_string(),
        }
    }
}

impl UploadSigner for S3UploadSigner {
    type Err = anyhow::Error;

    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn presign_upload(&self, grant: UploadGrant) -> Result<UploadAuthorization, Self::Err> {
        let post = self
            .inner
            .presigned_post(
                &self.bucket,
                grant.key.as_str(),
                grant.content_type,
                grant.expires_in,
            )
            .await?;

        Ok(post.into())
    }
}

impl From<PresignedPost> for UploadAuthorization {
    fn from(post: PresignedPost) -> Self {
        UploadAuthorization {
            url: post.url,
            fields: post.fields,
        }
    }
}
