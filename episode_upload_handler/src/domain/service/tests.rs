use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::models::{EpisodeMetadata, EpisodeNum};
use crate::domain::ports::{MockEpisodeRepo, MockUploadSigner};

use super::*;

fn upload(password: &str) -> EpisodeUpload {
    EpisodeUpload {
        metadata: EpisodeMetadata {
            episode_num: EpisodeNum::new(7).unwrap(),
            description: "Season Finale".to_string(),
            pub_date: "2021-05-01".to_string(),
        },
        password: password.to_string(),
    }
}

fn authorization(key: &str) -> UploadAuthorization {
    UploadAuthorization {
        url: "https://s3.us-east-1.amazonaws.com/kwksolutions.com".to_string(),
        fields: BTreeMap::from([
            ("Content-Type".to_string(), "audio/mpeg".to_string()),
            ("key".to_string(), key.to_string()),
        ]),
    }
}

#[tokio::test]
async fn wrong_password_never_reaches_storage_or_signer() {
    let mut episodes = MockEpisodeRepo::new();
    episodes.expect_upsert_episode().never();
    let mut signer = MockUploadSigner::new();
    signer.expect_presign_upload().never();

    let err = EpisodeUploadImpl::new(episodes, signer, "secret")
        .upload_episode(upload("not-the-secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, EpisodeUploadErr::AuthError));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn password_comparison_is_exact() {
    for attempt in ["Secret", "secret ", " secret", "secre", ""] {
        let mut episodes = MockEpisodeRepo::new();
        episodes.expect_upsert_episode().never();
        let mut signer = MockUploadSigner::new();
        signer.expect_presign_upload().never();

        let err = EpisodeUploadImpl::new(episodes, signer, "secret")
            .upload_episode(upload(attempt))
            .await
            .unwrap_err();
        assert!(matches!(err, EpisodeUploadErr::AuthError), "{attempt:?}");
    }
}

#[tokio::test]
async fn saves_metadata_then_signs_media_key() {
    let mut seq = mockall::Sequence::new();

    let mut episodes = MockEpisodeRepo::new();
    episodes
        .expect_upsert_episode()
        .withf(|metadata| {
            metadata.episode_num.get() == 7
                && metadata.description == "Season Finale"
                && metadata.pub_date == "2021-05-01"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Box::pin(async { Ok(()) }));

    let mut signer = MockUploadSigner::new();
    signer
        .expect_presign_upload()
        .withf(|grant| {
            grant.key.as_str() == "ccc/media/ccc-007-2021-05-01.mp3"
                && grant.content_type == "audio/mpeg"
                && grant.expires_in == Duration::from_secs(300)
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|grant| {
            let auth = authorization(grant.key.as_str());
            Box::pin(async move { Ok(auth) })
        });

    let res = EpisodeUploadImpl::new(episodes, signer, "secret")
        .upload_episode(upload("secret"))
        .await
        .unwrap();

    assert_eq!(res, authorization("ccc/media/ccc-007-2021-05-01.mp3"));
}

#[tokio::test]
async fn store_failure_skips_signing() {
    let mut episodes = MockEpisodeRepo::new();
    episodes
        .expect_upsert_episode()
        .times(1)
        .returning(|_| Box::pin(async { Err(anyhow::anyhow!("ProvisionedThroughputExceeded")) }));
    let mut signer = MockUploadSigner::new();
    signer.expect_presign_upload().never();

    let err = EpisodeUploadImpl::new(episodes, signer, "secret")
        .upload_episode(upload("secret"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EpisodeUploadErr::DependencyError {
            dependency: Dependency::RecordStore,
            ..
        }
    ));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn signer_failure_keeps_saved_record() {
    let mut episodes = MockEpisodeRepo::new();
    episodes
        .expect_upsert_episode()
        .times(1)
        .returning(|_| Box::pin(async { Ok(()) }));
    let mut signer = MockUploadSigner::new();
    signer
        .expect_presign_upload()
        .times(1)
        .returning(|_| Box::pin(async { Err(anyhow::anyhow!("no credentials")) }));

    let err = EpisodeUploadImpl::new(episodes, signer, "secret")
        .upload_episode(upload("secret"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EpisodeUploadErr::DependencyError {
            dependency: Dependency::UploadSigner,
            ..
        }
    ));
    assert_eq!(err.public_message(), "Problem creating presigned URL");
}

#[tokio::test]
async fn repeated_request_writes_same_state_and_signs_each_time() {
    let mut episodes = MockEpisodeRepo::new();
    episodes
        .expect_upsert_episode()
        .withf(|metadata| metadata == &upload("secret").metadata)
        .times(2)
        .returning(|_| Box::pin(async { Ok(()) }));

    let mut signer = MockUploadSigner::new();
    signer
        .expect_presign_upload()
        .withf(|grant| {
            grant.key.as_str() == "ccc/media/ccc-007-2021-05-01.mp3"
                && grant.expires_in == Duration::from_secs(300)
        })
        .times(2)
        .returning(|grant| {
            let auth = authorization(grant.key.as_str());
            Box::pin(async move { Ok(auth) })
        });

    let service = EpisodeUploadImpl::new(episodes, signer, "secret");
    let first = service.upload_episode(upload("secret")).await.unwrap();
    let second = service.upload_episode(upload("secret")).await.unwrap();

    assert_eq!(first.fields["key"], second.fields["key"]);
}
