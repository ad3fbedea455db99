//! Concrete implementations of the outbound ports

pub mod dynamodb_episode_repo;
pub mod s3_upload_signer;
