//! SigV4 signing of browser-based S3 POST uploads.
//!
//! The caller receives an endpoint and a set of form fields. The uploader submits them as a
//! multipart form with the file as the last part, and S3 enforces the policy conditions.

use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use anyhow::Context;
use aws_credential_types::Credentials;
use aws_sigv4::sign::v4::{calculate_signature, generate_signing_key};
use base64::Engine;
use chrono::{DateTime, Utc};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";

/// Stored as object metadata on the upload. Every authorization carries its own value, so no
/// two of them share a policy or a signature.
pub const UPLOAD_ID_FIELD: &str = "x-amz-meta-upload-id";

/// What the caller wants to authorize
#[derive(Debug, Clone)]
pub struct PostPolicyRequest<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
    /// Set as the default `Content-Type` field and required by the policy
    pub content_type: &'a str,
    pub expires_in: Duration,
    /// Unique per authorization
    pub upload_id: &'a str,
}

/// A signed POST upload. Serializes to the same shape as boto3's `generate_presigned_post`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PresignedPost {
    pub url: String,
    pub fields: BTreeMap<String, String>,
}

/// Signs a POST policy for the request. Pure: the same inputs always give the same output.
pub fn sign(
    request: &PostPolicyRequest<'_>,
    credentials: &Credentials,
    region: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<PresignedPost> {
    let expires_in =
        chrono::Duration::from_std(request.expires_in).context("expiry is out of range")?;
    let expiration = now + expires_in;

    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let credential = format!(
        "{}/{}/{}/{}/aws4_request",
        credentials.access_key_id(),
        now.format("%Y%m%d"),
        region,
        SERVICE
    );

    let mut fields = BTreeMap::from([
        ("Content-Type".to_string(), request.content_type.to_string()),
        ("key".to_string(), request.key.to_string()),
        ("x-amz-algorithm".to_string(), ALGORITHM.to_string()),
        ("x-amz-credential".to_string(), credential),
        ("x-amz-date".to_string(), amz_date),
        (UPLOAD_ID_FIELD.to_string(), request.upload_id.to_string()),
    ]);
    if let Some(token) = credentials.session_token() {
        fields.insert("x-amz-security-token".to_string(), token.to_string());
    }

    let mut conditions = vec![serde_json::json!({ "bucket": request.bucket })];
    conditions.extend(fields.iter().map(|(name, value)| {
        let mut condition = serde_json::Map::new();
        condition.insert(name.clone(), serde_json::Value::String(value.clone()));
        serde_json::Value::Object(condition)
    }));

    let policy = serde_json::json!({
        "expiration": expiration.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "conditions": conditions,
    });
    let policy = base64::engine::general_purpose::STANDARD
        .encode(serde_json::to_vec(&policy).context("failed to serialize post policy")?);

    let signing_key = generate_signing_key(
        credentials.secret_access_key(),
        SystemTime::from(now),
        region,
        SERVICE,
    );
    let signature = calculate_signature(signing_key, policy.as_bytes());

    fields.insert("policy".to_string(), policy);
    fields.insert("x-amz-signature".to_string(), signature);

    Ok(PresignedPost {
        url: post_endpoint(request.bucket, region),
        fields,
    })
}

/// The url the form is posted to.
/// Bucket names containing dots are not covered by the S3 wildcard certificate, so those use
/// path style addressing.
pub fn post_endpoint(bucket: &str, region: &str) -> String {
    if bucket.contains('.') {
        format!("https://s3.{region}.amazonaws.com/{bucket}")
    } else {
        format!("https://{bucket}.s3.{region}.amazonaws.com/")
    }
}
