use lambda_http::{
    Body, Error, Request, Response,
    http::{
        StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
    },
};
use serde::Deserialize;

use crate::domain::{
    models::{EpisodeMetadata, EpisodeNum, EpisodeUpload, EpisodeUploadErr, InputErr},
    ports::EpisodeUploadService,
};


/// The json body the upload form posts
#[derive(Deserialize)]
struct EpisodeUploadRequest {
    #[serde(rename = "episode-num")]
    episode_num: EpisodeNumField,
    /// percent-encoded
    description: String,
    #[serde(rename = "pub-date")]
    pub_date: String,
    password: String,
}

/// Episode numbers arrive either as json numbers or as strings.
/// Negative json numbers match neither variant.
#[derive(Deserialize)]
#[serde(untagged)]
enum EpisodeNumField {
    Number(u64),
    Text(String),
}

impl EpisodeNumField {
    fn into_episode_num(self) -> Result<EpisodeNum, InputErr> {
        let num = match self {
            EpisodeNumField::Number(n) => EpisodeNum::new(n)?,
            EpisodeNumField::Text(s) => s.parse::<EpisodeNum>()?,
        };
        Ok(num)
    }
}

/// Parses and normalizes the request body. Has no side effects.
pub fn parse_request(body: &[u8]) -> Result<EpisodeUpload, InputErr> {
    if body.is_empty() {
        return Err(InputErr::MissingBody);
    }

    let request: EpisodeUploadRequest = serde_json::from_slice(body)?;

    Ok(EpisodeUpload {
        metadata: EpisodeMetadata {
            episode_num: request.episode_num.into_episode_num()?,
            description: decode_description(&request.description),
            pub_date: request.pub_date,
        },
        password: request.password,
    })
}

/// Percent-decodes `%XX` sequences only. `+` is kept as is and invalid utf-8 is replaced.
fn decode_description(description: &str) -> String {
    let bytes = urlencoding::decode_binary(description.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Lambda entry for an API gateway proxy request
#[tracing::instrument(skip_all)]
pub async fn handler<S: EpisodeUploadService>(
    service: &S,
    verbose: bool,
    event: Request,
) -> Result<Response<Body>, Error> {
    verbose.then(|| tracing::trace!(event=?EventSummary::from(&event), "event info"));

    let upload = match parse_request(event.body()) {
        Ok(upload) => upload,
        Err(e) => {
            tracing::error!(error=?e, "missing parameters");
            return Ok(error_response(&EpisodeUploadErr::from(e)));
        }
    };

    match service.upload_episode(upload).await {
        Ok(authorization) => match serde_json::to_string(&authorization) {
            Ok(body) => {
                tracing::info!("episode saved and upload authorized");
                Ok(json_response(StatusCode::OK, body))
            }
            Err(e) => {
                tracing::error!(error=?e, "failed to serialize upload authorization");
                Ok(json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json_string("Problem creating presigned URL"),
                ))
            }
        },
        Err(e) => {
            tracing::error!(error=?e, status=e.status_code(), "episode upload failed");
            Ok(error_response(&e))
        }
    }
}

/// What verbose logging shows of an event. The body is reduced to its length since it carries
/// the password.
#[derive(Debug)]
struct EventSummary<'a> {
    method: &'a lambda_http::http::Method,
    uri: &'a lambda_http::http::Uri,
    headers: &'a lambda_http::http::HeaderMap,
    body_len: usize,
}

impl<'a> From<&'a Request> for EventSummary<'a> {
    fn from(event: &'a Request) -> Self {
        Self {
            method: event.method(),
            uri: event.uri(),
            headers: event.headers(),
            body_len: event.body().len(),
        }
    }
}

fn error_response(err: &EpisodeUploadErr) -> Response<Body> {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, json_string(err.public_message()))
}

fn json_string(message: &str) -> String {
    serde_json::Value::String(message.to_string()).to_string()
}

fn json_response(status: StatusCode, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(body))
        .expect("failed to render response")
}
