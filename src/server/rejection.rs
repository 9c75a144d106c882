//! Turns warp rejections into JSON error replies

use super::routes::validation_reply;
use crate::error::{FieldIssue, IssueKind};
use serde_json::json;
use std::convert::Infallible;
use std::error::Error as _;
use tracing::{debug, error};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub(crate) async fn handle_rejection(err: Rejection) -> Result<warp::reply::Response, Infallible> {
    if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        let msg = e
            .source()
            .map(|source| source.to_string())
            .unwrap_or_else(|| e.to_string());
        debug!("Unparseable request body: {}", msg);
        return Ok(validation_reply(&[FieldIssue::body(
            IssueKind::JsonInvalid,
            msg,
        )]));
    }

    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Length Required")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type")
    } else {
        error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    };

    Ok(warp::reply::with_status(warp::reply::json(&json!({ "detail": detail })), status)
        .into_response())
}
