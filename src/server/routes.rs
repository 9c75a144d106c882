//! warp filters for the triage HTTP surface

use super::rejection::handle_rejection;
use crate::config::{ServiceInfo, SERVICE_INFO};
use crate::triage::{self, Prediction};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(flatten)]
    info: ServiceInfo,
}

/// Body of every 422 reply
#[derive(Debug, Serialize)]
pub(crate) struct ValidationResponse<'a> {
    pub detail: &'a [crate::error::FieldIssue],
}

/// Complete route tree, with rejection handling, request tracing and CORS applied
///
/// Only a forbidden CORS preflight is left as a rejection.
pub fn routes(
    body_limit_bytes: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    // GET /health - liveness and service identity
    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| {
            warp::reply::json(&HealthResponse {
                status: "ok",
                info: SERVICE_INFO,
            })
        });

    // GET / - static form page
    let index_route = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    // POST /predict - validate, normalize, score
    let predict_route = warp::path("predict")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(body_limit_bytes))
        .and(warp::body::json())
        .map(handle_predict);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"])
        .allow_header("content-type");

    health_route
        .or(index_route)
        .or(predict_route)
        .recover(handle_rejection)
        .with(warp::trace::request())
        .with(cors)
}

fn handle_predict(payload: Value) -> warp::reply::Response {
    let span = crate::triage_span!(endpoint = "predict");
    let _guard = span.enter();

    match triage::predict(&payload) {
        Ok(prediction) => prediction_reply(&prediction),
        Err(e) => {
            warn!(issues = e.issues().len(), "Rejected triage request: {}", e);
            validation_reply(e.issues())
        }
    }
}

fn prediction_reply(prediction: &Prediction) -> warp::reply::Response {
    info!(label = %prediction.status, "Triage prediction");
    debug!(
        score = prediction.score,
        fever = prediction.input.fever,
        pain = prediction.input.pain,
        days = prediction.input.days,
        comorbidity = prediction.input.comorbidity,
        age = prediction.input.age,
        "Triage score"
    );
    warp::reply::json(prediction).into_response()
}

pub(crate) fn validation_reply(issues: &[crate::error::FieldIssue]) -> warp::reply::Response {
    warp::reply::with_status(
        warp::reply::json(&ValidationResponse { detail: issues }),
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .into_response()
}
