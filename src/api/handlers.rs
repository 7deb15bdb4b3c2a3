//! Request handlers for the API endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::{error, info, warn};

use super::AppState;
use super::types::ErrorResponse;
use crate::dispatch::TracingObserver;
use crate::error::DispatchError;
use crate::fleet::DispatchRequest;
use crate::payload::{PlanItem, ProductionPlanPayload, plan_items};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Computes the production plan for the posted payload.
///
/// `POST /productionplan` → 200 + `Vec<PlanItem>` JSON
/// malformed body, invalid input, or uncoverable load → 400 + `ErrorResponse`
pub async fn post_production_plan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProductionPlanPayload>, JsonRejection>,
) -> Result<Json<Vec<PlanItem>>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Rejected payload");
        bad_request(rejection.body_text())
    })?;

    let started = Instant::now();
    info!(load_mw = payload.load, "Starting calculation");

    let request = DispatchRequest::from(payload);
    let plan = state
        .dispatcher
        .plan(&request, &mut TracingObserver)
        .map_err(|err| {
            match &err {
                DispatchError::InfeasibleDemand { unmet_mw } => {
                    error!(missing_mw = unmet_mw, "Could not cover the load");
                }
                DispatchError::InvalidInput { field, message } => {
                    warn!(%field, %message, "Invalid request");
                }
            }
            bad_request(err.to_string())
        })?;

    info!(
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Production plan calculated"
    );
    Ok(Json(plan_items(&plan)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/productionplan")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(body: &str) -> (StatusCode, serde_json::Value) {
        let app = router(Arc::new(AppState::default()));
        let resp = app.oneshot(post(body)).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn plan_returns_200() {
        let (status, json) = send(
            r#"{"load": 500, "fuels": {"gas": 10, "kerosine": 50, "co2": 0, "wind": 0},
                "powerplants": [{"name": "gas", "type": "gasfired",
                                 "efficiency": 0.5, "pmin": 0, "pmax": 600}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([{"name": "gas", "p": 500.0}]));
    }

    #[tokio::test]
    async fn infeasible_load_returns_400() {
        let (status, json) = send(
            r#"{"load": 10, "fuels": {"gas": 10, "kerosine": 50, "co2": 0, "wind": 0},
                "powerplants": [{"name": "gas", "type": "gasfired",
                                 "efficiency": 0.5, "pmin": 20, "pmax": 100}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"],
            "Unable to meet load demand with available plants. Missing: 10.0 MW"
        );
    }

    #[tokio::test]
    async fn non_positive_load_returns_400() {
        let (status, json) = send(
            r#"{"load": 0, "fuels": {"gas": 10, "kerosine": 50, "co2": 0, "wind": 0},
                "powerplants": []}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("load"));
    }

    #[tokio::test]
    async fn malformed_body_returns_400() {
        let (status, json) = send(r#"{"load": 10, "fuels": {}}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
