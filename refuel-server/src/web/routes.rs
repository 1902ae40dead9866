//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::DomainError;
use crate::planner::{PlanError, Planner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations/brands", get(list_brands))
        .route("/route/plan", post(plan_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Brands present in the station dataset, for the company filter.
async fn list_brands(State(state): State<AppState>) -> Json<BrandsResponse> {
    Json(BrandsResponse {
        brands: state.stations.brands().await,
    })
}

/// Plan refuelling stops along a drive.
async fn plan_route(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let request = req.into_plan_request()?;
    let stations = state.stations.snapshot().await;

    let planner = Planner::new(
        state.geocoder.as_ref(),
        state.router.as_ref(),
        &state.companies,
        &state.config,
    );
    let outcome = planner.plan(&request, &stations).await?;

    Ok(Json(PlanRouteResponse::from_outcome(outcome)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    GatewayTimeout { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::InsufficientRange { .. } | PlanError::InvalidAddress(_) => {
                AppError::BadRequest { message }
            }
            PlanError::Geocode(_) => AppError::NotFound { message },
            PlanError::Route(_)
            | PlanError::Provider(_)
            | PlanError::AllCandidatesFailed { .. } => AppError::BadGateway { message },
            PlanError::Timeout => AppError::GatewayTimeout { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::GatewayTimeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
