//! `GET /health`: liveness plus a storage round-trip.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use subs_core::store::SubscriptionStore;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
  /// `ok` or `unavailable`.
  #[schema(example = "ok")]
  pub status: String,
}

fn status(text: &str) -> Json<HealthResponse> {
  Json(HealthResponse { status: text.to_owned() })
}

#[utoipa::path(
  get,
  path = "/health",
  operation_id = "health",
  responses(
    (status = 200, description = "Service and storage reachable", body = HealthResponse),
    (status = 503, description = "Storage unreachable", body = HealthResponse),
  ),
  tag = "health",
)]
pub async fn handler<S>(State(store): State<Arc<S>>) -> (StatusCode, Json<HealthResponse>)
where
  S: SubscriptionStore,
{
  match store.ping().await {
    Ok(()) => (StatusCode::OK, status("ok")),
    Err(e) => {
      tracing::error!(error = %e, "health check failed");
      (StatusCode::SERVICE_UNAVAILABLE, status("unavailable"))
    }
  }
}
