//! Handler for `GET /subscriptions/summary`.
//!
//! Query params map onto [`SubscriptionSummaryRequest`]: `user_id`,
//! `service_name`, `start_period`, `end_period`, all optional. Periods are
//! `MM-YYYY` tokens.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use subs_core::{
  store::SubscriptionStore,
  summary::{Summary, SummaryFilter, SubscriptionSummaryRequest},
};

use crate::error::{ApiError, ErrorResponse, store_error};

/// `GET /subscriptions/summary[?user_id=..][&service_name=..][&start_period=MM-YYYY][&end_period=MM-YYYY]`
#[utoipa::path(
  get,
  path = "/subscriptions/summary",
  operation_id = "summarize_subscriptions",
  params(SubscriptionSummaryRequest),
  responses(
    (status = 200, description = "Total cost and count of matching subscriptions", body = Summary),
    (status = 400, description = "Malformed user id or period", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse),
  ),
  tag = "subscriptions",
)]
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<SubscriptionSummaryRequest>, QueryRejection>,
) -> Result<Json<Summary>, ApiError>
where
  S: SubscriptionStore,
{
  let Query(params) = params?;
  let filter = SummaryFilter::try_from(params)?;
  let summary = store.summary(&filter).await.map_err(store_error)?;
  Ok(Json(summary))
}
