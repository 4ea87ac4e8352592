//! Handlers for `/subscriptions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subscriptions` | `?limit` (default 50, max 100) and `?offset` |
//! | `POST`   | `/subscriptions` | Body: [`CreateSubscriptionRequest`]; returns 201 |
//! | `GET`    | `/subscriptions/{id}` | 404 if not found |
//! | `PUT`    | `/subscriptions/{id}` | Body: [`UpdateSubscriptionRequest`]; partial |
//! | `DELETE` | `/subscriptions/{id}` | Hard delete |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use subs_core::{
  page::Page,
  patch::{SubscriptionPatch, UpdateSubscriptionRequest},
  store::SubscriptionStore,
  subscription::{CreateSubscriptionRequest, NewSubscription, Subscription},
};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{ApiError, ErrorResponse, store_error};

/// Acknowledgement returned by update and delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
  #[schema(example = "subscription updated successfully")]
  pub message: String,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("invalid subscription ID".to_owned()))
}

fn message(text: &str) -> Json<MessageResponse> {
  Json(MessageResponse { message: text.to_owned() })
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw text so that junk values fall back to defaults instead of failing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
  /// Page size; default 50, values outside 1..=100 fall back to 50.
  #[param(value_type = Option<i64>, example = 50)]
  pub limit:  Option<String>,
  /// Rows to skip; default 0.
  #[param(value_type = Option<i64>, example = 0)]
  pub offset: Option<String>,
}

impl ListParams {
  fn page(&self) -> Page {
    let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok());
    Page::clamped(parse(&self.limit), parse(&self.offset))
  }
}

/// `GET /subscriptions[?limit=<n>][&offset=<n>]`
#[utoipa::path(
  get,
  path = "/subscriptions",
  operation_id = "list_subscriptions",
  params(ListParams),
  responses(
    (status = 200, description = "Newest first", body = [Subscription]),
    (status = 500, description = "Storage failure", body = ErrorResponse),
  ),
  tag = "subscriptions",
)]
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Subscription>>, ApiError>
where
  S: SubscriptionStore,
{
  let page = params.map(|Query(p)| p).unwrap_or_default().page();
  let subscriptions = store.list(page).await.map_err(store_error)?;
  Ok(Json(subscriptions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /subscriptions`: returns 201 and the stored [`Subscription`].
#[utoipa::path(
  post,
  path = "/subscriptions",
  operation_id = "create_subscription",
  request_body = CreateSubscriptionRequest,
  responses(
    (status = 201, description = "Created", body = Subscription),
    (status = 400, description = "Malformed body, date or price", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse),
  ),
  tag = "subscriptions",
)]
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubscriptionStore,
{
  let Json(body) = body?;
  let input = NewSubscription::try_from(body)?;
  let subscription = store.create(input).await.map_err(store_error)?;
  tracing::info!(id = %subscription.id, "subscription created");
  Ok((StatusCode::CREATED, Json(subscription)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subscriptions/{id}`
#[utoipa::path(
  get,
  path = "/subscriptions/{id}",
  operation_id = "get_subscription",
  params(("id" = Uuid, Path, description = "Subscription id")),
  responses(
    (status = 200, description = "Found", body = Subscription),
    (status = 400, description = "Malformed id", body = ErrorResponse),
    (status = 404, description = "No such subscription", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse),
  ),
  tag = "subscriptions",
)]
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Subscription>, ApiError>
where
  S: SubscriptionStore,
{
  let id = parse_id(&id)?;
  let subscription = store.get(id).await.map_err(store_error)?;
  Ok(Json(subscription))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /subscriptions/{id}`: only the supplied fields change.
///
/// `"end_date": ""` clears the end date; omitting `end_date` leaves it alone.
/// Every field is validated before the store is touched.
#[utoipa::path(
  put,
  path = "/subscriptions/{id}",
  operation_id = "update_subscription",
  params(("id" = Uuid, Path, description = "Subscription id")),
  request_body = UpdateSubscriptionRequest,
  responses(
    (status = 200, description = "Updated", body = MessageResponse),
    (status = 400, description = "Malformed id, body, date or price", body = ErrorResponse),
    (status = 404, description = "No such subscription", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse),
  ),
  tag = "subscriptions",
)]
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  body: Result<Json<UpdateSubscriptionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError>
where
  S: SubscriptionStore,
{
  let id = parse_id(&id)?;
  let Json(body) = body?;
  let patch = SubscriptionPatch::try_from(body)?;
  store.update(id, patch).await.map_err(store_error)?;
  tracing::info!(%id, "subscription updated");
  Ok(message("subscription updated successfully"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /subscriptions/{id}`
#[utoipa::path(
  delete,
  path = "/subscriptions/{id}",
  operation_id = "delete_subscription",
  params(("id" = Uuid, Path, description = "Subscription id")),
  responses(
    (status = 200, description = "Deleted", body = MessageResponse),
    (status = 400, description = "Malformed id", body = ErrorResponse),
    (status = 404, description = "No such subscription", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse),
  ),
  tag = "subscriptions",
)]
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError>
where
  S: SubscriptionStore,
{
  let id = parse_id(&id)?;
  store.delete(id).await.map_err(store_error)?;
  tracing::info!(%id, "subscription deleted");
  Ok(message("subscription deleted successfully"))
}
