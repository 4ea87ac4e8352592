//! OpenAPI description of the API, served through Swagger UI.

use axum::Router;
use subs_core::{
  patch::UpdateSubscriptionRequest,
  subscription::{CreateSubscriptionRequest, Subscription},
  summary::Summary,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{error::ErrorResponse, health::HealthResponse, subscriptions::MessageResponse};

/// Where Swagger UI is mounted.
pub const SWAGGER_PATH: &str = "/swagger";

/// Where the generated OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/swagger/doc.json";

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Subscription Service API",
    version = "1.0.0",
    description = "REST API for recording online subscriptions and summarising their cost"
  ),
  servers((url = "/api/v1")),
  paths(
    crate::subscriptions::list,
    crate::subscriptions::create,
    crate::subscriptions::get_one,
    crate::subscriptions::update,
    crate::subscriptions::delete_one,
    crate::summary::handler,
    crate::health::handler,
  ),
  components(schemas(
    Subscription,
    CreateSubscriptionRequest,
    UpdateSubscriptionRequest,
    Summary,
    MessageResponse,
    ErrorResponse,
    HealthResponse,
  )),
  tags(
    (name = "subscriptions", description = "Subscription records and cost summaries"),
    (name = "health", description = "Liveness check"),
  )
)]
pub struct ApiDoc;

/// Swagger UI plus the raw document. Mount at the root, outside the API
/// prefix; the document's `servers` entry points back at `/api/v1`.
pub fn docs_router() -> Router {
  Router::new().merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
