//! JSON REST API for the subscription ledger.
//!
//! Exposes an axum [`Router`] backed by any
//! [`subs_core::store::SubscriptionStore`]. Handlers validate input through
//! the `subs-core` request types before the store sees it, and map the core
//! error kinds onto 400/404/500. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", subs_api::api_router(store.clone()))
//! .merge(subs_api::docs::docs_router())
//! ```
//!
//! [`docs::docs_router`] serves Swagger UI for [`docs::ApiDoc`].

pub mod docs;
pub mod error;
pub mod health;
pub mod subscriptions;
pub mod summary;

use std::sync::Arc;

use axum::{Router, routing::get};
use subs_core::store::SubscriptionStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SubscriptionStore + 'static,
{
  Router::new()
    .route(
      "/subscriptions",
      get(subscriptions::list::<S>).post(subscriptions::create::<S>),
    )
    // Static segment; matched ahead of `{id}`.
    .route("/subscriptions/summary", get(summary::handler::<S>))
    .route(
      "/subscriptions/{id}",
      get(subscriptions::get_one::<S>)
        .put(subscriptions::update::<S>)
        .delete(subscriptions::delete_one::<S>),
    )
    .route("/health", get(health::handler::<S>))
    .with_state(store)
}
