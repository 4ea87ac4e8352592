//! The `SubscriptionStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `subs-store-sqlite`).
//! The HTTP layer (`subs-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  page::Page,
  patch::SubscriptionPatch,
  subscription::{NewSubscription, Subscription},
  summary::{Summary, SummaryFilter},
};

/// Abstraction over a subscription store backend.
///
/// Every mutation is a single statement against a single row; backends rely
/// on their engine's statement atomicity and take no locks of their own.
///
/// Backend errors must convert into [`crate::Error`] so callers can tell a
/// missing row from an I/O failure without inspecting messages.
pub trait SubscriptionStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Persist a new subscription. The store assigns the id and both
  /// timestamps.
  fn create(
    &self,
    input: NewSubscription,
  ) -> impl Future<Output = Result<Subscription, Self::Error>> + Send + '_;

  /// Fetch a subscription by id. Fails with a not-found error when no row
  /// matches.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Subscription, Self::Error>> + Send + '_;

  /// Apply the supplied fields of `patch` and bump `updated_at`. Fails with a
  /// not-found error when no row matches.
  fn update(
    &self,
    id: Uuid,
    patch: SubscriptionPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Hard-delete a subscription. Fails with a not-found error when no row
  /// matches.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Newest first, by creation time.
  fn list(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  /// Sum prices and count rows matching `filter`.
  fn summary<'a>(
    &'a self,
    filter: &'a SummaryFilter,
  ) -> impl Future<Output = Result<Summary, Self::Error>> + Send + 'a;

  /// Cheap round-trip to check the backend is reachable.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
