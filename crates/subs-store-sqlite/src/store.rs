//! [`SqliteStore`] — the SQLite implementation of [`SubscriptionStore`].
//!
//! Behavioural policy:
//! - Rows carry `created_at` and `updated_at`; every successful update bumps
//!   `updated_at`, including one with an empty patch.
//! - Listing is newest first by `created_at`, ties broken by insertion order,
//!   so pagination is stable.
//! - A summary without period bounds covers all time; an inverted period
//!   returns an empty summary without touching the database.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use rusqlite::types::Value;
use uuid::Uuid;

use subs_core::{
  page::Page,
  patch::SubscriptionPatch,
  store::SubscriptionStore,
  subscription::{NewSubscription, Subscription},
  summary::{Summary, SummaryFilter},
};

use crate::{
  encode::{RawSubscription, SUBSCRIPTION_COLUMNS, encode_uuid},
  query::{patch_assignments, summary_predicates},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A subscription store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SubscriptionStore impl ──────────────────────────────────────────────────

impl SubscriptionStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewSubscription) -> Result<Subscription> {
    let now = Utc::now();
    let subscription = Subscription {
      id:           Uuid::new_v4(),
      service_name: input.service_name,
      price:        input.price,
      user_id:      input.user_id,
      start_date:   input.start_date,
      end_date:     input.end_date,
      created_at:   now,
      updated_at:   now,
    };

    let raw = RawSubscription::encode(&subscription);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subscriptions (
             id, service_name, price, user_id,
             start_date, end_date, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            raw.id,
            raw.service_name,
            raw.price,
            raw.user_id,
            raw.start_date,
            raw.end_date,
            raw.created_at,
            raw.updated_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %subscription.id, user_id = %subscription.user_id, "subscription created");
    Ok(subscription)
  }

  async fn get(&self, id: Uuid) -> Result<Subscription> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubscription> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = ?1"),
            rusqlite::params![id_str],
            RawSubscription::from_row,
          )
          .optional()?)
      })
      .await?;

    raw
      .ok_or(Error::NotFound(id))?
      .into_subscription()
  }

  async fn update(&self, id: Uuid, patch: SubscriptionPatch) -> Result<()> {
    if patch.is_empty() {
      tracing::debug!(%id, "empty patch; only updated_at changes");
    }
    let stmt = patch_assignments(patch, Utc::now())
      .into_update("subscriptions", "id", Value::Text(encode_uuid(id)));

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(&stmt.sql, rusqlite::params_from_iter(stmt.params))?)
      })
      .await?;

    tracing::debug!(%id, affected, "subscription update");
    if affected == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM subscriptions WHERE id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    tracing::debug!(%id, affected, "subscription delete");
    if affected == 0 {
      return Err(Error::NotFound(id));
    }
    Ok(())
  }

  async fn list(&self, page: Page) -> Result<Vec<Subscription>> {
    let limit  = i64::from(page.limit);
    let offset = i64::try_from(page.offset).unwrap_or(i64::MAX);

    let raws: Vec<RawSubscription> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions
           ORDER BY created_at DESC, rowid DESC
           LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], RawSubscription::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubscription::into_subscription).collect()
  }

  async fn summary(&self, filter: &SummaryFilter) -> Result<Summary> {
    if filter.is_empty_range() {
      return Ok(Summary::default());
    }

    let stmt = summary_predicates(filter)
      .into_select("SELECT COALESCE(SUM(price), 0), COUNT(*) FROM subscriptions");

    let summary = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &stmt.sql,
          rusqlite::params_from_iter(stmt.params),
          |row| {
            Ok(Summary {
              total_cost: row.get(0)?,
              count:      row.get(1)?,
            })
          },
        )?)
      })
      .await?;

    tracing::debug!(total_cost = summary.total_cost, count = summary.count, "summary computed");
    Ok(summary)
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
