//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD` and timestamps as fixed-width
//! RFC 3339 UTC strings, so lexicographic comparison in SQL matches
//! chronological order. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use subs_core::{month::Month, subscription::Subscription};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Calendar dates ──────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn encode_month(m: Month) -> String { encode_date(m.first_day()) }

pub fn decode_month(s: &str) -> Result<Month> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map(Month::containing)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every SELECT that yields a [`RawSubscription`].
pub const SUBSCRIPTION_COLUMNS: &str =
  "id, service_name, price, user_id, start_date, end_date, created_at, updated_at";

/// Raw values read directly from a `subscriptions` row.
pub struct RawSubscription {
  pub id:           String,
  pub service_name: String,
  pub price:        i64,
  pub user_id:      String,
  pub start_date:   String,
  pub end_date:     Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawSubscription {
  /// Read a row selected with [`SUBSCRIPTION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawSubscription {
      id:           row.get(0)?,
      service_name: row.get(1)?,
      price:        row.get(2)?,
      user_id:      row.get(3)?,
      start_date:   row.get(4)?,
      end_date:     row.get(5)?,
      created_at:   row.get(6)?,
      updated_at:   row.get(7)?,
    })
  }

  pub fn encode(sub: &Subscription) -> Self {
    RawSubscription {
      id:           encode_uuid(sub.id),
      service_name: sub.service_name.clone(),
      price:        sub.price,
      user_id:      encode_uuid(sub.user_id),
      start_date:   encode_month(sub.start_date),
      end_date:     sub.end_date.map(encode_month),
      created_at:   encode_dt(sub.created_at),
      updated_at:   encode_dt(sub.updated_at),
    }
  }

  pub fn into_subscription(self) -> Result<Subscription> {
    Ok(Subscription {
      id:           decode_uuid(&self.id)?,
      service_name: self.service_name,
      price:        self.price,
      user_id:      decode_uuid(&self.user_id)?,
      start_date:   decode_month(&self.start_date)?,
      end_date:     self.end_date.as_deref().map(decode_month).transpose()?,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}
