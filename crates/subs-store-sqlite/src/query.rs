//! Dynamic SQL for partial updates and filtered aggregates.
//!
//! Callers accumulate `(column, value)` assignments or predicate fragments
//! with their bound values; [`Statement`] rendering is the only place that
//! numbers `?N` placeholders. Column names are always `&'static str`, never
//! caller input.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use subs_core::{patch::SubscriptionPatch, summary::SummaryFilter};

use crate::encode::{encode_date, encode_dt, encode_month, encode_uuid};

/// Rendered SQL plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl Statement {
  fn new(sql: impl Into<String>) -> Self {
    Statement { sql: sql.into(), params: Vec::new() }
  }

  /// Bind `value` and return its placeholder.
  fn bind(&mut self, value: Value) -> String {
    self.params.push(value);
    format!("?{}", self.params.len())
  }
}

// ─── Assignments ─────────────────────────────────────────────────────────────

/// The SET list of an UPDATE.
#[derive(Debug, Default)]
pub struct Assignments {
  pairs: Vec<(&'static str, Value)>,
}

impl Assignments {
  pub fn set(&mut self, column: &'static str, value: Value) -> &mut Self {
    self.pairs.push((column, value));
    self
  }

  /// `UPDATE {table} SET a = ?1, b = ?2 WHERE {key_column} = ?3`.
  pub fn into_update(self, table: &str, key_column: &str, key: Value) -> Statement {
    let mut stmt = Statement::new(format!("UPDATE {table} SET "));
    let mut sets = Vec::with_capacity(self.pairs.len());
    for (column, value) in self.pairs {
      let ph = stmt.bind(value);
      sets.push(format!("{column} = {ph}"));
    }
    stmt.sql.push_str(&sets.join(", "));

    let ph = stmt.bind(key);
    stmt.sql.push_str(&format!(" WHERE {key_column} = {ph}"));
    stmt
  }
}

// ─── Predicates ──────────────────────────────────────────────────────────────

/// A conjunctive WHERE clause.
#[derive(Debug, Default)]
pub struct Predicates {
  /// Each fragment contains one `?` per value, in order.
  clauses: Vec<(&'static str, Vec<Value>)>,
}

impl Predicates {
  pub fn push(&mut self, fragment: &'static str, values: Vec<Value>) -> &mut Self {
    debug_assert_eq!(fragment.matches('?').count(), values.len());
    self.clauses.push((fragment, values));
    self
  }

  /// Append ` WHERE ... AND ...` to `base`, or nothing when empty.
  pub fn into_select(self, base: &str) -> Statement {
    let mut stmt = Statement::new(base);
    if self.clauses.is_empty() {
      return stmt;
    }

    let mut rendered = Vec::with_capacity(self.clauses.len());
    for (fragment, values) in self.clauses {
      let mut values = values.into_iter();
      let mut clause = String::with_capacity(fragment.len() + 4);
      for ch in fragment.chars() {
        if ch == '?'
          && let Some(value) = values.next()
        {
          clause.push_str(&stmt.bind(value));
          continue;
        }
        clause.push(ch);
      }
      rendered.push(clause);
    }

    stmt.sql.push_str(" WHERE ");
    stmt.sql.push_str(&rendered.join(" AND "));
    stmt
  }
}

// ─── Subscription queries ────────────────────────────────────────────────────

/// Assignments for a partial update. `updated_at` is always set; every other
/// column appears only when the patch supplies it.
pub fn patch_assignments(patch: SubscriptionPatch, now: DateTime<Utc>) -> Assignments {
  let mut assignments = Assignments::default();
  assignments.set("updated_at", Value::Text(encode_dt(now)));

  if let Some(name) = patch.service_name {
    assignments.set("service_name", Value::Text(name));
  }
  if let Some(price) = patch.price {
    assignments.set("price", Value::Integer(price));
  }
  if let Some(start) = patch.start_date {
    assignments.set("start_date", Value::Text(encode_month(start)));
  }
  if let Some(end) = patch.end_date {
    let value = end.map(encode_month).map_or(Value::Null, Value::Text);
    assignments.set("end_date", value);
  }
  assignments
}

/// Interval-overlap and equality predicates for a summary.
pub fn summary_predicates(filter: &SummaryFilter) -> Predicates {
  let mut preds = Predicates::default();

  if let Some(until) = filter.active_until {
    preds.push("start_date <= ?", vec![Value::Text(encode_date(until))]);
  }
  if let Some(from) = filter.active_from {
    preds.push("(end_date IS NULL OR end_date >= ?)", vec![Value::Text(encode_date(from))]);
  }
  if let Some(user_id) = filter.user_id {
    preds.push("user_id = ?", vec![Value::Text(encode_uuid(user_id))]);
  }
  if let Some(name) = &filter.service_name {
    preds.push("service_name = ?", vec![Value::Text(name.clone())]);
  }
  preds
}
