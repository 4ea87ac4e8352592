//! Cost summaries over a period.
//!
//! A subscription counts towards a period when its active interval overlaps
//! it: `start_date <= last day of end_period` and `end_date` is null or
//! `>= first day of start_period`. Either bound may be omitted, and with
//! neither the summary covers all time. An end period earlier than the start
//! period selects nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{Error, Result, month::Month};

/// Query parameters accepted by `GET /subscriptions/summary`.
///
/// Everything arrives as text so that malformed values surface as
/// [`Error::InvalidInput`] rather than an extractor rejection. Empty strings
/// count as absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscriptionSummaryRequest {
  /// Only subscriptions owned by this user.
  #[param(value_type = Option<Uuid>)]
  pub user_id:      Option<String>,
  /// Exact service name.
  pub service_name: Option<String>,
  /// `MM-YYYY`, inclusive.
  #[param(example = "01-2024")]
  pub start_period: Option<String>,
  /// `MM-YYYY`, inclusive through the last day of the month.
  #[param(example = "12-2024")]
  pub end_period:   Option<String>,
}

/// Validated filter for [`SubscriptionStore::summary`](crate::store::SubscriptionStore::summary).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
  pub user_id:      Option<Uuid>,
  pub service_name: Option<String>,
  /// First day of the start period. Matches rows whose `end_date` is null or
  /// not earlier than this.
  pub active_from:  Option<NaiveDate>,
  /// Last day of the end period. Matches rows whose `start_date` is not
  /// later than this.
  pub active_until: Option<NaiveDate>,
}

impl SummaryFilter {
  /// True when the period is inverted, so no subscription can match.
  pub fn is_empty_range(&self) -> bool {
    matches!((self.active_from, self.active_until), (Some(from), Some(until)) if from > until)
  }
}

impl TryFrom<SubscriptionSummaryRequest> for SummaryFilter {
  type Error = Error;

  fn try_from(req: SubscriptionSummaryRequest) -> Result<Self> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

    let user_id = non_empty(req.user_id)
      .map(|s| {
        Uuid::parse_str(&s).map_err(|_| Error::invalid(format!("invalid user_id: {s:?}")))
      })
      .transpose()?;
    let active_from = non_empty(req.start_period)
      .map(|s| Month::parse_field("start_period", &s))
      .transpose()?
      .map(Month::first_day);
    let active_until = non_empty(req.end_period)
      .map(|s| Month::parse_field("end_period", &s))
      .transpose()?
      .map(Month::last_day);

    Ok(SummaryFilter {
      user_id,
      service_name: non_empty(req.service_name),
      active_from,
      active_until,
    })
  }
}

/// Aggregate cost of the subscriptions matching a [`SummaryFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Summary {
  pub total_cost: i64,
  pub count:      i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request(start: Option<&str>, end: Option<&str>) -> SubscriptionSummaryRequest {
    SubscriptionSummaryRequest {
      start_period: start.map(str::to_owned),
      end_period: end.map(str::to_owned),
      ..Default::default()
    }
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn end_period_extends_to_last_day_of_month() {
    let filter = SummaryFilter::try_from(request(Some("01-2024"), Some("02-2024"))).unwrap();
    assert_eq!(filter.active_from, Some(date(2024, 1, 1)));
    assert_eq!(filter.active_until, Some(date(2024, 2, 29)));
    assert!(!filter.is_empty_range());
  }

  #[test]
  fn missing_periods_mean_all_time() {
    let filter = SummaryFilter::try_from(request(None, None)).unwrap();
    assert_eq!(filter, SummaryFilter::default());
  }

  #[test]
  fn empty_strings_are_absent() {
    let req = SubscriptionSummaryRequest {
      user_id:      Some(String::new()),
      service_name: Some(String::new()),
      start_period: Some(String::new()),
      end_period:   Some(String::new()),
    };
    assert_eq!(SummaryFilter::try_from(req).unwrap(), SummaryFilter::default());
  }

  #[test]
  fn inverted_period_is_an_empty_range() {
    let filter = SummaryFilter::try_from(request(Some("01-2024"), Some("12-2023"))).unwrap();
    assert!(filter.is_empty_range());
  }

  #[test]
  fn same_month_is_not_empty() {
    let filter = SummaryFilter::try_from(request(Some("06-2024"), Some("06-2024"))).unwrap();
    assert!(!filter.is_empty_range());
  }

  #[test]
  fn malformed_periods_are_invalid_input() {
    for bad in ["13-2024", "2024-01"] {
      let err = SummaryFilter::try_from(request(Some(bad), Some("01-2025"))).unwrap_err();
      assert!(matches!(err, Error::InvalidInput(_)));
      let err = SummaryFilter::try_from(request(Some("01-2024"), Some(bad))).unwrap_err();
      assert!(matches!(err, Error::InvalidInput(_)));
    }
  }

  #[test]
  fn user_and_service_filters_pass_through() {
    let user_id = Uuid::new_v4();
    let req = SubscriptionSummaryRequest {
      user_id: Some(user_id.to_string()),
      service_name: Some("Spotify".into()),
      ..Default::default()
    };
    let filter = SummaryFilter::try_from(req).unwrap();
    assert_eq!(filter.user_id, Some(user_id));
    assert_eq!(filter.service_name.as_deref(), Some("Spotify"));
  }

  #[test]
  fn malformed_user_id_is_invalid_input() {
    let req = SubscriptionSummaryRequest {
      user_id: Some("not-a-uuid".into()),
      ..Default::default()
    };
    assert!(matches!(SummaryFilter::try_from(req), Err(Error::InvalidInput(_))));
  }
}
