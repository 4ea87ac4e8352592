//! Calendar months and the `MM-YYYY` period token.
//!
//! Subscriptions are billed at month granularity. A [`Month`] is stored as the
//! first day of that month; the token form (`"03-2024"`) is the only date
//! format exposed to API callers, on input and on output.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

use crate::{Error, Result};

/// The token did not match `MM-YYYY` or named a month outside `01`–`12`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected MM-YYYY, got {0:?}")]
pub struct ParseMonthError(String);

/// A calendar month, represented by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
  /// Returns `None` when `month` is not in `1..=12` or the year is outside
  /// chrono's range.
  pub fn new(year: i32, month: u32) -> Option<Self> {
    NaiveDate::from_ymd_opt(year, month, 1).map(Self)
  }

  /// The month containing `date`; the day is truncated to the 1st.
  pub fn containing(date: NaiveDate) -> Self {
    Self(date - Days::new(u64::from(date.day0())))
  }

  pub fn year(self) -> i32 { self.0.year() }

  pub fn month(self) -> u32 { self.0.month() }

  pub fn first_day(self) -> NaiveDate { self.0 }

  /// The last calendar day of the month; the inclusive upper bound of a
  /// period ending in this month.
  pub fn last_day(self) -> NaiveDate {
    self
      .0
      .checked_add_months(Months::new(1))
      .and_then(|next| next.pred_opt())
      .unwrap_or(NaiveDate::MAX)
  }

  /// Parse a user-supplied token, naming `field` in the error message.
  pub fn parse_field(field: &str, token: &str) -> Result<Self> {
    token
      .parse()
      .map_err(|e: ParseMonthError| Error::invalid(format!("invalid {field} format: {e}")))
  }
}

impl FromStr for Month {
  type Err = ParseMonthError;

  /// Accepts exactly two month digits, a hyphen, and four year digits.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ParseMonthError(s.to_owned());

    let (mm, yyyy) = s.split_once('-').ok_or_else(invalid)?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if mm.len() != 2 || yyyy.len() != 4 || !all_digits(mm) || !all_digits(yyyy) {
      return Err(invalid());
    }

    let month: u32 = mm.parse().map_err(|_| invalid())?;
    let year: i32 = yyyy.parse().map_err(|_| invalid())?;
    Self::new(year, month).ok_or_else(invalid)
  }
}

impl fmt::Display for Month {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}-{:04}", self.month(), self.year())
  }
}

impl Serialize for Month {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Month {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let token = String::deserialize(deserializer)?;
    token.parse().map_err(de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn month(token: &str) -> Month { token.parse().unwrap() }

  #[test]
  fn parses_two_digit_month_and_four_digit_year() {
    let m = month("03-2024");
    assert_eq!(m.month(), 3);
    assert_eq!(m.year(), 2024);
    assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
  }

  #[test]
  fn rejects_malformed_tokens() {
    for token in ["13-2024", "00-2024", "2024-01", "1-2024", "01-24", "01/2024", "", "ab-cdef", "01-2024-01"] {
      assert!(token.parse::<Month>().is_err(), "accepted {token:?}");
    }
  }

  #[test]
  fn display_round_trips_token() {
    assert_eq!(month("07-2031").to_string(), "07-2031");
  }

  #[test]
  fn last_day_handles_month_lengths() {
    let last = |t: &str| month(t).last_day();
    assert_eq!(last("01-2024"), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    assert_eq!(last("04-2024"), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    assert_eq!(last("02-2024"), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(last("02-2023"), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    assert_eq!(last("02-1900"), NaiveDate::from_ymd_opt(1900, 2, 28).unwrap());
    assert_eq!(last("02-2000"), NaiveDate::from_ymd_opt(2000, 2, 29).unwrap());
    assert_eq!(last("12-2023"), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
  }

  #[test]
  fn last_day_of_final_representable_month() {
    assert_eq!(month("12-9999").last_day(), NaiveDate::from_ymd_opt(9999, 12, 31).unwrap());
  }

  #[test]
  fn containing_truncates_to_first_of_month() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
    assert_eq!(Month::containing(date), month("05-2024"));
  }

  #[test]
  fn parse_field_names_the_field() {
    let err = Month::parse_field("start_date", "2024-01").unwrap_err();
    match err {
      Error::InvalidInput(msg) => assert!(msg.contains("start_date"), "{msg}"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn serde_uses_token_form() {
    let json = serde_json::to_string(&month("11-2025")).unwrap();
    assert_eq!(json, "\"11-2025\"");

    let back: Month = serde_json::from_str(&json).unwrap();
    assert_eq!(back, month("11-2025"));

    assert!(serde_json::from_str::<Month>("\"2025-11\"").is_err());
  }
}
