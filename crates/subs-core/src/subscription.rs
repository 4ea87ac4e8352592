//! The subscription record and its creation input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{Error, Result, month::Month};

/// Largest accepted price. Keeps any summary total well inside `i64`.
pub const MAX_PRICE: i64 = i32::MAX as i64;

/// A billing record tying a user to a paid service over a span of months.
///
/// The active interval is `[start_date, end_date]`, open-ended when
/// `end_date` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subscription {
  pub id:           Uuid,
  pub service_name: String,
  /// Minor currency units, in `1..=MAX_PRICE`.
  pub price:        i64,
  pub user_id:      Uuid,
  #[schema(value_type = String, example = "07-2025")]
  pub start_date:   Month,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[schema(value_type = Option<String>, example = "12-2025")]
  pub end_date:     Option<Month>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Validated input for [`SubscriptionStore::create`](crate::store::SubscriptionStore::create).
///
/// The store assigns `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
  pub service_name: String,
  pub price:        i64,
  pub user_id:      Uuid,
  pub start_date:   Month,
  pub end_date:     Option<Month>,
}

/// JSON body accepted by `POST /subscriptions`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSubscriptionRequest {
  pub service_name: String,
  pub price:        i64,
  pub user_id:      Uuid,
  /// `MM-YYYY`.
  #[schema(example = "07-2025")]
  pub start_date:   String,
  /// `MM-YYYY`; absent, `null` or `""` means open-ended.
  #[serde(default)]
  #[schema(example = "12-2025")]
  pub end_date:     Option<String>,
}

impl TryFrom<CreateSubscriptionRequest> for NewSubscription {
  type Error = Error;

  fn try_from(req: CreateSubscriptionRequest) -> Result<Self> {
    let service_name = validate_service_name(req.service_name)?;
    let price = validate_price(req.price)?;
    let start_date = Month::parse_field("start_date", &req.start_date)?;
    let end_date = req
      .end_date
      .filter(|s| !s.is_empty())
      .map(|s| Month::parse_field("end_date", &s))
      .transpose()?;

    Ok(NewSubscription {
      service_name,
      price,
      user_id: req.user_id,
      start_date,
      end_date,
    })
  }
}

pub(crate) fn validate_service_name(name: String) -> Result<String> {
  if name.trim().is_empty() {
    return Err(Error::invalid("service_name must not be empty"));
  }
  Ok(name)
}

pub(crate) fn validate_price(price: i64) -> Result<i64> {
  if !(1..=MAX_PRICE).contains(&price) {
    return Err(Error::invalid(format!(
      "price must be an integer between 1 and {MAX_PRICE}, got {price}"
    )));
  }
  Ok(price)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request() -> CreateSubscriptionRequest {
    CreateSubscriptionRequest {
      service_name: "Yandex Plus".into(),
      price:        400,
      user_id:      Uuid::new_v4(),
      start_date:   "07-2025".into(),
      end_date:     None,
    }
  }

  #[test]
  fn valid_request_becomes_new_subscription() {
    let req = request();
    let user_id = req.user_id;
    let new = NewSubscription::try_from(req).unwrap();
    assert_eq!(new.service_name, "Yandex Plus");
    assert_eq!(new.price, 400);
    assert_eq!(new.user_id, user_id);
    assert_eq!(new.start_date, Month::new(2025, 7).unwrap());
    assert_eq!(new.end_date, None);
  }

  #[test]
  fn end_date_is_parsed_when_present() {
    let mut req = request();
    req.end_date = Some("12-2025".into());
    let new = NewSubscription::try_from(req).unwrap();
    assert_eq!(new.end_date, Month::new(2025, 12));
  }

  #[test]
  fn empty_end_date_means_open_ended() {
    let mut req = request();
    req.end_date = Some(String::new());
    let new = NewSubscription::try_from(req).unwrap();
    assert_eq!(new.end_date, None);
  }

  #[test]
  fn malformed_dates_are_invalid_input() {
    for bad in ["13-2024", "2024-01"] {
      let mut req = request();
      req.start_date = bad.into();
      assert!(matches!(NewSubscription::try_from(req), Err(Error::InvalidInput(_))));

      let mut req = request();
      req.end_date = Some(bad.into());
      assert!(matches!(NewSubscription::try_from(req), Err(Error::InvalidInput(_))));
    }
  }

  #[test]
  fn non_positive_price_is_rejected() {
    for price in [0, -5] {
      let mut req = request();
      req.price = price;
      assert!(matches!(NewSubscription::try_from(req), Err(Error::InvalidInput(_))));
    }
  }

  #[test]
  fn price_above_cap_is_rejected() {
    let mut req = request();
    req.price = MAX_PRICE;
    assert_eq!(NewSubscription::try_from(req).unwrap().price, MAX_PRICE);

    let mut req = request();
    req.price = MAX_PRICE + 1;
    assert!(matches!(NewSubscription::try_from(req), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn blank_service_name_is_rejected() {
    let mut req = request();
    req.service_name = "   ".into();
    assert!(matches!(NewSubscription::try_from(req), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn subscription_serialises_dates_as_tokens() {
    let now = Utc::now();
    let sub = Subscription {
      id:           Uuid::new_v4(),
      service_name: "Netflix".into(),
      price:        999,
      user_id:      Uuid::new_v4(),
      start_date:   Month::new(2024, 1).unwrap(),
      end_date:     None,
      created_at:   now,
      updated_at:   now,
    };
    let json = serde_json::to_value(&sub).unwrap();
    assert_eq!(json["start_date"], "01-2024");
    assert!(json.get("end_date").is_none());
    assert_eq!(json["price"], 999);
  }
}
