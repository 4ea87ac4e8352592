//! Partial updates.
//!
//! Only the fields present in an [`UpdateSubscriptionRequest`] are touched.
//! `end_date` has three states on the wire: absent (or `null`) leaves it
//! alone, `""` clears it to open-ended, and a token sets it. The whole request
//! is validated before a [`SubscriptionPatch`] exists, so a bad field can
//! never leave a half-applied update behind.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
  Error, Result,
  month::Month,
  subscription::{validate_price, validate_service_name},
};

/// JSON body accepted by `PUT /subscriptions/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSubscriptionRequest {
  pub service_name: Option<String>,
  pub price:        Option<i64>,
  /// `MM-YYYY`.
  #[schema(example = "08-2025")]
  pub start_date:   Option<String>,
  /// `MM-YYYY`, or `""` to make the subscription open-ended.
  #[schema(example = "")]
  pub end_date:     Option<String>,
}

/// A validated field-set for [`SubscriptionStore::update`](crate::store::SubscriptionStore::update).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPatch {
  pub service_name: Option<String>,
  pub price:        Option<i64>,
  pub start_date:   Option<Month>,
  /// `None`: leave unchanged. `Some(None)`: clear to open-ended.
  /// `Some(Some(m))`: set to `m`.
  pub end_date:     Option<Option<Month>>,
}

impl SubscriptionPatch {
  /// True when no field would change. The store still bumps `updated_at`.
  pub fn is_empty(&self) -> bool {
    self.service_name.is_none()
      && self.price.is_none()
      && self.start_date.is_none()
      && self.end_date.is_none()
  }
}

impl TryFrom<UpdateSubscriptionRequest> for SubscriptionPatch {
  type Error = Error;

  fn try_from(req: UpdateSubscriptionRequest) -> Result<Self> {
    let service_name = req.service_name.map(validate_service_name).transpose()?;
    let price = req.price.map(validate_price).transpose()?;
    let start_date = req
      .start_date
      .map(|s| Month::parse_field("start_date", &s))
      .transpose()?;
    let end_date = match req.end_date.as_deref() {
      None => None,
      Some("") => Some(None),
      Some(token) => Some(Some(Month::parse_field("end_date", token)?)),
    };

    Ok(SubscriptionPatch { service_name, price, start_date, end_date })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn patch_from_json(json: &str) -> Result<SubscriptionPatch> {
    let req: UpdateSubscriptionRequest = serde_json::from_str(json).unwrap();
    SubscriptionPatch::try_from(req)
  }

  #[test]
  fn price_only_touches_price() {
    let patch = patch_from_json(r#"{"price": 500}"#).unwrap();
    assert_eq!(patch, SubscriptionPatch { price: Some(500), ..Default::default() });
  }

  #[test]
  fn empty_end_date_clears_while_absent_leaves_alone() {
    let cleared = patch_from_json(r#"{"end_date": ""}"#).unwrap();
    assert_eq!(cleared.end_date, Some(None));

    let untouched = patch_from_json(r#"{"price": 1}"#).unwrap();
    assert_eq!(untouched.end_date, None);

    let null = patch_from_json(r#"{"end_date": null}"#).unwrap();
    assert_eq!(null.end_date, None);
  }

  #[test]
  fn end_date_token_sets_month() {
    let patch = patch_from_json(r#"{"end_date": "09-2026"}"#).unwrap();
    assert_eq!(patch.end_date, Some(Month::new(2026, 9)));
  }

  #[test]
  fn any_bad_field_rejects_the_whole_patch() {
    let err = patch_from_json(r#"{"price": 700, "start_date": "2024-01"}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = patch_from_json(r#"{"service_name": "ok", "end_date": "13-2024"}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = patch_from_json(r#"{"price": 0}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = patch_from_json(r#"{"price": 2147483648}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
  }

  #[test]
  fn empty_body_is_an_empty_patch() {
    assert!(patch_from_json("{}").unwrap().is_empty());
  }
}
