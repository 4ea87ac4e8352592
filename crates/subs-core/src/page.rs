//! Pagination for [`SubscriptionStore::list`](crate::store::SubscriptionStore::list).

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 100;

/// A window into the newest-first listing. Out-of-range inputs are clamped to
/// defaults, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  u32,
  pub offset: u64,
}

impl Page {
  /// `limit` falls back to [`DEFAULT_LIMIT`] when absent, non-positive, or
  /// above [`MAX_LIMIT`]; `offset` falls back to 0 when absent or negative.
  pub fn clamped(limit: Option<i64>, offset: Option<i64>) -> Self {
    let limit = limit
      .filter(|&l| l > 0 && l <= i64::from(MAX_LIMIT))
      .and_then(|l| u32::try_from(l).ok())
      .unwrap_or(DEFAULT_LIMIT);
    let offset = offset.and_then(|o| u64::try_from(o).ok()).unwrap_or(0);
    Page { limit, offset }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_when_absent() {
    assert_eq!(Page::clamped(None, None), Page { limit: 50, offset: 0 });
  }

  #[test]
  fn limit_out_of_range_falls_back_to_default() {
    assert_eq!(Page::clamped(Some(0), None).limit, 50);
    assert_eq!(Page::clamped(Some(-3), None).limit, 50);
    assert_eq!(Page::clamped(Some(101), None).limit, 50);
    assert_eq!(Page::clamped(Some(1000), None).limit, 50);
  }

  #[test]
  fn limit_in_range_is_kept() {
    assert_eq!(Page::clamped(Some(1), None).limit, 1);
    assert_eq!(Page::clamped(Some(100), None).limit, 100);
  }

  #[test]
  fn negative_offset_is_zero() {
    assert_eq!(Page::clamped(None, Some(-10)).offset, 0);
    assert_eq!(Page::clamped(None, Some(25)).offset, 25);
  }
}
