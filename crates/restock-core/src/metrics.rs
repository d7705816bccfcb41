//! # Comparative Metrics
//!
//! Folds a current-period aggregate and its previous-period counterpart into
//! a percentage-change figure.
//!
//! The zero-baseline case is *defined*, not exceptional: when the previous
//! value is exactly zero there is no baseline to express a relative change
//! against, so the result is `None` (serialized as JSON `null`). Division by
//! zero and infinities can never escape this module.

/// Percentage change from `previous` to `current`, rounded to two decimals.
///
/// Computed as `((current − previous) / previous) × 100`.
///
/// ## Example
/// ```rust
/// use restock_core::metrics::percent_change;
///
/// assert_eq!(percent_change(150, 100), Some(50.0));
/// assert_eq!(percent_change(50, 100), Some(-50.0));
/// assert_eq!(percent_change(42, 0), None);
/// ```
pub fn percent_change(current: i64, previous: i64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    let pct = (current - previous) as f64 / previous as f64 * 100.0;
    Some(round2(pct))
}

/// Rounds to two decimal places (the precision every percentage field in the
/// report payloads carries).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_increase_and_decrease() {
        assert_eq!(percent_change(150, 100), Some(50.0));
        assert_eq!(percent_change(50, 100), Some(-50.0));
    }

    #[test]
    fn test_zero_baseline_is_none() {
        assert_eq!(percent_change(0, 0), None);
        assert_eq!(percent_change(1, 0), None);
        assert_eq!(percent_change(-1, 0), None);
        assert_eq!(percent_change(i64::MAX, 0), None);
    }

    #[test]
    fn test_doubling_is_one_hundred_percent() {
        assert_eq!(percent_change(500_00, 250_00), Some(100.0));
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 1/3 increase = 33.333...% → 33.33
        assert_eq!(percent_change(400, 300), Some(33.33));
        // 2/3 increase = 66.666...% → 66.67
        assert_eq!(percent_change(500, 300), Some(66.67));
    }

    #[test]
    fn test_negative_baseline_still_defined() {
        // A loss shrinking to a smaller loss: formula applies as-is.
        assert_eq!(percent_change(-50, -100), Some(-50.0));
    }

    #[test]
    fn test_no_change() {
        assert_eq!(percent_change(100, 100), Some(0.0));
    }
}
