//! Input validation helpers.
//!
//! Standardizes validation across the crate using `!is_finite()` to reject
//! NaN, +Inf, and -Inf uniformly.

use crate::error::StrategyError;

/// Validate that a value is strictly positive and finite (rejects NaN, Inf, zero, negatives).
pub(crate) fn validate_positive(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StrategyError::InvalidInput {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is non-negative and finite (rejects NaN, Inf, negatives).
pub(crate) fn validate_non_negative(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(StrategyError::InvalidInput {
            message: format!("{name} must be non-negative and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, name: &str) -> crate::error::Result<f64> {
    if !value.is_finite() {
        return Err(StrategyError::InvalidInput {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate a contract multiplier. Direction carries the sign, so zero is the
/// only invalid count.
pub(crate) fn validate_quantity(quantity: u32) -> crate::error::Result<u32> {
    if quantity == 0 {
        return Err(StrategyError::InvalidInput {
            message: "quantity must be at least 1".into(),
        });
    }
    Ok(quantity)
}

/// Validate that a spot grid is usable: at least two points, all positive and
/// finite, strictly increasing.
pub(crate) fn validate_grid(grid: &[f64]) -> crate::error::Result<()> {
    if grid.len() < 2 {
        return Err(StrategyError::InvalidInput {
            message: format!("spot grid needs at least 2 points, got {}", grid.len()),
        });
    }
    for (i, &x) in grid.iter().enumerate() {
        validate_positive(x, "grid point")?;
        if i > 0 && x <= grid[i - 1] {
            return Err(StrategyError::InvalidInput {
                message: format!(
                    "spot grid must be strictly increasing, got {} after {} at index {i}",
                    x,
                    grid[i - 1]
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive(1.0, "x").is_ok());
        assert!(validate_positive(0.0, "x").is_err());
        assert!(validate_positive(-1.0, "x").is_err());
        assert!(validate_positive(f64::NAN, "x").is_err());
        assert!(validate_positive(f64::INFINITY, "x").is_err());
    }

    #[test]
    fn non_negative_allows_zero() {
        assert!(validate_non_negative(0.0, "x").is_ok());
        assert!(validate_non_negative(-0.1, "x").is_err());
    }

    #[test]
    fn quantity_rejects_zero() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn grid_must_be_increasing() {
        assert!(validate_grid(&[90.0, 100.0, 110.0]).is_ok());
        assert!(validate_grid(&[100.0]).is_err());
        assert!(validate_grid(&[100.0, 100.0]).is_err());
        assert!(validate_grid(&[100.0, 90.0]).is_err());
        assert!(validate_grid(&[-1.0, 90.0]).is_err());
    }
}
