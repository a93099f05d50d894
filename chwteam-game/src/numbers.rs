//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

use crate::constants::STAT_MAX;

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Round a f64 and clamp it into the stat range `0..=99`.
#[must_use]
pub fn round_f64_to_stat(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.round().clamp(0.0, f64::from(STAT_MAX));
    cast::<f64, u8>(clamped).unwrap_or(0)
}

/// Round a non-negative f64 to the nearest multiple of `step`.
///
/// Negative and non-finite inputs collapse to zero.
#[must_use]
pub fn round_f64_to_step(value: f64, step: u32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let step = step.max(1);
    let units = (value / f64::from(step)).round();
    cast::<f64, u32>(units)
        .unwrap_or(u32::MAX / step)
        .saturating_mul(step)
}

/// Convert a collection length to f64 in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_i32(1.6), 2);
        assert_eq!(round_f64_to_i32(-2.5), -3);
        assert_eq!(round_f64_to_i32(f64::NAN), 0);
        assert_eq!(round_f64_to_i32(f64::from(i32::MAX) * 2.0), i32::MAX);
    }

    #[test]
    fn stat_rounding_clamps_to_bounds() {
        assert_eq!(round_f64_to_stat(42.5), 43);
        assert_eq!(round_f64_to_stat(158.4), STAT_MAX);
        assert_eq!(round_f64_to_stat(-4.0), 0);
        assert_eq!(round_f64_to_stat(f64::INFINITY), 0);
    }

    #[test]
    fn step_rounding_snaps_to_multiples() {
        assert_eq!(round_f64_to_step(2_504.9, 10), 2_500);
        assert_eq!(round_f64_to_step(2_505.0, 10), 2_510);
        assert_eq!(round_f64_to_step(3_999.0, 0), 3_999);
        assert_eq!(round_f64_to_step(-1.0, 10), 0);
    }

    #[test]
    fn usize_conversion_is_exact_for_small_values() {
        assert!((usize_to_f64(20) - 20.0).abs() < f64::EPSILON);
    }
}
