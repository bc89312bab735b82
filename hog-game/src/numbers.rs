//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Widen a u32 count to f64.
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert a u32 score to a table index.
#[must_use]
pub fn u32_to_usize(value: u32) -> usize {
    cast::<u32, usize>(value).unwrap_or(usize::MAX)
}

/// Convert a table index back to a score, saturating at `u32::MAX`.
#[must_use]
pub fn usize_to_u32(value: usize) -> u32 {
    cast::<usize, u32>(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_is_exact() {
        assert!((u32_to_f64(u32::MAX) - 4_294_967_295.0).abs() < f64::EPSILON);
        assert!((usize_to_f64(42) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn index_conversions_saturate() {
        assert_eq!(u32_to_usize(7), 7);
        assert_eq!(usize_to_u32(60), 60);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(usize_to_u32(usize::MAX), u32::MAX);
    }
}
