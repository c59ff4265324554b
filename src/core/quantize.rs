//! Fixed-point scaling and saturating clamps.
//!
//! Every value destined for an 8-bit or 16-bit record slot passes through
//! here. Out-of-range input saturates to the slot boundary instead of
//! wrapping, so a corrupt spreadsheet cell degrades to a boundary value
//! the firmware can still interpret.

/// Saturate to 0..=255.
pub fn clamp_u8(value: i64) -> u8 {
    value.clamp(0, u8::MAX as i64) as u8
}

/// Saturate to 0..=65535.
pub fn clamp_u16(value: i64) -> u16 {
    value.clamp(0, u16::MAX as i64) as u16
}

/// Fixed-point encode into a byte: `value * factor`, truncated toward
/// zero, then saturated. Kc values and fractions store with factor 100,
/// root depth with factor 10 (decimetres).
pub fn scale_u8(value: f64, factor: f64) -> u8 {
    clamp_u8((value * factor) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_saturates_instead_of_wrapping() {
        assert_eq!(clamp_u8(500), 255);
        assert_eq!(clamp_u8(-5), 0);
        assert_eq!(clamp_u8(255), 255);
        assert_eq!(clamp_u16(70_000), 65_535);
        assert_eq!(clamp_u16(-1), 0);
    }

    #[test]
    fn scale_truncates_toward_zero() {
        assert_eq!(scale_u8(0.4, 100.0), 40);
        assert_eq!(scale_u8(0.999, 100.0), 99);
        assert_eq!(scale_u8(0.5, 10.0), 5);
    }

    #[test]
    fn scale_saturates_extremes() {
        assert_eq!(scale_u8(9.9, 100.0), 255);
        assert_eq!(scale_u8(-0.3, 100.0), 0);
        assert_eq!(scale_u8(f64::INFINITY, 100.0), 255);
        assert_eq!(scale_u8(f64::NAN, 100.0), 0);
    }
}
