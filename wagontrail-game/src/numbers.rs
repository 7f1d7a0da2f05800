//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Round a f32 to the nearest integer and clamp it into the u32 range.
/// Non-finite and negative inputs collapse to zero.
#[must_use]
pub fn round_f32_to_u32(value: f32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let rounded = f64::from(value).round().min(max);
    cast::<f64, u32>(rounded).unwrap_or(0)
}

/// Floor a f64 and clamp it into the u64 range; NaN and negatives become zero.
#[must_use]
pub fn floor_f64_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    cast::<f64, u64>(value.floor().min(max)).unwrap_or(u64::MAX)
}

/// Ceil a f64 and clamp it into the u32 range; NaN and negatives become zero.
#[must_use]
pub fn ceil_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = f64::from(u32::MAX);
    cast::<f64, u32>(value.ceil().min(max)).unwrap_or(u32::MAX)
}

/// Widen a u32 to f32, accepting precision loss above 2^24 in one place.
#[must_use]
pub fn u32_to_f32(value: u32) -> f32 {
    cast::<u32, f32>(value).unwrap_or(f32::MAX)
}

/// Widen a u64 to f64, accepting precision loss above 2^53 in one place.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(f64::MAX)
}
