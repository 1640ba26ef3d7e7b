//! Analog signal conditioning: clamps and guarded linear scaling between
//! raw card counts and engineering units.
//!
//! Bounds come from operator-writable registers, so none of these helpers
//! may panic on inverted or degenerate limits (`f64::clamp` would).

use mfb_common::motor::scada::AnalogRange;

/// Clamp `value` to `[min, max]`, checking the lower bound first.
#[inline]
pub fn limit(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Integer register clamp with the same precedence as [`limit`].
#[inline]
pub fn limit_register(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Straight-line interpolation through `(x1, y1)` and `(x2, y2)`.
#[inline]
pub fn interpolate(x: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    y1 + (x - x1) * ((y2 - y1) / (x2 - x1))
}

/// Engineering units → raw counts. A zero-span calibration yields `raw_min`.
#[inline]
pub fn eu_to_raw(range: &AnalogRange, eu: f64) -> f64 {
    if range.is_degenerate() {
        return range.raw_min;
    }
    interpolate(eu, range.eu_min, range.eu_max, range.raw_min, range.raw_max)
}

/// Raw counts → engineering units. A zero-span calibration yields `eu_min`.
#[inline]
pub fn raw_to_eu(range: &AnalogRange, raw: f64) -> f64 {
    if range.is_degenerate() {
        return range.eu_min;
    }
    interpolate(raw, range.raw_min, range.raw_max, range.eu_min, range.eu_max)
}

/// Round half away from zero into an analog register (saturating).
#[inline]
pub fn to_register(value: f64) -> i32 {
    value.round() as i32
}
