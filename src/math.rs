//! Float helpers that work without `std`.

use palette::num::{Round, Trigonometry};

/// Floored modulo: the result takes the sign of `modulus`.
///
/// Negative times and positions wrap into `[0, modulus)` instead of
/// `(-modulus, 0]` as the `%` operator would give.
#[inline]
pub(crate) fn floor_mod(value: f32, modulus: f32) -> f32 {
    let rem = value % modulus;
    if rem != 0.0 && ((rem < 0.0) != (modulus < 0.0)) {
        rem + modulus
    } else {
        rem
    }
}

#[inline]
pub(crate) fn floor(value: f32) -> f32 {
    Round::floor(value)
}

#[inline]
pub(crate) fn cos(value: f32) -> f32 {
    Trigonometry::cos(value)
}

/// Maps a wrapped value in `[0, 1)` onto one of `steps` grid cells.
#[inline]
pub(crate) fn grid_index(value: f32, steps: usize) -> usize {
    (floor(value * steps as f32) as usize) % steps
}
