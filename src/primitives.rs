//! Leaf animations that generate colors directly.

use crate::animation::Animation;
use crate::color::{Color, ColorSource};
use crate::math::{cos, floor, floor_mod};
use core::f32::consts::TAU;

/// Two-frequency strobe.
///
/// Brightness is `min(1 - (⌊a·t⌋ mod b), 1 - (⌊c·t⌋ mod d))`, applied to the
/// source color. `t` is used as-is (not wrapped), so `a..d` decide the
/// period. With the defaults `a = 12, b = 2, c = 2, d = 2` the light blinks
/// six times during the first half of every second and stays dark for the
/// second half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flash<S: ColorSource> {
    source: S,
    a: f32,
    b: f32,
    c: f32,
    d: f32,
}

impl<S: ColorSource> Flash<S> {
    /// Creates a flash with the default envelope parameters.
    pub fn new(source: S) -> Self {
        Self {
            source,
            a: 12.0,
            b: 2.0,
            c: 2.0,
            d: 2.0,
        }
    }

    /// Sets the fast strobe rate.
    pub fn with_a(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Sets the fast strobe modulus.
    pub fn with_b(mut self, b: f32) -> Self {
        self.b = b;
        self
    }

    /// Sets the gating rate.
    pub fn with_c(mut self, c: f32) -> Self {
        self.c = c;
        self
    }

    /// Sets the gating modulus. A value of 1.0 disables gating.
    pub fn with_d(mut self, d: f32) -> Self {
        self.d = d;
        self
    }

    /// Returns the envelope brightness at time `t`.
    pub fn envelope(&self, t: f32) -> f32 {
        let strobe = 1.0 - floor_mod(floor(self.a * t), self.b);
        let gate = 1.0 - floor_mod(floor(self.c * t), self.d);
        strobe.min(gate)
    }
}

impl<S: ColorSource> Animation for Flash<S> {
    fn evaluate(&self, t: f32, _n: f32) -> Color {
        self.source.color().scale(self.envelope(t))
    }
}

/// A comet of brightness sweeping along the string.
///
/// Brightness is `((t + n) mod 1)²`, so the head of the comet is brightest
/// and the tail fades quadratically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner<S: ColorSource> {
    source: S,
}

impl<S: ColorSource> Spinner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: ColorSource> Animation for Spinner<S> {
    fn evaluate(&self, t: f32, n: f32) -> Color {
        let x = floor_mod(t + n, 1.0);
        self.source.color().scale(x * x)
    }
}

/// A traveling hue gradient.
///
/// Each channel follows a raised cosine of `(t + n) mod 1`, with the green
/// and blue channels a third and two thirds of a turn ahead of red.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rainbow {
    brightness: f32,
}

impl Rainbow {
    pub fn new(brightness: f32) -> Self {
        Self { brightness }
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }
}

impl Default for Rainbow {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Animation for Rainbow {
    fn evaluate(&self, t: f32, n: f32) -> Color {
        let x = floor_mod(t + n, 1.0);
        let channel = |phase: f32| (cos((x + phase) * TAU) + 1.0) / 2.0;
        Color::new(channel(0.0), channel(1.0 / 3.0), channel(2.0 / 3.0)).scale(self.brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ConstantColor, RED};

    #[test]
    fn flash_envelope_alternates_with_default_parameters() {
        let flash = Flash::new(ConstantColor(RED));
        assert_eq!(flash.envelope(0.0), 1.0);
        // floor(12 * 0.1) = 1 -> odd -> dark
        assert_eq!(flash.envelope(0.1), 0.0);
        assert_eq!(flash.envelope(0.17), 1.0);
        // second half of the second is gated off
        assert_eq!(flash.envelope(0.6), 0.0);
    }

    #[test]
    fn flash_with_unit_gate_only_strobes() {
        let flash = Flash::new(ConstantColor(RED)).with_d(1.0);
        assert_eq!(flash.envelope(0.6), 0.0);
        assert_eq!(flash.envelope(0.5), 1.0);
    }

    #[test]
    fn spinner_brightness_is_quadratic_in_phase() {
        let spinner = Spinner::new(ConstantColor(RED));
        let c = spinner.evaluate(0.25, 0.25);
        assert!((c.red() - 0.25).abs() < 1e-6);
        assert_eq!(c.green(), 0.0);
    }
}
