//! Integration tests for the color module

mod common;
use common::*;

use rgb_animator::{BLACK, Color, ColorSource, ConstantColor, Pixel, RED};

#[test]
fn construction_clamps_only_the_upper_bound() {
    let c = Color::new(1.5, -0.5, 0.25);
    assert_eq!(c.red(), 1.0);
    assert_eq!(c.green(), -0.5);
    assert_eq!(c.blue(), 0.25);

    for &v in &[-3.0_f32, 0.0, 0.7, 1.0, 42.0] {
        let c = Color::new(v, v, v);
        assert!(c.red() <= 1.0 && c.green() <= 1.0 && c.blue() <= 1.0);
    }
}

#[test]
fn scale_is_linear_then_clamped() {
    let c = Color::new(0.2, 0.5, 0.8);
    for &k in &[0.0_f32, 0.5, 1.0, 1.5, 4.0] {
        let scaled = c.scale(k);
        assert!((scaled.red() - (0.2 * k).min(1.0)).abs() < 1e-6);
        assert!((scaled.green() - (0.5 * k).min(1.0)).abs() < 1e-6);
        assert!((scaled.blue() - (0.8 * k).min(1.0)).abs() < 1e-6);
    }
}

#[test]
fn scale_does_not_clamp_negative_brightness() {
    let c = RED.scale(-1.0);
    assert_eq!(c.red(), -1.0);
    assert!(c.is_black());
}

#[test]
fn mix_sums_instead_of_averaging() {
    let clamped = Color::mix([Color::new(0.6, 0.0, 0.0), Color::new(0.6, 0.0, 0.0)]);
    assert_eq!(clamped.red(), 1.0);

    let summed = Color::mix([Color::new(0.3, 0.0, 0.0), Color::new(0.3, 0.0, 0.0)]);
    assert!((summed.red() - 0.6).abs() < 1e-6);
}

#[test]
fn mix_of_nothing_is_black() {
    assert_eq!(Color::mix(core::iter::empty()), BLACK);
}

#[test]
fn mix_lets_negative_channels_cancel() {
    let c = Color::mix([Color::new(0.5, 0.0, 0.0), Color::new(-0.25, 0.0, 0.0)]);
    assert!((c.red() - 0.25).abs() < 1e-6);
}

#[test]
fn to_bytes_floors_and_clamps_to_zero() {
    assert_eq!(Color::new(1.0, 0.5, 0.0).to_bytes(), Pixel::new(255, 127, 0));
    assert_eq!(Color::new(0.999, 0.004, 0.0039).to_bytes(), Pixel::new(254, 1, 0));
    assert_eq!(Color::new(-0.5, -1.0, -0.001).to_bytes(), Pixel::new(0, 0, 0));
}

#[test]
fn is_black_treats_non_positive_channels_as_off() {
    assert!(BLACK.is_black());
    assert!(Color::new(-0.1, 0.0, -2.0).is_black());
    assert!(!Color::new(0.0, 0.001, 0.0).is_black());
}

#[test]
fn hsv_creates_primary_colors() {
    assert!(colors_equal_epsilon(Color::hsv(0.0, 1.0, 1.0), RED, 0.01));
    assert!(colors_equal_epsilon(Color::hue(120.0), Color::new(0.0, 1.0, 0.0), 0.01));
    assert!(colors_equal_epsilon(Color::hue(240.0), Color::new(0.0, 0.0, 1.0), 0.01));
}

#[test]
fn constant_color_source_yields_its_color() {
    let source = ConstantColor::new(Color::new(0.1, 0.2, 0.3));
    assert!(colors_equal(source.color(), Color::new(0.1, 0.2, 0.3)));
    assert!(colors_equal((&source).color(), source.color()));
}
