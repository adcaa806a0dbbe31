//! Integration tests for the mode-driven show

mod common;
use common::*;

use core::cell::RefCell;
use rgb_animator::{
    BakeError, FrameTiming, Millis, Mode, Pixel, Show, ShowConfig, ShowError, TopologyError,
    renderer_for,
};

const RING: usize = 12;

fn ring_a(strip: &RefCell<MockStrip>) -> Vec<Pixel> {
    strip.borrow().pixels()[..RING].to_vec()
}

fn ring_b(strip: &RefCell<MockStrip>) -> Vec<Pixel> {
    strip.borrow().pixels()[RING..2 * RING].to_vec()
}

// ============================================================================
// Mode selection
// ============================================================================

#[test]
fn show_starts_off() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());
    assert_eq!(show.mode(), Mode::Off);
    assert!(!show.is_animating());
}

#[test]
fn renderer_is_rebuilt_only_when_mode_changes() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    assert!(show.select(Mode::RedSpinner).unwrap());
    assert!(!show.select(Mode::RedSpinner).unwrap());
    assert!(show.select(Mode::BlueFlash).unwrap());
    assert_eq!(show.mode(), Mode::BlueFlash);
    assert!(show.is_animating());
}

#[test]
fn renderer_for_off_is_none() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let config = ShowConfig::default();
    assert!(matches!(
        renderer_for::<MockStrip, 16>(Mode::Off, &strip, &config),
        Ok(None)
    ));
    assert!(matches!(
        renderer_for::<MockStrip, 16>(Mode::Rainbow, &strip, &config),
        Ok(Some(_))
    ));
}

#[test]
fn short_sink_is_a_topology_error() {
    let strip = RefCell::new(MockStrip::new(20));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    assert_eq!(
        show.select(Mode::Rainbow),
        Err(ShowError::Topology(TopologyError::InvalidRange {
            start: 12,
            end: 24,
            len: 20
        }))
    );
    assert_eq!(show.mode(), Mode::Off);
}

#[test]
fn failed_bake_keeps_the_previous_mode() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 100> = Show::new(&strip, ShowConfig::default());

    show.select(Mode::RedSpinner).unwrap();
    assert_eq!(
        show.select(Mode::RedBlueFlash),
        Err(ShowError::Bake(BakeError::CapacityExceeded {
            required: 200,
            capacity: 100
        }))
    );
    assert_eq!(show.mode(), Mode::RedSpinner);
    assert!(show.is_animating());
}

#[test]
fn smaller_bake_steps_fit_a_smaller_cache() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let config = ShowConfig::builder().bake_steps(64).build().unwrap();
    let mut show: Show<'_, MockStrip, 64> = Show::new(&strip, config);

    assert_eq!(show.tick(Mode::RedBlueFlash, 0.0), Ok(FrameTiming::Continuous));
}

// ============================================================================
// Ticking
// ============================================================================

#[test]
fn off_blanks_flushes_and_asks_for_a_delay() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    show.tick(Mode::RedSpinner, 0.0).unwrap();
    let timing = show.tick(Mode::from_switches(false, false, false), 0.3).unwrap();

    assert_eq!(timing, FrameTiming::Delay(Millis(100)));
    assert!(strip.borrow().pixels().iter().all(|p| *p == OFF));
    assert_eq!(strip.borrow().flush_count(), 2);
    assert!(!show.is_animating());
}

#[test]
fn every_animated_tick_flushes_once() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    for i in 0..5 {
        let timing = show.tick(Mode::BlueSpinner, i as f32 * 0.1).unwrap();
        assert_eq!(timing, FrameTiming::Continuous);
    }
    assert_eq!(strip.borrow().flush_count(), 5);
}

#[test]
fn rainbow_is_dim_and_mirrored() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    show.tick(Mode::from_switches(true, true, true), 0.0).unwrap();

    assert_eq!(ring_a(&strip), ring_b(&strip));
    assert_eq!(ring_a(&strip)[0], Pixel::new(25, 6, 6));
    assert!(ring_a(&strip).iter().all(|p| p.red <= 25 && p.green <= 25 && p.blue <= 25));
}

#[test]
fn spinner_mirrors_both_rings() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    show.tick(Mode::YellowSpinner, 0.0).unwrap();

    let a = ring_a(&strip);
    assert_eq!(a, ring_b(&strip));
    assert_eq!(a[0], OFF);
    assert!(a[RING - 1].red > a[1].red);
    assert_eq!(a[RING - 1].blue, 0);
}

#[test]
fn single_flash_offsets_the_second_ring() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    // t = 0: ring A is at the start of a strobe, ring B is half a period on
    show.tick(Mode::RedFlash, 0.0).unwrap();
    assert!(ring_a(&strip).iter().all(|p| *p == Pixel::new(255, 0, 0)));
    assert!(ring_b(&strip).iter().all(|p| *p == OFF));

    show.tick(Mode::RedFlash, 0.1).unwrap();
    let b_at_early = ring_b(&strip);
    show.tick(Mode::RedFlash, 0.6).unwrap();
    assert_eq!(b_at_early, ring_a(&strip));
}

#[test]
fn two_color_flash_plays_the_second_ring_backwards() {
    let strip = RefCell::new(MockStrip::new(2 * RING));
    let mut show: Show<'_, MockStrip, 256> = Show::new(&strip, ShowConfig::default());

    show.tick(Mode::RedBlueFlash, 0.0).unwrap();
    assert!(ring_a(&strip).iter().all(|p| *p == Pixel::new(255, 0, 0)));

    show.tick(Mode::RedBlueFlash, 0.25).unwrap();
    let b_at_quarter = ring_b(&strip);
    // Baked with a single position step, so each ring is uniform
    assert!(b_at_quarter.iter().all(|p| *p == b_at_quarter[0]));

    show.tick(Mode::RedBlueFlash, 0.75).unwrap();
    assert_eq!(b_at_quarter, ring_a(&strip));
}
