//! Shared test infrastructure for rgb-animator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use rgb_animator::{Animation, Color, Pixel, PixelSink, TickInstant, TimeSource, TopologyError};

// ============================================================================
// Mock Pixel Sink
// ============================================================================

/// Mock LED strip that records buffered pixels and flushes
pub struct MockStrip {
    pixels: Vec<Pixel>,
    flushed: Vec<Vec<Pixel>>,
}

impl MockStrip {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Pixel::new(0, 0, 0); len],
            flushed: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Frames committed by `flush`, oldest first
    pub fn flushed_frames(&self) -> &[Vec<Pixel>] {
        &self.flushed
    }

    pub fn flush_count(&self) -> usize {
        self.flushed.len()
    }
}

impl PixelSink for MockStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn get(&self, index: usize) -> Result<Pixel, TopologyError> {
        self.pixels.get(index).copied().ok_or(TopologyError::OutOfRange {
            index,
            count: self.pixels.len(),
        })
    }

    fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), TopologyError> {
        let count = self.pixels.len();
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(TopologyError::OutOfRange { index, count })?;
        *slot = pixel;
        Ok(())
    }

    fn flush(&mut self) {
        self.flushed.push(self.pixels.clone());
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock millisecond tick counter with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TickInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(ticks: u32) -> Self {
        Self {
            current_time: core::cell::Cell::new(TickInstant(ticks)),
        }
    }

    /// Advance the counter by `millis`, wrapping like a hardware counter
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(TickInstant(current.0.wrapping_add(millis)));
    }

    pub fn set_time(&self, ticks: u32) {
        self.current_time.set(TickInstant(ticks));
    }
}

impl TimeSource<TickInstant> for MockTimeSource {
    fn now(&self) -> TickInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Animations
// ============================================================================

/// Same color everywhere, always
pub struct Solid(pub Color);

impl Animation for Solid {
    fn evaluate(&self, _t: f32, _n: f32) -> Color {
        self.0
    }
}

/// Smooth, non-periodic function of both inputs, for comparing combinators
/// against direct evaluation
pub struct Probe;

impl Animation for Probe {
    fn evaluate(&self, t: f32, n: f32) -> Color {
        Color::new(t * 0.1, n * 0.5, t * n * 0.05)
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Color, b: Color) -> bool {
    colors_equal_epsilon(a, b, 0.001)
}

/// Compare two colors with custom epsilon
pub fn colors_equal_epsilon(a: Color, b: Color, epsilon: f32) -> bool {
    (a.red() - b.red()).abs() < epsilon
        && (a.green() - b.green()).abs() < epsilon
        && (a.blue() - b.blue()).abs() < epsilon
}

pub const OFF: Pixel = Pixel::new(0, 0, 0);
