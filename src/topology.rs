//! Logical-to-physical pixel addressing.
//!
//! A [`PixelSink`] is the physical string (or its driver's frame buffer). A
//! [`PixelTopology`] is what a renderer writes to: a logical run of pixels
//! that maps onto one or more sinks.
//!
//! - [`Block`] exposes a contiguous sub-range of a sink. Several blocks can
//!   split one sink into independent regions; the sink is shared through a
//!   `RefCell` whose borrows never outlive a single call.
//! - [`Replicate`] mirrors one logical run onto several topologies, e.g. the
//!   same animation on two rings.

use crate::color::Pixel;
use core::cell::RefCell;

/// Errors from topology and sink access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopologyError {
    /// Index outside `[0, count)`.
    OutOfRange { index: usize, count: usize },

    /// Block range is reversed or extends past the end of the sink.
    InvalidRange { start: usize, end: usize, len: usize },
}

impl core::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TopologyError::OutOfRange { index, count } => {
                write!(f, "pixel index {} out of range for {} pixels", index, count)
            }
            TopologyError::InvalidRange { start, end, len } => {
                write!(
                    f,
                    "block range {}..{} is invalid for a sink of {} pixels",
                    start, end, len
                )
            }
        }
    }
}

#[cfg(any(feature = "std", test))]
impl std::error::Error for TopologyError {}

/// Trait for abstracting the physical pixel string.
///
/// Implement this for your LED driver. `set` and `fill` only update buffered
/// state; nothing is expected to reach the hardware until `flush`. Handle
/// transmission errors internally - `flush` cannot fail.
pub trait PixelSink {
    /// Number of physical pixels.
    fn len(&self) -> usize;

    /// Returns true if the sink has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the buffered value at `index`.
    fn get(&self, index: usize) -> Result<Pixel, TopologyError>;

    /// Buffers `pixel` at `index`.
    fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), TopologyError>;

    /// Buffers `pixel` at every index.
    fn fill(&mut self, pixel: Pixel) {
        for index in 0..self.len() {
            let _ = self.set(index, pixel);
        }
    }

    /// Commits buffered pixels to the hardware.
    fn flush(&mut self);
}

/// A logical run of pixels a renderer can write to.
pub trait PixelTopology {
    /// Number of logical pixels.
    fn count(&self) -> usize;

    /// Reads the logical pixel at `index`.
    fn get(&self, index: usize) -> Result<Pixel, TopologyError>;

    /// Writes the logical pixel at `index`.
    fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), TopologyError>;

    /// Writes `pixel` to every pixel this topology covers.
    fn fill(&mut self, pixel: Pixel);

    /// Flushes the underlying sink(s).
    fn flush(&mut self);
}

#[inline]
fn check_index(index: usize, count: usize) -> Result<(), TopologyError> {
    if index < count {
        Ok(())
    } else {
        Err(TopologyError::OutOfRange { index, count })
    }
}

/// A contiguous range `[start, end)` of a shared sink.
///
/// Logical index `i` maps to physical index `start + i`.
#[derive(Debug)]
pub struct Block<'a, S: PixelSink> {
    sink: &'a RefCell<S>,
    start: usize,
    end: usize,
}

impl<'a, S: PixelSink> Block<'a, S> {
    /// Creates a block over `[start, end)` of `sink`.
    ///
    /// # Errors
    /// `InvalidRange` if `start > end` or `end` is past the end of the sink.
    pub fn new(sink: &'a RefCell<S>, start: usize, end: usize) -> Result<Self, TopologyError> {
        let len = sink.borrow().len();
        if start > end || end > len {
            return Err(TopologyError::InvalidRange { start, end, len });
        }
        Ok(Self { sink, start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Maps a logical index to its physical index in the sink.
    pub fn physical_index(&self, index: usize) -> Result<usize, TopologyError> {
        check_index(index, self.count())?;
        Ok(self.start + index)
    }
}

impl<S: PixelSink> PixelTopology for Block<'_, S> {
    fn count(&self) -> usize {
        self.end - self.start
    }

    fn get(&self, index: usize) -> Result<Pixel, TopologyError> {
        let physical = self.physical_index(index)?;
        self.sink.borrow().get(physical)
    }

    fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), TopologyError> {
        let physical = self.physical_index(index)?;
        self.sink.borrow_mut().set(physical, pixel)
    }

    fn fill(&mut self, pixel: Pixel) {
        let mut sink = self.sink.borrow_mut();
        for physical in self.start..self.end {
            let _ = sink.set(physical, pixel);
        }
    }

    fn flush(&mut self) {
        self.sink.borrow_mut().flush();
    }
}

/// Mirrors one logical run onto several topologies.
///
/// The logical count is the smallest child count. Writes go to every child;
/// reads come from the first child only, since all children hold the same
/// values after a write.
///
/// # Type Parameters
/// * `T` - Child topology type
/// * `K` - Number of children
#[derive(Debug)]
pub struct Replicate<T: PixelTopology, const K: usize> {
    children: [T; K],
    count: usize,
}

impl<T: PixelTopology, const K: usize> Replicate<T, K> {
    /// Creates a replicated view. With no children the count is zero.
    pub fn new(children: [T; K]) -> Self {
        let count = children.iter().map(|child| child.count()).min().unwrap_or(0);
        Self { children, count }
    }

    pub fn children(&self) -> &[T] {
        &self.children
    }
}

impl<T: PixelTopology, const K: usize> PixelTopology for Replicate<T, K> {
    fn count(&self) -> usize {
        self.count
    }

    fn get(&self, index: usize) -> Result<Pixel, TopologyError> {
        check_index(index, self.count)?;
        match self.children.first() {
            Some(first) => first.get(index),
            None => Err(TopologyError::OutOfRange {
                index,
                count: self.count,
            }),
        }
    }

    fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), TopologyError> {
        check_index(index, self.count)?;
        for child in self.children.iter_mut() {
            child.set(index, pixel)?;
        }
        Ok(())
    }

    fn fill(&mut self, pixel: Pixel) {
        for child in self.children.iter_mut() {
            child.fill(pixel);
        }
    }

    fn flush(&mut self) {
        for child in self.children.iter_mut() {
            child.flush();
        }
    }
}

/// An in-memory pixel string of `N` pixels.
///
/// Useful as the frame buffer in front of a driver that takes a whole slice,
/// and for running animations on a host.
#[derive(Debug, Clone)]
pub struct PixelBuffer<const N: usize> {
    pixels: [Pixel; N],
    flush_count: usize,
}

impl<const N: usize> PixelBuffer<N> {
    /// Creates a buffer with every pixel off.
    pub fn new() -> Self {
        Self {
            pixels: [crate::color::PIXEL_OFF; N],
            flush_count: 0,
        }
    }

    /// Current buffered pixels.
    pub fn pixels(&self) -> &[Pixel; N] {
        &self.pixels
    }

    /// Number of times [`PixelSink::flush`] has been called.
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PixelSink for PixelBuffer<N> {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Result<Pixel, TopologyError> {
        self.pixels
            .get(index)
            .copied()
            .ok_or(TopologyError::OutOfRange { index, count: N })
    }

    fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), TopologyError> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(TopologyError::OutOfRange { index, count: N })?;
        *slot = pixel;
        Ok(())
    }

    fn fill(&mut self, pixel: Pixel) {
        self.pixels = [pixel; N];
    }

    fn flush(&mut self) {
        self.flush_count += 1;
    }
}
