//! Time abstraction traits and the animation timeline.

use core::cell::Cell;

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Must saturate to zero instead of underflowing, and must tolerate the
    /// underlying counter wrapping around between the two instants.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Millisecond duration used with [`TickInstant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u64);

impl TimeDuration for Millis {
    const ZERO: Self = Millis(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        Millis(millis)
    }
}

/// Reading of a free-running, wrapping 32-bit millisecond counter.
///
/// Differences are computed the way tick counters on microcontrollers are
/// usually compared: wrapping subtraction interpreted as a signed value, so
/// an instant taken just after the counter wraps is still "later" than one
/// taken just before. Negative differences saturate to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInstant(pub u32);

impl TickInstant {
    /// Signed wrapping difference `self - earlier` in ticks.
    #[inline]
    pub fn ticks_diff(&self, earlier: Self) -> i32 {
        self.0.wrapping_sub(earlier.0) as i32
    }
}

impl TimeInstant for TickInstant {
    type Duration = Millis;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Millis(self.ticks_diff(earlier).max(0) as u64)
    }
}

/// Monotonic elapsed-time source for animations.
///
/// Accumulates the time between successive readings of the time source, so
/// the total keeps growing past the counter's wraparound as long as it is
/// read at least once per half counter period. A reading earlier than the
/// previous one adds nothing. Never reset; never decreases.
pub struct Timeline<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    origin: I,
    last: Cell<I>,
    elapsed_millis: Cell<u64>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Timeline<'t, I, T> {
    /// Period, in milliseconds, that [`Timeline::phase`] wraps at.
    ///
    /// A whole number of seconds, so `t mod 1` is unaffected by the wrap.
    pub const PHASE_PERIOD_MILLIS: u64 = 3_600_000;

    /// Starts a timeline at the time source's current instant.
    pub fn new(time_source: &'t T) -> Self {
        let origin = time_source.now();
        Self {
            time_source,
            origin,
            last: Cell::new(origin),
            elapsed_millis: Cell::new(0),
        }
    }

    /// Returns the instant captured at construction.
    pub fn origin(&self) -> I {
        self.origin
    }

    /// Returns the total elapsed duration since the origin.
    pub fn elapsed_duration(&self) -> I::Duration {
        let now = self.time_source.now();
        let step = now.duration_since(self.last.get()).as_millis();
        if step > 0 {
            self.last.set(now);
            self.elapsed_millis.set(self.elapsed_millis.get().saturating_add(step));
        }
        I::Duration::from_millis(self.elapsed_millis.get())
    }

    /// Returns the total elapsed time since the origin in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_duration().as_millis() as f64 / 1000.0
    }

    /// Returns the elapsed time in seconds, wrapped to
    /// [`PHASE_PERIOD_MILLIS`](Self::PHASE_PERIOD_MILLIS), for feeding
    /// [`Render::render`](crate::renderer::Render::render).
    ///
    /// The wrap keeps millisecond resolution in the `f32` however long the
    /// timeline runs.
    pub fn phase(&self) -> f32 {
        let phase = self.elapsed_duration().as_millis() % Self::PHASE_PERIOD_MILLIS;
        phase as f32 / 1000.0
    }
}
