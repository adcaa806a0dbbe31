//! Animations that transform or combine child animations.
//!
//! Each combinator owns its children and only changes how `(t, n)` reach
//! them or how their results are combined. Use [`AnimationExt`] to chain them:
//!
//! ```
//! use rgb_animator::{AnimationExt, ConstantColor, Spinner, RED};
//!
//! let anim = Spinner::new(ConstantColor(RED)).speed(3.0).time_shift(0.5);
//! ```

use crate::animation::{Animation, AnimationSet};
use crate::color::{BLACK, Color};
use crate::math::{floor_mod, grid_index};
use heapless::Vec;

/// Evaluates the base animation `shift` seconds ahead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeShift<A> {
    base: A,
    shift: f32,
}

impl<A: Animation> TimeShift<A> {
    pub fn new(base: A, shift: f32) -> Self {
        Self { base, shift }
    }
}

impl<A: Animation> Animation for TimeShift<A> {
    #[inline]
    fn evaluate(&self, t: f32, n: f32) -> Color {
        self.base.evaluate(t + self.shift, n)
    }
}

/// Runs the base animation `factor` times faster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed<A> {
    base: A,
    factor: f32,
}

impl<A: Animation> Speed<A> {
    pub fn new(base: A, factor: f32) -> Self {
        Self { base, factor }
    }
}

impl<A: Animation> Animation for Speed<A> {
    #[inline]
    fn evaluate(&self, t: f32, n: f32) -> Color {
        self.base.evaluate(t * self.factor, n)
    }
}

/// Adds the outputs of all children, see [`Color::mix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix<L> {
    bases: L,
}

impl<L: AnimationSet> Mix<L> {
    pub fn new(bases: L) -> Self {
        Self { bases }
    }
}

impl<L: AnimationSet> Animation for Mix<L> {
    fn evaluate(&self, t: f32, n: f32) -> Color {
        Color::mix((0..self.bases.len()).filter_map(|i| self.bases.evaluate_at(i, t, n)))
    }
}

/// Plays children one after another, one second each, and loops.
///
/// At an exact segment boundary the earlier segment wins: with two children,
/// `t = 1.0` is handled by the first child at local time 1.0, not by the
/// second at 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Concatenate<L> {
    bases: L,
}

impl<L: AnimationSet> Concatenate<L> {
    /// Duration of every segment, in seconds.
    pub const SEGMENT_DURATION: f32 = 1.0;

    pub fn new(bases: L) -> Self {
        Self { bases }
    }

    /// Total loop duration in seconds.
    pub fn total_duration(&self) -> f32 {
        self.bases.len() as f32 * Self::SEGMENT_DURATION
    }
}

impl<L: AnimationSet> Animation for Concatenate<L> {
    fn evaluate(&self, t: f32, n: f32) -> Color {
        let total = self.total_duration();
        if total <= 0.0 {
            return BLACK;
        }

        let t = floor_mod(t, total);
        let mut start = 0.0;
        for index in 0..self.bases.len() {
            let end = start + Self::SEGMENT_DURATION;
            if end >= t {
                return self.bases.evaluate_at(index, t - start, n).unwrap_or(BLACK);
            }
            start = end;
        }

        BLACK
    }
}

/// Plays the base animation backwards by negating time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reverse<A> {
    base: A,
}

impl<A: Animation> Reverse<A> {
    pub fn new(base: A) -> Self {
        Self { base }
    }
}

impl<A: Animation> Animation for Reverse<A> {
    #[inline]
    fn evaluate(&self, t: f32, n: f32) -> Color {
        self.base.evaluate(-t, n)
    }
}

/// Maps `t` in `[0, 1]` linearly onto `[t0, t1]` of the base animation.
///
/// Times outside `[0, 1]` extrapolate along the same line; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remap<A> {
    base: A,
    t0: f32,
    t1: f32,
}

impl<A: Animation> Remap<A> {
    pub fn new(base: A, t0: f32, t1: f32) -> Self {
        Self { base, t0, t1 }
    }
}

impl<A: Animation> Animation for Remap<A> {
    #[inline]
    fn evaluate(&self, t: f32, n: f32) -> Color {
        self.base.evaluate(self.t0 + (self.t1 - self.t0) * t, n)
    }
}

/// Errors from building a [`Bake`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BakeError {
    /// A grid dimension is zero.
    ZeroSteps,

    /// The grid does not fit in the cache.
    CapacityExceeded {
        /// Cells needed, `t_steps * n_steps`.
        required: usize,
        /// Cache capacity `CAP`.
        capacity: usize,
    },
}

impl core::fmt::Display for BakeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BakeError::ZeroSteps => {
                write!(f, "bake grid must have at least one step in each dimension")
            }
            BakeError::CapacityExceeded { required, capacity } => {
                write!(
                    f,
                    "bake grid needs {} cells but cache capacity is {}",
                    required, capacity
                )
            }
        }
    }
}

#[cfg(any(feature = "std", test))]
impl std::error::Error for BakeError {}

/// A precomputed, zero-order-hold copy of an animation over one period.
///
/// Construction samples the base animation at `t = i / t_steps`,
/// `n = j / n_steps` for every grid cell and keeps only the samples. This
/// blocks for `t_steps * n_steps` evaluations, so bake at startup or on mode
/// change, never per frame. Evaluation wraps `t` and `n` into `[0, 1)` and
/// returns the cell they fall into.
///
/// # Type Parameters
/// * `CAP` - Maximum number of grid cells the cache can hold
#[derive(Debug, Clone)]
pub struct Bake<const CAP: usize> {
    cache: Vec<Color, CAP>,
    t_steps: usize,
    n_steps: usize,
}

impl<const CAP: usize> Bake<CAP> {
    /// Samples `base` on a `t_steps` x `n_steps` grid.
    ///
    /// # Errors
    /// * `ZeroSteps` - Either step count is zero
    /// * `CapacityExceeded` - `t_steps * n_steps` exceeds `CAP`
    pub fn new<A: Animation>(base: &A, t_steps: usize, n_steps: usize) -> Result<Self, BakeError> {
        if t_steps == 0 || n_steps == 0 {
            return Err(BakeError::ZeroSteps);
        }

        let required = t_steps.saturating_mul(n_steps);
        if required > CAP {
            return Err(BakeError::CapacityExceeded {
                required,
                capacity: CAP,
            });
        }

        let mut cache = Vec::new();
        for ti in 0..t_steps {
            let t = ti as f32 / t_steps as f32;
            for nj in 0..n_steps {
                let n = nj as f32 / n_steps as f32;
                cache
                    .push(base.evaluate(t, n))
                    .map_err(|_| BakeError::CapacityExceeded {
                        required,
                        capacity: CAP,
                    })?;
            }
        }

        Ok(Self {
            cache,
            t_steps,
            n_steps,
        })
    }

    pub fn t_steps(&self) -> usize {
        self.t_steps
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }
}

impl<const CAP: usize> Animation for Bake<CAP> {
    fn evaluate(&self, t: f32, n: f32) -> Color {
        let ti = grid_index(floor_mod(t, 1.0), self.t_steps);
        let nj = grid_index(floor_mod(n, 1.0), self.n_steps);
        self.cache
            .get(ti * self.n_steps + nj)
            .copied()
            .unwrap_or(BLACK)
    }
}

/// Chaining constructors for the single-child combinators.
pub trait AnimationExt: Animation + Sized {
    /// See [`TimeShift`].
    fn time_shift(self, shift: f32) -> TimeShift<Self> {
        TimeShift::new(self, shift)
    }

    /// See [`Speed`].
    fn speed(self, factor: f32) -> Speed<Self> {
        Speed::new(self, factor)
    }

    /// See [`Reverse`].
    fn reverse(self) -> Reverse<Self> {
        Reverse::new(self)
    }

    /// See [`Remap`].
    fn remap(self, t0: f32, t1: f32) -> Remap<Self> {
        Remap::new(self, t0, t1)
    }

    /// See [`Bake`].
    fn bake<const CAP: usize>(
        &self,
        t_steps: usize,
        n_steps: usize,
    ) -> Result<Bake<CAP>, BakeError> {
        Bake::new(self, t_steps, n_steps)
    }
}

impl<A: Animation> AnimationExt for A {}
