//! Binding animations to topologies.
//!
//! Provides [`Renderer`], which evaluates one animation once per logical pixel
//! of one topology per frame, and [`Renderers`], which fans a frame out to
//! several independent renderers. Neither flushes: committing the frame to
//! the hardware is the caller's job, once per tick, after all renderers that
//! share a sink have written.

use crate::animation::Animation;
use crate::math::floor_mod;
use crate::topology::{PixelTopology, TopologyError};
use heapless::Vec;

/// Something that draws one frame for a given time.
pub trait Render {
    /// Draws the frame at time `t` (seconds).
    ///
    /// # Errors
    /// Returns the first topology error; the rest of the frame is skipped.
    fn render(&mut self, t: f32) -> Result<(), TopologyError>;
}

/// Draws one animation onto one topology.
///
/// Time is wrapped to `t mod 1` before evaluation, and logical pixel `i` of
/// `count` is evaluated at position `n = i / count`.
#[derive(Debug)]
pub struct Renderer<T: PixelTopology, A: Animation> {
    topology: T,
    animation: A,
}

impl<T: PixelTopology, A: Animation> Renderer<T, A> {
    pub fn new(topology: T, animation: A) -> Self {
        Self {
            topology,
            animation,
        }
    }

    pub fn topology(&self) -> &T {
        &self.topology
    }

    pub fn topology_mut(&mut self) -> &mut T {
        &mut self.topology
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Consumes the renderer, returning its topology and animation.
    pub fn into_parts(self) -> (T, A) {
        (self.topology, self.animation)
    }
}

impl<T: PixelTopology, A: Animation> Render for Renderer<T, A> {
    fn render(&mut self, t: f32) -> Result<(), TopologyError> {
        let t = floor_mod(t, 1.0);
        let count = self.topology.count();
        for index in 0..count {
            let n = index as f32 / count as f32;
            let pixel = self.animation.evaluate(t, n).to_bytes();
            self.topology.set(index, pixel)?;
        }
        Ok(())
    }
}

impl<R: Render + ?Sized> Render for &mut R {
    fn render(&mut self, t: f32) -> Result<(), TopologyError> {
        (**self).render(t)
    }
}

/// An ordered group of renderers, see [`Renderers`].
///
/// Implemented for arrays, `heapless::Vec`, and tuples of up to four
/// renderers of different types.
pub trait RenderSet {
    /// Renders every member in order, stopping at the first error.
    fn render_each(&mut self, t: f32) -> Result<(), TopologyError>;
}

impl<R: Render, const K: usize> RenderSet for [R; K] {
    fn render_each(&mut self, t: f32) -> Result<(), TopologyError> {
        self.iter_mut().try_for_each(|r| r.render(t))
    }
}

impl<R: Render, const K: usize> RenderSet for Vec<R, K> {
    fn render_each(&mut self, t: f32) -> Result<(), TopologyError> {
        self.iter_mut().try_for_each(|r| r.render(t))
    }
}

macro_rules! impl_render_set_for_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Render),+> RenderSet for ($($name,)+) {
            fn render_each(&mut self, t: f32) -> Result<(), TopologyError> {
                $(self.$idx.render(t)?;)+
                Ok(())
            }
        }
    };
}

impl_render_set_for_tuple!(A 0, B 1);
impl_render_set_for_tuple!(A 0, B 1, C 2);
impl_render_set_for_tuple!(A 0, B 1, C 2, D 3);

/// Renders several independent renderers, in order, at the same time.
///
/// Used when different regions of the hardware show different animations,
/// e.g. one ring running an animation and the other running it reversed.
#[derive(Debug)]
pub struct Renderers<L: RenderSet> {
    renderers: L,
}

impl<L: RenderSet> Renderers<L> {
    pub fn new(renderers: L) -> Self {
        Self { renderers }
    }

    pub fn inner(&self) -> &L {
        &self.renderers
    }
}

impl<L: RenderSet> Render for Renderers<L> {
    fn render(&mut self, t: f32) -> Result<(), TopologyError> {
        self.renderers.render_each(t)
    }
}
