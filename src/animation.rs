//! The animation abstraction.
//!
//! An [`Animation`] is a pure function of elapsed time `t` (seconds) and
//! normalized pixel position `n` (in `[0, 1)`) to a [`Color`]. Primitives in
//! [`crate::primitives`] produce colors directly; combinators in
//! [`crate::combinators`] own one or more child animations and transform the
//! inputs or combine the outputs.
//!
//! Trees are built by value: every combinator owns its children through a
//! type parameter, so a tree is a single statically dispatched value. With the
//! `std` feature, `Box<dyn Animation>` also implements the trait for trees
//! whose shape is only known at runtime.

use crate::color::Color;
use heapless::Vec;

/// A color pattern over time and position.
pub trait Animation {
    /// Evaluates the animation at time `t` for normalized position `n`.
    fn evaluate(&self, t: f32, n: f32) -> Color;
}

impl<A: Animation + ?Sized> Animation for &A {
    #[inline]
    fn evaluate(&self, t: f32, n: f32) -> Color {
        (**self).evaluate(t, n)
    }
}

#[cfg(any(feature = "std", test))]
impl<A: Animation + ?Sized> Animation for std::boxed::Box<A> {
    #[inline]
    fn evaluate(&self, t: f32, n: f32) -> Color {
        (**self).evaluate(t, n)
    }
}

/// An ordered collection of child animations.
///
/// Used by combinators that take any number of children, such as
/// [`Mix`](crate::combinators::Mix) and
/// [`Concatenate`](crate::combinators::Concatenate). Implemented for arrays,
/// `heapless::Vec`, and tuples of up to six animations of different types.
pub trait AnimationSet {
    /// Number of children.
    fn len(&self) -> usize;

    /// Returns true if there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluates the child at `index`, or `None` if there is no such child.
    fn evaluate_at(&self, index: usize, t: f32, n: f32) -> Option<Color>;
}

impl<A: Animation, const K: usize> AnimationSet for [A; K] {
    fn len(&self) -> usize {
        K
    }

    fn evaluate_at(&self, index: usize, t: f32, n: f32) -> Option<Color> {
        self.get(index).map(|a| a.evaluate(t, n))
    }
}

impl<A: Animation, const K: usize> AnimationSet for Vec<A, K> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn evaluate_at(&self, index: usize, t: f32, n: f32) -> Option<Color> {
        self.get(index).map(|a| a.evaluate(t, n))
    }
}

#[cfg(any(feature = "std", test))]
impl<A: Animation> AnimationSet for std::vec::Vec<A> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn evaluate_at(&self, index: usize, t: f32, n: f32) -> Option<Color> {
        self.get(index).map(|a| a.evaluate(t, n))
    }
}

macro_rules! impl_animation_set_for_tuple {
    ($len:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: Animation),+> AnimationSet for ($($name,)+) {
            fn len(&self) -> usize {
                $len
            }

            fn evaluate_at(&self, index: usize, t: f32, n: f32) -> Option<Color> {
                match index {
                    $($idx => Some(self.$idx.evaluate(t, n)),)+
                    _ => None,
                }
            }
        }
    };
}

impl_animation_set_for_tuple!(1; A 0);
impl_animation_set_for_tuple!(2; A 0, B 1);
impl_animation_set_for_tuple!(3; A 0, B 1, C 2);
impl_animation_set_for_tuple!(4; A 0, B 1, C 2, D 3);
impl_animation_set_for_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_animation_set_for_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
