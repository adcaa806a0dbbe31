#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Color`**: Linear RGB value with an upper clamp of 1.0; converts to an 8-bit `Pixel`
//! - **`ColorSource`**: Yields the color a leaf animation uses (`ConstantColor`)
//! - **`Animation`**: Pure function of time `t` (seconds) and position `n` in `[0, 1)` to a color
//! - **Primitives**: `Flash`, `Spinner`, `Rainbow`
//! - **Combinators**: `TimeShift`, `Speed`, `Mix`, `Concatenate`, `Reverse`, `Remap`, `Bake`
//! - **`PixelSink`**: Trait to implement for your LED driver
//! - **`PixelTopology`**: Logical pixel run - a `Block` of a sink, or a `Replicate` of several
//! - **`Renderer`** / **`Renderers`**: Evaluate an animation once per logical pixel per frame
//! - **`Timeline`**: Monotonic elapsed time from a `TimeSource`
//! - **`Show`**: Mode-driven two-ring light show, ticked by the application loop
//!
//! A frame is: read the timeline's `phase()`, `render(t)`, flush the sink.

pub mod animation;
pub mod color;
pub mod combinators;
pub mod primitives;
pub mod renderer;
pub mod show;
pub mod time;
pub mod topology;

mod math;

pub use animation::{Animation, AnimationSet};
pub use color::{BLACK, BLUE, Color, ColorSource, ConstantColor, PIXEL_OFF, Pixel, RED, YELLOW};
pub use combinators::{
    AnimationExt, Bake, BakeError, Concatenate, Mix, Remap, Reverse, Speed, TimeShift,
};
pub use primitives::{Flash, Rainbow, Spinner};
pub use renderer::{Render, RenderSet, Renderer, Renderers};
pub use show::{
    FrameTiming, Mode, ModeRenderer, Show, ShowConfig, ShowConfigBuilder, ShowError, renderer_for,
};
pub use time::{Millis, TickInstant, TimeDuration, TimeInstant, TimeSource, Timeline};
pub use topology::{Block, PixelBuffer, PixelSink, PixelTopology, Replicate, TopologyError};

// Re-export the palette color type backing `Color`
pub use palette::LinSrgb;
