//! Mode-driven light show for two pixel rings on one string.
//!
//! The physical string holds two rings of `ring_len` pixels back to back.
//! Each [`Mode`] maps to a renderer through [`renderer_for`], a pure
//! construction function. [`Show`] keeps the current mode and renderer and is
//! driven once per tick by the application loop:
//!
//! ```
//! use core::cell::RefCell;
//! use rgb_animator::{Mode, PixelBuffer, Show, ShowConfig};
//!
//! let sink = RefCell::new(PixelBuffer::<24>::new());
//! let mut show: Show<'_, _, 256> = Show::new(&sink, ShowConfig::default());
//!
//! // Each tick: decode the switches, then render at the timeline's time.
//! let mode = Mode::from_switches(true, false, false);
//! show.tick(mode, 0.25).unwrap();
//! assert_eq!(show.mode(), Mode::RedSpinner);
//! ```

use crate::color::{BLUE, Color, ConstantColor, PIXEL_OFF, RED, YELLOW};
use crate::combinators::{AnimationExt, Bake, BakeError, Concatenate, Reverse, Speed, TimeShift};
use crate::primitives::{Flash, Rainbow, Spinner};
use crate::renderer::{Render, Renderer, Renderers};
use crate::time::Millis;
use crate::topology::{Block, PixelSink, Replicate, TopologyError};
use core::cell::RefCell;

/// Delay suggested between ticks while the show is off.
pub const IDLE_DELAY: Millis = Millis(100);

/// What the rings display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// All pixels dark.
    Off,
    /// Dim rainbow on both rings.
    Rainbow,
    /// Red and blue strobes alternating, the second ring reversed.
    RedBlueFlash,
    /// Red strobe, rings half a period apart.
    RedFlash,
    /// Blue strobe, rings half a period apart.
    BlueFlash,
    /// Yellow strobe, rings half a period apart.
    YellowFlash,
    /// Red comet on both rings.
    RedSpinner,
    /// Blue comet on both rings.
    BlueSpinner,
    /// Yellow comet on both rings.
    YellowSpinner,
}

impl Mode {
    /// Decodes the three mode switches (true = closed).
    ///
    /// Debouncing is the caller's job. [`Mode::YellowFlash`] has no switch
    /// combination and can only be selected directly.
    pub fn from_switches(red: bool, blue: bool, yellow: bool) -> Self {
        match (red, blue, yellow) {
            (true, true, true) => Mode::Rainbow,
            (true, true, false) => Mode::RedBlueFlash,
            (true, false, true) => Mode::RedFlash,
            (false, true, true) => Mode::BlueFlash,
            (true, false, false) => Mode::RedSpinner,
            (false, true, false) => Mode::BlueSpinner,
            (false, false, true) => Mode::YellowSpinner,
            (false, false, false) => Mode::Off,
        }
    }
}

/// Errors from building or running the show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShowError {
    /// Ring layout does not fit the sink, or a frame hit a bad index.
    Topology(TopologyError),

    /// Precomputing an animation failed.
    Bake(BakeError),

    /// Rings must have at least one pixel.
    EmptyRing,
}

impl core::fmt::Display for ShowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShowError::Topology(err) => write!(f, "topology error: {}", err),
            ShowError::Bake(err) => write!(f, "bake error: {}", err),
            ShowError::EmptyRing => write!(f, "ring length must be at least one pixel"),
        }
    }
}

#[cfg(any(feature = "std", test))]
impl std::error::Error for ShowError {}

impl From<TopologyError> for ShowError {
    fn from(err: TopologyError) -> Self {
        ShowError::Topology(err)
    }
}

impl From<BakeError> for ShowError {
    fn from(err: BakeError) -> Self {
        ShowError::Bake(err)
    }
}

/// Tuning for the show's animations and ring layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowConfig {
    ring_len: usize,
    rainbow_brightness: f32,
    spinner_speed: f32,
    flash_speed: f32,
    flash_offset: f32,
    bake_steps: usize,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            ring_len: 12,
            rainbow_brightness: 0.1,
            spinner_speed: 3.0,
            flash_speed: 1.5,
            flash_offset: 0.5,
            bake_steps: 200,
        }
    }
}

impl ShowConfig {
    /// Creates a builder starting from the defaults.
    pub fn builder() -> ShowConfigBuilder {
        ShowConfigBuilder::new()
    }

    /// Pixels per ring.
    pub fn ring_len(&self) -> usize {
        self.ring_len
    }

    pub fn rainbow_brightness(&self) -> f32 {
        self.rainbow_brightness
    }

    pub fn spinner_speed(&self) -> f32 {
        self.spinner_speed
    }

    pub fn flash_speed(&self) -> f32 {
        self.flash_speed
    }

    /// Time shift of the second ring in single-color flash modes.
    pub fn flash_offset(&self) -> f32 {
        self.flash_offset
    }

    /// Time steps baked for the two-color flash.
    pub fn bake_steps(&self) -> usize {
        self.bake_steps
    }
}

/// Builder for [`ShowConfig`].
#[derive(Debug)]
pub struct ShowConfigBuilder {
    config: ShowConfig,
}

impl ShowConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ShowConfig::default(),
        }
    }

    /// Sets the pixels per ring. The sink must hold two rings.
    pub fn ring_len(mut self, ring_len: usize) -> Self {
        self.config.ring_len = ring_len;
        self
    }

    pub fn rainbow_brightness(mut self, brightness: f32) -> Self {
        self.config.rainbow_brightness = brightness;
        self
    }

    pub fn spinner_speed(mut self, speed: f32) -> Self {
        self.config.spinner_speed = speed;
        self
    }

    pub fn flash_speed(mut self, speed: f32) -> Self {
        self.config.flash_speed = speed;
        self
    }

    pub fn flash_offset(mut self, offset: f32) -> Self {
        self.config.flash_offset = offset;
        self
    }

    /// Sets the baked time resolution. Must fit the show's bake capacity.
    pub fn bake_steps(mut self, steps: usize) -> Self {
        self.config.bake_steps = steps;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `EmptyRing` - `ring_len` is zero
    /// * `Bake(ZeroSteps)` - `bake_steps` is zero
    pub fn build(self) -> Result<ShowConfig, ShowError> {
        if self.config.ring_len == 0 {
            return Err(ShowError::EmptyRing);
        }
        if self.config.bake_steps == 0 {
            return Err(ShowError::Bake(BakeError::ZeroSteps));
        }
        Ok(self.config)
    }
}

impl Default for ShowConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

type Ring<'a, S> = Block<'a, S>;
type BothRings<'a, S> = Replicate<Block<'a, S>, 2>;
type FlashAnimation = Speed<Flash<ConstantColor>>;
type SpinnerAnimation = Speed<Spinner<ConstantColor>>;

/// The renderer of one non-off mode.
///
/// # Type Parameters
/// * `S` - Pixel sink type
/// * `BAKE` - Cache capacity for baked animations
#[derive(Debug)]
pub enum ModeRenderer<'a, S: PixelSink, const BAKE: usize> {
    Rainbow(Renderer<BothRings<'a, S>, Rainbow>),
    Spinner(Renderer<BothRings<'a, S>, SpinnerAnimation>),
    Flash(
        Renderers<(
            Renderer<Ring<'a, S>, FlashAnimation>,
            Renderer<Ring<'a, S>, TimeShift<FlashAnimation>>,
        )>,
    ),
    TwoColorFlash(
        Renderers<(
            Renderer<Ring<'a, S>, Bake<BAKE>>,
            Renderer<Ring<'a, S>, Reverse<Bake<BAKE>>>,
        )>,
    ),
}

impl<S: PixelSink, const BAKE: usize> Render for ModeRenderer<'_, S, BAKE> {
    fn render(&mut self, t: f32) -> Result<(), TopologyError> {
        match self {
            ModeRenderer::Rainbow(renderer) => renderer.render(t),
            ModeRenderer::Spinner(renderer) => renderer.render(t),
            ModeRenderer::Flash(renderers) => renderers.render(t),
            ModeRenderer::TwoColorFlash(renderers) => renderers.render(t),
        }
    }
}

fn rings<'a, S: PixelSink>(
    sink: &'a RefCell<S>,
    config: &ShowConfig,
) -> Result<(Ring<'a, S>, Ring<'a, S>), TopologyError> {
    let len = config.ring_len;
    Ok((Block::new(sink, 0, len)?, Block::new(sink, len, 2 * len)?))
}

fn flash(color: Color, config: &ShowConfig) -> FlashAnimation {
    Flash::new(ConstantColor(color)).speed(config.flash_speed)
}

/// Builds the renderer for `mode`, or `None` for [`Mode::Off`].
///
/// # Errors
/// * `Topology` - The sink is too short for two rings
/// * `Bake` - `bake_steps` does not fit in `BAKE`
pub fn renderer_for<'a, S: PixelSink, const BAKE: usize>(
    mode: Mode,
    sink: &'a RefCell<S>,
    config: &ShowConfig,
) -> Result<Option<ModeRenderer<'a, S, BAKE>>, ShowError> {
    if config.ring_len == 0 {
        return Err(ShowError::EmptyRing);
    }

    let spinner = |color: Color| -> Result<ModeRenderer<'a, S, BAKE>, ShowError> {
        let (a, b) = rings(sink, config)?;
        let anim = Spinner::new(ConstantColor(color)).speed(config.spinner_speed);
        Ok(ModeRenderer::Spinner(Renderer::new(Replicate::new([a, b]), anim)))
    };

    let single_flash = |color: Color| -> Result<ModeRenderer<'a, S, BAKE>, ShowError> {
        let (a, b) = rings(sink, config)?;
        let anim = flash(color, config);
        Ok(ModeRenderer::Flash(Renderers::new((
            Renderer::new(a, anim),
            Renderer::new(b, anim.time_shift(config.flash_offset)),
        ))))
    };

    let renderer = match mode {
        Mode::Off => return Ok(None),
        Mode::Rainbow => {
            let (a, b) = rings(sink, config)?;
            ModeRenderer::Rainbow(Renderer::new(
                Replicate::new([a, b]),
                Rainbow::new(config.rainbow_brightness),
            ))
        }
        Mode::RedBlueFlash => {
            let (a, b) = rings(sink, config)?;
            let baked = two_color_flash::<BAKE>(RED, BLUE, config)?;
            ModeRenderer::TwoColorFlash(Renderers::new((
                Renderer::new(a, baked.clone()),
                Renderer::new(b, baked.reverse()),
            )))
        }
        Mode::RedFlash => single_flash(RED)?,
        Mode::BlueFlash => single_flash(BLUE)?,
        Mode::YellowFlash => single_flash(YELLOW)?,
        Mode::RedSpinner => spinner(RED)?,
        Mode::BlueSpinner => spinner(BLUE)?,
        Mode::YellowSpinner => spinner(YELLOW)?,
    };

    Ok(Some(renderer))
}

/// Bakes two ungated flashes played back to back.
fn two_color_flash<const BAKE: usize>(
    first: Color,
    second: Color,
    config: &ShowConfig,
) -> Result<Bake<BAKE>, BakeError> {
    let sequence = Concatenate::new((
        Flash::new(ConstantColor(first)).with_d(1.0),
        Flash::new(ConstantColor(second)).with_d(1.0),
    ))
    .speed(config.flash_speed);

    let baked = sequence.bake::<BAKE>(config.bake_steps, 1)?;

    #[cfg(feature = "defmt")]
    defmt::debug!("baked {} time steps", baked.t_steps());

    Ok(baked)
}

/// How soon the show wants to be ticked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameTiming {
    /// Animating. Tick again at your frame rate.
    Continuous,

    /// Off. Tick again after this delay.
    Delay(Millis),
}

/// Per-tick state of the light show.
///
/// Owns the current mode and its renderer; the renderer is rebuilt only when
/// the requested mode changes.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared sink
/// * `S` - Pixel sink type
/// * `BAKE` - Cache capacity for baked animations (at least `bake_steps`)
pub struct Show<'a, S: PixelSink, const BAKE: usize> {
    sink: &'a RefCell<S>,
    config: ShowConfig,
    mode: Mode,
    renderer: Option<ModeRenderer<'a, S, BAKE>>,
}

impl<'a, S: PixelSink, const BAKE: usize> Show<'a, S, BAKE> {
    /// Creates a show in [`Mode::Off`].
    pub fn new(sink: &'a RefCell<S>, config: ShowConfig) -> Self {
        Self {
            sink,
            config,
            mode: Mode::Off,
            renderer: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    /// Returns true if a renderer is active.
    pub fn is_animating(&self) -> bool {
        self.renderer.is_some()
    }

    /// Switches to `mode`, rebuilding the renderer if the mode changed.
    ///
    /// Returns whether the mode changed. On error the previous mode and
    /// renderer stay in place.
    pub fn select(&mut self, mode: Mode) -> Result<bool, ShowError> {
        if mode == self.mode {
            return Ok(false);
        }

        let renderer = renderer_for(mode, self.sink, &self.config)?;
        self.renderer = renderer;
        self.mode = mode;

        #[cfg(feature = "defmt")]
        defmt::info!("mode changed to {}", mode);

        Ok(true)
    }

    /// Runs one tick: selects `mode`, draws the frame at `t` and flushes.
    ///
    /// When off, blanks the sink instead of rendering.
    pub fn tick(&mut self, mode: Mode, t: f32) -> Result<FrameTiming, ShowError> {
        self.select(mode)?;

        match self.renderer.as_mut() {
            Some(renderer) => {
                renderer.render(t)?;
                self.sink.borrow_mut().flush();
                Ok(FrameTiming::Continuous)
            }
            None => {
                let mut sink = self.sink.borrow_mut();
                sink.fill(PIXEL_OFF);
                sink.flush();
                Ok(FrameTiming::Delay(IDLE_DELAY))
            }
        }
    }
}
