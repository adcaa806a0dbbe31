//! Color values and color sources.
//!
//! [`Color`] is the working value of every animation: three linear `f32`
//! channels with an upper bound of 1.0 and no lower bound. Negative channels
//! are representable and propagate through scaling and mixing; they only get
//! clamped away when a color is converted to a [`Pixel`] for output.

use palette::{FromColor, Hsv, LinSrgb, Srgb};

/// An 8-bit RGB triple as written to a pixel sink.
pub type Pixel = LinSrgb<u8>;

/// Pixel value that turns an LED off.
pub const PIXEL_OFF: Pixel = LinSrgb::new(0, 0, 0);

/// A linear RGB color with channels clamped to at most 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    rgb: LinSrgb,
}

impl Color {
    /// Creates a color, clamping each channel to at most 1.0.
    ///
    /// Negative channels are accepted as-is.
    #[inline]
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            rgb: LinSrgb::new(red.min(1.0), green.min(1.0), blue.min(1.0)),
        }
    }

    /// Creates a color without clamping. Only for constants known to be in range.
    const fn from_raw(red: f32, green: f32, blue: f32) -> Self {
        Self {
            rgb: LinSrgb::new(red, green, blue),
        }
    }

    /// Creates a color from HSV components (hue in degrees).
    ///
    /// The resulting channels are used directly as linear intensities.
    pub fn hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let rgb = Srgb::from_color(Hsv::new(hue, saturation, value));
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    /// Creates a fully saturated, full-value color from a hue in degrees.
    pub fn hue(hue: f32) -> Self {
        Self::hsv(hue, 1.0, 1.0)
    }

    #[inline]
    pub fn red(&self) -> f32 {
        self.rgb.red
    }

    #[inline]
    pub fn green(&self) -> f32 {
        self.rgb.green
    }

    #[inline]
    pub fn blue(&self) -> f32 {
        self.rgb.blue
    }

    /// Multiplies every channel by `brightness` and re-applies the upper clamp.
    ///
    /// The factor itself is not clamped, so a negative brightness yields
    /// negative channels.
    #[inline]
    pub fn scale(self, brightness: f32) -> Self {
        Self::new(
            self.rgb.red * brightness,
            self.rgb.green * brightness,
            self.rgb.blue * brightness,
        )
    }

    /// Adds any number of colors channel by channel, clamping each sum to 1.0.
    ///
    /// This sums rather than averages: two half-bright reds mix to a full red.
    /// An empty input mixes to black.
    pub fn mix<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = Color>,
    {
        let (red, green, blue) = colors
            .into_iter()
            .fold((0.0, 0.0, 0.0), |(r, g, b), c| {
                (r + c.rgb.red, g + c.rgb.green, b + c.rgb.blue)
            });
        Self::new(red, green, blue)
    }

    /// Converts to an 8-bit pixel via `floor(255 * channel)`.
    ///
    /// Channels below zero (and NaN) become 0.
    #[inline]
    pub fn to_bytes(&self) -> Pixel {
        LinSrgb::new(
            channel_to_byte(self.rgb.red),
            channel_to_byte(self.rgb.green),
            channel_to_byte(self.rgb.blue),
        )
    }

    /// Returns true when no channel is above zero.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.rgb.red <= 0.0 && self.rgb.green <= 0.0 && self.rgb.blue <= 0.0
    }
}

impl From<Color> for LinSrgb {
    fn from(color: Color) -> Self {
        color.rgb
    }
}

impl From<LinSrgb> for Color {
    fn from(rgb: LinSrgb) -> Self {
        Self::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "r={},g={},b={}",
            self.rgb.red, self.rgb.green, self.rgb.blue
        )
    }
}

#[inline]
fn channel_to_byte(channel: f32) -> u8 {
    // `as` truncates toward zero, which is floor for the clamped range.
    (255.0 * channel).clamp(0.0, 255.0) as u8
}

pub const BLACK: Color = Color::from_raw(0.0, 0.0, 0.0);
pub const RED: Color = Color::from_raw(1.0, 0.0, 0.0);
pub const BLUE: Color = Color::from_raw(0.0, 0.0, 1.0);
pub const YELLOW: Color = Color::from_raw(1.0, 0.4, 0.0);

/// Something that yields a color on demand.
///
/// Leaf animations take their color from a source, which keeps "what color"
/// separate from "how it animates".
pub trait ColorSource {
    fn color(&self) -> Color;
}

/// A source that always yields the same color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantColor(pub Color);

impl ConstantColor {
    #[inline]
    pub fn new(color: Color) -> Self {
        Self(color)
    }
}

impl ColorSource for ConstantColor {
    #[inline]
    fn color(&self) -> Color {
        self.0
    }
}

impl<S: ColorSource + ?Sized> ColorSource for &S {
    #[inline]
    fn color(&self) -> Color {
        (**self).color()
    }
}
