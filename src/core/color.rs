//! Normalized RGBA color value.
//!
//! Channels are `f32` in [0, 1]. Every constructor clamps, so a `Color` in
//! hand is always in range and the filter maps never need to re-check their
//! inputs.

use image::Rgba;
use serde::{Deserialize, Serialize};

/// Factor used by [`Color::saturate`]; saturation is divided by it.
const SATURATE_FACTOR: f32 = 0.7;

/// Immutable RGBA color with normalized channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorChannels")]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

/// Unchecked wire form of [`Color`]; converted through [`Color::rgba`].
#[derive(Deserialize)]
struct ColorChannels {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

impl From<ColorChannels> for Color {
    fn from(c: ColorChannels) -> Self {
        Color::rgba(c.red, c.green, c.blue, c.alpha)
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };

    /// Opaque white.
    pub const WHITE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    /// Opaque red, the default freehand stroke color.
    pub const RED: Color = Color {
        red: 1.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };

    /// Create an opaque color. Channels are clamped to [0, 1].
    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Create a color with alpha. Channels are clamped to [0, 1], NaN becomes 0.
    pub fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
            alpha: clamp_unit(alpha),
        }
    }

    pub fn red(&self) -> f32 {
        self.red
    }

    pub fn green(&self) -> f32 {
        self.green
    }

    pub fn blue(&self) -> f32 {
        self.blue
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sum of the three color channels, in [0, 3].
    pub fn channel_sum(&self) -> f32 {
        self.red + self.green + self.blue
    }

    /// Copy with the red channel replaced.
    pub fn with_red(&self, red: f32) -> Self {
        Self::rgba(red, self.green, self.blue, self.alpha)
    }

    /// Copy with the green channel replaced.
    pub fn with_green(&self, green: f32) -> Self {
        Self::rgba(self.red, green, self.blue, self.alpha)
    }

    /// Copy with the blue channel replaced.
    pub fn with_blue(&self, blue: f32) -> Self {
        Self::rgba(self.red, self.green, blue, self.alpha)
    }

    /// Copy with the alpha channel replaced.
    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// Complementary color; alpha is kept.
    pub fn invert(&self) -> Self {
        Self::rgba(1.0 - self.red, 1.0 - self.green, 1.0 - self.blue, self.alpha)
    }

    /// Luminance-weighted gray; alpha is kept.
    pub fn grayscale(&self) -> Self {
        let gray = 0.21 * self.red + 0.71 * self.green + 0.07 * self.blue;
        Self::rgba(gray, gray, gray, self.alpha)
    }

    /// More saturated version of this color.
    ///
    /// Saturation in HSB space is divided by 0.7 and capped at 1; hue and
    /// brightness are preserved.
    pub fn saturate(&self) -> Self {
        let (hue, saturation, brightness) = self.to_hsb();
        let saturation = (saturation / SATURATE_FACTOR).min(1.0);
        Self::from_hsb(hue, saturation, brightness, self.alpha)
    }

    /// Convert to (hue in degrees, saturation, brightness).
    pub fn to_hsb(&self) -> (f32, f32, f32) {
        let (r, g, b) = (self.red, self.green, self.blue);
        let cmax = r.max(g).max(b);
        let cmin = r.min(g).min(b);
        let brightness = cmax;
        let saturation = if cmax > 0.0 { (cmax - cmin) / cmax } else { 0.0 };

        if saturation == 0.0 {
            return (0.0, 0.0, brightness);
        }

        let span = cmax - cmin;
        let redc = (cmax - r) / span;
        let greenc = (cmax - g) / span;
        let bluec = (cmax - b) / span;
        let mut hue = if r == cmax {
            bluec - greenc
        } else if g == cmax {
            2.0 + redc - bluec
        } else {
            4.0 + greenc - redc
        };
        hue /= 6.0;
        if hue < 0.0 {
            hue += 1.0;
        }
        (hue * 360.0, saturation, brightness)
    }

    /// Build a color from (hue in degrees, saturation, brightness, alpha).
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        let saturation = clamp_unit(saturation);
        let brightness = clamp_unit(brightness);
        if saturation == 0.0 {
            return Self::rgba(brightness, brightness, brightness, alpha);
        }

        let hue = hue.rem_euclid(360.0) / 360.0;
        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::rgba(r, g, b, alpha)
    }

    /// Channels as an `image` pixel.
    pub fn to_rgba(&self) -> Rgba<f32> {
        Rgba([self.red, self.green, self.blue, self.alpha])
    }

    /// Read an `image` pixel, clamping out-of-range values.
    pub fn from_rgba(pixel: &Rgba<f32>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self::rgba(r, g, b, a)
    }

    /// Whether every channel is within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &Color, tolerance: f32) -> bool {
        (self.red - other.red).abs() <= tolerance
            && (self.green - other.green).abs() <= tolerance
            && (self.blue - other.blue).abs() <= tolerance
            && (self.alpha - other.alpha).abs() <= tolerance
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgba<f32>> for Color {
    fn from(pixel: Rgba<f32>) -> Self {
        Self::from_rgba(&pixel)
    }
}

impl From<Color> for Rgba<f32> {
    fn from(color: Color) -> Self {
        color.to_rgba()
    }
}
