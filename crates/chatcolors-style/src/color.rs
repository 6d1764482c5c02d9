//! 24-bit colors and the float HSB math used to derive them.
//!
//! The conversions here are bit-compatible with the host game's own
//! helpers: every intermediate is an `f32` and channels are truncated or
//! rounded exactly where the host does, so a color derived here matches
//! the one the host would draw for the same input.

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Default text color. Treated as "no real color" everywhere.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// A color is significant when present and not default white.
    #[must_use]
    pub fn is_significant(color: Option<Self>) -> bool {
        color.is_some_and(|c| c != Self::WHITE)
    }
}

impl From<u32> for Rgb {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.as_u32())
    }
}

/// The 16 legacy color codes (`0`-`9`, `a`-`f`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LegacyColor {
    Black = 0,
    DarkBlue = 1,
    DarkGreen = 2,
    DarkAqua = 3,
    DarkRed = 4,
    DarkPurple = 5,
    Gold = 6,
    Gray = 7,
    DarkGray = 8,
    Blue = 9,
    Green = 10,
    Aqua = 11,
    Red = 12,
    LightPurple = 13,
    Yellow = 14,
    White = 15,
}

const LEGACY_PALETTE: [Rgb; 16] = [
    Rgb::from_u32(0x000000), // Black
    Rgb::from_u32(0x0000AA), // Dark Blue
    Rgb::from_u32(0x00AA00), // Dark Green
    Rgb::from_u32(0x00AAAA), // Dark Aqua
    Rgb::from_u32(0xAA0000), // Dark Red
    Rgb::from_u32(0xAA00AA), // Dark Purple
    Rgb::from_u32(0xFFAA00), // Gold
    Rgb::from_u32(0xAAAAAA), // Gray
    Rgb::from_u32(0x555555), // Dark Gray
    Rgb::from_u32(0x5555FF), // Blue
    Rgb::from_u32(0x55FF55), // Green
    Rgb::from_u32(0x55FFFF), // Aqua
    Rgb::from_u32(0xFF5555), // Red
    Rgb::from_u32(0xFF55FF), // Light Purple
    Rgb::from_u32(0xFFFF55), // Yellow
    Rgb::from_u32(0xFFFFFF), // White
];

impl LegacyColor {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Black),
            1 => Some(Self::DarkBlue),
            2 => Some(Self::DarkGreen),
            3 => Some(Self::DarkAqua),
            4 => Some(Self::DarkRed),
            5 => Some(Self::DarkPurple),
            6 => Some(Self::Gold),
            7 => Some(Self::Gray),
            8 => Some(Self::DarkGray),
            9 => Some(Self::Blue),
            10 => Some(Self::Green),
            11 => Some(Self::Aqua),
            12 => Some(Self::Red),
            13 => Some(Self::LightPurple),
            14 => Some(Self::Yellow),
            15 => Some(Self::White),
            _ => None,
        }
    }

    /// Look up a legacy color by its code character, `0`-`9` or `a`-`f`.
    ///
    /// Uppercase letters are not color codes.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '0'..='9' => Self::from_u8(code as u8 - b'0'),
            'a'..='f' => Self::from_u8(code as u8 - b'a' + 10),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        LEGACY_PALETTE[self as usize]
    }
}

impl From<LegacyColor> for Rgb {
    fn from(color: LegacyColor) -> Self {
        color.to_rgb()
    }
}

/// Convert hue/saturation/brightness (each nominally `0.0..=1.0`) to RGB.
///
/// Only the fractional part of `hue` is used, so `1.0` and `0.0` name the
/// same color. Channels are rounded half-up.
#[must_use]
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb {
    let round = |v: f32| (v * 255.0 + 0.5) as u8;
    if saturation == 0.0 {
        let v = round(brightness);
        return Rgb::new(v, v, v);
    }
    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match h as u8 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };
    Rgb::new(round(r), round(g), round(b))
}

/// Convert RGB to `(hue, saturation, brightness)`, hue in `[0.0, 1.0)`.
#[must_use]
pub fn rgb_to_hsb(color: Rgb) -> (f32, f32, f32) {
    let (r, g, b) = (i32::from(color.r), i32::from(color.g), i32::from(color.b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let brightness = max as f32 / 255.0;
    let saturation = if max != 0 {
        (max - min) as f32 / max as f32
    } else {
        0.0
    };
    if saturation == 0.0 {
        return (0.0, saturation, brightness);
    }
    let hue = chroma_hue(r, g, b, max, min);
    (hue, saturation, brightness)
}

/// Re-derive a color at a new brightness, keeping hue and saturation.
///
/// Mirrors the host's per-player marker coloring: channels are truncated
/// (not rounded) and the hue sector wraps modulo 6.
#[must_use]
pub fn set_brightness(color: Rgb, brightness: f32) -> Rgb {
    let (hue, saturation, _) = rgb_to_hsb(color);
    let sector = (hue * 6.0) as i32 % 6;
    let f = hue * 6.0 - sector as f32;
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - f * saturation);
    let t = brightness * (1.0 - (1.0 - f) * saturation);
    let (r, g, b) = match sector {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };
    let channel = |v: f32| ((v * 255.0) as i32).clamp(0, 255) as u8;
    Rgb::new(channel(r), channel(g), channel(b))
}

fn chroma_hue(r: i32, g: i32, b: i32, max: i32, min: i32) -> f32 {
    let range = (max - min) as f32;
    let rc = (max - r) as f32 / range;
    let gc = (max - g) as f32 / range;
    let bc = (max - b) as f32 / range;
    let mut hue = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    hue /= 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }
    hue
}
