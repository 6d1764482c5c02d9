//! Deterministic per-author colors.
//!
//! A hue comes either from the author's name or, when identity coloring is
//! on and the roster knows the author's stable id, from that id. Either way
//! the display color is the hue at fixed saturation and full brightness.

use chatcolors_style::{Rgb, StableId, hsb_to_rgb, rgb_to_hsb, set_brightness};

use crate::config::Config;
use crate::roster::Roster;

/// Saturation of every derived display color.
pub const SATURATION: f32 = 0.60;
/// Brightness of every derived display color.
pub const BRIGHTNESS: f32 = 1.0;
/// Brightness applied to the id's raw color before its hue is read back.
pub const ID_BRIGHTNESS: f32 = 0.9;

/// 32-bit string hash over UTF-16 code units (`h = 31 * h + unit`, wrapping).
#[must_use]
pub fn platform_string_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Hue in `[0, 1)` derived from a display name.
#[must_use]
pub fn hue_from_name(name: &str) -> f32 {
    let bucket = platform_string_hash(name).rem_euclid(256);
    // 255 / 255 lands on 1.0, which is the same hue as 0.0.
    (bucket as f32 / 255.0).fract()
}

/// Hue in `[0, 1)` derived from a stable id, agreeing with the host's
/// per-player marker colors.
#[must_use]
pub fn hue_from_id(id: StableId) -> f32 {
    let raw = Rgb::from_u32(id.platform_hash() as u32 & 0x00FF_FFFF);
    let (hue, _, _) = rgb_to_hsb(set_brightness(raw, ID_BRIGHTNESS));
    hue
}

/// Display color for a hue.
#[must_use]
pub fn color_from_hue(hue: f32) -> Rgb {
    hsb_to_rgb(hue, SATURATION, BRIGHTNESS)
}

/// Display color for `name`, preferring its stable id when configured and known.
#[must_use]
pub fn derive_color(name: &str, roster: &Roster, config: &Config) -> Rgb {
    let hue = match roster.id_for_name(name) {
        Some(id) if config.use_identity_color => hue_from_id(id),
        _ => hue_from_name(name),
    };
    color_from_hue(hue)
}
