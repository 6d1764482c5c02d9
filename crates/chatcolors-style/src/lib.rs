#![forbid(unsafe_code)]

//! Styled text model for chatcolors.
//!
//! This crate provides:
//! - [`Rgb`] colors, the legacy 16-color palette, and HSB conversions
//! - [`Style`] with cascading (parent fills `None`) semantics
//! - [`StyledNode`] trees and their flattened [`FlatRun`] form

/// Colors, legacy palette, and HSB conversions.
pub mod color;
/// Styled text trees and flattening.
pub mod node;
/// Style types with cascading semantics.
pub mod style;

pub use color::{LegacyColor, Rgb, hsb_to_rgb, rgb_to_hsb, set_brightness};
pub use node::{Arg, Content, FlatRun, StyledNode, Template, trim_spaces};
pub use style::{ClickAction, HoverAction, StableId, Style, StyleFlags};
