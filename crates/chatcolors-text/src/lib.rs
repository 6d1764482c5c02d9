#![forbid(unsafe_code)]

//! Text normalization for chatcolors.
//!
//! Incoming chat trees mix two representations that hide the real text:
//! templated nodes (a translation key plus arguments) and legacy inline
//! format codes (`§` followed by a code character). [`normalize`] rewrites
//! both into plain literal nodes with structured [`Style`]s so that later
//! passes can scan runs of text directly.
//!
//! [`Style`]: chatcolors_style::Style

pub mod legacy;
pub mod normalize;
pub mod placeholder;

pub use legacy::{SECTION_SIGN, contains_codes, parse_codes, strip_codes};
pub use normalize::normalize;
pub use placeholder::{FormatError, ParsedTemplate, parse_template};
