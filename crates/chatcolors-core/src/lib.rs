#![forbid(unsafe_code)]

//! Author-aware recoloring of chat messages.
//!
//! [`process`] takes one styled message and returns a recolored copy:
//! templates and legacy format codes are normalized, the author's name is
//! located, a deterministic color is derived from the name (or the author's
//! stable id), and the message's uncolored runs take that color.
//!
//! Hosts normally wire a [`MessageHook`] into their display path, which
//! honours [`Config::mod_enabled`] and snapshots the [`Roster`] per message.
//!
//! # Example
//!
//! ```
//! use chatcolors_core::{Config, MessageHook, Roster};
//! use chatcolors_i18n::Untranslated;
//! use chatcolors_style::StyledNode;
//!
//! let hook = MessageHook::new(Config::default(), Untranslated, Roster::new());
//! let message = StyledNode::empty()
//!     .child(StyledNode::literal("<"))
//!     .child(StyledNode::literal("Alice"))
//!     .child(StyledNode::literal("> hello"));
//!
//! let colored = hook.on_message(&message);
//! assert_eq!(colored.plain_text(), "<Alice> hello");
//! assert!(colored.flatten().iter().all(|run| run.style.color.is_some()));
//! ```

pub mod config;
pub mod engine;
pub mod extract;
pub mod hook;
pub mod hue;
#[cfg(feature = "tracing-subscriber")]
pub mod logging;
pub mod rewrite;
pub mod roster;

pub use config::{Config, ConfigError};
pub use engine::{ProcessContext, process};
pub use extract::{NameSource, extract_name, extract_name_with_source};
pub use hook::MessageHook;
pub use hue::{color_from_hue, derive_color, hue_from_id, hue_from_name};
pub use rewrite::{RunKind, apply_color_to_empty, rewrite};
pub use roster::{Roster, RosterEntry, RosterSource};
