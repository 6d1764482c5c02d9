//! The per-message pipeline: normalize, find the author, color, rewrite.

use chatcolors_i18n::LanguageLookup;
use chatcolors_style::StyledNode;
use chatcolors_text::normalize;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::extract::extract_name_with_source;
use crate::hue::derive_color;
use crate::rewrite::rewrite;
use crate::roster::Roster;

/// Everything one call to [`process`] reads.
#[derive(Clone, Copy)]
pub struct ProcessContext<'a> {
    pub config: &'a Config,
    pub roster: &'a Roster,
    /// Name of the local viewer, for self-authored message suppression.
    pub local_viewer: Option<&'a str>,
    pub language: &'a dyn LanguageLookup,
    /// Whether the chat-history companion is loaded, enabling timestamp
    /// preservation.
    pub timestamps_active: bool,
}

impl<'a> ProcessContext<'a> {
    #[must_use]
    pub fn new(config: &'a Config, roster: &'a Roster, language: &'a dyn LanguageLookup) -> Self {
        Self {
            config,
            roster,
            local_viewer: None,
            language,
            timestamps_active: false,
        }
    }

    #[must_use]
    pub fn with_local_viewer(mut self, name: Option<&'a str>) -> Self {
        self.local_viewer = name;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, active: bool) -> Self {
        self.timestamps_active = active;
        self
    }
}

impl std::fmt::Debug for ProcessContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessContext")
            .field("config", self.config)
            .field("roster", &self.roster.len())
            .field("local_viewer", &self.local_viewer)
            .field("timestamps_active", &self.timestamps_active)
            .finish_non_exhaustive()
    }
}

/// Recolor one incoming message.
///
/// Does not consult [`Config::mod_enabled`]; callers that honour the master
/// switch go through [`MessageHook`](crate::MessageHook). When the author is
/// the local viewer and self-authored coloring is off, `message` is returned
/// exactly as given, without normalization.
#[must_use]
#[instrument(level = "trace", skip_all)]
pub fn process(message: &StyledNode, ctx: &ProcessContext<'_>) -> StyledNode {
    let normalized = normalize(message, ctx.language);

    let Some((name, source)) = extract_name_with_source(&normalized, ctx.roster) else {
        debug!("no author found, copying message");
        return rewrite(&normalized, None, None, ctx.config, ctx.timestamps_active);
    };

    if !ctx.config.color_self_authored_messages && ctx.local_viewer == Some(name.as_str()) {
        debug!(name = %name, "self-authored message left untouched");
        return message.clone();
    }

    let color = derive_color(&name, ctx.roster, ctx.config);
    debug!(name = %name, ?source, %color, "recoloring message");
    rewrite(
        &normalized,
        Some(color),
        Some(&name),
        ctx.config,
        ctx.timestamps_active,
    )
}
