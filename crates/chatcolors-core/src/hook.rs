//! The single seam between a host's message display path and the engine.
//!
//! A host calls [`MessageHook::on_message`] with every incoming message and
//! displays whatever comes back.

use chatcolors_i18n::LanguageLookup;
use chatcolors_style::StyledNode;
use tracing::trace;

use crate::config::Config;
use crate::engine::{ProcessContext, process};
use crate::roster::RosterSource;

/// Owns the engine's collaborators and dispatches messages one at a time.
#[derive(Debug, Clone)]
pub struct MessageHook<L, R> {
    config: Config,
    language: L,
    roster: R,
    local_viewer: Option<String>,
    timestamps_active: bool,
}

impl<L, R> MessageHook<L, R>
where
    L: LanguageLookup,
    R: RosterSource,
{
    #[must_use]
    pub fn new(config: Config, language: L, roster: R) -> Self {
        Self {
            config,
            language,
            roster,
            local_viewer: None,
            timestamps_active: false,
        }
    }

    #[must_use]
    pub fn with_local_viewer(mut self, name: impl Into<String>) -> Self {
        self.local_viewer = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, active: bool) -> Self {
        self.timestamps_active = active;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swap in a reloaded configuration; applies from the next message.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Viewer identity can change when the host reconnects under another name.
    pub fn set_local_viewer(&mut self, name: Option<String>) {
        self.local_viewer = name;
    }

    /// Transform one message for display.
    ///
    /// Returns a copy of `message` when the engine is disabled. Otherwise
    /// the roster is snapshotted fresh for this message.
    #[must_use]
    pub fn on_message(&self, message: &StyledNode) -> StyledNode {
        if !self.config.mod_enabled {
            trace!("engine disabled, passing message through");
            return message.clone();
        }
        let roster = self.roster.snapshot();
        let ctx = ProcessContext::new(&self.config, &roster, &self.language)
            .with_local_viewer(self.local_viewer.as_deref())
            .with_timestamps(self.timestamps_active);
        process(message, &ctx)
    }
}
