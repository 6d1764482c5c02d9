//! Recoloring a normalized message once its author is known.

use std::sync::OnceLock;

use chatcolors_style::{ClickAction, FlatRun, Rgb, Style, StyledNode};
use regex::Regex;
use tracing::{instrument, trace};

use crate::config::Config;

/// How a flattened run is treated by [`rewrite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// A chat-history date stamp; never touched.
    Timestamp,
    /// A lone `<` or `>`; always recolored.
    Bracket,
    /// The author's name; recolored only when names are colored.
    Name,
    /// Anything else; recolored when [`should_apply_color`] allows it.
    Other,
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("timestamp pattern compiles")
    })
}

/// Classify one run. Timestamps are only recognized when the chat-history
/// companion is active.
#[must_use]
pub fn classify(run: &FlatRun, name: &str, timestamps_active: bool) -> RunKind {
    if timestamps_active && is_timestamp(&run.style) {
        return RunKind::Timestamp;
    }
    let trimmed = run.trimmed();
    if trimmed == "<" || trimmed == ">" {
        RunKind::Bracket
    } else if trimmed == name || run.style.insertion.as_deref() == Some(name) {
        RunKind::Name
    } else {
        RunKind::Other
    }
}

fn is_timestamp(style: &Style) -> bool {
    matches!(
        &style.click_action,
        Some(ClickAction::SuggestCommand(command)) if timestamp_pattern().is_match(command)
    )
}

/// Whether a run with `style` may take the author's color.
#[must_use]
pub fn should_apply_color(style: &Style, config: &Config) -> bool {
    config.override_all_colors || !style.has_significant_color()
}

/// Rebuild `normalized` with the author's color applied.
///
/// With both a name and a color the tree is flattened and every run is
/// classified and either recolored or kept; the result is an empty root
/// carrying the original root style with the runs as children. Without
/// them the tree is copied as-is through [`apply_color_to_empty`].
#[must_use]
#[instrument(level = "trace", skip_all, fields(name = ?name, color = ?color))]
pub fn rewrite(
    normalized: &StyledNode,
    color: Option<Rgb>,
    name: Option<&str>,
    config: &Config,
    timestamps_active: bool,
) -> StyledNode {
    let (Some(name), Some(color)) = (name, color) else {
        return apply_color_to_empty(normalized, None, false);
    };

    let runs = normalized.flatten().into_iter().map(|run| {
        let kind = classify(&run, name, timestamps_active);
        let recolor = match kind {
            RunKind::Timestamp => false,
            RunKind::Bracket => true,
            RunKind::Name => config.color_names,
            RunKind::Other => should_apply_color(&run.style, config),
        };
        trace!(text = %run.text, ?kind, recolor, "run classified");
        if recolor {
            FlatRun::new(run.text, run.style.with_color(color)).into_node()
        } else {
            run.into_node()
        }
    });

    StyledNode::empty()
        .styled(normalized.style.clone())
        .with_children(runs)
}

/// Copy `node`, giving `color` to every node that has no significant color
/// of its own and no significantly colored ancestor.
///
/// `parent_has_color` seeds the ancestor check for the root.
#[must_use]
pub fn apply_color_to_empty(
    node: &StyledNode,
    color: Option<Rgb>,
    parent_has_color: bool,
) -> StyledNode {
    let has_color = node.style.has_significant_color();
    let mut copy = node.plain_copy();
    if let Some(color) = color {
        if !has_color && !parent_has_color {
            copy.style = node.style.with_color(color);
        }
    }
    copy.children = node
        .children
        .iter()
        .map(|child| apply_color_to_empty(child, color, parent_has_color || has_color))
        .collect();
    copy
}
