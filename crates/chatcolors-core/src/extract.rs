//! Locating the author's name inside a normalized message.
//!
//! Four strategies run in a fixed order and the first hit wins:
//!
//! 1. [`NameSource::Insertion`]: a node whose insertion hint is a known name.
//! 2. [`NameSource::ClickAction`]: the last word of a run/suggest command.
//! 3. [`NameSource::HoverEntity`]: an entity tooltip's name or stable id.
//! 4. [`NameSource::Brackets`]: the token inside `<`, `name`, `>...` runs.
//!
//! The first three walk nodes pre-order and only accept names present in
//! the roster. The bracket scan works on flattened runs and accepts any
//! non-empty token, as a loose last resort for unknown senders.

use chatcolors_style::{FlatRun, HoverAction, StyledNode, trim_spaces};
use tracing::trace;

use crate::roster::Roster;

/// Which strategy produced a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameSource {
    Insertion,
    ClickAction,
    HoverEntity,
    Brackets,
}

type Strategy = fn(&StyledNode, &Roster) -> Option<String>;

const STRATEGIES: [(NameSource, Strategy); 4] = [
    (NameSource::Insertion, find_by_insertion),
    (NameSource::ClickAction, find_by_click_action),
    (NameSource::HoverEntity, find_by_hover_entity),
    (NameSource::Brackets, find_by_brackets),
];

/// Find the author's name, if any strategy recognizes one.
#[must_use]
pub fn extract_name(root: &StyledNode, roster: &Roster) -> Option<String> {
    extract_name_with_source(root, roster).map(|(name, _)| name)
}

/// Like [`extract_name`], also reporting which strategy matched.
#[must_use]
pub fn extract_name_with_source(root: &StyledNode, roster: &Roster) -> Option<(String, NameSource)> {
    STRATEGIES.iter().find_map(|&(source, strategy)| {
        let name = strategy(root, roster).filter(|name| !name.is_empty())?;
        trace!(name = %name, ?source, "author name found");
        Some((name, source))
    })
}

/// Pre-order search over `node` and its descendants.
fn find_preorder<F>(node: &StyledNode, check: &F) -> Option<String>
where
    F: Fn(&StyledNode) -> Option<String>,
{
    check(node).or_else(|| {
        node.children
            .iter()
            .find_map(|child| find_preorder(child, check))
    })
}

fn find_by_insertion(root: &StyledNode, roster: &Roster) -> Option<String> {
    find_preorder(root, &|node: &StyledNode| {
        let insertion = node.style.insertion.as_deref()?;
        (!insertion.trim().is_empty() && roster.contains_name(insertion))
            .then(|| insertion.to_owned())
    })
}

fn find_by_click_action(root: &StyledNode, roster: &Roster) -> Option<String> {
    find_preorder(root, &|node: &StyledNode| {
        let command = node.style.click_action.as_ref()?.command()?;
        // Player-targeting commands end with the name: `/tell Bob`, `/msg Bob`.
        let token = trim_spaces(command.rsplit_once(' ').map_or(command, |(_, last)| last));
        roster.contains_name(token).then(|| token.to_owned())
    })
}

fn find_by_hover_entity(root: &StyledNode, roster: &Roster) -> Option<String> {
    find_preorder(root, &|node: &StyledNode| {
        let Some(HoverAction::ShowEntity { name, id }) = &node.style.hover_action else {
            return None;
        };
        if let Some(name) = name.as_deref().filter(|name| roster.contains_name(name)) {
            return Some(name.to_owned());
        }
        roster.name_for_id(*id).map(str::to_owned)
    })
}

fn find_by_brackets(root: &StyledNode, _roster: &Roster) -> Option<String> {
    bracketed_name(&root.flatten()).map(str::to_owned)
}

/// First `"<"`, token, `">..."` triple in `runs` (texts trimmed).
#[must_use]
pub fn bracketed_name(runs: &[FlatRun]) -> Option<&str> {
    runs.windows(3).find_map(|window| {
        let [open, name, close] = window else {
            return None;
        };
        let name = name.trimmed();
        (open.trimmed() == "<" && !name.is_empty() && close.trimmed().starts_with('>'))
            .then_some(name)
    })
}
