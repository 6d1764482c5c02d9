#![forbid(unsafe_code)]

//! Style types for chat text with cascading semantics.

use tracing::{instrument, trace};
use uuid::Uuid;

use crate::color::Rgb;

/// Chat emphasis, one bit per legacy emphasis code.
///
/// Emphasis accumulates: a run is bold if it or any ancestor asks for bold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct StyleFlags(pub u8);

impl StyleFlags {
    pub const NONE: Self = Self(0);
    /// `§l`
    pub const BOLD: Self = Self(1);
    /// `§o`
    pub const ITALIC: Self = Self(1 << 1);
    /// `§n`
    pub const UNDERLINE: Self = Self(1 << 2);
    /// `§m`
    pub const STRIKETHROUGH: Self = Self(1 << 3);
    /// `§k`, drawn as constantly changing glyphs.
    pub const OBFUSCATED: Self = Self(1 << 4);

    /// The flag a lowercase emphasis code turns on.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'k' => Some(Self::OBFUSCATED),
            'l' => Some(Self::BOLD),
            'm' => Some(Self::STRIKETHROUGH),
            'n' => Some(Self::UNDERLINE),
            'o' => Some(Self::ITALIC),
            _ => None,
        }
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        *self = self.union(other);
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for StyleFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Persistent participant identifier, independent of display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StableId(pub Uuid);

impl StableId {
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Build from the two 64-bit halves (most significant first).
    #[must_use]
    pub const fn from_u64_pair(high: u64, low: u64) -> Self {
        Self(Uuid::from_u64_pair(high, low))
    }

    /// The host platform's 32-bit hash of this id: both halves xor-ed,
    /// then the upper and lower words of the result xor-ed.
    #[must_use]
    pub fn platform_hash(&self) -> i32 {
        let (high, low) = self.0.as_u64_pair();
        let hilo = high ^ low;
        ((hilo >> 32) as u32 ^ hilo as u32) as i32
    }
}

impl From<Uuid> for StableId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for StableId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Action performed when a run is clicked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClickAction {
    OpenUrl(String),
    RunCommand(String),
    SuggestCommand(String),
    ChangePage(u32),
    CopyToClipboard(String),
}

impl ClickAction {
    /// The command text for run/suggest actions.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::RunCommand(cmd) | Self::SuggestCommand(cmd) => Some(cmd),
            _ => None,
        }
    }
}

/// Tooltip shown when a run is hovered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverAction {
    ShowText(String),
    ShowItem { id: String, count: u32 },
    ShowEntity { name: Option<String>, id: StableId },
}

/// Run style with cascading semantics.
///
/// `None` fields inherit from the parent when a tree is flattened; see
/// [`Style::merge`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Text color.
    pub color: Option<Rgb>,
    /// Shadow color as packed ARGB.
    pub shadow_color: Option<u32>,
    /// Emphasis attributes (bold, italic, etc.).
    pub attrs: Option<StyleFlags>,
    pub click_action: Option<ClickAction>,
    pub hover_action: Option<HoverAction>,
    /// Text inserted into the input box on shift-click. The host sets
    /// this to the author's name on the name run of player messages.
    pub insertion: Option<String>,
}

impl Style {
    /// A style that sets nothing and inherits everything.
    #[inline]
    pub const fn new() -> Self {
        Self {
            color: None,
            shadow_color: None,
            attrs: None,
            click_action: None,
            hover_action: None,
            insertion: None,
        }
    }

    /// Set text color.
    #[inline]
    #[must_use]
    pub fn color<C: Into<Rgb>>(mut self, color: C) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Copy of this style with the color replaced.
    #[inline]
    #[must_use]
    pub fn with_color(&self, color: Rgb) -> Self {
        self.clone().color(color)
    }

    /// Set shadow color (packed ARGB).
    #[inline]
    #[must_use]
    pub const fn shadow_color(mut self, argb: u32) -> Self {
        self.shadow_color = Some(argb);
        self
    }

    /// Add bold attribute.
    #[inline]
    #[must_use]
    pub fn bold(self) -> Self {
        self.add_attr(StyleFlags::BOLD)
    }

    /// Add italic attribute.
    #[inline]
    #[must_use]
    pub fn italic(self) -> Self {
        self.add_attr(StyleFlags::ITALIC)
    }

    /// Add underline attribute.
    #[inline]
    #[must_use]
    pub fn underline(self) -> Self {
        self.add_attr(StyleFlags::UNDERLINE)
    }

    /// Add strikethrough attribute.
    #[inline]
    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.add_attr(StyleFlags::STRIKETHROUGH)
    }

    /// Add obfuscated attribute.
    #[inline]
    #[must_use]
    pub fn obfuscated(self) -> Self {
        self.add_attr(StyleFlags::OBFUSCATED)
    }

    #[inline]
    fn add_attr(mut self, flag: StyleFlags) -> Self {
        match &mut self.attrs {
            Some(attrs) => attrs.insert(flag),
            None => self.attrs = Some(flag),
        }
        self
    }

    /// Replace the emphasis flags.
    #[inline]
    #[must_use]
    pub const fn attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = Some(attrs);
        self
    }

    #[inline]
    #[must_use]
    pub fn click(mut self, action: ClickAction) -> Self {
        self.click_action = Some(action);
        self
    }

    #[inline]
    #[must_use]
    pub fn hover(mut self, action: HoverAction) -> Self {
        self.hover_action = Some(action);
        self
    }

    #[inline]
    #[must_use]
    pub fn insertion(mut self, text: impl Into<String>) -> Self {
        self.insertion = Some(text.into());
        self
    }

    /// Effective style of a node whose parent resolves to `parent`.
    ///
    /// Fields set on `self` win; unset ones are inherited. Emphasis flags
    /// accumulate down the tree, so a bold parent keeps an italic child bold.
    #[instrument(skip(self, parent), level = "trace")]
    pub fn merge(&self, parent: &Style) -> Style {
        trace!("inheriting parent style");
        Style {
            color: self.color.or(parent.color),
            shadow_color: self.shadow_color.or(parent.shadow_color),
            attrs: match (self.attrs, parent.attrs) {
                (Some(c), Some(p)) => Some(c.union(p)),
                (Some(c), None) => Some(c),
                (None, Some(p)) => Some(p),
                (None, None) => None,
            },
            click_action: self
                .click_action
                .clone()
                .or_else(|| parent.click_action.clone()),
            hover_action: self
                .hover_action
                .clone()
                .or_else(|| parent.hover_action.clone()),
            insertion: self.insertion.clone().or_else(|| parent.insertion.clone()),
        }
    }

    /// Whether no field is set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.shadow_color.is_none()
            && self.attrs.is_none()
            && self.click_action.is_none()
            && self.hover_action.is_none()
            && self.insertion.is_none()
    }

    #[inline]
    pub fn has_attr(&self, flag: StyleFlags) -> bool {
        self.attrs.is_some_and(|a| a.contains(flag))
    }

    /// Whether the color is present and not default white.
    #[inline]
    pub fn has_significant_color(&self) -> bool {
        Rgb::is_significant(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let s = Style::default();
        assert!(s.is_empty());
        assert_eq!(s, Style::new());
    }

    #[test]
    fn test_builder_pattern() {
        let s = Style::new()
            .color(Rgb::from_u32(0xFF0000))
            .bold()
            .italic()
            .insertion("Alice")
            .click(ClickAction::SuggestCommand("/msg Alice ".into()));

        assert_eq!(s.color, Some(Rgb::new(255, 0, 0)));
        assert!(s.has_attr(StyleFlags::BOLD));
        assert!(s.has_attr(StyleFlags::ITALIC));
        assert!(!s.has_attr(StyleFlags::UNDERLINE));
        assert_eq!(s.insertion.as_deref(), Some("Alice"));
        assert!(!s.is_empty());
    }

    #[test]
    fn test_all_attribute_builders() {
        let s = Style::new()
            .bold()
            .italic()
            .underline()
            .strikethrough()
            .obfuscated();
        for flag in [
            StyleFlags::BOLD,
            StyleFlags::ITALIC,
            StyleFlags::UNDERLINE,
            StyleFlags::STRIKETHROUGH,
            StyleFlags::OBFUSCATED,
        ] {
            assert!(s.has_attr(flag));
        }
    }

    #[test]
    fn test_with_color_leaves_original() {
        let base = Style::new().bold();
        let red = base.with_color(Rgb::new(255, 0, 0));
        assert_eq!(base.color, None);
        assert_eq!(red.color, Some(Rgb::new(255, 0, 0)));
        assert!(red.has_attr(StyleFlags::BOLD));
    }

    #[test]
    fn test_merge_child_wins_on_conflict() {
        let parent = Style::new().color(Rgb::from_u32(0xFF0000)).insertion("Parent");
        let child = Style::new().color(Rgb::from_u32(0x0000FF)).insertion("Child");
        let merged = child.merge(&parent);
        assert_eq!(merged.color, Some(Rgb::from_u32(0x0000FF)));
        assert_eq!(merged.insertion.as_deref(), Some("Child"));
    }

    #[test]
    fn test_merge_parent_fills_gaps() {
        let parent = Style::new()
            .color(Rgb::from_u32(0xFF0000))
            .hover(HoverAction::ShowText("hi".into()))
            .shadow_color(0xFF00_0000);
        let child = Style::new().bold();
        let merged = child.merge(&parent);
        assert_eq!(merged.color, Some(Rgb::from_u32(0xFF0000)));
        assert_eq!(merged.hover_action, Some(HoverAction::ShowText("hi".into())));
        assert_eq!(merged.shadow_color, Some(0xFF00_0000));
        assert!(merged.has_attr(StyleFlags::BOLD));
    }

    #[test]
    fn test_merge_attrs_combine() {
        let merged = Style::new().italic().merge(&Style::new().bold());
        assert!(merged.has_attr(StyleFlags::BOLD));
        assert!(merged.has_attr(StyleFlags::ITALIC));
    }

    #[test]
    fn test_significant_color() {
        assert!(!Style::new().has_significant_color());
        assert!(!Style::new().color(Rgb::WHITE).has_significant_color());
        assert!(Style::new().color(Rgb::from_u32(0x00AA00)).has_significant_color());
    }

    #[test]
    fn test_click_command() {
        assert_eq!(
            ClickAction::RunCommand("/tell Bob".into()).command(),
            Some("/tell Bob")
        );
        assert_eq!(ClickAction::OpenUrl("https://x".into()).command(), None);
        assert_eq!(ClickAction::ChangePage(2).command(), None);
    }

    #[test]
    fn test_stable_id_platform_hash() {
        let id: StableId = "069a79f4-44e9-4726-a5be-fca90e38aaf5".parse().unwrap();
        assert_eq!(id.platform_hash(), -369_792_882);
        assert_eq!(StableId::from_u64_pair(0, 0).platform_hash(), 0);
        assert_eq!(StableId::from_u64_pair(1 << 32, 0).platform_hash(), 1);
    }

    #[test]
    fn emphasis_accumulates_and_clears() {
        let mut flags = StyleFlags::BOLD | StyleFlags::ITALIC;
        assert!(flags.contains(StyleFlags::BOLD));
        flags.remove(StyleFlags::BOLD);
        assert!(!flags.contains(StyleFlags::BOLD));
        flags.insert(StyleFlags::OBFUSCATED);
        assert!(flags.contains(StyleFlags::OBFUSCATED | StyleFlags::ITALIC));
        assert!(StyleFlags::NONE.is_empty());
    }

    #[test]
    fn emphasis_codes_map_to_flags() {
        let codes: Vec<_> = "klmno".chars().filter_map(StyleFlags::from_code).collect();
        assert_eq!(
            codes,
            vec![
                StyleFlags::OBFUSCATED,
                StyleFlags::BOLD,
                StyleFlags::STRIKETHROUGH,
                StyleFlags::UNDERLINE,
                StyleFlags::ITALIC,
            ]
        );
        assert_eq!(StyleFlags::from_code('L'), None);
        assert_eq!(StyleFlags::from_code('r'), None);
    }
}
