//! Legacy inline format codes.
//!
//! A code is the section sign followed by one character:
//!
//! | Code | Effect |
//! |------|--------|
//! | `0`-`9`, `a`-`f` | set color, clearing all emphasis |
//! | `k` | obfuscated |
//! | `l` | bold |
//! | `m` | strikethrough |
//! | `n` | underline |
//! | `o` | italic |
//! | `r` | reset everything |
//!
//! Codes are lowercase only; `§L` or `§C` is an unknown code. Unknown
//! codes are swallowed without effect, matching how the host hides them
//! from view.

use chatcolors_style::{LegacyColor, Style, StyleFlags, StyledNode};

/// The format-code marker.
pub const SECTION_SIGN: char = '§';

/// Whether `text` contains any format-code marker.
#[inline]
#[must_use]
pub fn contains_codes(text: &str) -> bool {
    text.contains(SECTION_SIGN)
}

/// Remove every marker together with the character after it.
///
/// Invalid codes are removed as well, since they are hidden when drawn.
#[must_use]
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == SECTION_SIGN {
            chars.next();
        } else {
            out.push(ch);
        }
    }
    out
}

/// Accumulated effect of the codes seen so far.
#[derive(Debug, Clone, Copy, Default)]
struct CodeState {
    color: Option<LegacyColor>,
    attrs: StyleFlags,
}

impl CodeState {
    fn style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style = style.color(color);
        }
        if !self.attrs.is_empty() {
            style = style.attrs(self.attrs);
        }
        style
    }

    fn apply(&mut self, code: char) {
        if let Some(color) = LegacyColor::from_code(code) {
            *self = Self {
                color: Some(color),
                attrs: StyleFlags::NONE,
            };
            return;
        }
        if code == 'r' {
            *self = Self::default();
        } else if let Some(flag) = StyleFlags::from_code(code) {
            self.attrs.insert(flag);
        }
    }
}

/// Split `text` into literal runs styled by the codes preceding them.
///
/// Each code affects only the text after it. Runs carry only what the
/// codes set; they inherit everything else from their eventual parent.
#[must_use]
pub fn parse_codes(text: &str) -> Vec<StyledNode> {
    let mut runs = Vec::new();
    let mut state = CodeState::default();
    let mut pending = String::new();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != SECTION_SIGN {
            pending.push(ch);
            continue;
        }
        if !pending.is_empty() {
            runs.push(StyledNode::literal(std::mem::take(&mut pending)).styled(state.style()));
        }
        if let Some(code) = chars.next() {
            state.apply(code);
        }
    }
    if !pending.is_empty() {
        runs.push(StyledNode::literal(pending).styled(state.style()));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatcolors_style::Rgb;

    fn texts(runs: &[StyledNode]) -> Vec<&str> {
        runs.iter().filter_map(StyledNode::text).collect()
    }

    #[test]
    fn strip_removes_codes_and_invalid_codes() {
        assert_eq!(strip_codes("§aHi §lthere§z!§"), "Hi there!");
        assert_eq!(strip_codes("plain"), "plain");
        assert!(contains_codes("x§r"));
        assert!(!contains_codes("x"));
    }

    #[test]
    fn code_affects_following_text_only() {
        let runs = parse_codes("a§cb");
        assert_eq!(texts(&runs), ["a", "b"]);
        assert_eq!(runs[0].style, Style::new());
        assert_eq!(runs[1].style.color, Some(LegacyColor::Red.to_rgb()));
    }

    #[test]
    fn color_resets_emphasis() {
        let runs = parse_codes("§l§obold§9blue");
        assert!(runs[0].style.has_attr(StyleFlags::BOLD));
        assert!(runs[0].style.has_attr(StyleFlags::ITALIC));
        assert_eq!(runs[1].style.attrs, None);
        assert_eq!(runs[1].style.color, Some(Rgb::from_u32(0x5555FF)));
    }

    #[test]
    fn emphasis_keeps_color() {
        let runs = parse_codes("§6gold§ngold underlined");
        assert_eq!(runs[1].style.color, Some(Rgb::from_u32(0xFFAA00)));
        assert!(runs[1].style.has_attr(StyleFlags::UNDERLINE));
    }

    #[test]
    fn reset_clears_everything() {
        let runs = parse_codes("§c§kx§ry");
        assert_eq!(runs[1].style, Style::new());
    }

    #[test]
    fn unknown_codes_are_ignored() {
        let runs = parse_codes("§cred§zstill red");
        assert_eq!(texts(&runs), ["red", "still red"]);
        assert_eq!(runs[1].style.color, Some(LegacyColor::Red.to_rgb()));
    }

    #[test]
    fn uppercase_codes_are_ignored() {
        let runs = parse_codes("§Lx§Cy");
        assert_eq!(texts(&runs), ["x", "y"]);
        assert_eq!(runs[0].style, Style::new());
        assert_eq!(runs[1].style, Style::new());

        let runs = parse_codes("§cred§Rstill red§Kx");
        assert_eq!(runs[1].style.color, Some(LegacyColor::Red.to_rgb()));
        assert_eq!(runs[2].style.attrs, None);
    }

    #[test]
    fn trailing_marker_is_dropped() {
        assert_eq!(texts(&parse_codes("end§")), ["end"]);
        assert!(parse_codes("§a").is_empty());
    }

    #[test]
    fn all_emphasis_codes() {
        let runs = parse_codes("§k§l§m§n§ox");
        let style = &runs[0].style;
        for flag in [
            StyleFlags::OBFUSCATED,
            StyleFlags::BOLD,
            StyleFlags::STRIKETHROUGH,
            StyleFlags::UNDERLINE,
            StyleFlags::ITALIC,
        ] {
            assert!(style.has_attr(flag));
        }
    }
}
