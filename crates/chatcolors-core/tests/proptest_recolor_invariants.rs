//! Property-based invariant tests for the recoloring pipeline.
//!
//! 1. Content preservation: output runs equal the normalized input's runs
//!    in text and every style field except color.
//! 2. Name hues are deterministic and lie in `[0, 1)`.
//! 3. Id hues lie in `[0, 1)`.
//! 4. Idempotence: processing an already processed message changes nothing.
//! 5. Arbitrary format strings never abort processing.

use chatcolors_core::{Config, ProcessContext, Roster, hue_from_id, hue_from_name, process};
use chatcolors_i18n::Untranslated;
use chatcolors_style::{
    Arg, ClickAction, FlatRun, HoverAction, Rgb, StableId, Style, StyledNode,
};
use chatcolors_text::normalize;
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn alice() -> StableId {
    StableId::from_u64_pair(0xA11CE, 1)
}

fn bob() -> StableId {
    StableId::from_u64_pair(0xB0B, 2)
}

fn roster() -> Roster {
    [("Alice", alice()), ("Bob", bob())].into_iter().collect()
}

fn arb_config() -> impl Strategy<Value = Config> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(color_names, use_identity_color, override_all_colors)| Config {
            color_names,
            use_identity_color,
            override_all_colors,
            ..Config::default()
        },
    )
}

fn arb_color() -> impl Strategy<Value = Option<Rgb>> {
    prop_oneof![
        Just(None),
        Just(Some(Rgb::WHITE)),
        Just(Some(Rgb::from_u32(0xFF0000))),
        (0u32..=0xFF_FFFF).prop_map(|v| Some(Rgb::from_u32(v))),
    ]
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Alice".to_owned()),
        Just("Bob".to_owned()),
        "[A-Za-z0-9_]{1,16}",
    ]
}

fn arb_style() -> impl Strategy<Value = Style> {
    (
        arb_color(),
        any::<bool>(),
        proptest::option::of(arb_name()),
        proptest::option::of(arb_name()),
        proptest::option::of(prop_oneof![Just(alice()), Just(bob())]),
    )
        .prop_map(|(color, bold, insertion, command, entity)| {
            let mut style = Style::new();
            style.color = color;
            if bold {
                style = style.bold();
            }
            if let Some(insertion) = insertion {
                style = style.insertion(insertion);
            }
            if let Some(name) = command {
                style = style.click(ClickAction::SuggestCommand(format!("/tell {name}")));
            }
            if let Some(id) = entity {
                style = style.hover(HoverAction::ShowEntity { name: None, id });
            }
            style
        })
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<".to_owned()),
        Just(">".to_owned()),
        Just("> ".to_owned()),
        "[a-zA-Z <>]{0,10}",
        "[a-z ]{0,4}\u{a7}[0-9a-fk-orx][a-z ]{0,4}",
    ]
}

fn arb_template() -> impl Strategy<Value = StyledNode> {
    (
        "[a-z<> ]{0,4}(%s|%1\\$s|%2\\$s)?[a-z<> ]{0,4}(%s|%d)?[a-z ]{0,3}",
        proptest::collection::vec(arb_text(), 0..3),
        arb_style(),
    )
        .prop_map(|(format, args, style)| {
            let args = args.into_iter().map(|text| Arg::Node(StyledNode::literal(text)));
            StyledNode::templated("chat.type.text", args)
                .fallback(format)
                .styled(style)
        })
}

fn arb_tree() -> impl Strategy<Value = StyledNode> {
    let leaf = prop_oneof![
        3 => (arb_text(), arb_style()).prop_map(|(text, style)| StyledNode::literal(text).styled(style)),
        1 => arb_template(),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_text(), arb_style(), proptest::collection::vec(inner, 0..4)).prop_map(
            |(text, style, children)| {
                StyledNode::literal(text)
                    .styled(style)
                    .with_children(children)
            },
        )
    })
}

/// A `<name> body` message with optionally colored body runs.
fn arb_chat() -> impl Strategy<Value = StyledNode> {
    (
        arb_name(),
        proptest::collection::vec(("[a-z ]{1,10}", arb_color()), 0..4),
    )
        .prop_map(|(name, body)| {
            let mut message = StyledNode::empty()
                .child(StyledNode::literal("<"))
                .child(StyledNode::literal(name))
                .child(StyledNode::literal(">"));
            for (text, color) in body {
                let mut style = Style::new();
                style.color = color;
                message = message.child(StyledNode::literal(text).styled(style));
            }
            message
        })
}

fn without_color(runs: Vec<FlatRun>) -> Vec<FlatRun> {
    runs.into_iter()
        .map(|mut run| {
            run.style.color = None;
            run
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Content preservation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn only_colors_change(tree in arb_tree(), config in arb_config(), stamps in any::<bool>()) {
        let roster = roster();
        let ctx = ProcessContext::new(&config, &roster, &Untranslated).with_timestamps(stamps);
        let normalized = normalize(&tree, &Untranslated);
        let out = process(&tree, &ctx);
        prop_assert_eq!(out.plain_text(), normalized.plain_text());
        prop_assert_eq!(without_color(out.flatten()), without_color(normalized.flatten()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Hue range and determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn name_hue_in_range(name in any::<String>()) {
        let hue = hue_from_name(&name);
        prop_assert!((0.0..1.0).contains(&hue), "hue {} for {:?}", hue, name);
        prop_assert_eq!(hue.to_bits(), hue_from_name(&name).to_bits());
    }

    #[test]
    fn id_hue_in_range(msb in any::<u64>(), lsb in any::<u64>()) {
        let id = StableId::from_u64_pair(msb, lsb);
        let hue = hue_from_id(id);
        prop_assert!((0.0..1.0).contains(&hue), "hue {} for {}", hue, id);
        prop_assert_eq!(hue.to_bits(), hue_from_id(id).to_bits());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn processing_twice_changes_nothing(message in arb_chat(), config in arb_config()) {
        let roster = roster();
        let ctx = ProcessContext::new(&config, &roster, &Untranslated);
        let once = process(&message, &ctx);
        let twice = process(&once, &ctx);
        prop_assert_eq!(twice, once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Arbitrary formats
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn any_format_is_survivable(
        format in "[a-z%$<>0-9 .sdn]{0,16}",
        args in proptest::collection::vec("[a-z0-9]{0,3}", 0..3),
    ) {
        let config = Config::default();
        let roster = roster();
        let ctx = ProcessContext::new(&config, &roster, &Untranslated);
        let args = args.into_iter().map(Arg::Opaque);
        let message = StyledNode::templated("custom", args).fallback(format);
        let out = process(&message, &ctx);
        prop_assert_eq!(out.plain_text(), normalize(&message, &Untranslated).plain_text());
    }
}
