//! Template expansion and format-code conversion over whole trees.
//!
//! # Invariants
//!
//! 1. **No templated content survives**: every `Templated` node in the
//!    input, including ones nested in arguments, becomes a literal.
//! 2. **No markers survive**: literal text containing `§` is replaced by
//!    an empty container whose children are the styled runs.
//! 3. **Order is preserved**: original children always follow the
//!    children generated for their parent, in their original order.
//! 4. **Untouched nodes stay untouched**: a literal without markers keeps
//!    its text and style; only its children are normalized.

use chatcolors_i18n::LanguageLookup;
use chatcolors_style::{Arg, Content, Style, StyledNode, Template};
use tracing::{debug, instrument, trace};

use crate::legacy::{contains_codes, parse_codes};
use crate::placeholder::parse_template;

/// Normalize `root` into a tree of literal nodes with structured styles.
///
/// The input is not modified; the result is a fresh tree.
#[instrument(skip_all, level = "trace")]
pub fn normalize(root: &StyledNode, language: &dyn LanguageLookup) -> StyledNode {
    normalize_node(root, language)
}

fn normalize_node(node: &StyledNode, language: &dyn LanguageLookup) -> StyledNode {
    let (text, generated) = match &node.content {
        Content::Templated(template) => expand(template, &node.style, language),
        Content::Literal(text) => (text.clone(), Vec::new()),
    };

    let children: Vec<StyledNode> = generated
        .iter()
        .chain(&node.children)
        .map(|child| normalize_node(child, language))
        .collect();

    if !contains_codes(&text) {
        return StyledNode {
            content: Content::Literal(text),
            style: node.style.clone(),
            children,
        };
    }

    let mut runs = parse_codes(&text);
    trace!(runs = runs.len(), "converted format codes");
    runs.extend(children);
    StyledNode {
        content: Content::Literal(String::new()),
        style: node.style.clone(),
        children: runs,
    }
}

/// Expand one template into `(own text, generated children)`.
///
/// A template without argument placeholders, or one the formatter would
/// reject, becomes its raw string as the node's own text.
fn expand(
    template: &Template,
    style: &Style,
    language: &dyn LanguageLookup,
) -> (String, Vec<StyledNode>) {
    let raw = language.get_or_default(&template.key, template.fallback.as_deref());
    let parsed = match parse_template(&raw, &template.args) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(key = %template.key, format = %raw, %err, "invalid format, keeping raw text");
            return (raw, Vec::new());
        }
    };
    if parsed.is_plain() {
        let text = parsed.segments.into_iter().next().unwrap_or_default();
        return (text, Vec::new());
    }

    trace!(
        key = %template.key,
        placeholders = parsed.args.len(),
        ?style,
        "expanding template"
    );
    let mut generated = Vec::with_capacity(parsed.segments.len() + parsed.args.len());
    let mut segments = parsed.segments.into_iter();
    for arg in parsed.args {
        let segment = segments.next().unwrap_or_default();
        if !segment.is_empty() {
            generated.push(StyledNode::literal(segment));
        }
        generated.push(match arg {
            Arg::Node(node) => node.clone(),
            Arg::Opaque(value) => StyledNode::literal(value.clone()),
        });
    }
    // Trailing segment is kept even when empty so the layout matches the format.
    generated.push(StyledNode::literal(segments.next().unwrap_or_default()));
    (String::new(), generated)
}
