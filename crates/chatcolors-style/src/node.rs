#![forbid(unsafe_code)]

//! Styled text trees.
//!
//! A [`StyledNode`] owns its content, its own (un-merged) [`Style`], and an
//! ordered list of children. Children are exclusively owned: the structure
//! is a strict tree and every rewrite produces new nodes.
//!
//! # Flattening
//!
//! [`StyledNode::flatten`] walks the tree depth-first, pre-order, and emits
//! one [`FlatRun`] per non-empty literal text. Each run carries the node's
//! *effective* style, i.e. its own style merged onto every ancestor's (see
//! [`Style::merge`]). Flattening discards tree shape; it exists for
//! scanning and for single-level reconstruction.

use crate::style::Style;

/// Content of a node before or after template expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// Plain text.
    Literal(String),
    /// A translation key with arguments, expanded by normalization.
    Templated(Template),
}

/// A translation key, optional fallback format, and positional arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub key: String,
    pub fallback: Option<String>,
    pub args: Vec<Arg>,
}

/// A template argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// A nested styled tree, spliced in place on expansion.
    Node(StyledNode),
    /// Any other value, carried as its string form.
    Opaque(String),
}

impl From<StyledNode> for Arg {
    fn from(node: StyledNode) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Opaque(value.to_owned())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Opaque(value)
    }
}

/// A node of a styled text tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledNode {
    pub content: Content,
    pub style: Style,
    pub children: Vec<StyledNode>,
}

/// Strip leading and trailing characters at or below U+0020 (space and
/// control characters), the way the host trims chat text. Other Unicode
/// whitespace such as U+00A0 is kept.
#[inline]
#[must_use]
pub fn trim_spaces(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

/// One contiguous span of text sharing a single effective style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatRun {
    pub text: String,
    pub style: Style,
}

impl FlatRun {
    #[must_use]
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// The run's text passed through [`trim_spaces`].
    #[inline]
    #[must_use]
    pub fn trimmed(&self) -> &str {
        trim_spaces(&self.text)
    }

    /// Rebuild a childless literal node from this run.
    #[must_use]
    pub fn into_node(self) -> StyledNode {
        StyledNode::literal(self.text).styled(self.style)
    }
}

impl StyledNode {
    /// Unstyled literal node without children.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            content: Content::Literal(text.into()),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    /// Empty literal, typically used as a container.
    #[must_use]
    pub fn empty() -> Self {
        Self::literal(String::new())
    }

    /// Templated node resolved through a language lookup on normalization.
    #[must_use]
    pub fn templated<I, A>(key: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        Self {
            content: Content::Templated(Template {
                key: key.into(),
                fallback: None,
                args: args.into_iter().map(Into::into).collect(),
            }),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    /// Set the fallback format of a templated node. No-op on literals.
    #[must_use]
    pub fn fallback(mut self, format: impl Into<String>) -> Self {
        if let Content::Templated(template) = &mut self.content {
            template.fallback = Some(format.into());
        }
        self
    }

    /// Replace this node's own style.
    #[must_use]
    pub fn styled(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: StyledNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children in order.
    #[must_use]
    pub fn with_children<I: IntoIterator<Item = StyledNode>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    /// Literal text of this node alone, if it is a literal.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Literal(text) => Some(text),
            Content::Templated(_) => None,
        }
    }

    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self.content, Content::Literal(_))
    }

    /// Copy of this node with the same content and style but no children.
    #[must_use]
    pub fn plain_copy(&self) -> Self {
        Self {
            content: self.content.clone(),
            style: self.style.clone(),
            children: Vec::new(),
        }
    }

    /// Flatten to effective-style runs, pre-order, skipping empty text.
    ///
    /// Templated content contributes no text; normalize first.
    #[must_use]
    pub fn flatten(&self) -> Vec<FlatRun> {
        let mut runs = Vec::new();
        self.flatten_into(&Style::new(), &mut runs);
        runs
    }

    fn flatten_into(&self, parent: &Style, runs: &mut Vec<FlatRun>) {
        let effective = self.style.merge(parent);
        if let Content::Literal(text) = &self.content {
            if !text.is_empty() {
                runs.push(FlatRun::new(text.clone(), effective.clone()));
            }
        }
        for child in &self.children {
            child.flatten_into(&effective, runs);
        }
    }

    /// Concatenated text of the whole tree.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        if let Content::Literal(text) = &self.content {
            out.push_str(text);
        }
        for child in &self.children {
            child.push_text(out);
        }
    }

    /// Number of nodes in the tree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

impl From<&str> for StyledNode {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for StyledNode {
    fn from(text: String) -> Self {
        Self::literal(text)
    }
}
