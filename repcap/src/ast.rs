//! Expression tree for parsed patterns
//!
//! The tree only distinguishes what the expander needs: literal text that is
//! copied through, groups (with optional repetition bounds), and resolved
//! alias references. `Display` renders a tree back to its unexpanded source
//! form; expansion is done by [`crate::compiler::Compiler`].

use std::fmt;

use crate::lexer::GroupKind;

/// A node in the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Pattern text copied through unchanged
    Literal(String),

    /// A group, possibly quantified
    Group(Group),

    /// A reference to a registered alias, with the alias body already parsed
    AliasRef {
        /// The alias name
        name: String,
        /// The parsed alias body
        resolved: Vec<Node>,
    },
}

/// A group and its repetition bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// What the group introduces
    pub kind: GroupKind,
    /// The opener as written, reproduced for every emitted copy
    pub opening: String,
    /// The group's contents
    pub body: Vec<Node>,
    /// Repetition bounds; `None` means the group is emitted exactly once
    pub repeat: Option<Repeat>,
}

/// Repetition bounds taken from a group quantifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    /// Number of mandatory copies
    pub min: usize,
    /// Upper bound on copies
    pub max: Bound,
}

/// Upper repetition bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// At most this many copies
    Exact(usize),
    /// No upper bound in the source; the expansion ceiling applies
    Unbounded,
}

impl Bound {
    /// The concrete upper bound, substituting `ceiling` when unbounded
    pub fn resolve(self, ceiling: usize) -> usize {
        match self {
            Bound::Exact(max) => max,
            Bound::Unbounded => ceiling,
        }
    }
}

impl Repeat {
    /// Create a repeat from bounds
    pub fn new(min: usize, max: Bound) -> Self {
        Repeat { min, max }
    }
}

impl Node {
    /// Create a literal node
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal(text.into())
    }

    /// Create an unquantified group node
    pub fn group(kind: GroupKind, opening: impl Into<String>, body: Vec<Node>) -> Self {
        Node::Group(Group {
            kind,
            opening: opening.into(),
            body,
            repeat: None,
        })
    }

    /// Create a quantified group node
    pub fn repeated(
        kind: GroupKind,
        opening: impl Into<String>,
        body: Vec<Node>,
        repeat: Repeat,
    ) -> Self {
        Node::Group(Group {
            kind,
            opening: opening.into(),
            body,
            repeat: Some(repeat),
        })
    }

    /// Create an alias reference node
    pub fn alias(name: impl Into<String>, resolved: Vec<Node>) -> Self {
        Node::AliasRef {
            name: name.into(),
            resolved,
        }
    }
}

/// Render a sequence of nodes in source form
pub fn to_source(nodes: &[Node]) -> String {
    nodes.iter().map(|n| n.to_string()).collect()
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(text) => f.write_str(text),
            Node::Group(group) => write!(f, "{}", group),
            Node::AliasRef { name, .. } => write!(f, "@{}", name),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{})", self.opening, to_source(&self.body))?;
        if let Some(repeat) = self.repeat {
            write!(f, "{}", repeat)?;
        }
        Ok(())
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (0, Bound::Unbounded) => write!(f, "*"),
            (1, Bound::Unbounded) => write!(f, "+"),
            (min, Bound::Unbounded) => write!(f, "{{{},}}", min),
            (min, Bound::Exact(max)) if min == max => write!(f, "{{{}}}", min),
            (min, Bound::Exact(max)) => write!(f, "{{{},{}}}", min, max),
        }
    }
}
