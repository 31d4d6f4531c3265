//! Expansion of an expression tree back into pattern text
//!
//! A quantified group `G{m,M}` is written out as `m` plain copies of `G`
//! followed by `M - m` copies each marked optional with `?`. A backtracking
//! engine keeps only the last capture per capturing group, so giving every
//! repetition its own copy gives it its own capture slot. Optional copies
//! that do not participate in a match leave their slot empty.
//!
//! Unbounded quantifiers (`*`, `+`, `{m,}`) use the ceiling as their upper
//! bound. When the upper bound is below the lower bound no optional copies
//! are written. Explicit bounds are taken as written, so the size of the
//! output is checked against a limit before any copies are made.

use crate::alias::AliasRegistry;
use crate::ast::{Group, Node};
use crate::error::{ExpandError, Result};

/// Default upper bound substituted for unbounded quantifiers
pub const DEFAULT_CEILING: usize = 12;

/// Default limit on the size of the expanded pattern, in bytes
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Serializes expression trees, expanding quantified groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    /// Upper bound used for unbounded quantifiers
    pub ceiling: usize,
    /// Wrap each expanded alias in a named group called after the alias
    pub named_alias_groups: bool,
    /// Largest expanded pattern, in bytes, the compiler will produce
    pub size_limit: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(DEFAULT_CEILING)
    }
}

impl Compiler {
    /// Create a compiler with the given ceiling
    pub fn new(ceiling: usize) -> Self {
        Compiler {
            ceiling,
            named_alias_groups: false,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    /// Create a compiler taking its alias settings from `registry`
    pub fn for_registry(registry: &AliasRegistry, ceiling: usize) -> Self {
        Compiler {
            named_alias_groups: registry.named_alias_groups(),
            ..Compiler::new(ceiling)
        }
    }

    /// Compile a tree into expanded pattern text
    ///
    /// # Errors
    /// Returns [`ExpandError::OutputTooLarge`] if the expansion would exceed
    /// `size_limit`, and [`ExpandError::InvalidAliasName`] if an alias that
    /// starts with a digit has to be wrapped in a named group.
    pub fn compile(&self, nodes: &[Node]) -> Result<String> {
        let mut out = String::new();
        self.emit_all(nodes, &mut out)?;
        Ok(out)
    }

    fn emit_all(&self, nodes: &[Node], out: &mut String) -> Result<()> {
        for node in nodes {
            self.emit(node, out)?;
        }
        Ok(())
    }

    fn emit(&self, node: &Node, out: &mut String) -> Result<()> {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::AliasRef { name, resolved } if self.named_alias_groups => {
                // Group names may not start with a digit.
                if name.starts_with(|c: char| c.is_ascii_digit()) {
                    return Err(ExpandError::InvalidAliasName(name.clone()));
                }
                out.push_str("(?<");
                out.push_str(name);
                out.push('>');
                self.emit_all(resolved, out)?;
                out.push(')');
            }
            Node::AliasRef { resolved, .. } => self.emit_all(resolved, out)?,
            Node::Group(group) => self.emit_group(group, out)?,
        }
        Ok(())
    }

    fn emit_group(&self, group: &Group, out: &mut String) -> Result<()> {
        let mut copy = group.opening.clone();
        self.emit_all(&group.body, &mut copy)?;
        copy.push(')');

        let Some(repeat) = group.repeat else {
            out.push_str(&copy);
            return Ok(());
        };

        let max = repeat.max.resolve(self.ceiling);
        let optional = max.saturating_sub(repeat.min);
        let needed = copy
            .len()
            .checked_mul(repeat.min)
            .zip((copy.len() + 1).checked_mul(optional))
            .and_then(|(mandatory, optional)| mandatory.checked_add(optional))
            .and_then(|len| len.checked_add(out.len()))
            .filter(|&len| len <= self.size_limit)
            .ok_or(ExpandError::OutputTooLarge {
                limit: self.size_limit,
            })?;
        out.reserve(needed - out.len());

        for _ in 0..repeat.min {
            out.push_str(&copy);
        }
        for _ in 0..optional {
            out.push_str(&copy);
            out.push('?');
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Bound, Repeat};
    use crate::lexer::GroupKind;

    fn x_group(repeat: Repeat) -> Node {
        Node::repeated(GroupKind::Capturing, "(", vec![Node::literal("x")], repeat)
    }

    #[test]
    fn test_literals_copied() {
        let nodes = vec![Node::literal("a"), Node::literal(r"\.b")];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), r"a\.b");
    }

    #[test]
    fn test_unquantified_group_once() {
        let nodes = vec![Node::group(GroupKind::Capturing, "(", vec![Node::literal("x")])];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "(x)");
    }

    #[test]
    fn test_range_expansion() {
        let nodes = vec![x_group(Repeat::new(2, Bound::Exact(4)))];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "(x)(x)(x)?(x)?");
    }

    #[test]
    fn test_exact_expansion() {
        let nodes = vec![x_group(Repeat::new(3, Bound::Exact(3)))];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "(x)(x)(x)");
    }

    #[test]
    fn test_zero_repetitions() {
        let nodes = vec![Node::literal("a"), x_group(Repeat::new(0, Bound::Exact(0)))];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "a");
    }

    #[test]
    fn test_star_uses_ceiling() {
        let nodes = vec![x_group(Repeat::new(0, Bound::Unbounded))];
        assert_eq!(Compiler::new(2).compile(&nodes).unwrap(), "(x)?(x)?");
    }

    #[test]
    fn test_plus_uses_ceiling() {
        let nodes = vec![x_group(Repeat::new(1, Bound::Unbounded))];
        assert_eq!(Compiler::new(2).compile(&nodes).unwrap(), "(x)(x)?");
    }

    #[test]
    fn test_default_ceiling() {
        let nodes = vec![x_group(Repeat::new(0, Bound::Unbounded))];
        let out = Compiler::default().compile(&nodes).unwrap();
        assert_eq!(out, "(x)?".repeat(DEFAULT_CEILING));
    }

    #[test]
    fn test_min_above_ceiling() {
        let nodes = vec![x_group(Repeat::new(3, Bound::Unbounded))];
        assert_eq!(Compiler::new(2).compile(&nodes).unwrap(), "(x)(x)(x)");
    }

    #[test]
    fn test_max_below_min_gives_no_optional_copies() {
        let nodes = vec![x_group(Repeat::new(3, Bound::Exact(1)))];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "(x)(x)(x)");
    }

    #[test]
    fn test_opener_reproduced_for_every_copy() {
        let nodes = vec![Node::repeated(
            GroupKind::NonCapturing,
            "(?:",
            vec![Node::literal("ab")],
            Repeat::new(1, Bound::Exact(2)),
        )];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "(?:ab)(?:ab)?");
    }

    #[test]
    fn test_nested_expansion() {
        let inner = x_group(Repeat::new(1, Bound::Exact(2)));
        let nodes = vec![Node::repeated(
            GroupKind::Capturing,
            "(",
            vec![inner],
            Repeat::new(2, Bound::Exact(2)),
        )];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "((x)(x)?)((x)(x)?)");
    }

    #[test]
    fn test_alias_inlined() {
        let nodes = vec![Node::alias("d", vec![Node::literal(r"\d")])];
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), r"\d");
    }

    #[test]
    fn test_alias_named_group() {
        let nodes = vec![Node::alias("d", vec![Node::literal(r"\d")])];
        let compiler = Compiler {
            named_alias_groups: true,
            ..Compiler::default()
        };
        assert_eq!(compiler.compile(&nodes).unwrap(), r"(?<d>\d)");
    }

    #[test]
    fn test_for_registry_reads_switch() {
        let mut registry = AliasRegistry::new();
        registry.set_named_alias_groups(true);
        let compiler = Compiler::for_registry(&registry, 5);
        assert_eq!(compiler.ceiling, 5);
        assert!(compiler.named_alias_groups);
        assert_eq!(compiler.size_limit, DEFAULT_SIZE_LIMIT);
    }

    #[test]
    fn test_huge_exact_bound_rejected() {
        let nodes = vec![x_group(Repeat::new(usize::MAX, Bound::Exact(usize::MAX)))];
        assert_eq!(
            Compiler::default().compile(&nodes),
            Err(ExpandError::OutputTooLarge {
                limit: DEFAULT_SIZE_LIMIT
            })
        );
    }

    #[test]
    fn test_huge_ceiling_rejected() {
        let nodes = vec![x_group(Repeat::new(0, Bound::Unbounded))];
        let err = Compiler::new(usize::MAX).compile(&nodes).unwrap_err();
        assert!(matches!(err, ExpandError::OutputTooLarge { .. }));
    }

    #[test]
    fn test_size_limit_counts_nested_copies() {
        let inner = x_group(Repeat::new(2, Bound::Exact(2)));
        let nodes = vec![Node::repeated(
            GroupKind::Capturing,
            "(",
            vec![inner],
            Repeat::new(2, Bound::Exact(2)),
        )];
        let compiler = Compiler {
            size_limit: 16,
            ..Compiler::default()
        };
        assert_eq!(compiler.compile(&nodes).unwrap(), "((x)(x))((x)(x))");

        let compiler = Compiler {
            size_limit: 15,
            ..Compiler::default()
        };
        assert_eq!(
            compiler.compile(&nodes),
            Err(ExpandError::OutputTooLarge { limit: 15 })
        );
    }

    #[test]
    fn test_digit_alias_cannot_name_group() {
        let nodes = vec![Node::alias("1x", vec![Node::literal("a")])];
        let compiler = Compiler {
            named_alias_groups: true,
            ..Compiler::default()
        };
        assert_eq!(
            compiler.compile(&nodes),
            Err(ExpandError::InvalidAliasName("1x".to_string()))
        );
        // Without named groups the alias is simply inlined.
        assert_eq!(Compiler::default().compile(&nodes).unwrap(), "a");
    }
}
