//! Repcap Core Library
//!
//! Rewrites quantified capturing groups so that every repetition gets its
//! own capture slot once the pattern runs on an ordinary backtracking
//! engine, and substitutes named pattern aliases (`@name`).
//!
//! ```
//! use repcap::{AliasRegistry, transform_with};
//!
//! let mut registry = AliasRegistry::new();
//! registry.set_aliasing(true);
//! registry.register("octet", r"\d{1,3}").unwrap();
//!
//! let expanded = transform_with(r"(@octet\.?){2}", &registry, 12).unwrap();
//! assert_eq!(expanded, r"(\d{1,3}\.?)(\d{1,3}\.?)");
//! ```

pub mod alias;
pub mod ast;
pub mod captures;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod quantifier;
pub mod transform;

use std::collections::BTreeMap;

pub use alias::{AliasRegistry, ResolutionStack};
pub use ast::{Bound, Group, Node, Repeat};
pub use captures::CaptureList;
pub use compiler::{Compiler, DEFAULT_CEILING, DEFAULT_SIZE_LIMIT};
pub use engine::Regex;
pub use error::{ExpandError, Result};
pub use lexer::{GroupKind, Lexer, Token};
pub use parser::{Parser, parse};
pub use transform::{
    CompiledPattern, PatternFlags, PatternSource, TransformReport, transform, transform_debug,
    transform_with,
};

/// Enable or disable alias substitution in the process-wide registry
pub fn set_aliasing(enabled: bool) {
    AliasRegistry::write_global().set_aliasing(enabled);
}

/// Whether the process-wide registry substitutes aliases
pub fn aliasing_enabled() -> bool {
    AliasRegistry::read_global().aliasing_enabled()
}

/// Wrap expanded aliases in named groups (process-wide registry)
pub fn set_named_alias_groups(enabled: bool) {
    AliasRegistry::write_global().set_named_alias_groups(enabled);
}

/// Register or overwrite an alias in the process-wide registry
pub fn register_alias(name: impl Into<String>, body: impl Into<String>) -> Result<()> {
    AliasRegistry::write_global().register(name, body)
}

/// Remove an alias from the process-wide registry
pub fn delete_alias(name: &str) -> Option<String> {
    AliasRegistry::write_global().delete(name)
}

/// Look up an alias in the process-wide registry
pub fn get_alias(name: &str) -> Option<String> {
    AliasRegistry::read_global().get(name).map(str::to_string)
}

/// Snapshot of every alias in the process-wide registry
pub fn list_aliases() -> BTreeMap<String, String> {
    AliasRegistry::read_global().all().clone()
}

/// Remove every alias from the process-wide registry
pub fn clear_aliases() {
    AliasRegistry::write_global().clear();
}
