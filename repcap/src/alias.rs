//! Alias registry and resolution stack
//!
//! An alias is a named sub-pattern that can be referenced from any pattern
//! as `@name`. Bodies are stored as raw text and parsed at every reference,
//! so changes to the registry only affect future expansions.
//!
//! The registry also carries the two switches that control how references
//! are handled: whether aliasing is enabled at all, and whether expanded
//! aliases are wrapped in a named group.

use std::collections::BTreeMap;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ExpandError, Result};
use crate::lexer::is_alias_char;

static GLOBAL: LazyLock<RwLock<AliasRegistry>> =
    LazyLock::new(|| RwLock::new(AliasRegistry::new()));

/// Registry of alias bodies keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasRegistry {
    aliases: BTreeMap<String, String>,
    aliasing: bool,
    named_groups: bool,
}

impl AliasRegistry {
    /// Create an empty registry with aliasing disabled
    pub fn new() -> Self {
        AliasRegistry::default()
    }

    /// The process-wide registry used by [`crate::transform`]
    pub fn global() -> &'static RwLock<AliasRegistry> {
        &GLOBAL
    }

    /// Lock the process-wide registry for reading
    ///
    /// A poisoned lock is recovered: registry updates are single map
    /// operations and cannot leave it half-written.
    pub fn read_global() -> RwLockReadGuard<'static, AliasRegistry> {
        GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the process-wide registry for writing
    pub fn write_global() -> RwLockWriteGuard<'static, AliasRegistry> {
        GLOBAL.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enable or disable alias substitution
    pub fn set_aliasing(&mut self, enabled: bool) {
        self.aliasing = enabled;
    }

    /// Whether `@name` references are substituted
    pub fn aliasing_enabled(&self) -> bool {
        self.aliasing
    }

    /// Wrap each expanded alias in a named group called after the alias
    ///
    /// Requires a host engine with named group support.
    pub fn set_named_alias_groups(&mut self, enabled: bool) {
        self.named_groups = enabled;
    }

    /// Whether expanded aliases are wrapped in named groups
    pub fn named_alias_groups(&self) -> bool {
        self.named_groups
    }

    /// Register or overwrite an alias
    ///
    /// # Errors
    /// Returns [`ExpandError::InvalidAliasName`] if `name` is empty or
    /// contains characters that cannot follow `@` in a pattern.
    ///
    /// Names starting with a digit are accepted, but cannot name a group:
    /// expanding one with named alias groups enabled fails with the same
    /// error.
    pub fn register(&mut self, name: impl Into<String>, body: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(is_alias_char) {
            return Err(ExpandError::InvalidAliasName(name));
        }
        self.aliases.insert(name, body.into());
        Ok(())
    }

    /// Remove an alias, returning its body if it was registered
    pub fn delete(&mut self, name: &str) -> Option<String> {
        self.aliases.remove(name)
    }

    /// Remove every alias; the switches are left as they are
    pub fn clear(&mut self) {
        self.aliases.clear();
    }

    /// Look up an alias body
    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// All registered aliases, ordered by name
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// The body a reference to `name` expands to, if substitution applies
    pub(crate) fn lookup(&self, name: &str) -> Option<&str> {
        if self.aliasing { self.get(name) } else { None }
    }
}

/// Aliases currently being expanded on one parse call path
///
/// Created fresh for every top-level parse and never shared between parses.
#[derive(Debug, Default)]
pub struct ResolutionStack {
    active: Vec<String>,
}

impl ResolutionStack {
    /// Create an empty stack
    pub fn new() -> Self {
        ResolutionStack::default()
    }

    /// Mark `name` as being resolved
    ///
    /// # Errors
    /// Returns [`ExpandError::CircularAliasReference`] if `name` is already
    /// being resolved further up the call path.
    pub fn enter(&mut self, name: &str) -> Result<()> {
        if self.active.iter().any(|active| active == name) {
            return Err(ExpandError::CircularAliasReference {
                name: name.to_string(),
                chain: self.active.clone(),
            });
        }
        self.active.push(name.to_string());
        Ok(())
    }

    /// Leave the innermost alias
    pub fn leave(&mut self) {
        self.active.pop();
    }

    /// Number of aliases being resolved
    pub fn depth(&self) -> usize {
        self.active.len()
    }
}
