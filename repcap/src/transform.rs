//! Pattern transformation entry points
//!
//! `transform` runs the whole pipeline: pattern text is tokenized and parsed
//! (resolving aliases), and the resulting tree is compiled back into text
//! with every quantified group expanded.

use std::borrow::Cow;

use crate::alias::AliasRegistry;
use crate::ast::to_source;
use crate::compiler::Compiler;
use crate::error::{ExpandError, Result};
use crate::parser::parse;

/// Something that can be rendered to regex source text
///
/// Compiled patterns are rendered to their source with their option flags
/// written inline, before being transformed.
pub trait PatternSource {
    /// The pattern's source text
    fn pattern_source(&self) -> Cow<'_, str>;
}

impl PatternSource for str {
    fn pattern_source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl PatternSource for String {
    fn pattern_source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Option flags a pattern is compiled with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    ignore_whitespace: bool,
}

impl PatternFlags {
    /// No flags set
    pub fn new() -> Self {
        PatternFlags::default()
    }

    /// Match letters regardless of case (`i`)
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// `^` and `$` match at line boundaries (`m`)
    pub fn multi_line(mut self, enabled: bool) -> Self {
        self.multi_line = enabled;
        self
    }

    /// `.` also matches `\n` (`s`)
    pub fn dot_matches_new_line(mut self, enabled: bool) -> Self {
        self.dot_matches_new_line = enabled;
        self
    }

    /// Ignore whitespace and allow `#` comments (`x`)
    pub fn ignore_whitespace(mut self, enabled: bool) -> Self {
        self.ignore_whitespace = enabled;
        self
    }

    /// The flags as an inline group such as `(?im)`, or empty if none are set
    pub fn inline_prefix(&self) -> String {
        let letters: String = [
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_matches_new_line, 's'),
            (self.ignore_whitespace, 'x'),
        ]
        .into_iter()
        .filter_map(|(set, letter)| set.then_some(letter))
        .collect();

        if letters.is_empty() {
            letters
        } else {
            format!("(?{})", letters)
        }
    }
}

/// A pattern compiled by the host engine together with its option flags
///
/// The host regex keeps only its pattern text, so the flags are recorded
/// here and written back inline when the pattern is transformed.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    flags: PatternFlags,
    host: fancy_regex::Regex,
}

impl CompiledPattern {
    /// Compile `pattern` with `flags`
    pub fn new(pattern: &str, flags: PatternFlags) -> Result<Self> {
        let host = fancy_regex::Regex::new(&format!("{}{}", flags.inline_prefix(), pattern))
            .map_err(|e| ExpandError::Compile(e.to_string()))?;
        Ok(CompiledPattern {
            pattern: pattern.to_string(),
            flags,
            host,
        })
    }

    /// The pattern as written, without flags
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The flags the pattern was compiled with
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// The compiled host-engine regex
    pub fn host(&self) -> &fancy_regex::Regex {
        &self.host
    }
}

impl PatternSource for CompiledPattern {
    fn pattern_source(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.host.as_str())
    }
}

impl<T: PatternSource + ?Sized> PatternSource for &T {
    fn pattern_source(&self) -> Cow<'_, str> {
        (**self).pattern_source()
    }
}

/// Transform a pattern using aliases from the process-wide registry
///
/// The registry stays read-locked for the whole call, so concurrent
/// registrations never show up half-way through a resolution.
///
/// # Example
/// ```
/// use repcap::transform;
///
/// let result = transform("(x){2,4}", repcap::DEFAULT_CEILING).unwrap();
/// assert_eq!(result, "(x)(x)(x)?(x)?");
/// ```
pub fn transform<P: PatternSource + ?Sized>(pattern: &P, ceiling: usize) -> Result<String> {
    let registry = AliasRegistry::read_global();
    transform_with(pattern, &registry, ceiling)
}

/// Transform a pattern using aliases from `registry`
pub fn transform_with<P: PatternSource + ?Sized>(
    pattern: &P,
    registry: &AliasRegistry,
    ceiling: usize,
) -> Result<String> {
    let source = pattern.pattern_source();
    let tree = parse(&source, registry)?;
    Compiler::for_registry(registry, ceiling).compile(&tree)
}

/// Transform with verbose output for debugging
pub fn transform_debug<P: PatternSource + ?Sized>(
    pattern: &P,
    registry: &AliasRegistry,
    ceiling: usize,
) -> Result<TransformReport> {
    let source = pattern.pattern_source();
    let tree = parse(&source, registry)?;
    let output = Compiler::for_registry(registry, ceiling).compile(&tree)?;

    Ok(TransformReport {
        input: source.into_owned(),
        tree: format!("{:?}", tree),
        resolved: to_source(&tree),
        output,
    })
}

/// Result of a transformation with debug information
#[derive(Debug, Clone)]
pub struct TransformReport {
    /// The original input pattern
    pub input: String,
    /// The expression tree (debug format)
    pub tree: String,
    /// The tree rendered back to source, before expansion
    pub resolved: String,
    /// The expanded output
    pub output: String,
}

impl TransformReport {
    /// Print a formatted report of the transformation
    pub fn report(&self) {
        println!("Transformation Report");
        println!("=====================");
        println!("Input:  {}", self.input);
        println!("Tree:   {}", self.tree);
        println!("Source: {}", self.resolved);
        println!("Output: {}", self.output);
    }
}
