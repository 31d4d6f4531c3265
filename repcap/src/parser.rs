//! Parser for regex patterns
//!
//! A recursive descent parser with one token of lookahead that turns the
//! token stream into an expression tree:
//!
//!   sequence := item*
//!   item     := literal | escape | group quantifier? | alias
//!   group    := opener sequence ')'
//!
//! Alias references are resolved while parsing: the alias body is parsed by
//! a nested parser that shares the caller's resolution stack, so cycles are
//! detected across any nesting depth.

use crate::alias::{AliasRegistry, ResolutionStack};
use crate::ast::{Group, Node};
use crate::error::{ExpandError, Result};
use crate::lexer::{Lexer, Token};
use crate::quantifier;

/// Parser for regex patterns
pub struct Parser<'a, 's> {
    lexer: Lexer<'a>,
    current_token: Token,
    /// Byte offset of `current_token`
    token_start: usize,
    /// Offsets of the group openers enclosing the current position
    open_groups: Vec<usize>,
    registry: &'a AliasRegistry,
    stack: &'s mut ResolutionStack,
}

impl<'a, 's> Parser<'a, 's> {
    /// Create a new parser for `input`, resolving aliases from `registry`
    pub fn new(
        input: &'a str,
        registry: &'a AliasRegistry,
        stack: &'s mut ResolutionStack,
    ) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            token_start: 0,
            open_groups: Vec::new(),
            registry,
            stack,
        }
    }

    /// Advance to the next token
    fn advance(&mut self) {
        self.token_start = self.lexer.offset();
        self.current_token = self.lexer.next_token();
    }

    /// Parse the entire input and return the expression tree
    pub fn parse(&mut self) -> Result<Vec<Node>> {
        self.parse_sequence()
    }

    /// Parse items until end of input or the `)` closing the current group
    ///
    /// The closing `)` is left for the caller to consume.
    fn parse_sequence(&mut self) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            match &self.current_token {
                Token::Eof => {
                    return match self.open_groups.last() {
                        Some(&position) => Err(ExpandError::PrematureEndOfGroup { position }),
                        None => Ok(nodes),
                    };
                }
                Token::GroupClose => {
                    if self.open_groups.is_empty() {
                        return Err(ExpandError::UnbalancedGroupClose {
                            position: self.token_start,
                        });
                    }
                    return Ok(nodes);
                }
                Token::GroupOpen { kind, opening } => {
                    let group = Group {
                        kind: kind.clone(),
                        opening: opening.clone(),
                        body: Vec::new(),
                        repeat: None,
                    };
                    self.parse_group(group, &mut nodes)?;
                }
                Token::AliasSigil(name) => {
                    let name = name.clone();
                    self.advance();
                    let node = self.parse_alias(name)?;
                    push_node(&mut nodes, node);
                }
                Token::Escape(c) => {
                    let text = format!("\\{}", c);
                    self.advance();
                    push_literal(&mut nodes, &text);
                }
                // Quantifiers directly after a group are consumed by
                // `parse_group`; anything else is plain text.
                Token::Literal(text) | Token::Quantifier(text) => {
                    let text = text.clone();
                    self.advance();
                    push_literal(&mut nodes, &text);
                }
            }
        }
    }

    /// Parse the body of `group`, whose opener is the current token, and the
    /// quantifier following it
    fn parse_group(&mut self, mut group: Group, nodes: &mut Vec<Node>) -> Result<()> {
        self.open_groups.push(self.token_start);
        self.advance();
        group.body = self.parse_sequence()?;
        self.open_groups.pop();
        // `parse_sequence` only returns successfully inside a group on `)`.
        self.advance();

        if let Token::Quantifier(raw) = &self.current_token {
            let raw = raw.clone();
            let position = self.token_start;
            self.advance();
            match quantifier::resolve(&raw, position)? {
                Some(repeat) => group.repeat = Some(repeat),
                None => {
                    nodes.push(Node::Group(group));
                    push_literal(nodes, &raw);
                    return Ok(());
                }
            }
        }

        nodes.push(Node::Group(group));
        Ok(())
    }

    /// Resolve `@name`, or keep it as text if it does not name an alias
    fn parse_alias(&mut self, name: String) -> Result<Node> {
        let Some(body) = self.registry.lookup(&name) else {
            return Ok(Node::Literal(format!("@{}", name)));
        };

        self.stack.enter(&name)?;
        let resolved = Parser::new(body, self.registry, &mut *self.stack).parse();
        self.stack.leave();

        Ok(Node::AliasRef {
            name,
            resolved: resolved?,
        })
    }
}

/// Append literal text, merging with a preceding literal
fn push_literal(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Literal(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Literal(text.to_string()));
    }
}

fn push_node(nodes: &mut Vec<Node>, node: Node) {
    match node {
        Node::Literal(text) => push_literal(nodes, &text),
        node => nodes.push(node),
    }
}

/// Parse a pattern into an expression tree, resolving aliases from `registry`
pub fn parse(input: &str, registry: &AliasRegistry) -> Result<Vec<Node>> {
    let mut stack = ResolutionStack::new();
    let mut parser = Parser::new(input, registry, &mut stack);
    parser.parse()
}
