//! Lexer for tokenizing regex patterns
//!
//! The lexer does not interpret the pattern. It only splits it into the
//! units the expander cares about: escape pairs, group openers and closers,
//! quantifiers directly following a group, alias references, and runs of
//! everything else. Every input character ends up in exactly one token.

use std::fmt;

/// The kind of construct a group opener introduces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// Plain capturing group `(`
    Capturing,
    /// Non-capturing group `(?:`
    NonCapturing,
    /// Named capturing group `(?<name>`, `(?P<name>` or `(?'name'`
    Named(String),
    /// Positive lookahead `(?=`
    Lookahead,
    /// Negative lookahead `(?!`
    NegativeLookahead,
    /// Positive lookbehind `(?<=`
    Lookbehind,
    /// Negative lookbehind `(?<!`
    NegativeLookbehind,
    /// Atomic group `(?>`
    Atomic,
    /// Non-capturing group with scoped flags, e.g. `(?i:`
    Flags(String),
    /// Any other `(?` construct, kept verbatim
    Other,
}

impl GroupKind {
    /// Whether copies of this group each get their own capture slot
    pub fn is_capturing(&self) -> bool {
        matches!(self, GroupKind::Capturing | GroupKind::Named(_))
    }
}

/// A token in a regex pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A run of characters copied through unchanged
    Literal(String),
    /// A backslash and the character it escapes
    Escape(char),
    /// A group opener, with its exact source text
    GroupOpen {
        /// What the group introduces
        kind: GroupKind,
        /// The opener as written, e.g. `(?<year>`
        opening: String,
    },
    /// Group close `)`
    GroupClose,
    /// Raw quantifier text directly after a group close: `*`, `+` or `{...}`
    Quantifier(String),
    /// An `@` followed by an alias name
    AliasSigil(String),
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "literal `{}`", text),
            Token::Escape(c) => write!(f, "escape `\\{}`", c),
            Token::GroupOpen { opening, .. } => write!(f, "group `{}`", opening),
            Token::GroupClose => write!(f, "`)`"),
            Token::Quantifier(raw) => write!(f, "quantifier `{}`", raw),
            Token::AliasSigil(name) => write!(f, "alias `@{}`", name),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Check if a character may appear in an alias name
pub fn is_alias_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// Lexer for tokenizing regex patterns
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character
    position: usize,
    /// Set right after a `)`; quantifiers are only recognized here
    after_group_close: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input string
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            after_group_close: false,
        }
    }

    /// Byte offset of the next token
    pub fn offset(&self) -> usize {
        self.position
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consume `len` bytes and return them
    fn take(&mut self, len: usize) -> &'a str {
        let text = &self.input[self.position..self.position + len];
        self.position += len;
        text
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        let after_close = std::mem::take(&mut self.after_group_close);

        match self.peek() {
            None => Token::Eof,
            Some('\\') => self.read_escape(),
            Some('(') => self.read_group_open(),
            Some(')') => {
                self.bump();
                self.after_group_close = true;
                Token::GroupClose
            }
            Some(c @ ('*' | '+')) if after_close => {
                self.bump();
                Token::Quantifier(c.to_string())
            }
            Some('{') if after_close => self.read_brace_quantifier(),
            Some('@') => self.read_alias_sigil(),
            Some(_) => self.read_literal_run(),
        }
    }

    /// Read `\` and the escaped character; a trailing lone `\` stays literal
    fn read_escape(&mut self) -> Token {
        self.bump();
        match self.bump() {
            Some(c) => Token::Escape(c),
            None => Token::Literal("\\".to_string()),
        }
    }

    fn read_group_open(&mut self) -> Token {
        let rest = self.rest();
        let Some(after) = rest.strip_prefix("(?") else {
            self.bump();
            return Token::GroupOpen {
                kind: GroupKind::Capturing,
                opening: "(".to_string(),
            };
        };

        let fixed = [
            ("(?:", GroupKind::NonCapturing),
            ("(?=", GroupKind::Lookahead),
            ("(?!", GroupKind::NegativeLookahead),
            ("(?<=", GroupKind::Lookbehind),
            ("(?<!", GroupKind::NegativeLookbehind),
            ("(?>", GroupKind::Atomic),
        ];
        for (opening, kind) in fixed {
            if rest.starts_with(opening) {
                return self.group_open(kind, opening.len());
            }
        }

        if after.starts_with('#') {
            // Comment: literal up to and including the closing paren.
            let len = rest.find(')').map_or(rest.len(), |i| i + 1);
            return Token::Literal(self.take(len).to_string());
        }

        for (prefix, terminator) in [("<", '>'), ("P<", '>'), ("'", '\'')] {
            if let Some(name_start) = after.strip_prefix(prefix)
                && let Some(end) = name_start.find(terminator)
            {
                let name = &name_start[..end];
                if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    let len = 2 + prefix.len() + end + 1;
                    return self.group_open(GroupKind::Named(name.to_string()), len);
                }
            }
        }

        let flags_len = after
            .find(|c: char| !(c.is_ascii_alphabetic() || c == '-'))
            .unwrap_or(after.len());
        if flags_len > 0 {
            match after[flags_len..].chars().next() {
                // Inline flag setting such as `(?i)`: passed through as text.
                Some(')') => return Token::Literal(self.take(2 + flags_len + 1).to_string()),
                Some(':') => {
                    let flags = after[..flags_len].to_string();
                    return self.group_open(GroupKind::Flags(flags), 2 + flags_len + 1);
                }
                _ => {}
            }
        }

        self.group_open(GroupKind::Other, 2)
    }

    fn group_open(&mut self, kind: GroupKind, len: usize) -> Token {
        let opening = self.take(len).to_string();
        Token::GroupOpen { kind, opening }
    }

    /// Read `{...}` up to and including `}`, or to the end of input
    fn read_brace_quantifier(&mut self) -> Token {
        let rest = self.rest();
        let len = rest.find('}').map_or(rest.len(), |i| i + 1);
        Token::Quantifier(self.take(len).to_string())
    }

    fn read_alias_sigil(&mut self) -> Token {
        let name_start = self.position + 1;
        let name_len = self.input[name_start..]
            .find(|c: char| !is_alias_char(c))
            .unwrap_or(self.input.len() - name_start);

        if name_len == 0 {
            self.bump();
            return Token::Literal("@".to_string());
        }

        let name = self.take(1 + name_len)[1..].to_string();
        Token::AliasSigil(name)
    }

    /// Read a maximal run of plain text, including whole character classes
    fn read_literal_run(&mut self) -> Token {
        let start = self.position;
        while let Some(c) = self.peek() {
            match c {
                '(' | ')' | '\\' | '@' => break,
                '[' => self.skip_char_class(),
                _ => {
                    self.bump();
                }
            }
        }
        Token::Literal(self.input[start..self.position].to_string())
    }

    /// Skip a character class, honoring nesting, escapes and a leading `]`
    fn skip_char_class(&mut self) {
        let mut depth = 0usize;
        let mut class_start = self.position;

        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '[' => {
                    depth += 1;
                    if self.peek() == Some('^') {
                        self.bump();
                    }
                    class_start = self.position;
                }
                ']' if self.position - 1 == class_start => {}
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Tokenize the entire input and return a vector of tokens
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        tokens
    }
}
