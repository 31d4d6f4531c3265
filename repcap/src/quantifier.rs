//! Resolution of group quantifiers into repetition bounds
//!
//! Grammar of the raw text handed over by the lexer:
//!   quantifier := '*' | '+' | '{' ws* number? ws* (',' ws* number? ws*)? '}'
//!
//! `?` is never a group quantifier here; it stays ordinary trailing text.

use crate::ast::{Bound, Repeat};
use crate::error::{ExpandError, Result};

/// Resolve raw quantifier text found at `position` into repetition bounds
///
/// Returns `Ok(None)` when the quantifier carries no bounds (`{}`), in which
/// case the caller passes the raw text through unchanged.
pub fn resolve(raw: &str, position: usize) -> Result<Option<Repeat>> {
    match raw {
        "*" => Ok(Some(Repeat::new(0, Bound::Unbounded))),
        "+" => Ok(Some(Repeat::new(1, Bound::Unbounded))),
        _ => match raw.strip_prefix('{') {
            Some(inner) => resolve_braces(inner, position),
            None => Ok(None),
        },
    }
}

/// Digits collected for one side of `{m,M}`, with the offset of the first one
#[derive(Default)]
struct Number {
    digits: String,
    start: usize,
}

impl Number {
    fn push(&mut self, c: char, offset: usize) {
        if self.digits.is_empty() {
            self.start = offset;
        }
        self.digits.push(c);
    }

    fn value(&self) -> Result<Option<usize>> {
        if self.digits.is_empty() {
            return Ok(None);
        }
        self.digits
            .parse()
            .map(Some)
            .map_err(|_| ExpandError::MalformedQuantifier {
                position: self.start,
                found: self.digits.chars().next().unwrap_or('0'),
            })
    }
}

fn resolve_braces(inner: &str, position: usize) -> Result<Option<Repeat>> {
    let mut min = Number::default();
    let mut max = Number::default();
    let mut saw_comma = false;
    let mut closed = false;

    for (i, c) in inner.char_indices() {
        let offset = position + 1 + i;
        match c {
            '}' => {
                closed = true;
                break;
            }
            c if c.is_whitespace() => {}
            c if c.is_ascii_digit() => {
                if saw_comma {
                    max.push(c, offset);
                } else {
                    min.push(c, offset);
                }
            }
            ',' if !saw_comma => saw_comma = true,
            found => {
                return Err(ExpandError::MalformedQuantifier {
                    position: offset,
                    found,
                });
            }
        }
    }

    if !closed {
        return Err(ExpandError::PrematureEndOfQuantifier { position });
    }

    let min = min.value()?;
    let max = max.value()?;

    let repeat = match (min, saw_comma, max) {
        (None, false, _) => return Ok(None),
        (Some(m), false, _) => Repeat::new(m, Bound::Exact(m)),
        (min, true, None) => Repeat::new(min.unwrap_or(0), Bound::Unbounded),
        (min, true, Some(max)) => Repeat::new(min.unwrap_or(0), Bound::Exact(max)),
    };
    Ok(Some(repeat))
}
