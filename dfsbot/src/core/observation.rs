//! Parsing of simulator observation lines.

use std::str::SplitWhitespace;

use thiserror::Error;

use crate::core::types::{Position, Wall};

/// A recognized observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// `bot <x> <y> [...]`
    Position(Position),
    /// `wall <x0> <y0> <x1> <y1>`, coordinates truncated toward zero.
    Wall(Wall),
}

/// A `bot` or `wall` line whose numeric fields could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed observation {line:?}: {reason}")]
pub struct MalformedObservation {
    pub line: String,
    pub reason: String,
}

impl Observation {
    /// Parse one line. Unrecognized and blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, MalformedObservation> {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(None);
        };
        let obs = match keyword {
            "bot" => {
                let [x, y]: [f64; 2] = parse_fields(line, &mut tokens)?;
                Observation::Position(Position::new(x, y))
            }
            "wall" => {
                let [x0, y0, x1, y1]: [f64; 4] = parse_fields(line, &mut tokens)?;
                Observation::Wall(Wall::new(
                    x0.trunc() as i32,
                    y0.trunc() as i32,
                    x1.trunc() as i32,
                    y1.trunc() as i32,
                ))
            }
            _ => return Ok(None),
        };
        Ok(Some(obs))
    }
}

/// Parse the next `N` tokens as floats. Trailing tokens are left untouched.
fn parse_fields<const N: usize>(
    line: &str,
    tokens: &mut SplitWhitespace<'_>,
) -> Result<[f64; N], MalformedObservation> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| MalformedObservation {
            line: line.to_string(),
            reason: format!("expected {N} numeric fields, found {i}"),
        })?;
        let value: f64 = token.parse().map_err(|_| MalformedObservation {
            line: line.to_string(),
            reason: format!("field {} is not a number: {token:?}", i + 1),
        })?;
        if !value.is_finite() {
            return Err(MalformedObservation {
                line: line.to_string(),
                reason: format!("field {} is not finite: {token:?}", i + 1),
            });
        }
        *slot = value;
    }
    Ok(out)
}
