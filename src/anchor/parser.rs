//! Node path parser
//!
//! Grammar:
//! ```text
//! path  = "/" | step+
//! step  = "/" number
//! ```
//! `/` alone denotes the root. Anything else must be a sequence of
//! slash-prefixed decimal child indices with no trailing characters.

use super::NodePath;
use thiserror::Error;

/// Path parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathParseError {
    #[error("empty path string")]
    Empty,

    #[error("path must start with '/'")]
    MissingLeadingSlash,

    #[error("expected number at position {0}")]
    ExpectedNumber(usize),

    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn parse_number(&mut self) -> Result<usize, PathParseError> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(PathParseError::ExpectedNumber(start));
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| PathParseError::ExpectedNumber(start))
    }
}

/// Parse a path string into a [`NodePath`]
pub(super) fn parse(input: &str) -> Result<NodePath, PathParseError> {
    if input.is_empty() {
        return Err(PathParseError::Empty);
    }
    if input == "/" {
        return Ok(NodePath::new(Vec::new()));
    }

    let mut parser = Parser::new(input);
    let mut indices = Vec::new();

    loop {
        if !parser.skip_if('/') {
            return Err(if parser.pos == 0 {
                PathParseError::MissingLeadingSlash
            } else {
                PathParseError::UnexpectedChar(parser.peek().unwrap_or('\0'), parser.pos)
            });
        }
        indices.push(parser.parse_number()?);
        if parser.at_end() {
            break;
        }
    }

    Ok(NodePath::new(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        assert_eq!(parse("/").unwrap(), NodePath::new(vec![]));
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse("/0/12/3").unwrap(), NodePath::new(vec![0, 12, 3]));
    }

    #[test]
    fn test_roundtrip() {
        let original = "/1/0/4";
        let path = parse(original).unwrap();
        assert_eq!(path.to_string(), original);
    }

    #[test]
    fn test_error_empty() {
        assert_eq!(parse(""), Err(PathParseError::Empty));
    }

    #[test]
    fn test_error_missing_slash() {
        assert_eq!(parse("0/1"), Err(PathParseError::MissingLeadingSlash));
    }

    #[test]
    fn test_error_trailing_slash() {
        assert_eq!(parse("/0/"), Err(PathParseError::ExpectedNumber(3)));
    }

    #[test]
    fn test_error_non_digit() {
        assert_eq!(parse("/0/x"), Err(PathParseError::ExpectedNumber(3)));
    }

    #[test]
    fn test_error_garbage_between_steps() {
        assert_eq!(parse("/0x/1"), Err(PathParseError::UnexpectedChar('x', 2)));
    }
}
