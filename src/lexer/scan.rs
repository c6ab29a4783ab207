// src/lexer/scan.rs
// The scanning contract both engines implement, plus the repeated-scan
// tokenizer built on top of it.

use super::tokens::{Token, TokenKind};

/// Maps a raw char to the symbol used for table lookups.
pub type Classifier<Y> = Box<dyn Fn(char) -> Y + Send + Sync>;

/// Result of a single longest-match scan. No match is `token: None` with an
/// empty lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t, T> {
    pub token: Option<T>,
    pub lexeme: &'t str,
}

impl<'t, T> Match<'t, T> {
    pub fn none() -> Self {
        Match {
            token: None,
            lexeme: "",
        }
    }

    pub fn into_pair(self) -> (Option<T>, &'t str) {
        (self.token, self.lexeme)
    }

    pub fn is_match(&self) -> bool {
        self.token.is_some()
    }

    /// Length of the lexeme in bytes.
    pub fn len(&self) -> usize {
        self.lexeme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }
}

impl<'t, T> From<Match<'t, T>> for (Option<T>, &'t str) {
    fn from(m: Match<'t, T>) -> Self {
        m.into_pair()
    }
}

/// Symbol at byte offset `pos` and the width of the char it came from.
/// Out of range or off a char boundary yields `None`.
#[inline]
pub(crate) fn symbol_at<Y>(
    text: &str,
    pos: usize,
    classify: &(dyn Fn(char) -> Y + Send + Sync),
) -> Option<(Y, usize)> {
    let c = text.get(pos..)?.chars().next()?;
    Some((classify(c), c.len_utf8()))
}

pub trait Scan<T: Clone> {
    /// Longest match starting at byte offset `start`.
    fn scan<'t>(&self, text: &'t str, start: usize) -> Match<'t, T>;

    /// Scans `text` front to back. A position where nothing matches yields a
    /// one-char [`TokenKind::Error`] token and scanning resumes after it.
    fn tokenize(&self, text: &str) -> Vec<Token<T>> {
        let mut out = Vec::new();
        let mut pos = 0usize;

        while pos < text.len() {
            let m = self.scan(text, pos);
            match m.token {
                Some(kind) if !m.lexeme.is_empty() => {
                    out.push(Token {
                        kind: TokenKind::Matched(kind),
                        start: pos,
                        len: m.lexeme.len(),
                    });
                    pos += m.lexeme.len();
                }
                _ => {
                    let width = text[pos..].chars().next().map_or(1, char::len_utf8);
                    log::trace!("no match at byte {pos}, skipping {width} byte(s)");
                    out.push(Token {
                        kind: TokenKind::Error,
                        start: pos,
                        len: width,
                    });
                    pos += width;
                }
            }
        }

        out
    }
}
