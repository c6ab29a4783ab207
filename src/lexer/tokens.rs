// src/lexer/tokens.rs

/// Outcome of one tokenizer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<T> {
    Matched(T),
    /// One char no table entry could start a match from.
    Error,
}

/// A token produced by [`Scan::tokenize`](super::scan::Scan::tokenize).
/// `start` and `len` are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
    pub kind: TokenKind<T>,
    pub start: usize,
    pub len: usize,
}

impl<T> Token<T> {
    pub fn text<'t>(&self, src: &'t str) -> &'t str {
        &src[self.start..self.start + self.len]
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error)
    }

    pub fn matched(&self) -> Option<&T> {
        match &self.kind {
            TokenKind::Matched(t) => Some(t),
            TokenKind::Error => None,
        }
    }
}
