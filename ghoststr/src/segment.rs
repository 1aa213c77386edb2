//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! The segment model: alternating visible/ghost tokens and the disentangler
//! contract that produces them.

/// A contiguous substring of the raw string, tagged by visibility.
///
/// `Visible` tokens count toward the user-facing length and participate in
/// every text operation. `Ghost` tokens are excluded from all user-facing
/// semantics but are preserved verbatim through every transformation.
///
/// # Examples
///
/// ```rust
/// use ghoststr::Token;
///
/// let text = Token::Visible("Red".to_string());
/// let code = Token::Ghost("\x1b[31m".to_string());
/// assert!(!text.is_ghost());
/// assert!(code.is_ghost());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Text that counts toward visible length and content.
    Visible(String),
    /// Text excluded from visible semantics but carried through transformations.
    Ghost(String),
}

impl Token {
    /// Returns `true` if this token is a ghost segment.
    pub fn is_ghost(&self) -> bool {
        matches!(self, Token::Ghost(_))
    }

    /// Returns the underlying text of this token regardless of tag.
    pub fn text(&self) -> &str {
        match self {
            Token::Visible(text) | Token::Ghost(text) => text,
        }
    }
}

/// An ordered sequence of [`Token`]s produced by a [`Disentangle`] splitter.
///
/// # Invariants
///
/// - Strict alternation: the token at position 0 is `Visible`, tags alternate
///   `Visible, Ghost, Visible, Ghost, …`, and the sequence may end on either
///   tag. A `Visible` token may be the empty string; this is how two ghosts
///   that are adjacent in meaning are represented without breaking
///   alternation.
/// - Reconstruction: concatenating all tokens in order yields exactly the
///   raw string the sequence was built from.
///
/// [`SegmentSeq::from_tokens`] normalizes arbitrary token lists into this
/// shape, so splitters can emit tokens in whatever grouping is convenient.
///
/// # Examples
///
/// ```rust
/// use ghoststr::{SegmentSeq, sgr::SgrSplitter, Disentangle};
///
/// let seq = SgrSplitter.disentangle("\x1b[31mRed\x1b[0m Plain");
/// assert_eq!(seq.visible_text(), "Red Plain");
/// assert_eq!(seq.visible_len(), 9);
/// assert_eq!(seq.restore(), "\x1b[31mRed\x1b[0m Plain");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentSeq(Vec<Token>);

impl SegmentSeq {
    /// Creates an empty sequence.
    pub fn empty() -> SegmentSeq {
        SegmentSeq(Vec::new())
    }

    /// Builds a sequence from a token list, normalizing it to the
    /// alternation invariant.
    ///
    /// Normalization rules:
    ///
    /// - A leading `Ghost` token gets an empty `Visible` placeholder in
    ///   front of it.
    /// - Two adjacent `Visible` tokens are concatenated.
    /// - Two adjacent `Ghost` tokens get an empty `Visible` placeholder
    ///   between them.
    ///
    /// Reconstruction is unaffected: the normalized sequence restores to the
    /// same raw string as the input token list.
    pub fn from_tokens(tokens: Vec<Token>) -> SegmentSeq {
        let mut normalized: Vec<Token> = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token {
                Token::Visible(next) => {
                    if let Some(Token::Visible(last)) = normalized.last_mut() {
                        last.push_str(&next);
                    } else {
                        normalized.push(Token::Visible(next));
                    }
                }
                Token::Ghost(next) => {
                    if !matches!(normalized.last(), Some(Token::Visible(_))) {
                        normalized.push(Token::Visible(String::new()));
                    }
                    normalized.push(Token::Ghost(next));
                }
            }
        }
        SegmentSeq(normalized)
    }

    /// Returns the number of tokens in the sequence.
    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the sequence holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tokens as a slice.
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    /// Returns an iterator over the tokens in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    /// Concatenates all `Visible` tokens in order.
    ///
    /// This is the canonical "clean" view used by every operation that must
    /// reason only about visible content: length, search, case folding, and
    /// classification predicates.
    pub fn visible_text(&self) -> String {
        self.0
            .iter()
            .filter_map(|token| match token {
                Token::Visible(text) => Some(text.as_str()),
                Token::Ghost(_) => None,
            })
            .collect()
    }

    /// Returns the visible length in characters.
    ///
    /// All visible indices are character indices, not byte indices, so a
    /// multi-byte character still occupies a single visible position.
    pub fn visible_len(&self) -> usize {
        self.0
            .iter()
            .filter_map(|token| match token {
                Token::Visible(text) => Some(text.chars().count()),
                Token::Ghost(_) => None,
            })
            .sum()
    }

    /// Reconstructs the raw string by concatenating all tokens in order.
    pub fn restore(&self) -> String {
        self.0.iter().map(Token::text).collect()
    }
}

impl std::ops::Index<usize> for SegmentSeq {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.0[index]
    }
}

/// The contract for splitting a raw string into an alternating token
/// sequence.
///
/// A disentangler must be deterministic and pure: the same raw string always
/// produces the same sequence, concatenating the sequence reconstructs the
/// raw string exactly, and the sequence honors the alternation invariant
/// (which [`SegmentSeq::from_tokens`] guarantees for you).
///
/// Plain functions and closures of type `Fn(&str) -> SegmentSeq` implement
/// this trait automatically, so simple splitters need no named type:
///
/// ```rust
/// use ghoststr::{Disentangle, SegmentSeq, Token};
///
/// // Treat bracketed markers as ghosts.
/// let splitter = |raw: &str| {
///     let mut tokens = Vec::new();
///     let mut rest = raw;
///     while let Some(open) = rest.find('[') {
///         let close = match rest[open..].find(']') {
///             Some(offset) => open + offset,
///             None => break,
///         };
///         tokens.push(Token::Visible(rest[..open].to_string()));
///         tokens.push(Token::Ghost(rest[open..=close].to_string()));
///         rest = &rest[close + 1..];
///     }
///     tokens.push(Token::Visible(rest.to_string()));
///     SegmentSeq::from_tokens(tokens)
/// };
///
/// let seq = splitter.disentangle("a[x]b");
/// assert_eq!(seq.visible_text(), "ab");
/// ```
pub trait Disentangle: Send + Sync {
    /// Splits `raw` into an alternating visible/ghost token sequence.
    fn disentangle(&self, raw: &str) -> SegmentSeq;
}

impl<F> Disentangle for F
where
    F: Fn(&str) -> SegmentSeq + Send + Sync,
{
    fn disentangle(&self, raw: &str) -> SegmentSeq {
        self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokens_plain_text() {
        let seq = SegmentSeq::from_tokens(vec![Token::Visible("Hello".to_string())]);
        assert_eq!(seq.count(), 1);
        assert_eq!(seq.visible_text(), "Hello");
        assert_eq!(seq.restore(), "Hello");
    }

    #[test]
    fn test_from_tokens_leading_ghost_gets_placeholder() {
        let seq = SegmentSeq::from_tokens(vec![
            Token::Ghost("\x1b[31m".to_string()),
            Token::Visible("Red".to_string()),
        ]);
        assert_eq!(seq.count(), 3);
        assert_eq!(seq[0], Token::Visible(String::new()));
        assert_eq!(seq[1], Token::Ghost("\x1b[31m".to_string()));
        assert_eq!(seq.restore(), "\x1b[31mRed");
    }

    #[test]
    fn test_from_tokens_adjacent_ghosts_get_placeholder() {
        let seq = SegmentSeq::from_tokens(vec![
            Token::Visible("a".to_string()),
            Token::Ghost("X".to_string()),
            Token::Ghost("Y".to_string()),
        ]);
        assert_eq!(seq.count(), 4);
        assert_eq!(seq[2], Token::Visible(String::new()));
        assert_eq!(seq.restore(), "aXY");
    }

    #[test]
    fn test_from_tokens_merges_adjacent_visible() {
        let seq = SegmentSeq::from_tokens(vec![
            Token::Visible("Hello ".to_string()),
            Token::Visible("World".to_string()),
        ]);
        assert_eq!(seq.count(), 1);
        assert_eq!(seq.visible_text(), "Hello World");
    }

    #[test]
    fn test_visible_len_counts_chars_not_bytes() {
        let seq = SegmentSeq::from_tokens(vec![
            Token::Visible("héllo".to_string()),
            Token::Ghost("\x1b[1m".to_string()),
            Token::Visible("世界".to_string()),
        ]);
        assert_eq!(seq.visible_len(), 7);
        assert_eq!(seq.visible_text(), "héllo世界");
    }

    #[test]
    fn test_closure_disentangler() {
        let splitter = |raw: &str| {
            SegmentSeq::from_tokens(vec![Token::Visible(raw.to_string())])
        };
        let seq = splitter.disentangle("abc");
        assert_eq!(seq.visible_text(), "abc");
    }
}
