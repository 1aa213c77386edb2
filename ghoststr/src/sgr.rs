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

//! The ANSI SGR specialization: the escape-sequence splitter, the code
//! family table, and the merge reducer that understands which codes cancel
//! each other.
//!
//! This module only handles Select Graphic Rendition sequences of the form
//! `ESC '[' <digits> (';' <digits>)* 'm'`. It is not a terminal emulator and
//! does not interpret cursor movement or any other escape class.

use crate::merge::Reduce;
use crate::segment::{Disentangle, SegmentSeq, Token};

/// The full-reset sequence. Supersedes every pending code when merged.
pub const SGR_RESET: &str = "\x1b[0m";

/// Splits a raw string on ANSI SGR escape sequences.
///
/// Visible text between sequences becomes `Visible` tokens; each complete
/// SGR sequence becomes a `Ghost` token. An ESC that does not open a
/// complete SGR sequence is treated as visible text, so the split is always
/// lossless.
///
/// # Examples
///
/// ```rust
/// use ghoststr::{Disentangle, sgr::SgrSplitter};
///
/// let seq = SgrSplitter.disentangle("\x1b[31mRed\x1b[0m Plain");
/// assert_eq!(seq.visible_text(), "Red Plain");
/// assert_eq!(seq.restore(), "\x1b[31mRed\x1b[0m Plain");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SgrSplitter;

impl Disentangle for SgrSplitter {
    fn disentangle(&self, raw: &str) -> SegmentSeq {
        let mut tokens = Vec::new();
        let mut visible = String::new();
        let mut rest = raw;

        while let Some(offset) = rest.find('\x1b') {
            let (before, candidate) = rest.split_at(offset);
            match match_sgr(candidate) {
                Some(len) => {
                    visible.push_str(before);
                    tokens.push(Token::Visible(std::mem::take(&mut visible)));
                    tokens.push(Token::Ghost(candidate[..len].to_string()));
                    rest = &candidate[len..];
                }
                None => {
                    // Not a complete SGR sequence. The ESC stays visible.
                    visible.push_str(before);
                    visible.push('\x1b');
                    rest = &candidate['\x1b'.len_utf8()..];
                }
            }
        }
        visible.push_str(rest);
        tokens.push(Token::Visible(visible));
        SegmentSeq::from_tokens(tokens)
    }
}

/// Returns the byte length of the SGR sequence at the start of `input`, or
/// `None` if `input` does not begin with a complete sequence.
///
/// The accepted shape mirrors the splitting pattern of the original tooling:
/// ESC, then any number of bytes drawn from `'['` and the parameter range
/// `0x30..=0x3F`, terminated by `'m'`.
fn match_sgr(input: &str) -> Option<usize> {
    let mut bytes = input.bytes().enumerate();
    match bytes.next() {
        Some((_, 0x1b)) => {}
        _ => return None,
    }
    for (index, byte) in bytes {
        match byte {
            b'm' => return Some(index + 1),
            b'[' | 0x30..=0x3F => {}
            _ => return None,
        }
    }
    None
}

/// Mutually-cancelling SGR code families.
///
/// Two codes in the same family supersede each other when merged; codes in
/// different families coexist. The grouping follows the disjoint semantic
/// families of the SGR specification (the grouping literal in the original
/// tooling is malformed and silently fuses two families; see DESIGN.md).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SgrFamily {
    /// Bold / faint / normal intensity (1, 2, 22).
    Intensity,
    /// Italic on / off (3, 23).
    Italic,
    /// Underline styles: single, double, off (4, 21, 24).
    Underline,
    /// Slow blink / rapid blink / off (5, 6, 25).
    Blink,
    /// Reverse video on / off (7, 27).
    Reverse,
    /// Conceal on / off (8, 28).
    Conceal,
    /// Strike-through on / off (9, 29).
    Strike,
    /// Font selection including fraktur (10..=20).
    Font,
    /// Foreground colors and their bright counterparts (30..=39, 90..=97).
    Foreground,
    /// Background colors and their bright counterparts (40..=49, 100..=107).
    Background,
    /// Underline color set / default (58, 59).
    UnderlineColor,
}

/// Looks up the family of an SGR code, if it belongs to one.
pub fn family(code: u16) -> Option<SgrFamily> {
    match code {
        1 | 2 | 22 => Some(SgrFamily::Intensity),
        3 | 23 => Some(SgrFamily::Italic),
        4 | 21 | 24 => Some(SgrFamily::Underline),
        5 | 6 | 25 => Some(SgrFamily::Blink),
        7 | 27 => Some(SgrFamily::Reverse),
        8 | 28 => Some(SgrFamily::Conceal),
        9 | 29 => Some(SgrFamily::Strike),
        10..=20 => Some(SgrFamily::Font),
        30..=39 | 90..=97 => Some(SgrFamily::Foreground),
        40..=49 | 100..=107 => Some(SgrFamily::Background),
        58 | 59 => Some(SgrFamily::UnderlineColor),
        _ => None,
    }
}

/// Extracts the leading numeric code of an SGR sequence.
///
/// The leading code is the number before any `;`. An empty parameter list
/// (`ESC [ m`) defaults to 0, the reset code. Non-numeric parameter text
/// also maps to 0.
pub fn leading_code(sequence: &str) -> u16 {
    let inner = sequence
        .strip_prefix('\x1b')
        .map(|s| s.strip_prefix('[').unwrap_or(s))
        .unwrap_or(sequence);
    let inner = inner.strip_suffix('m').unwrap_or(inner);
    let first = inner.split(';').next().unwrap_or("");
    first.parse().unwrap_or(0)
}

/// Returns `true` if the sequence is a full reset (`ESC [ 0 m` or the
/// parameterless `ESC [ m`).
pub fn is_reset(sequence: &str) -> bool {
    sequence == SGR_RESET || sequence == "\x1b[m"
}

/// The SGR merge reducer.
///
/// Behavior per incoming ghost token:
///
/// 1. An empty pending buffer simply accepts the token.
/// 2. A full reset clears the buffer entirely before being appended; a
///    reset supersedes everything pending.
/// 3. Otherwise every pending token whose leading code shares a family with
///    the new token's leading code is removed, then the new token is
///    appended. A style toggle discards the opposite toggle it supersedes,
///    while unrelated concurrently-active styles survive.
///
/// Merging with this reducer never changes rendered appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SgrReducer;

impl Reduce for SgrReducer {
    fn reduce(&self, pending: &mut Vec<String>, next: &str) {
        if pending.is_empty() {
            pending.push(next.to_string());
            return;
        }
        if is_reset(next) {
            pending.clear();
            pending.push(next.to_string());
            return;
        }
        let code = leading_code(next);
        if let Some(group) = family(code) {
            pending.retain(|prior| family(leading_code(prior)) != Some(group));
        }
        pending.push(next.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scenario() {
        let seq = SgrSplitter.disentangle("\x1b[31mRed\x1b[0m Plain");
        let tokens: Vec<&str> = seq.iter().map(|t| t.text()).collect();
        assert_eq!(tokens, vec!["", "\x1b[31m", "Red", "\x1b[0m", " Plain"]);
        assert_eq!(seq.visible_text(), "Red Plain");
        assert_eq!(seq.visible_len(), 9);
    }

    #[test]
    fn test_split_lossless_on_incomplete_escape() {
        let seq = SgrSplitter.disentangle("a\x1b[31b");
        assert_eq!(seq.restore(), "a\x1b[31b");
        assert_eq!(seq.visible_text(), "a\x1b[31b");
    }

    #[test]
    fn test_split_lone_escape_stays_visible() {
        let seq = SgrSplitter.disentangle("a\x1bz");
        assert_eq!(seq.restore(), "a\x1bz");
        assert_eq!(seq.visible_text(), "a\x1bz");
    }

    #[test]
    fn test_match_sgr_shapes() {
        assert_eq!(match_sgr("\x1b[31m"), Some(5));
        assert_eq!(match_sgr("\x1b[mrest"), Some(3));
        assert_eq!(match_sgr("\x1b[38;5;196m"), Some(11));
        assert_eq!(match_sgr("\x1b[31"), None);
        assert_eq!(match_sgr("\x1b]0;title\x07"), None);
        assert_eq!(match_sgr("plain"), None);
    }

    #[test]
    fn test_leading_code() {
        assert_eq!(leading_code("\x1b[31m"), 31);
        assert_eq!(leading_code("\x1b[38;5;196m"), 38);
        assert_eq!(leading_code("\x1b[m"), 0);
        assert_eq!(leading_code("\x1b[0m"), 0);
    }

    #[test]
    fn test_reset_dominance() {
        let mut pending = vec!["\x1b[1m".to_string(), "\x1b[4m".to_string()];
        SgrReducer.reduce(&mut pending, SGR_RESET);
        assert_eq!(pending, vec![SGR_RESET.to_string()]);
    }

    #[test]
    fn test_family_exclusivity() {
        // Bold plus underline pending; normal intensity supersedes only the
        // bold entry.
        let mut pending = vec!["\x1b[1m".to_string(), "\x1b[4m".to_string()];
        SgrReducer.reduce(&mut pending, "\x1b[22m");
        assert_eq!(pending, vec!["\x1b[4m".to_string(), "\x1b[22m".to_string()]);
    }

    #[test]
    fn test_unrelated_families_coexist() {
        let mut pending = Vec::new();
        SgrReducer.reduce(&mut pending, "\x1b[1m");
        SgrReducer.reduce(&mut pending, "\x1b[4m");
        SgrReducer.reduce(&mut pending, "\x1b[31m");
        assert_eq!(
            pending,
            vec![
                "\x1b[1m".to_string(),
                "\x1b[4m".to_string(),
                "\x1b[31m".to_string()
            ]
        );
    }

    #[test]
    fn test_foreground_supersedes_bright_foreground() {
        let mut pending = vec!["\x1b[91m".to_string()];
        SgrReducer.reduce(&mut pending, "\x1b[34m");
        assert_eq!(pending, vec!["\x1b[34m".to_string()]);
    }

    #[test]
    fn test_unknown_code_is_appended_untouched() {
        let mut pending = vec!["\x1b[1m".to_string()];
        SgrReducer.reduce(&mut pending, "\x1b[73m");
        assert_eq!(pending, vec!["\x1b[1m".to_string(), "\x1b[73m".to_string()]);
    }
}
