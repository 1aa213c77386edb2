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

//! The ghost-aware string wrapper.

use crate::config::{Delegation, GhostProfile, Op, delegation};
use crate::format::{FormatArgs, format_template};
use crate::merge;
use crate::result::{GhostError, GhostResult};
use crate::segment::{SegmentSeq, Token};
use crate::translate::{SliceSpec, slice_forward, translate_index, translate_slice};
use std::sync::OnceLock;

/// A string that hides ghost segments from every text operation while
/// carrying them through every transformation.
///
/// A `GhostStr` owns a raw string, the [`GhostProfile`] that supplies its
/// splitting and merging strategies, and per-instance memoized views (the
/// segment sequence and the ghost-stripped visible text). Instances are
/// immutable: every transformation returns a new instance sharing the same
/// profile.
///
/// User-facing semantics (length, indexing, slicing, searching, case
/// conversion, splitting) operate on the **visible** domain, as if the
/// ghost segments did not exist. The ghost segments themselves are never
/// lost or misplaced; compaction of redundant ghosts is the merge engine's
/// job and, under a compacting profile, happens automatically after each
/// mutation.
///
/// # Examples
///
/// ```rust
/// use ghoststr::{GhostStr, SliceSpec};
///
/// let value = GhostStr::ansi_sgr("\x1b[31mRed\x1b[0m Plain");
/// assert_eq!(value.visible(), "Red Plain");
/// assert_eq!(value.visible_len(), 9);
///
/// let red = value.slice(SliceSpec::range(0, 3)).unwrap();
/// assert_eq!(red.visible(), "Red");
/// assert!(red.raw().starts_with("\x1b[31m"));
/// ```
#[derive(Clone, Debug)]
pub struct GhostStr {
    raw: String,
    profile: GhostProfile,
    segments: OnceLock<SegmentSeq>,
    visible: OnceLock<String>,
}

impl GhostStr {
    /// Wraps a raw string with the supplied profile.
    pub fn new(raw: impl Into<String>, profile: GhostProfile) -> GhostStr {
        GhostStr {
            raw: raw.into(),
            profile,
            segments: OnceLock::new(),
            visible: OnceLock::new(),
        }
    }

    /// Wraps a raw string with the ANSI SGR preset
    /// ([`GhostProfile::ansi_sgr`]).
    pub fn ansi_sgr(raw: impl Into<String>) -> GhostStr {
        GhostStr::new(raw, GhostProfile::ansi_sgr())
    }

    /// Returns the raw string, ghosts included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consumes the instance and returns the raw string.
    pub fn into_raw(self) -> String {
        self.raw
    }

    /// Returns the profile this instance carries.
    pub fn profile(&self) -> &GhostProfile {
        &self.profile
    }

    /// Returns the memoized segment sequence, disentangling on first use.
    pub fn segments(&self) -> &SegmentSeq {
        self.segments
            .get_or_init(|| self.profile.disentangle.disentangle(&self.raw))
    }

    /// Returns the memoized visible view: the raw string with every ghost
    /// segment removed.
    pub fn visible(&self) -> &str {
        self.visible.get_or_init(|| self.segments().visible_text())
    }

    /// Routes a delegating operation to the view its classification names.
    fn view(&self, op: Op) -> &str {
        match delegation(op) {
            Delegation::Raw => &self.raw,
            Delegation::Visible | Delegation::GhostAware => self.visible(),
        }
    }

    /// Builds a sibling instance around a new raw string.
    fn rebuild(&self, raw: String) -> GhostStr {
        GhostStr::new(raw, self.profile.clone())
    }

    /// Finishes a mutation: rebuilds, then merges when the profile compacts
    /// after mutation.
    fn finish(&self, raw: String) -> GhostStr {
        let next = self.rebuild(raw);
        if self.profile.auto_merge() {
            next.merge(self.profile.full_merge())
        } else {
            next
        }
    }

    // ------------------------------------------------------------------
    // Visible-domain measurements and predicates
    // ------------------------------------------------------------------

    /// Returns the visible length in characters.
    pub fn visible_len(&self) -> usize {
        self.view(Op::VisibleLen).chars().count()
    }

    /// Returns `true` if the visible view is empty. Ghost-only strings are
    /// empty by this definition.
    pub fn is_empty(&self) -> bool {
        self.view(Op::IsEmpty).is_empty()
    }

    /// Returns `true` if the visible view contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.view(Op::Contains).contains(needle)
    }

    /// Returns `true` if the visible view starts with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.view(Op::StartsWith).starts_with(prefix)
    }

    /// Returns `true` if the visible view ends with `suffix`.
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.view(Op::EndsWith).ends_with(suffix)
    }

    /// Returns the visible character index of the first occurrence of
    /// `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        let visible = self.view(Op::Find);
        visible
            .find(needle)
            .map(|byte| visible[..byte].chars().count())
    }

    /// Returns the visible character index of the last occurrence of
    /// `needle`.
    pub fn rfind(&self, needle: &str) -> Option<usize> {
        let visible = self.view(Op::Rfind);
        visible
            .rfind(needle)
            .map(|byte| visible[..byte].chars().count())
    }

    /// Like [`find`](GhostStr::find), but reports
    /// [`GhostError::NotFound`] when `needle` is absent.
    pub fn find_required(&self, needle: &str) -> GhostResult<usize> {
        self.find(needle).ok_or_else(|| GhostError::NotFound {
            needle: needle.to_string(),
        })
    }

    /// Counts non-overlapping occurrences of `needle` in the visible view.
    pub fn count_matches(&self, needle: &str) -> usize {
        self.view(Op::CountMatches).matches(needle).count()
    }

    /// Returns `true` if the visible view is non-empty and entirely
    /// alphanumeric.
    pub fn is_alphanumeric(&self) -> bool {
        let visible = self.view(Op::IsAlphanumeric);
        !visible.is_empty() && visible.chars().all(char::is_alphanumeric)
    }

    /// Returns `true` if the visible view is non-empty and entirely
    /// alphabetic.
    pub fn is_alphabetic(&self) -> bool {
        let visible = self.view(Op::IsAlphabetic);
        !visible.is_empty() && visible.chars().all(char::is_alphabetic)
    }

    /// Returns `true` if the visible view is entirely ASCII.
    pub fn is_ascii(&self) -> bool {
        self.view(Op::IsAscii).is_ascii()
    }

    /// Returns `true` if the visible view is non-empty and entirely
    /// numeric.
    pub fn is_numeric(&self) -> bool {
        let visible = self.view(Op::IsNumeric);
        !visible.is_empty() && visible.chars().all(char::is_numeric)
    }

    /// Returns `true` if the visible view contains no uppercase letters
    /// and at least one lowercase letter.
    pub fn is_lowercase(&self) -> bool {
        let visible = self.view(Op::IsLowercase);
        visible.chars().any(char::is_lowercase)
            && !visible.chars().any(char::is_uppercase)
    }

    /// Returns `true` if the visible view contains no lowercase letters
    /// and at least one uppercase letter.
    pub fn is_uppercase(&self) -> bool {
        let visible = self.view(Op::IsUppercase);
        visible.chars().any(char::is_uppercase)
            && !visible.chars().any(char::is_lowercase)
    }

    /// Returns `true` if the visible view is non-empty and entirely
    /// whitespace.
    pub fn is_whitespace(&self) -> bool {
        let visible = self.view(Op::IsWhitespace);
        !visible.is_empty() && visible.chars().all(char::is_whitespace)
    }

    /// Parses the visible view (whitespace-trimmed) into any `FromStr`
    /// type.
    pub fn parse_visible<T: std::str::FromStr>(&self) -> Result<T, T::Err> {
        self.view(Op::ParseVisible).trim().parse()
    }

    /// Iterates the visible characters.
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.visible().chars()
    }

    // ------------------------------------------------------------------
    // Ghost-aware transformations
    // ------------------------------------------------------------------

    /// Returns the raw substring for one visible index: the character at
    /// that position prefixed by the ghost run that attaches to it. See
    /// [`translate_index`].
    pub fn char_at(&self, index: isize) -> GhostResult<String> {
        translate_index(self.segments(), index)
    }

    /// Slices the visible domain, carrying every ghost through. Under a
    /// compacting profile the result is merged. See [`translate_slice`].
    pub fn slice(&self, spec: SliceSpec) -> GhostResult<GhostStr> {
        let raw = translate_slice(self.segments(), &spec)?;
        Ok(self.finish(raw))
    }

    /// Infallible internal slice over resolved char bounds with step 1.
    fn slice_chars(&self, start: usize, stop: usize) -> GhostStr {
        let raw = slice_forward(self.segments(), start as isize, stop as isize, 1);
        self.finish(raw)
    }

    /// Appends `other` after the raw string.
    pub fn concat(&self, other: impl AsRef<str>) -> GhostStr {
        self.finish(format!("{}{}", self.raw, other.as_ref()))
    }

    /// Inserts `other` before the raw string.
    pub fn prepend(&self, other: impl AsRef<str>) -> GhostStr {
        self.finish(format!("{}{}", other.as_ref(), self.raw))
    }

    /// Repeats the raw string `count` times.
    pub fn repeat(&self, count: usize) -> GhostStr {
        self.finish(self.raw.repeat(count))
    }

    /// Compacts redundant ghost runs with the profile's reducer.
    ///
    /// With `full` set, trailing pending ghosts survive the merge;
    /// otherwise they are discarded. See [`merge::merge`].
    pub fn merge(&self, full: bool) -> GhostStr {
        let raw = merge::merge(self.segments(), self.profile.reduce.as_ref(), full);
        self.rebuild(raw)
    }

    /// Merges with the profile's default `full` flag (maximal for the SGR
    /// preset).
    pub fn merged(&self) -> GhostStr {
        self.merge(self.profile.full_merge())
    }

    /// Substitutes `{field}` placeholders in the visible text, passing
    /// ghosts through untouched. Under the SGR preset the smear pass
    /// re-asserts ambient styling after every substitution. See
    /// [`format_template`].
    pub fn format(&self, args: &FormatArgs) -> GhostResult<GhostStr> {
        let raw = format_template(self.segments(), args, self.profile.smear_on_format())?;
        Ok(self.finish(raw))
    }

    /// Legacy percent-style formatting, intentionally disabled.
    ///
    /// Percent interpolation is ghost-unaware and would silently corrupt
    /// output, so it fails deterministically instead of misbehaving.
    pub fn percent_format(&self) -> GhostResult<GhostStr> {
        Err(GhostError::Unsupported {
            operation: "percent-style formatting",
            directive: "use format with FormatArgs",
        })
    }

    /// Replaces up to `limit` occurrences of `old` (all when `None`) with
    /// `new`, searching the visible view.
    pub fn replace(&self, old: &str, new: &str, limit: Option<usize>) -> GhostStr {
        if old.is_empty() {
            return self.clone();
        }
        let old_chars = old.chars().count();
        let new_chars = new.chars().count();
        let mut value = self.clone();
        let mut remaining = limit;
        let mut from = 0usize;
        loop {
            if remaining == Some(0) {
                break;
            }
            let Some(index) = value.find_from(old, from) else {
                break;
            };
            let len = value.visible_len();
            let head = value.slice_chars(0, index);
            let tail = value.slice_chars(index + old_chars, len);
            value = self.finish(format!("{}{}{}", head.raw(), new, tail.raw()));
            from = index + new_chars;
            if let Some(count) = &mut remaining {
                *count -= 1;
            }
        }
        value
    }

    // ------------------------------------------------------------------
    // Splitting
    // ------------------------------------------------------------------

    /// Splits on `sep` left to right, up to `limit` times when given.
    ///
    /// Each part is a ghost-carrying slice of this instance; the visible
    /// separator text is dropped. An exhausted search ends the walk
    /// normally rather than reporting an error.
    pub fn split(&self, sep: &str, limit: Option<usize>) -> Vec<GhostStr> {
        self.split_inner(sep, limit, false)
    }

    fn split_inner(&self, sep: &str, limit: Option<usize>, keep_ends: bool) -> Vec<GhostStr> {
        if sep.is_empty() {
            return vec![self.clone()];
        }
        let sep_chars = sep.chars().count();
        let mut parts = Vec::new();
        let mut start = 0usize;
        let mut remaining = limit;
        loop {
            if remaining == Some(0) {
                break;
            }
            let Some(index) = self.find_from(sep, start) else {
                break;
            };
            let stop = if keep_ends { index + sep_chars } else { index };
            parts.push(self.slice_chars(start, stop));
            start = index + sep_chars;
            if let Some(count) = &mut remaining {
                *count -= 1;
            }
        }
        parts.push(self.slice_chars(start, self.visible_len()));
        parts
    }

    /// Splits on `sep` right to left, up to `limit` times when given.
    pub fn rsplit(&self, sep: &str, limit: Option<usize>) -> Vec<GhostStr> {
        if sep.is_empty() {
            return vec![self.clone()];
        }
        let sep_chars = sep.chars().count();
        let mut tail_parts = Vec::new();
        let mut stop = self.visible_len();
        let mut remaining = limit;
        loop {
            if remaining == Some(0) {
                break;
            }
            let Some(index) = self.rfind_before(sep, stop) else {
                break;
            };
            tail_parts.push(self.slice_chars(index + sep_chars, stop));
            stop = index;
            if let Some(count) = &mut remaining {
                *count -= 1;
            }
        }
        tail_parts.push(self.slice_chars(0, stop));
        tail_parts.reverse();
        tail_parts
    }

    /// Splits on line feeds, optionally keeping each `\n` with its line.
    pub fn split_lines(&self, keep_ends: bool) -> Vec<GhostStr> {
        self.split_inner("\n", None, keep_ends)
    }

    /// Splits around the first occurrence of `sep` into
    /// `(head, sep, tail)`. When `sep` is absent the result is
    /// `(self, "", "")`.
    pub fn partition(&self, sep: &str) -> (GhostStr, GhostStr, GhostStr) {
        match self.find(sep) {
            Some(index) => (
                self.slice_chars(0, index),
                self.rebuild(sep.to_string()),
                self.slice_chars(index + sep.chars().count(), self.visible_len()),
            ),
            None => (
                self.clone(),
                self.rebuild(String::new()),
                self.rebuild(String::new()),
            ),
        }
    }

    /// Splits around the last occurrence of `sep` into
    /// `(head, sep, tail)`. When `sep` is absent the result is
    /// `("", "", self)`.
    pub fn rpartition(&self, sep: &str) -> (GhostStr, GhostStr, GhostStr) {
        match self.rfind(sep) {
            Some(index) => (
                self.slice_chars(0, index),
                self.rebuild(sep.to_string()),
                self.slice_chars(index + sep.chars().count(), self.visible_len()),
            ),
            None => (
                self.rebuild(String::new()),
                self.rebuild(String::new()),
                self.clone(),
            ),
        }
    }

    // ------------------------------------------------------------------
    // Trimming and affix removal
    // ------------------------------------------------------------------

    /// Removes leading visible whitespace.
    pub fn trim_start(&self) -> GhostStr {
        self.trim_start_by(char::is_whitespace)
    }

    /// Removes trailing visible whitespace.
    pub fn trim_end(&self) -> GhostStr {
        self.trim_end_by(char::is_whitespace)
    }

    /// Removes leading and trailing visible whitespace.
    pub fn trim(&self) -> GhostStr {
        self.trim_start().trim_end()
    }

    /// Removes leading visible characters drawn from `matches`.
    pub fn trim_start_matching(&self, matches: &str) -> GhostStr {
        self.trim_start_by(|ch| matches.contains(ch))
    }

    /// Removes trailing visible characters drawn from `matches`.
    pub fn trim_end_matching(&self, matches: &str) -> GhostStr {
        self.trim_end_by(|ch| matches.contains(ch))
    }

    /// Removes leading and trailing visible characters drawn from
    /// `matches`.
    pub fn trim_matching(&self, matches: &str) -> GhostStr {
        self.trim_start_matching(matches).trim_end_matching(matches)
    }

    fn trim_start_by(&self, pred: impl Fn(char) -> bool) -> GhostStr {
        let skip = self.visible().chars().take_while(|ch| pred(*ch)).count();
        self.slice_chars(skip, self.visible_len())
    }

    fn trim_end_by(&self, pred: impl Fn(char) -> bool) -> GhostStr {
        let len = self.visible_len();
        let skip = self
            .visible()
            .chars()
            .rev()
            .take_while(|ch| pred(*ch))
            .count();
        self.slice_chars(0, len - skip)
    }

    /// Removes `prefix` from the visible front when present; otherwise
    /// returns the instance unchanged.
    pub fn strip_prefix(&self, prefix: &str) -> GhostStr {
        if !prefix.is_empty() && self.starts_with(prefix) {
            self.slice_chars(prefix.chars().count(), self.visible_len())
        } else {
            self.clone()
        }
    }

    /// Removes `suffix` from the visible back when present; otherwise
    /// returns the instance unchanged.
    pub fn strip_suffix(&self, suffix: &str) -> GhostStr {
        if !suffix.is_empty() && self.ends_with(suffix) {
            self.slice_chars(0, self.visible_len() - suffix.chars().count())
        } else {
            self.clone()
        }
    }

    // ------------------------------------------------------------------
    // Case mapping
    // ------------------------------------------------------------------

    /// Applies `map` to every visible token, leaving ghosts in place.
    fn map_visible(&self, map: impl Fn(&str) -> String) -> GhostStr {
        let raw: String = self
            .segments()
            .iter()
            .map(|token| match token {
                Token::Visible(text) => map(text),
                Token::Ghost(text) => text.clone(),
            })
            .collect();
        self.rebuild(raw)
    }

    /// Uppercases the visible text, leaving ghosts in place.
    pub fn to_uppercase(&self) -> GhostStr {
        self.map_visible(|text| text.to_uppercase())
    }

    /// Lowercases the visible text, leaving ghosts in place.
    pub fn to_lowercase(&self) -> GhostStr {
        self.map_visible(|text| text.to_lowercase())
    }

    /// Uppercases the first visible character and lowercases the rest.
    pub fn capitalize(&self) -> GhostStr {
        let mut first = true;
        let raw: String = self
            .segments()
            .iter()
            .map(|token| match token {
                Token::Ghost(text) => text.clone(),
                Token::Visible(text) => {
                    let mut mapped = String::with_capacity(text.len());
                    for ch in text.chars() {
                        if first {
                            mapped.extend(ch.to_uppercase());
                            first = false;
                        } else {
                            mapped.extend(ch.to_lowercase());
                        }
                    }
                    mapped
                }
            })
            .collect();
        self.rebuild(raw)
    }

    /// Capitalizes each space-separated visible word.
    pub fn title_case(&self) -> GhostStr {
        let mut start_of_word = true;
        let raw: String = self
            .segments()
            .iter()
            .map(|token| match token {
                Token::Ghost(text) => text.clone(),
                Token::Visible(text) => {
                    let mut mapped = String::with_capacity(text.len());
                    for ch in text.chars() {
                        if ch == ' ' {
                            mapped.push(ch);
                            start_of_word = true;
                        } else if start_of_word {
                            mapped.extend(ch.to_uppercase());
                            start_of_word = false;
                        } else {
                            mapped.extend(ch.to_lowercase());
                        }
                    }
                    mapped
                }
            })
            .collect();
        self.rebuild(raw)
    }

    // ------------------------------------------------------------------
    // Search internals (char-index based over the visible view)
    // ------------------------------------------------------------------

    /// Finds `needle` at or after visible char position `from`.
    fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        let visible = self.visible();
        let byte_from = char_to_byte(visible, from)?;
        visible[byte_from..]
            .find(needle)
            .map(|byte| from + visible[byte_from..byte_from + byte].chars().count())
    }

    /// Finds the last `needle` fully contained before visible char
    /// position `before`.
    fn rfind_before(&self, needle: &str, before: usize) -> Option<usize> {
        let visible = self.visible();
        let byte_before = char_to_byte(visible, before)?;
        visible[..byte_before]
            .rfind(needle)
            .map(|byte| visible[..byte].chars().count())
    }
}

/// Maps a char index to its byte offset, allowing the one-past-the-end
/// position.
fn char_to_byte(text: &str, index: usize) -> Option<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .nth(index)
}

impl std::fmt::Display for GhostStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.view(Op::Display))
    }
}

impl PartialEq for GhostStr {
    fn eq(&self, other: &Self) -> bool {
        self.view(Op::Compare) == other.view(Op::Compare)
    }
}

impl Eq for GhostStr {}

impl PartialOrd for GhostStr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GhostStr {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.view(Op::Compare).cmp(other.view(Op::Compare))
    }
}

impl std::hash::Hash for GhostStr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.view(Op::Compare).hash(state);
    }
}

impl PartialEq<str> for GhostStr {
    fn eq(&self, other: &str) -> bool {
        self.view(Op::Compare) == other
    }
}

impl PartialEq<&str> for GhostStr {
    fn eq(&self, other: &&str) -> bool {
        self.view(Op::Compare) == *other
    }
}
