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

//! The index translator: maps visible-domain indices and slices onto the
//! raw-domain string, reattaching the ghost tokens that travel with them.
//!
//! The translator never drops a ghost token. Deciding which ghosts are
//! redundant after a structural operation is solely the merge engine's job
//! (see [`crate::merge`]); keeping the two concerns apart keeps "where do
//! characters go" orthogonal to "which markers can be cleaned up".

use crate::result::{GhostError, GhostResult};
use crate::segment::{SegmentSeq, Token};

/// A slice specification over the visible domain.
///
/// Semantics follow the familiar `start:stop:step` slicing rules: `start`
/// and `stop` may be negative (resolved against the visible length), bounds
/// are clamped rather than rejected, and `step` may be any non-zero value.
/// `None` bounds select the natural end for the step direction.
///
/// # Examples
///
/// ```rust
/// use ghoststr::SliceSpec;
///
/// let first_three = SliceSpec::range(0, 3);
/// let last_two = SliceSpec::range(-2, isize::MAX);
/// let every_other = SliceSpec::all().with_step(2);
/// let reversed = SliceSpec::all().with_step(-1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceSpec {
    /// First visible position to sample, or `None` for the natural start.
    pub start: Option<isize>,
    /// Exclusive stop position, or `None` for the natural end.
    pub stop: Option<isize>,
    /// Sampling stride; negative values walk backwards. Must be non-zero.
    pub step: isize,
}

impl SliceSpec {
    /// A spec selecting every visible character in order.
    pub fn all() -> SliceSpec {
        SliceSpec {
            start: None,
            stop: None,
            step: 1,
        }
    }

    /// A spec selecting `[start, stop)` with step 1.
    pub fn range(start: isize, stop: isize) -> SliceSpec {
        SliceSpec {
            start: Some(start),
            stop: Some(stop),
            step: 1,
        }
    }

    /// A spec selecting `[start, end)` with step 1.
    pub fn tail(start: isize) -> SliceSpec {
        SliceSpec {
            start: Some(start),
            stop: None,
            step: 1,
        }
    }

    /// A spec selecting `[0, stop)` with step 1.
    pub fn head(stop: isize) -> SliceSpec {
        SliceSpec {
            start: None,
            stop: Some(stop),
            step: 1,
        }
    }

    /// Replaces the step of this spec.
    pub fn with_step(mut self, step: isize) -> SliceSpec {
        self.step = step;
        self
    }

    /// Resolves this spec against a visible length.
    ///
    /// Returns `(start, stop, step)` with bounds clamped so that the walk
    /// terminates without further range checks. For a negative step the
    /// resolved `stop` may be `-1`, meaning "before position zero".
    pub fn resolve(&self, len: usize) -> GhostResult<(isize, isize, isize)> {
        if self.step == 0 {
            return Err(GhostError::InvalidSlice);
        }
        let len = len as isize;
        let step = self.step;
        let (default_start, default_stop) = if step > 0 { (0, len) } else { (len - 1, -1) };
        let (floor, ceil) = if step > 0 { (0, len) } else { (-1, len - 1) };

        let clamp = |bound: Option<isize>, default: isize| -> isize {
            match bound {
                None => default,
                Some(value) => {
                    let resolved = if value < 0 { value + len } else { value };
                    resolved.clamp(floor, ceil.max(floor))
                }
            }
        };

        let start = clamp(self.start, default_start);
        let stop = clamp(self.stop, default_stop);
        Ok((start, stop, step))
    }
}

impl Default for SliceSpec {
    fn default() -> Self {
        Self::all()
    }
}

impl From<std::ops::Range<isize>> for SliceSpec {
    fn from(range: std::ops::Range<isize>) -> Self {
        SliceSpec::range(range.start, range.end)
    }
}

/// Resolves a possibly-negative visible index against a visible length.
fn resolve_index(index: isize, len: usize) -> GhostResult<usize> {
    let resolved = if index < 0 { index + len as isize } else { index };
    if resolved < 0 || resolved >= len as isize {
        return Err(GhostError::OutOfRange { index, len });
    }
    Ok(resolved as usize)
}

/// Maps a visible-domain index to the corresponding raw substring.
///
/// The result is the single visible character at that position, prefixed by
/// the run of ghost tokens immediately preceding its visible token (a run
/// may span empty visible placeholders). Ghost tokens further back belong
/// to earlier positions and are not re-emitted.
///
/// Negative indices resolve against the visible length. An index outside
/// `[0, visible_len)` after resolution reports [`GhostError::OutOfRange`].
pub fn translate_index(seq: &SegmentSeq, index: isize) -> GhostResult<String> {
    let len = seq.visible_len();
    let target = resolve_index(index, len)?;

    let mut run = String::new();
    let mut consumed = 0usize;
    for token in seq.iter() {
        match token {
            Token::Ghost(text) => run.push_str(text),
            Token::Visible(text) => {
                let count = text.chars().count();
                if target < consumed + count {
                    if let Some(ch) = text.chars().nth(target - consumed) {
                        run.push(ch);
                        return Ok(run);
                    }
                }
                consumed += count;
                if count > 0 {
                    run.clear();
                }
            }
        }
    }
    // Unreachable: resolve_index bounds the target inside the sequence.
    Err(GhostError::OutOfRange { index, len })
}

/// Maps a visible-domain slice to the corresponding raw substring.
///
/// Ghost tokens fall through untouched by the index math: every ghost is
/// re-emitted verbatim, even when the visible range is empty. A visible
/// character at position `p` is sampled exactly when `p` belongs to the
/// arithmetic progression the resolved spec describes, so stripping the
/// ghosts from the output yields precisely `visible[start:stop:step]`.
///
/// For a negative step the sequence is walked in reverse: sampled visible
/// characters appear in stepped order and ghosts are re-emitted in
/// reverse-encounter order.
pub fn translate_slice(seq: &SegmentSeq, spec: &SliceSpec) -> GhostResult<String> {
    let (start, stop, step) = spec.resolve(seq.visible_len())?;
    if step > 0 {
        Ok(slice_forward(seq, start, stop, step))
    } else {
        Ok(slice_backward(seq, start, stop, -step))
    }
}

/// Forward walk: sample positions `start, start+step, …` below `stop`.
pub(crate) fn slice_forward(seq: &SegmentSeq, start: isize, stop: isize, step: isize) -> String {
    let mut out = String::new();
    let mut pos: isize = 0;
    for token in seq.iter() {
        match token {
            Token::Ghost(text) => out.push_str(text),
            Token::Visible(text) => {
                for ch in text.chars() {
                    if pos >= start && pos < stop && (pos - start) % step == 0 {
                        out.push(ch);
                    }
                    pos += 1;
                }
            }
        }
    }
    out
}

/// Reverse walk: sample positions `start, start-stride, …` above `stop`.
fn slice_backward(seq: &SegmentSeq, start: isize, stop: isize, stride: isize) -> String {
    let mut out = String::new();
    let mut pos: isize = seq.visible_len() as isize - 1;
    for token in seq.tokens().iter().rev() {
        match token {
            Token::Ghost(text) => out.push_str(text),
            Token::Visible(text) => {
                let chars: Vec<char> = text.chars().collect();
                for ch in chars.into_iter().rev() {
                    if pos <= start && pos > stop && (start - pos) % stride == 0 {
                        out.push(ch);
                    }
                    pos -= 1;
                }
            }
        }
    }
    out
}
