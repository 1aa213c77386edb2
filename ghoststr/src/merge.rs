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

//! The merge engine: compacts redundant ghost tokens after structural
//! operations while preserving every non-empty visible token unchanged and
//! in order.
//!
//! Repeated mutation chains (slice, concatenate, slice again) tend to strand
//! ghost tokens next to each other with nothing visible between them. The
//! merge engine runs a pluggable reducer over each run of pending ghosts and
//! flushes the surviving ones immediately before the next non-empty visible
//! token.

use crate::segment::{SegmentSeq, Token};
use tracing::instrument;

/// The reducer strategy the merge engine applies to ghost tokens.
///
/// A reducer is invoked once per ghost token during a left-to-right scan.
/// It receives the pending ghost buffer (ghosts seen since the last
/// non-empty visible token) and the new ghost token, and decides which
/// ghosts remain pending. Reducers must be total: there is no error path,
/// and a reducer that panics propagates that failure to the caller of
/// [`merge`].
///
/// Plain functions and closures of type `Fn(&mut Vec<String>, &str)`
/// implement this trait automatically.
pub trait Reduce: Send + Sync {
    /// Folds `next` into the pending ghost buffer.
    fn reduce(&self, pending: &mut Vec<String>, next: &str);
}

impl<F> Reduce for F
where
    F: Fn(&mut Vec<String>, &str) + Send + Sync,
{
    fn reduce(&self, pending: &mut Vec<String>, next: &str) {
        self(pending, next)
    }
}

/// The default "progressive keep-last" reducer.
///
/// When consecutive ghost tokens are not separated by a non-empty visible
/// token, only the most recent one is retained. Most ghost tokens are
/// redundant once superseded, and keeping only the latest stops unbounded
/// accumulation across repeated mutation chains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeepLast;

impl Reduce for KeepLast {
    fn reduce(&self, pending: &mut Vec<String>, next: &str) {
        if !pending.is_empty() {
            pending.remove(0);
        }
        pending.push(next.to_string());
    }
}

/// Runs `reducer` across the whole sequence and re-flattens it to a raw
/// string.
///
/// Ghost tokens pass through the reducer into a pending buffer. A non-empty
/// visible token flushes the buffer in full immediately before itself, then
/// clears it. Empty visible placeholders do not flush, so ghosts separated
/// only by placeholders reduce as a single run.
///
/// If `full` is set, trailing pending ghosts are flushed at the end even
/// though no visible token follows them; otherwise they are discarded. The
/// flag distinguishes "compact but keep trailing markers" (needed to keep a
/// still-active color at string end) from "fully clean trailing clutter".
///
/// # Examples
///
/// ```rust
/// use ghoststr::{merge, KeepLast, SegmentSeq, Token};
///
/// let seq = SegmentSeq::from_tokens(vec![
///     Token::Ghost("X".to_string()),
///     Token::Ghost("Y".to_string()),
///     Token::Visible("a".to_string()),
///     Token::Ghost("Z".to_string()),
/// ]);
/// assert_eq!(merge(&seq, &KeepLast, false), "Ya");
/// assert_eq!(merge(&seq, &KeepLast, true), "YaZ");
/// ```
#[instrument(skip_all, fields(tokens = seq.count(), full))]
pub fn merge(seq: &SegmentSeq, reducer: &dyn Reduce, full: bool) -> String {
    let mut pending: Vec<String> = Vec::new();
    let mut out = String::new();
    for token in seq.iter() {
        match token {
            Token::Ghost(text) => reducer.reduce(&mut pending, text),
            Token::Visible(text) => {
                if !text.is_empty() {
                    for ghost in pending.drain(..) {
                        out.push_str(&ghost);
                    }
                    out.push_str(text);
                }
            }
        }
    }
    if full {
        for ghost in pending {
            out.push_str(&ghost);
        }
    }
    out
}
