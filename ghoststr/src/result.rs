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

//! Error types and result aliases for ghost string operations

/// Result type for ghost string operations
///
/// This is a convenience type alias that uses [`GhostError`] as the error type.
///
/// # Examples
///
/// ```
/// use ghoststr::GhostResult;
///
/// fn example() -> GhostResult<()> {
///     Ok(())
/// }
/// ```
pub type GhostResult<T> = Result<T, GhostError>;

/// Errors that can occur when working with ghost strings
///
/// This enum represents every failure the translation, merge, and formatting
/// engines can report. All operations are pure and fail fast; none produce
/// partial output alongside an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GhostError {
    /// A visible index resolved outside the valid range
    ///
    /// Visible indices cover `[0, visible_len)` after negative indices have
    /// been resolved against the visible length.
    #[error("visible index {index} out of range for visible length {len}")]
    OutOfRange {
        /// The index as supplied by the caller (before negative resolution)
        index: isize,
        /// The visible length of the string
        len: usize,
    },

    /// A separator or substring search failed to find its target
    ///
    /// Iterating callers (such as the split family) treat this as a normal
    /// loop-termination signal. It only surfaces when no valid result
    /// remains for the whole operation.
    #[error("substring {needle:?} not found in visible text")]
    NotFound {
        /// The substring that was searched for
        needle: String,
    },

    /// A slice specification used a zero step
    #[error("slice step cannot be zero")]
    InvalidSlice,

    /// Malformed placeholder grammar in a template
    ///
    /// Raised for unmatched braces, malformed format specifications, and
    /// unknown conversions.
    #[error("template syntax error at byte {position}: {description}")]
    TemplateSyntax {
        /// Byte position within the visible chunk where parsing failed
        position: usize,
        /// Description of what is wrong with the template
        description: String,
    },

    /// A placeholder referenced a field with no matching argument
    #[error("unknown format field {name:?}")]
    UnknownField {
        /// The field name or positional index that could not be resolved
        name: String,
    },

    /// An operation that is intentionally disabled
    ///
    /// Legacy percent-style formatting is ghost-unaware and would silently
    /// corrupt output, so it fails deterministically instead.
    #[error("{operation} is not supported: {directive}")]
    Unsupported {
        /// Name of the disabled operation
        operation: &'static str,
        /// What the caller should use instead
        directive: &'static str,
    },
}
