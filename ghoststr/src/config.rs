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

//! Strategy configuration for [`GhostStr`](crate::GhostStr) instances and
//! the closed classification table that routes each operation to its
//! delegation strategy.

use crate::merge::{KeepLast, Reduce};
use crate::segment::Disentangle;
use crate::sgr::{SgrReducer, SgrSplitter};
use std::sync::Arc;

/// The strategy configuration a [`GhostStr`](crate::GhostStr) carries.
///
/// A profile is composition, not inheritance: the disentangler and reducer
/// are explicit strategy objects, and variant behavior (auto-merge after
/// mutation, full merging, the SGR smear) is plain configuration. The named
/// preset constructors cover the three shipped behaviors.
///
/// Profiles are shared between the instances a transformation produces, so
/// cloning one only bumps reference counts.
///
/// # Examples
///
/// ```rust
/// use ghoststr::{GhostProfile, sgr::SgrSplitter};
///
/// // Base behavior: ghosts pass through untouched until merge is called.
/// let plain = GhostProfile::passthrough(SgrSplitter);
///
/// // Keep sequential ghosts at a minimum after every mutation.
/// let compact = GhostProfile::compacting(SgrSplitter);
///
/// // Full ANSI SGR handling: SGR splitter, SGR reducer, maximal merging.
/// let sgr = GhostProfile::ansi_sgr();
/// ```
#[derive(Clone)]
pub struct GhostProfile {
    pub(crate) disentangle: Arc<dyn Disentangle>,
    pub(crate) reduce: Arc<dyn Reduce>,
    pub(crate) auto_merge: bool,
    pub(crate) full_merge: bool,
    pub(crate) smear_on_format: bool,
}

impl GhostProfile {
    /// Base behavior: split with `disentangle`, never merge implicitly,
    /// reduce with [`KeepLast`] when merge is requested explicitly.
    pub fn passthrough(disentangle: impl Disentangle + 'static) -> GhostProfile {
        GhostProfile {
            disentangle: Arc::new(disentangle),
            reduce: Arc::new(KeepLast),
            auto_merge: false,
            full_merge: false,
            smear_on_format: false,
        }
    }

    /// Compacting behavior: like [`passthrough`](GhostProfile::passthrough)
    /// but every mutation (slice, concat, repeat, format) is followed by a
    /// merge pass, keeping leftover ghosts at a minimum.
    pub fn compacting(disentangle: impl Disentangle + 'static) -> GhostProfile {
        GhostProfile {
            disentangle: Arc::new(disentangle),
            reduce: Arc::new(KeepLast),
            auto_merge: true,
            full_merge: false,
            smear_on_format: false,
        }
    }

    /// The ANSI SGR preset: SGR splitter, SGR family reducer, auto-merge
    /// with maximal (`full`) compaction, and the formatter smear pass.
    pub fn ansi_sgr() -> GhostProfile {
        GhostProfile {
            disentangle: Arc::new(SgrSplitter),
            reduce: Arc::new(SgrReducer),
            auto_merge: true,
            full_merge: true,
            smear_on_format: true,
        }
    }

    /// Replaces the merge reducer of this profile.
    pub fn with_reducer(mut self, reduce: impl Reduce + 'static) -> GhostProfile {
        self.reduce = Arc::new(reduce);
        self
    }

    /// Returns `true` if mutations are followed by an implicit merge pass.
    pub fn auto_merge(&self) -> bool {
        self.auto_merge
    }

    /// Returns `true` if merging flushes trailing pending ghosts by default.
    pub fn full_merge(&self) -> bool {
        self.full_merge
    }

    /// Returns `true` if formatting applies the SGR smear pass.
    pub fn smear_on_format(&self) -> bool {
        self.smear_on_format
    }
}

impl std::fmt::Debug for GhostProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GhostProfile")
            .field("auto_merge", &self.auto_merge)
            .field("full_merge", &self.full_merge)
            .field("smear_on_format", &self.smear_on_format)
            .finish_non_exhaustive()
    }
}

/// The delegation strategy for one wrapper operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delegation {
    /// The operation reads the raw string, ghosts included.
    Raw,
    /// The operation reads the ghost-stripped visible view.
    Visible,
    /// The operation runs a ghost-aware algorithm over the segments.
    GhostAware,
}

/// Every operation the wrapper exposes, keyed for the classification table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Raw,
    Display,
    Compare,
    VisibleLen,
    IsEmpty,
    Contains,
    StartsWith,
    EndsWith,
    Find,
    Rfind,
    CountMatches,
    IsAlphanumeric,
    IsAlphabetic,
    IsAscii,
    IsNumeric,
    IsLowercase,
    IsUppercase,
    IsWhitespace,
    ParseVisible,
    CharAt,
    Slice,
    Concat,
    Prepend,
    Repeat,
    Merge,
    Format,
    Replace,
    Split,
    Rsplit,
    SplitLines,
    Partition,
    Rpartition,
    Trim,
    TrimStart,
    TrimEnd,
    StripPrefix,
    StripSuffix,
    Capitalize,
    TitleCase,
    ToUppercase,
    ToLowercase,
}

/// The closed classification table.
///
/// Replaces call-time attribute dispatch with a static mapping from each
/// supported operation to the strategy that implements it. There is no
/// runtime reflection; the wrapper consults this table where it routes
/// reads, and the ghost-aware operations are individual methods.
pub fn delegation(op: Op) -> Delegation {
    match op {
        Op::Raw | Op::Display | Op::Compare => Delegation::Raw,
        Op::VisibleLen
        | Op::IsEmpty
        | Op::Contains
        | Op::StartsWith
        | Op::EndsWith
        | Op::Find
        | Op::Rfind
        | Op::CountMatches
        | Op::IsAlphanumeric
        | Op::IsAlphabetic
        | Op::IsAscii
        | Op::IsNumeric
        | Op::IsLowercase
        | Op::IsUppercase
        | Op::IsWhitespace
        | Op::ParseVisible => Delegation::Visible,
        Op::CharAt
        | Op::Slice
        | Op::Concat
        | Op::Prepend
        | Op::Repeat
        | Op::Merge
        | Op::Format
        | Op::Replace
        | Op::Split
        | Op::Rsplit
        | Op::SplitLines
        | Op::Partition
        | Op::Rpartition
        | Op::Trim
        | Op::TrimStart
        | Op::TrimEnd
        | Op::StripPrefix
        | Op::StripSuffix
        | Op::Capitalize
        | Op::TitleCase
        | Op::ToUppercase
        | Op::ToLowercase => Delegation::GhostAware,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let plain = GhostProfile::passthrough(SgrSplitter);
        assert!(!plain.auto_merge());
        assert!(!plain.full_merge());
        assert!(!plain.smear_on_format());

        let compact = GhostProfile::compacting(SgrSplitter);
        assert!(compact.auto_merge());
        assert!(!compact.full_merge());

        let sgr = GhostProfile::ansi_sgr();
        assert!(sgr.auto_merge());
        assert!(sgr.full_merge());
        assert!(sgr.smear_on_format());
    }

    #[test]
    fn test_classification_table() {
        assert_eq!(delegation(Op::Raw), Delegation::Raw);
        assert_eq!(delegation(Op::Contains), Delegation::Visible);
        assert_eq!(delegation(Op::Find), Delegation::Visible);
        assert_eq!(delegation(Op::Slice), Delegation::GhostAware);
        assert_eq!(delegation(Op::Format), Delegation::GhostAware);
        assert_eq!(delegation(Op::ToUppercase), Delegation::GhostAware);
    }
}
