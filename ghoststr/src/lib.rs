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

//! Ghost-aware strings: text operations that see through embedded markup.
//!
//! A [`GhostStr`] wraps a raw string containing "ghost" substrings, which in
//! the shipped specialization are ANSI SGR escape sequences. Ghosts are
//! invisible to every user-facing operation (length, indexing, slicing,
//! search, case conversion, splitting) yet are carried losslessly through
//! every transformation, and a family-aware merge engine compacts the
//! redundant ones that structural edits leave behind.
//!
//! ```rust
//! use ghoststr::{GhostStr, SliceSpec};
//!
//! let banner = GhostStr::ansi_sgr("\x1b[31mRed\x1b[0m Plain");
//! assert_eq!(banner.visible_len(), 9);
//! assert_eq!(banner.find("Plain"), Some(4));
//!
//! let red = banner.slice(SliceSpec::range(0, 3)).unwrap();
//! assert_eq!(red.visible(), "Red");
//! ```

mod config;
mod format;
mod merge;
mod result;
mod segment;
pub mod sgr;
mod string;
mod translate;

pub use self::config::{Delegation, GhostProfile, Op, delegation};
pub use self::format::{FormatArgs, format_template};
pub use self::merge::{KeepLast, Reduce, merge};
pub use self::result::{GhostError, GhostResult};
pub use self::segment::{Disentangle, SegmentSeq, Token};
pub use self::string::GhostStr;
pub use self::translate::{SliceSpec, translate_index, translate_slice};
