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

//! GhostStr Demonstration
//!
//! This demo walks through the core GhostStr operations on a styled string:
//! the visible view, ghost-aware slicing, merging, and template formatting.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin ghost_demo
//! ```
//!
//! Run in a terminal that supports ANSI colors to see the styling survive
//! each transformation.

use ghoststr::{FormatArgs, GhostStr, SliceSpec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let banner = GhostStr::ansi_sgr("\x1b[1m\x1b[31mGhostStr\x1b[0m sees through \x1b[4mstyling\x1b[0m");

    println!("raw:         {:?}", banner.raw());
    println!("rendered:    {banner}");
    println!("visible:     {:?}", banner.visible());
    println!("visible len: {} (raw len {})", banner.visible_len(), banner.raw().len());
    println!();

    // Slicing works in visible positions; the codes ride along.
    let head = banner.slice(SliceSpec::head(8))?;
    println!("first 8 visible chars: {head}  (raw {:?})", head.raw());

    let tail = banner.slice(SliceSpec::tail(-7))?;
    println!("last 7 visible chars:  {tail}  (raw {:?})", tail.raw());
    println!();

    // Search and case conversion ignore the ghosts entirely.
    println!("find(\"through\")  -> {:?}", banner.find("through"));
    println!("uppercased        -> {}", banner.to_uppercase());
    println!();

    // Editing chains accumulate redundant codes; merging compacts them.
    let cluttered = GhostStr::ansi_sgr("\x1b[31m\x1b[32m\x1b[1m\x1b[0m\x1b[34mblue\x1b[0m");
    println!("cluttered raw: {:?}", cluttered.raw());
    println!("merged raw:    {:?}", cluttered.merged().raw());
    println!();

    // Template formatting keeps substituted values from bleeding styles.
    let template = GhostStr::ansi_sgr("\x1b[1mstatus: {status}\x1b[0m ({detail})");
    let args = FormatArgs::new()
        .named("status", "\x1b[32mOK\x1b[0m")
        .named("detail", "all checks passed");
    let line = template.format(&args)?;
    println!("formatted: {line}");
    println!("raw:       {:?}", line.raw());

    Ok(())
}
