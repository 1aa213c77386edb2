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

//! Styled Log Rendering Demo
//!
//! Renders a batch of colorized log lines from one styled template, then
//! truncates them to a fixed pane width by visible length. The truncation
//! never counts escape bytes against the column budget and never cuts a
//! sequence in half.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin log_render
//! ```

use ghoststr::{FormatArgs, GhostResult, GhostStr, SliceSpec};
use tracing::info;

const PANE_WIDTH: isize = 34;

fn render(template: &GhostStr, ts: &str, level: &str, message: &str) -> GhostResult<GhostStr> {
    let args = FormatArgs::new()
        .named("ts", ts)
        .named("level", level)
        .named("message", message);
    let line = template.format(&args)?;
    line.slice(SliceSpec::head(PANE_WIDTH))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let template = GhostStr::ansi_sgr(
        "\x1b[90m{ts}\x1b[0m \x1b[1m{level:>5}\x1b[0m {message}",
    );

    let entries = [
        ("12:00:01", "\x1b[32mINFO\x1b[0m", "service started"),
        ("12:00:02", "\x1b[33mWARN\x1b[0m", "cache miss ratio above threshold"),
        ("12:00:03", "\x1b[31mERROR\x1b[0m", "upstream connection refused, retrying with backoff"),
        ("12:00:04", "\x1b[32mINFO\x1b[0m", "upstream connection restored"),
    ];

    for (ts, level, message) in entries {
        let line = render(&template, ts, level, message)?;
        info!(visible = line.visible_len(), raw = line.raw().len(), "rendered");
        println!("{line}");
    }

    Ok(())
}
