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

//! Comprehensive correctness tests for GhostStr
//!
//! This test suite runs multi-step pipelines over styled text, the kind of
//! chained slicing, searching, merging, and formatting a log renderer or
//! terminal UI performs, and checks that visible semantics and ghost
//! transport stay coherent across whole chains rather than single calls.

use ghoststr::sgr::SgrSplitter;
use ghoststr::{Disentangle, FormatArgs, GhostProfile, GhostStr, SliceSpec};

/// Strips ghosts from a raw string by splitting it again.
fn strip(raw: &str) -> String {
    SgrSplitter.disentangle(raw).visible_text()
}

// ============================================================================
// Log-line rendering pipeline
// ============================================================================

#[test]
fn test_log_line_pipeline() {
    let template = GhostStr::ansi_sgr(
        "\x1b[90m{ts}\x1b[0m \x1b[1m\x1b[31m{level:>5}\x1b[0m {message}",
    );
    let args = FormatArgs::new()
        .named("ts", "12:00:01")
        .named("level", "ERROR")
        .named("message", "disk full");
    let line = template.format(&args).unwrap();

    assert_eq!(line.visible(), "12:00:01 ERROR disk full");
    assert_eq!(line.visible_len(), 24);

    // Truncate to a 14-column pane; the styling of the surviving text rides
    // along.
    let truncated = line.slice(SliceSpec::head(14)).unwrap();
    assert_eq!(truncated.visible(), "12:00:01 ERROR");
    assert!(truncated.raw().contains("\x1b[90m"));
    assert!(truncated.raw().contains("\x1b[31m"));

    // The level column is still findable by visible position.
    assert_eq!(line.find("ERROR"), Some(9));
}

#[test]
fn test_column_extraction_pipeline() {
    let row = GhostStr::ansi_sgr("\x1b[36malice\x1b[0m|\x1b[33m42\x1b[0m|\x1b[32mactive\x1b[0m");
    let columns = row.split("|", None);
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].visible(), "alice");
    assert_eq!(columns[1].parse_visible::<u32>().unwrap(), 42);
    assert_eq!(columns[2].visible(), "active");
    // Each column still carries its own color.
    assert!(columns[0].raw().contains("\x1b[36m"));
    assert!(columns[2].raw().contains("\x1b[32m"));
}

#[test]
fn test_repeated_edit_chain_stays_bounded() {
    // Slice and concatenate repeatedly; under the SGR profile each step
    // merges, so ghost clutter cannot grow without bound.
    let mut value = GhostStr::ansi_sgr("\x1b[31mabcdefgh\x1b[0m");
    for _ in 0..10 {
        let len = value.visible_len() as isize;
        let head = value.slice(SliceSpec::head(len / 2 + 1)).unwrap();
        value = head.concat("\x1b[31mx\x1b[0m");
    }
    assert_eq!(value.visible_len(), 4);
    // A handful of codes at most, not dozens.
    assert!(value.raw().matches('\x1b').count() <= 2 * value.visible_len());
}

// ============================================================================
// Cross-operation coherence
// ============================================================================

#[test]
fn test_slice_of_slice_matches_direct_slice() {
    let value = GhostStr::ansi_sgr("\x1b[1mzero one two three\x1b[0m");
    let outer = value.slice(SliceSpec::range(5, 17)).unwrap();
    let inner = outer.slice(SliceSpec::range(4, 7)).unwrap();
    let direct = value.slice(SliceSpec::range(9, 12)).unwrap();
    assert_eq!(inner.visible(), direct.visible());
    assert_eq!(inner.visible(), "two");
}

#[test]
fn test_case_insensitive_search_via_lowercase() {
    let value = GhostStr::ansi_sgr("\x1b[35mWarning: LOW Disk\x1b[0m");
    let folded = value.to_lowercase();
    assert_eq!(folded.find("low disk"), Some(9));
    // Folding never moved a ghost.
    assert_eq!(strip(folded.raw()), folded.visible());
}

#[test]
fn test_replace_then_format_round() {
    let template = GhostStr::ansi_sgr("\x1b[1mHello NAME, welcome to {place}\x1b[0m")
        .replace("NAME", "{name}", None);
    let args = FormatArgs::new().named("name", "Ada").named("place", "Rust");
    let rendered = template.format(&args).unwrap();
    assert_eq!(rendered.visible(), "Hello Ada, welcome to Rust");
    assert!(rendered.raw().starts_with("\x1b[1m"));
}

#[test]
fn test_title_case_report_heading() {
    let value = GhostStr::ansi_sgr("\x1b[4mquarterly sales report\x1b[0m");
    let heading = value.title_case();
    assert_eq!(heading.visible(), "Quarterly Sales Report");
    assert!(heading.raw().starts_with("\x1b[4m"));
}

#[test]
fn test_partition_key_value_with_styled_sides() {
    let value = GhostStr::ansi_sgr("\x1b[33mretries\x1b[0m = \x1b[36m5\x1b[0m");
    let (key, _, val) = value.partition(" = ");
    assert_eq!(key.trim().visible(), "retries");
    assert_eq!(val.trim().parse_visible::<u8>().unwrap(), 5);
}

// ============================================================================
// Profile contrast
// ============================================================================

#[test]
fn test_profiles_agree_on_visible_disagree_on_ghosts() {
    let raw = "\x1b[1m\x1b[31mhot\x1b[0m cold";
    let base = GhostStr::new(raw, GhostProfile::passthrough(SgrSplitter));
    let clean = GhostStr::new(raw, GhostProfile::compacting(SgrSplitter));
    let sgr = GhostStr::ansi_sgr(raw);

    let spec = SliceSpec::range(0, 3);
    let base_slice = base.slice(spec).unwrap();
    let clean_slice = clean.slice(spec).unwrap();
    let sgr_slice = sgr.slice(spec).unwrap();

    // Same visible result everywhere.
    assert_eq!(base_slice.visible(), "hot");
    assert_eq!(clean_slice.visible(), "hot");
    assert_eq!(sgr_slice.visible(), "hot");

    // The base profile keeps every ghost verbatim.
    assert_eq!(base_slice.raw(), "\x1b[1m\x1b[31mhot\x1b[0m");
    // Keep-last reduction keeps one ghost per run and no trailing run.
    assert_eq!(clean_slice.raw(), "\x1b[31mhot");
    // The SGR reducer knows bold and red coexist, and full merge keeps the
    // trailing reset.
    assert_eq!(sgr_slice.raw(), "\x1b[1m\x1b[31mhot\x1b[0m");
}

#[test]
fn test_explicit_merge_on_passthrough_profile() {
    let base = GhostStr::new(
        "\x1b[31m\x1b[32m\x1b[33mx\x1b[0m",
        GhostProfile::passthrough(SgrSplitter),
    );
    // Nothing happened implicitly.
    assert_eq!(base.raw(), "\x1b[31m\x1b[32m\x1b[33mx\x1b[0m");
    assert_eq!(base.merge(false).raw(), "\x1b[33mx");
    assert_eq!(base.merge(true).raw(), "\x1b[33mx\x1b[0m");
}

// ============================================================================
// Reconstruction guarantees
// ============================================================================

#[test]
fn test_every_operation_output_restrips_cleanly() {
    // Whatever an operation produces must itself be a well-formed raw
    // string: splitting it again strips to exactly its visible view.
    let value = GhostStr::ansi_sgr("\x1b[1mThe \x1b[31mred\x1b[39m fox\x1b[0m");
    let outputs = vec![
        value.slice(SliceSpec::range(2, 9)).unwrap(),
        value.concat(" jumps"),
        value.repeat(2),
        value.to_uppercase(),
        value.trim(),
        value.replace("fox", "dog", None),
        value.merged(),
    ];
    for output in outputs {
        assert_eq!(strip(output.raw()), output.visible());
    }
}
