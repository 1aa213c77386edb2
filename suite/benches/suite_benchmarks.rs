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

//! Integration benchmarks for GhostStr
//!
//! These benchmarks measure whole pipelines (render, truncate, search,
//! rewrite) rather than individual primitives, approximating how a log
//! renderer or terminal UI uses the library.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ghoststr::{FormatArgs, GhostStr, SliceSpec};
use std::hint::black_box;

/// A styled multi-field log line of roughly `words` words.
fn styled_line(words: usize) -> String {
    let mut raw = String::from("\x1b[90m12:00:01\x1b[0m \x1b[1m\x1b[31mERROR\x1b[0m ");
    for word in 0..words {
        raw.push_str(&format!("\x1b[{}mword{word}\x1b[0m ", 31 + (word % 7)));
    }
    raw
}

// Benchmark the render-truncate-merge pipeline at increasing line widths
fn bench_render_truncate(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_truncate");

    for words in [10, 100, 1000].iter() {
        let raw = styled_line(*words);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &raw, |b, raw| {
            b.iter(|| {
                let line = GhostStr::ansi_sgr(black_box(raw.as_str()));
                let width = line.visible_len() as isize / 2;
                black_box(line.slice(SliceSpec::head(width)).unwrap());
            });
        });
    }
    group.finish();
}

// Benchmark template rendering with many fields
fn bench_template_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_render");

    for fields in [2, 8, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(fields), fields, |b, &fields| {
            let mut template = String::from("\x1b[1m");
            let mut args = FormatArgs::new();
            for field in 0..fields {
                template.push_str(&format!("\x1b[3{}m{{f{field}}} ", 1 + field % 7));
                args = args.named(format!("f{field}"), format!("value{field}"));
            }
            template.push_str("\x1b[0m");
            let template = GhostStr::ansi_sgr(template);

            b.iter(|| {
                black_box(template.format(black_box(&args)).unwrap());
            });
        });
    }
    group.finish();
}

// Benchmark search plus highlight rewrite
fn bench_search_and_rewrite(c: &mut Criterion) {
    c.bench_function("search_and_rewrite", |b| {
        let line = GhostStr::ansi_sgr(styled_line(100));

        b.iter(|| {
            let line = black_box(&line);
            if line.contains("word050") {
                black_box(line.replace("word050", "\x1b[7mword050\x1b[27m", Some(1)));
            }
        });
    });
}

// Benchmark word wrapping via repeated visible splits
fn bench_word_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_split");

    for words in [10, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(words), words, |b, &words| {
            let line = GhostStr::ansi_sgr(styled_line(words));

            b.iter(|| {
                black_box(line.split(black_box(" "), None));
            });
        });
    }
    group.finish();
}

// Benchmark normalization of accumulated styling clutter
fn bench_clutter_merge(c: &mut Criterion) {
    c.bench_function("clutter_merge", |b| {
        // A pathological line: style churn with barely any text.
        let mut raw = String::new();
        for run in 0..500 {
            raw.push_str(&format!("\x1b[{}m\x1b[1m\x1b[0m.", 31 + run % 7));
        }
        let line = GhostStr::ansi_sgr(raw);

        b.iter(|| {
            black_box(line.merged());
        });
    });
}

criterion_group!(
    benches,
    bench_render_truncate,
    bench_template_render,
    bench_search_and_rewrite,
    bench_word_split,
    bench_clutter_merge,
);

criterion_main!(benches);
