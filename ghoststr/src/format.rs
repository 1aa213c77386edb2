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

//! The template formatter: placeholder substitution over the visible tokens
//! of a segment sequence, with ghost tokens passed through as opaque
//! literal chunks.
//!
//! Each ghost token becomes a "dummy" parse unit carrying raw text and no
//! field. Visible tokens are parsed with the placeholder grammar, and an
//! empty dummy unit is inserted between every consecutive pair of units
//! from the same visible token (and one for a placeholder-free token), so
//! the unit list alternates content/dummy exactly like the token sequence
//! alternates visible/ghost. The SGR "smear" pass relies on that parity.

use crate::result::{GhostError, GhostResult};
use crate::segment::{SegmentSeq, Token};
use crate::sgr::SGR_RESET;
use std::collections::HashMap;
use tracing::instrument;

/// Argument values for template substitution.
///
/// Positional arguments satisfy `{}` and `{0}` style fields; named
/// arguments satisfy `{name}` style fields. All values are strings; callers
/// render richer types before substitution.
///
/// # Examples
///
/// ```rust
/// use ghoststr::FormatArgs;
///
/// let args = FormatArgs::new()
///     .arg("first")
///     .arg("second")
///     .named("who", "World");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatArgs {
    positional: Vec<String>,
    named: HashMap<String, String>,
}

impl FormatArgs {
    /// Creates an empty argument set.
    pub fn new() -> FormatArgs {
        FormatArgs::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<String>) -> FormatArgs {
        self.positional.push(value.into());
        self
    }

    /// Inserts a named argument.
    pub fn named(mut self, key: impl Into<String>, value: impl Into<String>) -> FormatArgs {
        self.named.insert(key.into(), value.into());
        self
    }
}

/// How a placeholder names its argument.
#[derive(Clone, Debug, PartialEq, Eq)]
enum FieldName {
    /// `{}`: next positional argument in order.
    Auto,
    /// `{0}`: explicit positional index.
    Index(usize),
    /// `{name}`: named argument.
    Named(String),
}

/// A parsed placeholder: field name, optional conversion, format spec.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FieldSpec {
    name: FieldName,
    conversion: Option<char>,
    spec: String,
}

/// One parse unit: literal text plus an optional trailing field.
///
/// Units with `ghost` set come from ghost tokens (or are inserted dummies /
/// synthetic smear units); they never carry a field and their literal is
/// emitted verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Unit {
    literal: String,
    field: Option<FieldSpec>,
    ghost: bool,
}

impl Unit {
    fn dummy(literal: String) -> Unit {
        Unit {
            literal,
            field: None,
            ghost: true,
        }
    }
}

/// Parses one visible chunk with the placeholder grammar.
///
/// Grammar: `{name}`, `{name!conv}`, `{name:spec}`, `{name!conv:spec}`,
/// with `{{` and `}}` as literal braces. Returns `(literal, field)` units
/// in source order; a trailing literal with no field is emitted only when
/// non-empty, matching the common mini-language parse.
fn parse_chunk(chunk: &str) -> GhostResult<Vec<Unit>> {
    let mut units = Vec::new();
    let mut literal = String::new();
    let mut chars = chunk.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some(&(_, '{')) = chars.peek() {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                let mut body = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    body.push(inner);
                }
                if !closed {
                    return Err(GhostError::TemplateSyntax {
                        position,
                        description: "single '{' encountered in format string".to_string(),
                    });
                }
                units.push(Unit {
                    literal: std::mem::take(&mut literal),
                    field: Some(parse_field(&body, position)?),
                    ghost: false,
                });
            }
            '}' => {
                if let Some(&(_, '}')) = chars.peek() {
                    chars.next();
                    literal.push('}');
                    continue;
                }
                return Err(GhostError::TemplateSyntax {
                    position,
                    description: "single '}' encountered in format string".to_string(),
                });
            }
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        units.push(Unit {
            literal,
            field: None,
            ghost: false,
        });
    }
    Ok(units)
}

/// Parses the inside of a placeholder: `name[!conv][:spec]`.
fn parse_field(body: &str, position: usize) -> GhostResult<FieldSpec> {
    let (head, spec) = match body.split_once(':') {
        Some((head, spec)) => (head, spec.to_string()),
        None => (body, String::new()),
    };
    let (name, conversion) = match head.split_once('!') {
        Some((name, conv)) => {
            let mut chars = conv.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => (name, Some(ch)),
                _ => {
                    return Err(GhostError::TemplateSyntax {
                        position,
                        description: format!("invalid conversion {conv:?}"),
                    });
                }
            }
        }
        None => (head, None),
    };
    let name = if name.is_empty() {
        FieldName::Auto
    } else if let Ok(index) = name.parse::<usize>() {
        FieldName::Index(index)
    } else {
        FieldName::Named(name.to_string())
    };
    Ok(FieldSpec {
        name,
        conversion,
        spec,
    })
}

/// Builds the full unit list for a segment sequence.
fn build_units(seq: &SegmentSeq) -> GhostResult<Vec<Unit>> {
    let mut units = Vec::new();
    for token in seq.iter() {
        match token {
            Token::Ghost(text) => units.push(Unit::dummy(text.clone())),
            Token::Visible(text) => {
                let parsed = parse_chunk(text)?;
                if parsed.is_empty() {
                    units.push(Unit::dummy(String::new()));
                    continue;
                }
                let stop = parsed.len() - 1;
                for (index, unit) in parsed.into_iter().enumerate() {
                    units.push(unit);
                    if index < stop {
                        units.push(Unit::dummy(String::new()));
                    }
                }
            }
        }
    }
    Ok(units)
}

/// The SGR smear pass.
///
/// After every unit that substitutes a field, injects a synthetic ghost
/// unit of full reset followed by every ghost literal seen so far in the
/// template. A substituted value must not inherit the styling active before
/// it, and must not leak its own styling into the literal text that
/// follows; re-asserting "reset + cumulative prior codes" restores the
/// ambient style either way.
fn smear(units: Vec<Unit>) -> Vec<Unit> {
    let mut out = Vec::with_capacity(units.len());
    let mut cumulative = String::new();
    for unit in units {
        let is_ghost = unit.ghost;
        let has_field = unit.field.is_some();
        let literal = if is_ghost { unit.literal.clone() } else { String::new() };
        out.push(unit);
        if is_ghost {
            cumulative.push_str(&literal);
        } else if has_field {
            out.push(Unit::dummy(format!("{SGR_RESET}{cumulative}")));
        }
    }
    out
}

/// Renders a unit list against the supplied arguments.
fn render(units: &[Unit], args: &FormatArgs) -> GhostResult<String> {
    let mut out = String::new();
    let mut auto_index = 0usize;
    let mut saw_auto = false;
    let mut saw_manual = false;

    for unit in units {
        out.push_str(&unit.literal);
        let Some(field) = &unit.field else { continue };
        let value = match &field.name {
            FieldName::Auto => {
                if saw_manual {
                    return Err(switch_error());
                }
                saw_auto = true;
                let value =
                    args.positional
                        .get(auto_index)
                        .ok_or_else(|| GhostError::UnknownField {
                            name: auto_index.to_string(),
                        })?;
                auto_index += 1;
                value
            }
            FieldName::Index(index) => {
                if saw_auto {
                    return Err(switch_error());
                }
                saw_manual = true;
                args.positional
                    .get(*index)
                    .ok_or_else(|| GhostError::UnknownField {
                        name: index.to_string(),
                    })?
            }
            FieldName::Named(name) => {
                args.named
                    .get(name)
                    .ok_or_else(|| GhostError::UnknownField { name: name.clone() })?
            }
        };
        let converted = convert(value, field.conversion)?;
        out.push_str(&pad(&converted, &field.spec)?);
    }
    Ok(out)
}

fn switch_error() -> GhostError {
    GhostError::TemplateSyntax {
        position: 0,
        description: "cannot switch between automatic and manual field numbering".to_string(),
    }
}

/// Applies a conversion flag. Only `!s` (identity) is meaningful for
/// string-valued arguments.
fn convert(value: &str, conversion: Option<char>) -> GhostResult<String> {
    match conversion {
        None | Some('s') => Ok(value.to_string()),
        Some(other) => Err(GhostError::TemplateSyntax {
            position: 0,
            description: format!("unknown conversion {other:?}"),
        }),
    }
}

/// Applies the `[[fill]align][width][.precision]` spec subset to a string
/// value.
fn pad(value: &str, spec: &str) -> GhostResult<String> {
    if spec.is_empty() {
        return Ok(value.to_string());
    }
    let chars: Vec<char> = spec.chars().collect();
    let mut fill = ' ';
    let mut align = '<';
    let mut cursor = 0usize;

    if chars.len() >= 2 && matches!(chars[1], '<' | '>' | '^') {
        fill = chars[0];
        align = chars[1];
        cursor = 2;
    } else if matches!(chars[0], '<' | '>' | '^') {
        align = chars[0];
        cursor = 1;
    }

    let mut width = 0usize;
    let mut saw_width = false;
    while cursor < chars.len() && chars[cursor].is_ascii_digit() {
        width = width * 10 + chars[cursor] as usize - '0' as usize;
        saw_width = true;
        cursor += 1;
    }

    let mut precision = None;
    if cursor < chars.len() && chars[cursor] == '.' {
        cursor += 1;
        let mut digits = 0usize;
        let mut saw_digits = false;
        while cursor < chars.len() && chars[cursor].is_ascii_digit() {
            digits = digits * 10 + chars[cursor] as usize - '0' as usize;
            saw_digits = true;
            cursor += 1;
        }
        if !saw_digits {
            return Err(GhostError::TemplateSyntax {
                position: 0,
                description: format!("invalid format spec {spec:?}"),
            });
        }
        precision = Some(digits);
    }

    if cursor != chars.len() {
        return Err(GhostError::TemplateSyntax {
            position: 0,
            description: format!("invalid format spec {spec:?}"),
        });
    }

    let mut text: String = match precision {
        Some(limit) => value.chars().take(limit).collect(),
        None => value.to_string(),
    };
    let count = text.chars().count();
    if saw_width && count < width {
        let missing = width - count;
        match align {
            '>' => {
                let mut padded: String = std::iter::repeat(fill).take(missing).collect();
                padded.push_str(&text);
                text = padded;
            }
            '^' => {
                let left = missing / 2;
                let mut padded: String = std::iter::repeat(fill).take(left).collect();
                padded.push_str(&text);
                padded.extend(std::iter::repeat(fill).take(missing - left));
                text = padded;
            }
            _ => text.extend(std::iter::repeat(fill).take(missing)),
        }
    }
    Ok(text)
}

/// Substitutes placeholders across a segment sequence.
///
/// Ghost tokens never confuse placeholder parsing and are never lost from
/// the output. With `smear` set (the SGR specialization) every substituted
/// value is followed by a synthetic reset-and-replay ghost so substituted
/// content cannot alter the ambient styling.
#[instrument(skip_all, fields(smear = smear_pass))]
pub fn format_template(seq: &SegmentSeq, args: &FormatArgs, smear_pass: bool) -> GhostResult<String> {
    let mut units = build_units(seq)?;
    if smear_pass {
        units = smear(units);
    }
    render(&units, args)
}
