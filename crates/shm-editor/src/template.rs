//! Template renderer: field values to `SpriteType` markup.
//!
//! Rendering is pure. String-typed fields are wrapped in double quotes with
//! no escaping, so a value containing `"` produces a broken block; numeric
//! and boolean-looking fields are emitted unquoted exactly as typed.
//!
//! The classic layout repeats the `animation` table twice per entry. That
//! duplication is kept to reproduce existing mod files byte for byte.

use std::fmt::{self, Write as _};
use std::num::NonZeroU32;

use shm_core::ShmError;
use shm_core::config::Layout;

use crate::fields::{FieldId, FieldValues};

const INDENT: &str = "    ";

/// One rendered `SpriteType` entry. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShineBlock(String);

impl ShineBlock {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShineBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Most blocks a single generate action may render.
pub const MAX_SHINES: u32 = 1000;

/// Parses the "Number of Shines" field as a positive integer no larger than
/// [`MAX_SHINES`].
pub fn shine_count(values: &FieldValues) -> Result<NonZeroU32, ShmError> {
    let raw = &values[FieldId::NumberOfShines];
    let count = raw
        .trim()
        .parse::<NonZeroU32>()
        .map_err(|_err| ShmError::MalformedCount { value: raw.clone() })?;
    if count.get() > MAX_SHINES {
        return Err(ShmError::TooManyShines {
            value: raw.clone(),
            max: MAX_SHINES,
        });
    }
    Ok(count)
}

/// Renders every block one generate action produces.
///
/// Classic layout renders "Number of Shines" identical blocks; tabbed
/// renders exactly one and ignores the count.
pub fn render_all(values: &FieldValues, layout: Layout) -> Result<Vec<ShineBlock>, ShmError> {
    match layout {
        Layout::Classic => {
            let count = shine_count(values)?.get() as usize;
            let block = render(values, layout);
            Ok(vec![block; count])
        }
        Layout::Tabbed => Ok(vec![render(values, layout)]),
    }
}

/// Renders one block.
pub fn render(values: &FieldValues, layout: Layout) -> ShineBlock {
    let mut out = String::new();
    match layout {
        Layout::Classic => render_classic(&mut out, values),
        Layout::Tabbed => render_tabbed(&mut out, values),
    }
    ShineBlock(out)
}

fn render_classic(out: &mut String, v: &FieldValues) {
    out.push_str("SpriteType = {\n");
    push_line(out, 1, &format!("name = \"{}_shine\"", v[FieldId::Name]));
    push_header(out, v);
    for _ in 0..2 {
        push_line(out, 1, "animation = {");
        push_animation_body(out, v);
        push_line(out, 1, "}");
    }
    push_line(out, 1, "legacy_lazy_load = no");
    out.push('}');
}

fn render_tabbed(out: &mut String, v: &FieldValues) {
    out.push_str("SpriteType =\n{\n");
    push_line(out, 1, &format!("name = \"{}\"", v[FieldId::Name]));
    push_header(out, v);
    push_line(out, 1, "animation =");
    push_line(out, 1, "{");
    push_animation_body(out, v);
    push_line(out, 1, "}");
    out.push('}');
}

fn push_header(out: &mut String, v: &FieldValues) {
    push_line(out, 1, &format!("texturefile = \"{}\"", v[FieldId::TextureFile]));
    push_line(out, 1, &format!("effectFile = \"{}\"", v[FieldId::EffectFile]));
}

fn push_animation_body(out: &mut String, v: &FieldValues) {
    let lines = [
        format!("animationmaskfile = \"{}\"", v[FieldId::TextureFile]),
        format!(
            "animationtexturefile = \"{}\"",
            v[FieldId::AnimationTextureFile]
        ),
        format!("animationrotation = {}", v[FieldId::AnimationRotation]),
        format!("animationlooping = {}", v[FieldId::AnimationLooping]),
        format!("animationtime = {}", v[FieldId::AnimationTime]),
        format!("animationdelay = {}", v[FieldId::AnimationDelay]),
        format!("animationblendmode = \"{}\"", v[FieldId::AnimationBlendMode]),
        format!("animationtype = \"{}\"", v[FieldId::AnimationType]),
        format!(
            "animationrotationoffset = {{ x = {} y = {} }}",
            v[FieldId::RotationOffsetX],
            v[FieldId::RotationOffsetY]
        ),
        format!(
            "animationtexturescale = {{ x = {} y = {} }}",
            v[FieldId::TextureScaleX],
            v[FieldId::TextureScaleY]
        ),
    ];
    for line in &lines {
        push_line(out, 2, line);
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}

/// Wraps blocks in the `spriteTypes = { ... }` container used for saved
/// `.gfx` files. Each block is indented one level; blocks are separated by
/// a blank line.
pub fn wrap_sprite_types<'a>(blocks: impl IntoIterator<Item = &'a ShineBlock>) -> String {
    let mut out = String::from("spriteTypes = {\n");
    for (i, block) in blocks.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for line in block.as_str().lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "{INDENT}{line}");
            }
        }
    }
    out.push_str("}\n");
    out
}
