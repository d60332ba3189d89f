//! Field store.
//!
//! Holds the current text of each named input field. Values are free-form
//! strings; nothing here validates them.

use std::collections::BTreeMap;

use enum_map::{Enum, EnumMap};

/// Placeholder substituted for blank fields under [`BlankPolicy::Placeholder`].
pub const BLANK_PLACEHOLDER: &str = "x";

/// The input fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Enum)]
pub enum FieldId {
    Name,
    TextureFile,
    EffectFile,
    AnimationTextureFile,
    AnimationRotation,
    AnimationLooping,
    AnimationTime,
    AnimationDelay,
    RotationOffsetX,
    RotationOffsetY,
    TextureScaleX,
    TextureScaleY,
    AnimationBlendMode,
    AnimationType,
    NumberOfShines,
}

impl FieldId {
    /// All fields in form order.
    pub const ALL: [FieldId; 15] = [
        FieldId::Name,
        FieldId::TextureFile,
        FieldId::EffectFile,
        FieldId::AnimationTextureFile,
        FieldId::AnimationRotation,
        FieldId::AnimationLooping,
        FieldId::AnimationTime,
        FieldId::AnimationDelay,
        FieldId::RotationOffsetX,
        FieldId::RotationOffsetY,
        FieldId::TextureScaleX,
        FieldId::TextureScaleY,
        FieldId::AnimationBlendMode,
        FieldId::AnimationType,
        FieldId::NumberOfShines,
    ];

    /// Form label, including the trailing colon.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name:",
            FieldId::TextureFile => "Texture File:",
            FieldId::EffectFile => "Effect File:",
            FieldId::AnimationTextureFile => "Animation Texture File:",
            FieldId::AnimationRotation => "Animation Rotation:",
            FieldId::AnimationLooping => "Animation Looping (yes/no):",
            FieldId::AnimationTime => "Animation Time:",
            FieldId::AnimationDelay => "Animation Delay:",
            FieldId::RotationOffsetX => "Rotation Offset X:",
            FieldId::RotationOffsetY => "Rotation Offset Y:",
            FieldId::TextureScaleX => "Texture Scale X:",
            FieldId::TextureScaleY => "Texture Scale Y:",
            FieldId::AnimationBlendMode => "Animation Blend Mode:",
            FieldId::AnimationType => "Animation Type:",
            FieldId::NumberOfShines => "Number of Shines:",
        }
    }

    /// Persistence key: the label without its trailing colon.
    pub fn key(self) -> &'static str {
        let label = self.label();
        label.strip_suffix(':').unwrap_or(label)
    }

    /// Built-in default value.
    pub fn default_value(self) -> &'static str {
        match self {
            FieldId::TextureFile => "gfx/interface/goals/xxx.png",
            FieldId::EffectFile => "gfx/FX/xxx.lua",
            FieldId::AnimationTextureFile => "gfx/interface/goals/xxx.dds",
            FieldId::AnimationBlendMode => "add",
            FieldId::AnimationType => "scrolling",
            FieldId::NumberOfShines => "1",
            _ => "",
        }
    }

    /// Suggested values for fields offered as a drop-down.
    ///
    /// Suggestions only: any other string is still accepted.
    pub fn choices(self) -> &'static [&'static str] {
        match self {
            FieldId::AnimationBlendMode => &["add", "multiply", "overlay"],
            FieldId::AnimationType => &["scrolling", "rotating", "pulsing"],
            _ => &[],
        }
    }

    /// Looks a field up by key or label, ignoring case and a trailing colon.
    pub fn from_key(key: &str) -> Option<FieldId> {
        let wanted = key.trim();
        let wanted = wanted.strip_suffix(':').unwrap_or(wanted).trim();
        Self::ALL
            .into_iter()
            .find(|id| id.key().eq_ignore_ascii_case(wanted))
    }
}

/// What [`FieldStore::get`] returns for a blank (empty or whitespace) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankPolicy {
    /// Substitute the literal [`BLANK_PLACEHOLDER`].
    #[default]
    Placeholder,
    /// Substitute the field's built-in default.
    FieldDefault,
}

/// Resolved field values captured at generation time.
pub type FieldValues = EnumMap<FieldId, String>;

/// Current value of every field.
#[derive(Debug, Clone)]
pub struct FieldStore {
    values: EnumMap<FieldId, String>,
    policy: BlankPolicy,
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new(BlankPolicy::default())
    }
}

impl FieldStore {
    /// Creates a store with every field at its default.
    pub fn new(policy: BlankPolicy) -> Self {
        Self {
            values: EnumMap::from_fn(|id: FieldId| id.default_value().to_string()),
            policy,
        }
    }

    pub fn policy(&self) -> BlankPolicy {
        self.policy
    }

    /// Returns the value as typed, without blank substitution.
    pub fn raw(&self, id: FieldId) -> &str {
        &self.values[id]
    }

    /// Returns the effective value, substituting blank values per policy.
    pub fn get(&self, id: FieldId) -> &str {
        let value = self.values[id].as_str();
        if !value.trim().is_empty() {
            return value;
        }
        match self.policy {
            BlankPolicy::Placeholder => BLANK_PLACEHOLDER,
            BlankPolicy::FieldDefault => id.default_value(),
        }
    }

    pub fn set(&mut self, id: FieldId, value: impl Into<String>) {
        self.values[id] = value.into();
    }

    /// Restores every field to its built-in default.
    pub fn reset_all(&mut self) {
        for (id, value) in &mut self.values {
            id.default_value().clone_into(value);
        }
    }

    /// Captures the effective value of every field.
    pub fn snapshot(&self) -> FieldValues {
        EnumMap::from_fn(|id| self.get(id).to_string())
    }

    /// Applies persisted values keyed by field key. Unknown keys are skipped.
    pub fn load_persisted(&mut self, persisted: &BTreeMap<String, String>) {
        for (key, value) in persisted {
            match FieldId::from_key(key) {
                Some(id) => self.set(id, value.clone()),
                None => tracing::debug!(key, "unknown_persisted_field"),
            }
        }
    }

    /// Returns the raw values keyed by field key, for persistence.
    pub fn to_persisted(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(id, value)| (id.key().to_string(), value.clone()))
            .collect()
    }
}
