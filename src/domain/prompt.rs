//! Prompt fields and the prompt assembly grammar.
//!
//! A prompt is assembled from a fixed set of form fields in a fixed order:
//!
//! ```text
//! base[, additional][, camera] [--sref ...] --ar W:H [params]
//! ```
//!
//! Assembly is a pure function of [`PromptFields`]; nothing here touches storage.

use crate::domain::error::{Result, StudioError};
use serde::{Deserialize, Serialize};

/// Aspect ratio used when the field is cleared or left blank.
pub const DEFAULT_ASPECT_RATIO: &str = "--ar 9:16";

/// Flag token that marks a style reference.
pub const SREF_TOKEN: &str = "--sref";

/// Camera movements offered by the builder form.
pub const CAMERA_MOVEMENTS: &[&str] = &[
    "zoom in",
    "zoom out",
    "pan left",
    "pan right",
    "pan up",
    "pan down",
    "dolly in",
    "dolly out",
    "tilt up",
    "tilt down",
    "rotate clockwise",
    "rotate counterclockwise",
    "tracking shot",
    "static camera",
];

/// Aspect ratios offered by the builder form.
pub const ASPECT_RATIOS: &[&str] = &[
    "--ar 9:16",
    "--ar 16:9",
    "--ar 1:1",
    "--ar 4:3",
    "--ar 3:4",
    "--ar 2:3",
    "--ar 3:2",
    "--ar 21:9",
];

/// Form field values used to build one prompt.
///
/// Transient: never persisted. `aspect_ratio` always holds a value; see
/// [`DEFAULT_ASPECT_RATIO`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptFields {
    pub base_prompt: String,
    pub additional_prompt: String,
    pub camera_movement: String,
    pub style_ref: String,
    pub aspect_ratio: String,
    pub additional_params: String,
}

impl Default for PromptFields {
    fn default() -> Self {
        Self {
            base_prompt: String::new(),
            additional_prompt: String::new(),
            camera_movement: String::new(),
            style_ref: String::new(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            additional_params: String::new(),
        }
    }
}

/// Names of the individual prompt fields, used by the command surface to
/// address one field at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    BasePrompt,
    AdditionalPrompt,
    CameraMovement,
    StyleRef,
    AspectRatio,
    AdditionalParams,
}

impl PromptField {
    /// Parses the kebab-case field name used on the command surface.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "base-prompt" => Some(Self::BasePrompt),
            "additional-prompt" => Some(Self::AdditionalPrompt),
            "camera-movement" => Some(Self::CameraMovement),
            "style-ref" => Some(Self::StyleRef),
            "aspect-ratio" => Some(Self::AspectRatio),
            "additional-params" => Some(Self::AdditionalParams),
            _ => None,
        }
    }
}

/// Kind of a live-preview block, in assembly order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Base,
    Additional,
    Camera,
    Style,
    Ratio,
    Params,
}

impl PromptFields {
    /// Resets every field, restoring the default aspect ratio.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sets a single field. Setting the aspect ratio to a blank value restores
    /// the default.
    pub fn set(&mut self, field: PromptField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PromptField::BasePrompt => self.base_prompt = value,
            PromptField::AdditionalPrompt => self.additional_prompt = value,
            PromptField::CameraMovement => self.camera_movement = value,
            PromptField::StyleRef => self.style_ref = value,
            PromptField::AspectRatio => {
                self.aspect_ratio = if value.trim().is_empty() {
                    DEFAULT_ASPECT_RATIO.to_string()
                } else {
                    value
                };
            }
            PromptField::AdditionalParams => self.additional_params = value,
        }
    }

    /// Returns the aspect ratio, substituting the default when blank.
    #[must_use]
    pub fn effective_aspect_ratio(&self) -> &str {
        let ratio = self.aspect_ratio.trim();
        if ratio.is_empty() {
            DEFAULT_ASPECT_RATIO
        } else {
            ratio
        }
    }

    /// Returns the non-empty components in assembly order for a live preview.
    ///
    /// Unlike [`assemble`], this never fails: an empty base prompt simply has
    /// no block.
    #[must_use]
    pub fn preview(&self) -> Vec<(PreviewKind, String)> {
        let candidates = [
            (PreviewKind::Base, self.base_prompt.trim()),
            (PreviewKind::Additional, self.additional_prompt.trim()),
            (PreviewKind::Camera, self.camera_movement.trim()),
            (PreviewKind::Style, self.style_ref.trim()),
            (PreviewKind::Ratio, self.effective_aspect_ratio()),
            (PreviewKind::Params, self.additional_params.trim()),
        ];

        candidates
            .into_iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(kind, text)| (kind, text.to_string()))
            .collect()
    }
}

/// Assembles the final prompt string.
///
/// Components are appended in this exact order:
///
/// 1. trimmed base prompt (required)
/// 2. `", " + additional prompt` when non-empty
/// 3. `", " + camera movement` when non-empty
/// 4. the style reference, prefixed with `--sref ` unless it already starts with it
/// 5. the aspect ratio
/// 6. additional parameters when non-empty
///
/// # Errors
///
/// Returns [`StudioError::MissingRequiredField`] when the base prompt is empty
/// after trimming.
///
/// # Examples
///
/// ```
/// use sref_studio::domain::prompt::{assemble, PromptFields};
///
/// let fields = PromptFields {
///     base_prompt: "a cat".to_string(),
///     style_ref: "123".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(assemble(&fields).unwrap(), "a cat --sref 123 --ar 9:16");
/// ```
pub fn assemble(fields: &PromptFields) -> Result<String> {
    let base = fields.base_prompt.trim();
    if base.is_empty() {
        return Err(StudioError::MissingRequiredField("base prompt"));
    }

    let mut prompt = base.to_string();

    let additional = fields.additional_prompt.trim();
    if !additional.is_empty() {
        prompt.push_str(", ");
        prompt.push_str(additional);
    }

    if !fields.camera_movement.is_empty() {
        prompt.push_str(", ");
        prompt.push_str(&fields.camera_movement);
    }

    let style_ref = fields.style_ref.trim();
    if !style_ref.is_empty() {
        if style_ref.starts_with(SREF_TOKEN) {
            prompt.push(' ');
        } else {
            prompt.push_str(" --sref ");
        }
        prompt.push_str(style_ref);
    }

    prompt.push(' ');
    prompt.push_str(fields.effective_aspect_ratio());

    let params = fields.additional_params.trim();
    if !params.is_empty() {
        prompt.push(' ');
        prompt.push_str(params);
    }

    tracing::trace!(len = prompt.len(), "prompt assembled");
    Ok(prompt)
}

/// Merges a base prompt picked from the suggestion list into the current
/// base prompt: empty `current` yields `chosen`, anything else gets
/// `, chosen` appended.
///
/// # Examples
///
/// ```
/// use sref_studio::domain::prompt::merge_base_prompt;
///
/// assert_eq!(merge_base_prompt("  ", "a cat"), "a cat");
/// assert_eq!(merge_base_prompt("a cat ", "at night"), "a cat, at night");
/// ```
#[must_use]
pub fn merge_base_prompt(current: &str, chosen: &str) -> String {
    let current = current.trim();
    if current.is_empty() {
        chosen.to_string()
    } else {
        format!("{current}, {chosen}")
    }
}

/// Merges a newly chosen style reference into the current field value.
///
/// - empty `current` yields `chosen` verbatim
/// - `current` starting with `--sref` yields `--sref <current digits>, <chosen digits>`
/// - anything else yields `current + " " + chosen`
///
/// Always appends; re-applying the same reference adds another entry.
///
/// # Examples
///
/// ```
/// use sref_studio::domain::prompt::merge_style_ref;
///
/// assert_eq!(merge_style_ref("", "--sref 42"), "--sref 42");
/// assert_eq!(merge_style_ref("--sref 1, 2", "--sref 3"), "--sref 1, 2, 3");
/// ```
#[must_use]
pub fn merge_style_ref(current: &str, chosen: &str) -> String {
    let current = current.trim();
    if current.is_empty() {
        return chosen.to_string();
    }

    if let Some(existing) = current.strip_prefix(SREF_TOKEN) {
        let existing = existing.trim();
        let added = sref_digits(chosen);
        if existing.is_empty() {
            return format!("{SREF_TOKEN} {added}");
        }
        return format!("{SREF_TOKEN} {existing}, {added}");
    }

    format!("{current} {chosen}")
}

/// Extracts the first digit run following the `--sref` token.
///
/// Falls back to the trimmed input when it carries no token or no digits.
fn sref_digits(value: &str) -> &str {
    let value = value.trim();
    let Some(rest) = value.strip_prefix(SREF_TOKEN) else {
        return value;
    };

    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    if end == 0 {
        rest.trim()
    } else {
        &rest[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(text: &str) -> PromptFields {
        PromptFields {
            base_prompt: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn bare_digits_get_sref_prefix() {
        let fields = PromptFields {
            style_ref: "123".to_string(),
            aspect_ratio: "--ar 9:16".to_string(),
            ..base("a cat")
        };
        assert_eq!(assemble(&fields).unwrap(), "a cat --sref 123 --ar 9:16");
    }

    #[test]
    fn all_fields_in_fixed_order() {
        let fields = PromptFields {
            base_prompt: "a cat".to_string(),
            additional_prompt: "at night".to_string(),
            camera_movement: "pan right".to_string(),
            style_ref: "--sref 42".to_string(),
            aspect_ratio: "--ar 16:9".to_string(),
            additional_params: "--v 6".to_string(),
        };
        assert_eq!(
            assemble(&fields).unwrap(),
            "a cat, at night, pan right --sref 42 --ar 16:9 --v 6"
        );
    }

    #[test]
    fn blank_base_prompt_is_rejected() {
        let fields = PromptFields {
            base_prompt: "   ".to_string(),
            additional_prompt: "at night".to_string(),
            style_ref: "42".to_string(),
            ..Default::default()
        };
        let err = assemble(&fields).unwrap_err();
        assert!(matches!(err, StudioError::MissingRequiredField("base prompt")));
    }

    #[test]
    fn optional_fields_are_trimmed_and_skipped_when_blank() {
        let fields = PromptFields {
            additional_prompt: "  ".to_string(),
            style_ref: " ".to_string(),
            additional_params: "  --chaos 50 ".to_string(),
            ..base("  neon city  ")
        };
        assert_eq!(assemble(&fields).unwrap(), "neon city --ar 9:16 --chaos 50");
    }

    #[test]
    fn blank_aspect_ratio_falls_back_to_default() {
        let fields = PromptFields {
            aspect_ratio: String::new(),
            ..base("a cat")
        };
        assert_eq!(assemble(&fields).unwrap(), "a cat --ar 9:16");
    }

    #[test]
    fn assembly_is_deterministic() {
        let fields = PromptFields {
            camera_movement: "dolly in".to_string(),
            style_ref: "--sref 1, 2".to_string(),
            ..base("portrait")
        };
        assert_eq!(assemble(&fields).unwrap(), assemble(&fields).unwrap());
    }

    #[test]
    fn base_merge_into_empty_takes_choice() {
        assert_eq!(merge_base_prompt("", "misty forest"), "misty forest");
    }

    #[test]
    fn base_merge_appends_with_comma() {
        assert_eq!(
            merge_base_prompt("  misty forest  ", "golden hour"),
            "misty forest, golden hour"
        );
    }

    #[test]
    fn bare_sref_token_merges_without_dangling_comma() {
        assert_eq!(merge_style_ref("--sref", "--sref 5"), "--sref 5");
    }

    #[test]
    fn merge_into_empty_takes_choice_verbatim() {
        assert_eq!(merge_style_ref("", "--sref 42"), "--sref 42");
    }

    #[test]
    fn merge_appends_digits_to_existing_list() {
        assert_eq!(merge_style_ref("--sref 1, 2", "--sref 3"), "--sref 1, 2, 3");
    }

    #[test]
    fn merge_always_appends_duplicates() {
        let once = merge_style_ref("--sref 7", "--sref 7");
        let twice = merge_style_ref(&once, "--sref 7");
        assert_eq!(twice, "--sref 7, 7, 7");
    }

    #[test]
    fn merge_with_free_text_concatenates() {
        assert_eq!(merge_style_ref("my style", "--sref 9"), "my style --sref 9");
    }

    #[test]
    fn set_blank_aspect_ratio_restores_default() {
        let mut fields = base("x");
        fields.set(PromptField::AspectRatio, "--ar 1:1");
        assert_eq!(fields.aspect_ratio, "--ar 1:1");
        fields.set(PromptField::AspectRatio, "");
        assert_eq!(fields.aspect_ratio, DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn preview_lists_non_empty_blocks_in_order() {
        let fields = PromptFields {
            camera_movement: "zoom in".to_string(),
            additional_params: "--v 6".to_string(),
            ..base("a fox")
        };
        let kinds: Vec<PreviewKind> = fields.preview().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                PreviewKind::Base,
                PreviewKind::Camera,
                PreviewKind::Ratio,
                PreviewKind::Params
            ]
        );
    }

    #[test]
    fn clear_resets_to_defaults() {
        let mut fields = PromptFields {
            aspect_ratio: "--ar 16:9".to_string(),
            ..base("a cat")
        };
        fields.clear();
        assert_eq!(fields, PromptFields::default());
    }
}
