//! Built-in prompt presets.
//!
//! A preset is a named, fixed bundle of field values used to populate the
//! prompt form in one step. The catalog is compiled in and read-only.

use crate::domain::error::{Result, StudioError};
use crate::domain::prompt::PromptFields;

/// A named bundle of prompt field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub label: &'static str,
    pub base_prompt: &'static str,
    pub camera_movement: &'static str,
    pub style_ref: &'static str,
    pub aspect_ratio: &'static str,
    pub additional_params: &'static str,
}

/// The preset catalog, in display order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "cinematic",
        label: "Cinematic",
        base_prompt: "cinematic shot of a mysterious figure",
        camera_movement: "dolly in",
        style_ref: "--sref 2720573889",
        aspect_ratio: "--ar 21:9",
        additional_params: "--v 6 --style raw",
    },
    Preset {
        name: "portrait",
        label: "Portrait",
        base_prompt: "portrait of a person with dramatic lighting",
        camera_movement: "zoom in",
        style_ref: "--sref 1980491416",
        aspect_ratio: "--ar 2:3",
        additional_params: "--v 6",
    },
    Preset {
        name: "landscape",
        label: "Landscape",
        base_prompt: "majestic mountain landscape at sunset",
        camera_movement: "pan right",
        style_ref: "--sref 3456789012",
        aspect_ratio: "--ar 16:9",
        additional_params: "--v 6 --q 2",
    },
    Preset {
        name: "action",
        label: "Action",
        base_prompt: "dynamic action scene with motion blur",
        camera_movement: "rotate clockwise",
        style_ref: "--sref 9876543210",
        aspect_ratio: "--ar 16:9",
        additional_params: "--v 6 --chaos 50",
    },
];

impl Preset {
    /// Looks up a preset by its name.
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Self> {
        PRESETS.iter().find(|preset| preset.name == name)
    }

    /// Expands the preset into a complete set of prompt fields.
    ///
    /// Fields the preset does not define are empty.
    #[must_use]
    pub fn fields(&self) -> PromptFields {
        PromptFields {
            base_prompt: self.base_prompt.to_string(),
            additional_prompt: String::new(),
            camera_movement: self.camera_movement.to_string(),
            style_ref: self.style_ref.to_string(),
            aspect_ratio: self.aspect_ratio.to_string(),
            additional_params: self.additional_params.to_string(),
        }
    }
}

/// Returns the field bundle for a preset, or `None` for an unknown name.
#[must_use]
pub fn get_preset(name: &str) -> Option<PromptFields> {
    Preset::find(name).map(Preset::fields)
}

/// Names of all presets, in display order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|preset| preset.name)
}

impl PromptFields {
    /// Replaces every field with the named preset's bundle.
    ///
    /// This is a total overwrite, never a merge.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::NotFound`] for an unknown preset; the fields are
    /// left untouched.
    pub fn load_preset(&mut self, name: &str) -> Result<&'static Preset> {
        let preset = Preset::find(name)
            .ok_or_else(|| StudioError::NotFound(format!("preset '{name}'")))?;
        *self = preset.fields();
        tracing::debug!(preset = %preset.name, "preset loaded");
        Ok(preset)
    }
}
