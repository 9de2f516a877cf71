//! Style library records.
//!
//! A [`StyleRecord`] is one saved style reference: the `--sref` code, a
//! category, free-form description and tags, and an optional preview image
//! stored as a data URI. Records are keyed by an id generated at creation.

use crate::domain::error::{Result, StudioError};
use crate::domain::prompt::SREF_TOKEN;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds in seven days, the window for "recent" styles.
const RECENT_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Length of the random id suffix.
const ID_SUFFIX_LEN: usize = 8;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Style category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Illustration,
    Cinematic,
    Painting,
    Modern,
    Vintage,
    Anime,
    Realistic,
    Abstract,
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 9] = [
        Self::Illustration,
        Self::Cinematic,
        Self::Painting,
        Self::Modern,
        Self::Vintage,
        Self::Anime,
        Self::Realistic,
        Self::Abstract,
        Self::Other,
    ];

    /// Lowercase token used in persisted data and on the command surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Illustration => "illustration",
            Self::Cinematic => "cinematic",
            Self::Painting => "painting",
            Self::Modern => "modern",
            Self::Vintage => "vintage",
            Self::Anime => "anime",
            Self::Realistic => "realistic",
            Self::Abstract => "abstract",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Illustration => "Illustration",
            Self::Cinematic => "Cinematic",
            Self::Painting => "Painting",
            Self::Modern => "Modern",
            Self::Vintage => "Vintage",
            Self::Anime => "Anime",
            Self::Realistic => "Realistic",
            Self::Abstract => "Abstract",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == token)
            .ok_or_else(|| StudioError::Validation(format!("unknown category '{s}'")))
    }
}

/// A saved style reference.
///
/// Persisted field names follow the library document format (`sref`,
/// `createdAt`). Older documents may omit `tags`, `favorite` and `createdAt`,
/// and may store a missing image as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub id: String,
    #[serde(rename = "sref")]
    pub sref_code: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl StyleRecord {
    /// Whether the record was created within the last seven days.
    #[must_use]
    pub const fn is_recent(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.created_at) < RECENT_WINDOW_MS
    }

    /// Case-insensitive substring match across sref code, description, tags
    /// and category token. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        self.sref_code.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
            || self.category.as_str().contains(needle)
    }
}

/// User-supplied values for creating or editing a style.
///
/// `favorite` is `None` unless the caller explicitly sets it; an edit then
/// keeps the record's existing flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleInput {
    pub sref_code: String,
    pub category: Category,
    pub description: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub favorite: Option<bool>,
}

impl StyleInput {
    /// Creates an input with just the sref code set.
    pub fn new(sref_code: impl Into<String>) -> Self {
        Self {
            sref_code: sref_code.into(),
            ..Default::default()
        }
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets tags from a comma-delimited string.
    #[must_use]
    pub fn with_tags(mut self, raw: &str) -> Self {
        self.tags = parse_tags(raw);
        self
    }

    /// Sets the image data URI.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Explicitly sets the favorite flag.
    #[must_use]
    pub const fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = Some(favorite);
        self
    }

    /// Validates the input and returns the canonical sref code.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Validation`] when the sref code is blank.
    pub fn validated_sref(&self) -> Result<String> {
        let code = self.sref_code.trim();
        if code.is_empty() {
            return Err(StudioError::Validation("sref code is required".to_string()));
        }
        Ok(normalize_sref(code))
    }

    /// Builds a new record with the given id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Validation`] when the sref code is blank.
    pub fn into_record(self, id: String, created_at: i64) -> Result<StyleRecord> {
        let sref_code = self.validated_sref()?;
        Ok(StyleRecord {
            id,
            sref_code,
            category: self.category,
            description: self.description.trim().to_string(),
            tags: self.tags,
            image: self.image.filter(|image| !image.trim().is_empty()),
            favorite: self.favorite.unwrap_or(false),
            created_at,
        })
    }

    /// Overwrites `record` with this input, preserving `id`, `created_at`
    /// and, unless explicitly set, `favorite`.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Validation`] when the sref code is blank; the
    /// record is left untouched.
    pub fn apply_to(self, record: &mut StyleRecord) -> Result<()> {
        let favorite = self.favorite.unwrap_or(record.favorite);
        let updated = self.into_record(record.id.clone(), record.created_at)?;
        *record = StyleRecord { favorite, ..updated };
        Ok(())
    }
}

/// Canonicalizes an sref code: input that does not already start with
/// `--sref` gets the `--sref ` prefix.
#[must_use]
pub fn normalize_sref(raw: &str) -> String {
    let code = raw.trim();
    if code.starts_with(SREF_TOKEN) {
        code.to_string()
    } else {
        format!("{SREF_TOKEN} {code}")
    }
}

/// Splits a comma-delimited tag string, trimming and dropping empties.
///
/// Order is preserved and duplicates are kept.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Generates a style id: the base-36 timestamp followed by a random base-36
/// suffix.
#[must_use]
pub fn generate_style_id(now_ms: i64) -> String {
    let mut id = to_base36(u64::try_from(now_ms).unwrap_or(0));
    let mut rng = rand::rng();
    for _ in 0..ID_SUFFIX_LEN {
        let index = rng.random_range(0..BASE36.len());
        id.push(char::from(BASE36[index]));
    }
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        let digit = usize::try_from(value % 36).unwrap_or(0);
        digits.push(BASE36[digit]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Sample styles seeded into an empty library on first start.
#[must_use]
pub fn sample_styles(now_ms: i64) -> Vec<StyleRecord> {
    let samples = [
        ("1", "--sref 589264756", Category::Illustration, "Clean, simple illustration", "simple, minimal, illustration", true),
        ("2", "--sref 1980491416", Category::Modern, "Calm green modern tone", "green, calm, modern", false),
        ("3", "--sref 2387774453", Category::Vintage, "Art nouveau vintage painting", "art nouveau, vintage, classic", true),
        ("4", "--sref 2720573889", Category::Cinematic, "Dark cinematic mood", "dark, cinematic, mood", false),
    ];

    samples
        .into_iter()
        .zip(1_i64..)
        .map(|((id, sref, category, description, tags, favorite), age)| StyleRecord {
            id: id.to_string(),
            sref_code: sref.to_string(),
            category,
            description: description.to_string(),
            tags: parse_tags(tags),
            image: None,
            favorite,
            created_at: now_ms - age * 1_000_000,
        })
        .collect()
}
