use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Opaque reference to image or video bytes, typically a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(String);

impl ContentHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContentHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Where the two variants of a photo ended up. Both strings empty is the
/// "no result" sentinel handed to callers that do not want a `Result`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPaths {
    pub original: String,
    pub preview: String,
}

impl VariantPaths {
    pub fn new(original: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            preview: preview.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty() && self.preview.is_empty()
    }
}

/// Clockwise rotation needed to display a decoded image upright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }
}

/// The two local directories variants are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    /// Full-resolution originals and copied videos.
    Cache,
    /// Downscaled previews.
    Files,
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageArea::Cache => f.write_str("cache"),
            StorageArea::Files => f.write_str("files"),
        }
    }
}

/// A file that has just been moved into its final place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    /// A file already existed at `path` and was overwritten.
    pub replaced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Full outcome of one derivation, for callers that want more than paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantReport {
    pub handle: ContentHandle,
    pub paths: VariantPaths,
    pub rotation: Rotation,
    pub original_dimensions: Dimensions,
    pub preview_dimensions: Dimensions,
    pub generated_at: DateTime<Utc>,
}
