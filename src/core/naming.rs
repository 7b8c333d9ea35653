use crate::core::{ContentHandle, ContentResolver, Rotation};
use crate::utils::error::{Result, VariantError};

const PREVIEW_SUFFIX: &str = "_mini";
const PREVIEW_EXTENSION: &str = "jpg";
const LOSSLESS_EXTENSION: &str = "png";

/// Reduces a host-provided display name to a bare file name. Anything that
/// could escape the target directory is cut away.
pub fn sanitize_display_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    match last {
        "" | "." | ".." => None,
        _ => Some(last.to_string()),
    }
}

/// Splits `photo.jpeg` into `("photo", Some("jpeg"))`. A leading dot is part
/// of the stem, so `.hidden` has no extension.
pub fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Asks the resolver for a display name and insists on a usable one.
pub fn resolve_display_name<R: ContentResolver + ?Sized>(
    resolver: &R,
    handle: &ContentHandle,
) -> Result<String> {
    resolver
        .display_name(handle)?
        .as_deref()
        .and_then(sanitize_display_name)
        .ok_or_else(|| VariantError::source_unreadable(handle.as_str(), "no display name"))
}

/// File names of both variants derived from one display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantNames {
    pub original: String,
    pub preview: String,
}

impl VariantNames {
    pub fn new(display_name: &str, rotation: Rotation, unique: Option<&str>) -> Self {
        let (stem, extension) = split_name(display_name);
        let stem = match unique {
            Some(id) => format!("{}_{}", stem, id),
            None => stem.to_string(),
        };

        let original = match (rotation, extension) {
            (Rotation::None, Some(ext)) => format!("{}.{}", stem, ext),
            (Rotation::None, None) => stem.clone(),
            _ => format!("{}.{}", stem, LOSSLESS_EXTENSION),
        };

        Self {
            preview: format!("{}{}.{}", stem, PREVIEW_SUFFIX, PREVIEW_EXTENSION),
            original,
        }
    }
}

/// Display name with an optional unique tag spliced in before the extension.
pub fn tagged_name(display_name: &str, unique: Option<&str>) -> String {
    match (unique, split_name(display_name)) {
        (None, _) => display_name.to_string(),
        (Some(id), (stem, Some(ext))) => format!("{}_{}.{}", stem, id, ext),
        (Some(id), (stem, None)) => format!("{}_{}", stem, id),
    }
}

pub fn unique_tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
