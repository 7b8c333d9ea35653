use crate::core::naming;
use crate::core::{ContentHandle, ContentResolver, Storage, StorageArea};
use crate::utils::error::{Result, VariantError};
use std::path::PathBuf;

/// Streams the handle's bytes into the cache area under its display name.
/// Nothing is decoded; the copy is byte-identical.
pub fn copy_to_cache<R, S>(
    resolver: &R,
    storage: &S,
    handle: &ContentHandle,
    unique: Option<&str>,
) -> Result<PathBuf>
where
    R: ContentResolver + ?Sized,
    S: Storage + ?Sized,
{
    let display_name = naming::resolve_display_name(resolver, handle)?;
    let name = naming::tagged_name(&display_name, unique);

    let mut reader = resolver.open(handle)?;
    let path = storage
        .put_stream(StorageArea::Cache, &name, &mut reader)
        .map_err(|e| match e {
            VariantError::SourceUnreadable { reason, .. } => {
                VariantError::source_unreadable(handle.as_str(), reason)
            }
            other => other,
        })?;

    tracing::debug!(%handle, path = %path.display(), "copied video to cache");
    Ok(path)
}
