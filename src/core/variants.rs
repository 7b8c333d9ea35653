use crate::core::naming::{self, VariantNames};
use crate::core::orientation;
use crate::core::preview;
use crate::core::video;
use crate::core::{
    ConfigProvider, ContentHandle, ContentResolver, Dimensions, Rotation, Storage, StorageArea,
    VariantPaths, VariantReport,
};
use crate::utils::error::{Result, VariantError};
use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Turns one picked photo into an upright original and a small preview.
///
/// Everything runs synchronously on the calling thread: the source is read
/// fully, decoded, rotated and both encodings are produced before the first
/// byte hits storage. A failure at any step leaves no new files behind and
/// never touches files an earlier run produced.
pub struct VariantPipeline<R: ContentResolver, S: Storage, C: ConfigProvider> {
    resolver: R,
    storage: S,
    config: C,
}

impl<R: ContentResolver, S: Storage, C: ConfigProvider> VariantPipeline<R, S, C> {
    pub fn new(resolver: R, storage: S, config: C) -> Self {
        Self {
            resolver,
            storage,
            config,
        }
    }

    pub fn derive(&self, handle: &ContentHandle) -> Result<VariantReport> {
        let display_name = naming::resolve_display_name(&self.resolver, handle)?;
        let source = self.read_source(handle)?;
        tracing::debug!(%handle, name = %display_name, size = source.len(), "read source");

        let upright = orientation::decode_upright(&source, self.config.max_decode_bytes())?;
        let rotation = upright.rotation;
        let original_dimensions = Dimensions::new(upright.image.width(), upright.image.height());

        let preview = preview::render_preview(
            &upright.image,
            self.config.preview_divisor(),
            self.config.preview_quality(),
        )?;

        // Unrotated sources are stored byte for byte.
        let original: Cow<'_, [u8]> = match rotation {
            Rotation::None => Cow::Borrowed(source.as_slice()),
            _ => Cow::Owned(preview::encode_lossless(&upright.image)?),
        };
        drop(upright);

        let unique = self.config.unique_names().then(naming::unique_tag);
        let names = VariantNames::new(&display_name, rotation, unique.as_deref());

        // Both files are fully written before either becomes visible, so a
        // failed write only ever discards temporaries. The preview goes
        // first: an existing original is not replaced until its preview is.
        let staged_original = self
            .storage
            .stage(StorageArea::Cache, &names.original, &original)?;
        let staged_preview = self
            .storage
            .stage(StorageArea::Files, &names.preview, &preview.bytes)?;

        let preview_file = self.storage.commit(staged_preview)?;
        let original_file = match self.storage.commit(staged_original) {
            Ok(file) => file,
            Err(e) => {
                if !preview_file.replaced {
                    self.discard(&preview_file.path);
                }
                return Err(e);
            }
        };
        let original_path = original_file.path;
        let preview_path = preview_file.path;

        tracing::debug!(
            original = %original_path.display(),
            preview = %preview_path.display(),
            degrees = rotation.degrees(),
            "variants written"
        );

        Ok(VariantReport {
            handle: handle.clone(),
            paths: VariantPaths::new(
                original_path.to_string_lossy(),
                preview_path.to_string_lossy(),
            ),
            rotation,
            original_dimensions,
            preview_dimensions: preview.dimensions,
            generated_at: chrono::Utc::now(),
        })
    }

    pub fn derive_paths(&self, handle: &ContentHandle) -> Result<VariantPaths> {
        self.derive(handle).map(|report| report.paths)
    }

    /// Copies a video into the cache area untouched.
    pub fn copy_video(&self, handle: &ContentHandle) -> Result<PathBuf> {
        let unique = self.config.unique_names().then(naming::unique_tag);
        video::copy_to_cache(&self.resolver, &self.storage, handle, unique.as_deref())
    }

    fn discard(&self, path: &Path) {
        if let Err(e) = self.storage.remove(path) {
            tracing::warn!(path = %path.display(), "Failed to remove orphaned preview: {}", e);
        }
    }

    fn read_source(&self, handle: &ContentHandle) -> Result<Vec<u8>> {
        let mut reader = self.resolver.open(handle)?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| VariantError::source_unreadable(handle.as_str(), e))?;
        Ok(bytes)
    }
}
