use crate::core::{ContentHandle, ContentResolver};
use crate::utils::error::{Result, VariantError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use url::Url;

/// Resolves `file://` URIs and plain paths. Relative paths are taken from
/// `base_dir` when one is set, otherwise from the working directory.
#[derive(Debug, Clone, Default)]
pub struct FsContentResolver {
    base_dir: Option<PathBuf>,
}

impl FsContentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn resolve_path(&self, handle: &ContentHandle) -> Result<PathBuf> {
        let raw = handle.as_str().trim();
        if raw.is_empty() {
            return Err(VariantError::source_unreadable(raw, "empty handle"));
        }

        let path = match Url::parse(raw) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map_err(|_| VariantError::source_unreadable(raw, "not a local file URI"))?,
            // Single-letter schemes are Windows drive letters.
            Ok(url) if url.scheme().len() > 1 => {
                return Err(VariantError::source_unreadable(
                    raw,
                    format!("unsupported scheme '{}'", url.scheme()),
                ));
            }
            _ => PathBuf::from(raw),
        };

        Ok(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        })
    }
}

impl ContentResolver for FsContentResolver {
    fn open(&self, handle: &ContentHandle) -> Result<Box<dyn Read + Send>> {
        let path = self.resolve_path(handle)?;
        if path.is_dir() {
            return Err(VariantError::source_unreadable(handle.as_str(), "is a directory"));
        }
        let file =
            File::open(&path).map_err(|e| VariantError::source_unreadable(handle.as_str(), e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn display_name(&self, handle: &ContentHandle) -> Result<Option<String>> {
        let path = self.resolve_path(handle)?;
        Ok(path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::VariantErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_plain_and_file_uri_resolve_to_same_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("pose.jpg");
        std::fs::write(&file, b"x").unwrap();

        let resolver = FsContentResolver::new();
        let uri = Url::from_file_path(&file).unwrap().to_string();

        assert_eq!(resolver.resolve_path(&ContentHandle::new(uri)).unwrap(), file);
        assert_eq!(
            resolver
                .resolve_path(&ContentHandle::new(file.to_str().unwrap()))
                .unwrap(),
            file
        );
    }

    #[test]
    fn test_relative_path_uses_base_dir() {
        let resolver = FsContentResolver::with_base_dir("/srv/uploads");
        assert_eq!(
            resolver.resolve_path(&ContentHandle::new("a/b.png")).unwrap(),
            PathBuf::from("/srv/uploads/a/b.png")
        );
    }

    #[test]
    fn test_display_name_is_file_name() {
        let resolver = FsContentResolver::new();
        let name = resolver
            .display_name(&ContentHandle::new("file:///tmp/photos/IMG_1.jpg"))
            .unwrap();
        assert_eq!(name.as_deref(), Some("IMG_1.jpg"));
    }

    #[test]
    fn test_unsupported_scheme() {
        let resolver = FsContentResolver::new();
        let err = resolver
            .open(&ContentHandle::new("content://media/external/images/1"))
            .err()
            .unwrap();
        assert_eq!(err.kind(), VariantErrorKind::SourceUnreadable);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let resolver = FsContentResolver::with_base_dir(dir.path());
        let err = resolver.open(&ContentHandle::new("nope.jpg")).err().unwrap();
        assert_eq!(err.kind(), VariantErrorKind::SourceUnreadable);
    }

    #[test]
    fn test_empty_handle_is_unreadable() {
        let resolver = FsContentResolver::new();
        assert!(resolver.resolve_path(&ContentHandle::new("  ")).is_err());
    }
}
