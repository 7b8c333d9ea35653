use crate::core::{ConfigProvider, Storage, StorageArea, StoredFile};
use crate::utils::error::{Result, VariantError};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Two local directories standing in for a host's private cache and files
/// storage. Every write lands in a temporary sibling first and is renamed
/// into place, replacing any file already at the target.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    cache_dir: PathBuf,
    files_dir: PathBuf,
}

/// Bytes written to a `.partial-*` sibling of `target`, synced but not yet
/// renamed. Dropping it deletes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    partial: NamedTempFile,
    target: PathBuf,
    area: StorageArea,
}

impl StagedFile {
    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl LocalStorage {
    pub fn new(cache_dir: impl Into<PathBuf>, files_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            files_dir: files_dir.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.cache_dir(), config.files_dir())
    }

    pub fn dir(&self, area: StorageArea) -> &Path {
        match area {
            StorageArea::Cache => &self.cache_dir,
            StorageArea::Files => &self.files_dir,
        }
    }

    fn target(&self, area: StorageArea, name: &str) -> Result<PathBuf> {
        let dir = self.dir(area);
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(VariantError::write_failed(
                dir.join(name),
                "file name must be a single path component",
            ));
        }
        fs::create_dir_all(dir).map_err(|e| VariantError::write_failed(dir, e))?;
        Ok(dir.join(name))
    }

    fn stage_with<F>(&self, area: StorageArea, name: &str, fill: F) -> Result<StagedFile>
    where
        F: FnOnce(&mut File, &Path) -> Result<()>,
    {
        let target = self.target(area, name)?;
        let mut partial = tempfile::Builder::new()
            .prefix(".partial-")
            .tempfile_in(self.dir(area))
            .map_err(|e| VariantError::write_failed(&target, e))?;

        // On any error `partial` is dropped, which deletes it.
        fill(partial.as_file_mut(), &target)?;
        partial
            .as_file()
            .sync_all()
            .map_err(|e| VariantError::write_failed(&target, e))?;

        Ok(StagedFile {
            partial,
            target,
            area,
        })
    }
}

impl Storage for LocalStorage {
    type Staged = StagedFile;

    fn stage(&self, area: StorageArea, name: &str, data: &[u8]) -> Result<StagedFile> {
        self.stage_with(area, name, |file, target| {
            file.write_all(data)
                .map_err(|e| VariantError::write_failed(target, e))
        })
    }

    fn commit(&self, staged: StagedFile) -> Result<StoredFile> {
        let StagedFile {
            partial,
            target,
            area,
        } = staged;
        let replaced = target.exists();
        partial
            .persist(&target)
            .map_err(|e| VariantError::write_failed(&target, e.error))?;

        tracing::debug!(%area, path = %target.display(), replaced, "stored file");
        Ok(StoredFile {
            path: target,
            replaced,
        })
    }

    /// A failing `reader` surfaces as `SourceUnreadable` naming the file
    /// being written; callers that know the content handle re-label it.
    fn put_stream(&self, area: StorageArea, name: &str, reader: &mut dyn Read) -> Result<PathBuf> {
        let staged = self.stage_with(area, name, |file, target| {
            let mut buf = vec![0u8; COPY_BUFFER_SIZE];
            loop {
                let n = match reader.read(&mut buf) {
                    Ok(0) => return Ok(()),
                    Ok(n) => n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(VariantError::source_unreadable(name, e)),
                };
                file.write_all(&buf[..n])
                    .map_err(|e| VariantError::write_failed(target, e))?;
            }
        })?;
        self.commit(staged).map(|stored| stored.path)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VariantError::IoError(e)),
        }
    }
}
