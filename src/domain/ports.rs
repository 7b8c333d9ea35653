use crate::domain::model::{ContentHandle, StorageArea, StoredFile};
use crate::utils::error::Result;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Resolves opaque content handles the way a host platform would.
pub trait ContentResolver: Send + Sync {
    /// Opens a readable byte stream. Fails with `SourceUnreadable`.
    fn open(&self, handle: &ContentHandle) -> Result<Box<dyn Read + Send>>;

    /// The user-visible file name, if the host knows one.
    fn display_name(&self, handle: &ContentHandle) -> Result<Option<String>>;
}

/// Local variant storage. Writes are all-or-nothing: a file either appears
/// complete under its final name or not at all.
///
/// Writing is split in two so several files can be prepared before any of
/// them becomes visible. `stage` writes the bytes next to the target without
/// touching it; `commit` moves them into place. Dropping a staged file
/// discards it and leaves the target as it was.
pub trait Storage: Send + Sync {
    type Staged;

    fn stage(&self, area: StorageArea, name: &str, data: &[u8]) -> Result<Self::Staged>;

    fn commit(&self, staged: Self::Staged) -> Result<StoredFile>;

    fn put(&self, area: StorageArea, name: &str, data: &[u8]) -> Result<PathBuf> {
        let staged = self.stage(area, name, data)?;
        self.commit(staged).map(|stored| stored.path)
    }

    fn put_stream(&self, area: StorageArea, name: &str, reader: &mut dyn Read) -> Result<PathBuf>;

    fn remove(&self, path: &Path) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn cache_dir(&self) -> &str;
    fn files_dir(&self) -> &str;
    fn preview_divisor(&self) -> u32;
    fn preview_quality(&self) -> u8;
    fn unique_names(&self) -> bool;
    /// Upper bound on the memory a single decoded image may take.
    fn max_decode_bytes(&self) -> u64;
}
