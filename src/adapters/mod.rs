// Adapters layer: concrete implementations of the domain ports backed by the local filesystem.

pub mod resolver;
pub mod storage;

pub use resolver::FsContentResolver;
pub use storage::LocalStorage;
