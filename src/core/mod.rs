pub mod engine;
pub mod naming;
pub mod orientation;
pub mod preview;
pub mod variants;
pub mod video;

pub use crate::domain::model::{
    ContentHandle, Dimensions, Rotation, StorageArea, StoredFile, VariantPaths, VariantReport,
};
pub use crate::domain::ports::{ConfigProvider, ContentResolver, Storage};
pub use crate::utils::error::Result;
