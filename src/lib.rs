pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;
pub use config::VariantConfig;

pub use adapters::{FsContentResolver, LocalStorage};
pub use core::{engine::VariantEngine, variants::VariantPipeline};
pub use domain::model::{ContentHandle, Dimensions, Rotation, VariantPaths, VariantReport};
pub use utils::error::{Result, VariantError, VariantErrorKind};
