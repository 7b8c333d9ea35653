use crate::config::toml_config::VariantConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "image-variants")]
#[command(about = "Derive upright originals and small previews from picked photos")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for originals and copied videos
    #[arg(long, global = true)]
    pub cache_dir: Option<String>,

    /// Directory for previews
    #[arg(long, global = true)]
    pub files_dir: Option<String>,

    /// JPEG quality of previews (1-100)
    #[arg(long, global = true)]
    pub quality: Option<u8>,

    /// Previews are 1/divisor of each source dimension
    #[arg(long, global = true)]
    pub divisor: Option<u32>,

    /// Largest decoded image accepted, in MiB
    #[arg(long, global = true)]
    pub max_decode_mb: Option<u32>,

    /// Tag produced file names with a random id
    #[arg(long, global = true)]
    pub unique_names: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log CPU and memory usage
    #[arg(long, global = true)]
    pub monitor: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Produce original and preview variants for each image
    Image {
        /// file:// URIs or paths
        #[arg(required = true)]
        handles: Vec<String>,
    },
    /// Copy each video into the cache directory
    Video {
        #[arg(required = true)]
        handles: Vec<String>,
    },
}

impl CliArgs {
    /// Command line flags win over the file.
    pub fn apply_to(&self, config: &mut VariantConfig) {
        if let Some(dir) = &self.cache_dir {
            config.storage.cache_dir = dir.clone();
        }
        if let Some(dir) = &self.files_dir {
            config.storage.files_dir = dir.clone();
        }
        if let Some(quality) = self.quality {
            config.preview.quality = quality;
        }
        if let Some(divisor) = self.divisor {
            config.preview.divisor = divisor;
        }
        if let Some(mb) = self.max_decode_mb {
            config.decode.max_alloc_mb = mb;
        }
        if self.unique_names {
            config.naming.unique = true;
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_parse_image_command() {
        let args = CliArgs::try_parse_from([
            "image-variants",
            "image",
            "a.jpg",
            "file:///tmp/b.png",
            "--quality",
            "80",
        ])
        .unwrap();

        match &args.command {
            Command::Image { handles } => assert_eq!(handles.len(), 2),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.quality, Some(80));
    }

    #[test]
    fn test_image_requires_handle() {
        assert!(CliArgs::try_parse_from(["image-variants", "image"]).is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let args = CliArgs::try_parse_from([
            "image-variants",
            "--cache-dir",
            "/tmp/c",
            "--divisor",
            "3",
            "--unique-names",
            "--max-decode-mb",
            "1024",
            "video",
            "clip.mp4",
        ])
        .unwrap();

        let mut config = VariantConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.cache_dir(), "/tmp/c");
        assert_eq!(config.files_dir(), "./files");
        assert_eq!(config.preview_divisor(), 3);
        assert_eq!(config.preview_quality(), 70);
        assert_eq!(config.max_decode_bytes(), 1024 * 1024 * 1024);
        assert!(config.unique_names());
    }
}
