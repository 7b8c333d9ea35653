#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use image_variants::{FsContentResolver, LocalStorage, VariantConfig, VariantPipeline};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type FsPipeline = VariantPipeline<FsContentResolver, LocalStorage, VariantConfig>;

pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn sources(&self) -> PathBuf {
        let dir = self.root.path().join("sources");
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.path().join("cache")
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.path().join("files")
    }

    pub fn write_source(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.sources().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    pub fn config(&self) -> VariantConfig {
        let mut config = VariantConfig::default();
        config.storage.cache_dir = self.cache_dir().to_string_lossy().into_owned();
        config.storage.files_dir = self.files_dir().to_string_lossy().into_owned();
        config
    }

    pub fn pipeline(&self) -> FsPipeline {
        self.pipeline_with(self.config())
    }

    pub fn pipeline_with(&self, config: VariantConfig) -> FsPipeline {
        let storage = LocalStorage::new(self.cache_dir(), self.files_dir());
        VariantPipeline::new(FsContentResolver::new(), storage, config)
    }

    /// Files in the cache and files directories, temporaries included.
    pub fn output_files(&self) -> Vec<String> {
        let mut names = Vec::new();
        for dir in [self.cache_dir(), self.files_dir()] {
            if let Ok(entries) = std::fs::read_dir(&dir) {
                names.extend(
                    entries
                        .filter_map(|e| e.ok())
                        .map(|e| e.file_name().to_string_lossy().into_owned()),
                );
            }
        }
        names.sort();
        names
    }
}

/// A gradient with an asymmetric marker so rotations are distinguishable.
pub fn sample_image(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
    });
    for x in 0..(width / 4).max(1) {
        img.put_pixel(x, 0, Rgb([255, 0, 0]));
    }
    DynamicImage::ImageRgb8(img)
}

pub fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

pub fn encode_jpeg(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 90)
        .encode_image(&image.to_rgb8())
        .unwrap();
    buf
}

/// Splices an APP1 Exif segment holding only the orientation tag right after
/// the JPEG SOI marker.
pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.extend_from_slice(&42u16.to_be_bytes());
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);

    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

pub fn file_uri(path: &Path) -> String {
    url::Url::from_file_path(path).unwrap().to_string()
}
