//! Image file I/O: decode into a [`Raster`], encode by file extension.

use crate::core::config::OutputConfig;
use crate::core::error::PixelworksResult;
use crate::core::raster::{PixelReader, Raster};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Decode the image at `path`.
pub fn load_raster(path: impl AsRef<Path>) -> PixelworksResult<Raster> {
    let path = path.as_ref();
    let image = image::open(path)?;
    let raster = Raster::from_dynamic(&image)?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

/// Encode `raster` to `path`, picking the format from the extension.
///
/// JPEG output drops alpha and uses the configured quality; every other
/// format keeps 8-bit RGBA. Missing parent directories are created.
pub fn save_raster(
    raster: &Raster,
    path: impl AsRef<Path>,
    output: &OutputConfig,
) -> PixelworksResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let rgba = raster.to_rgba8();
    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            let mut writer = BufWriter::new(File::create(path)?);
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, output.jpeg_quality);
            encoder.encode(
                &rgb,
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )?;
        }
        _ => rgba.save_with_format(path, format)?,
    }

    log::info!("Saved {} as {:?}", path.display(), format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::core::error::PixelworksError;
    use tempfile::tempdir;

    fn sample() -> Raster {
        Raster::from_fn(4, 3, |x, y| {
            if (x + y) % 2 == 0 {
                Color::WHITE
            } else {
                Color::rgb(1.0, 0.0, 0.0)
            }
        })
        .unwrap()
    }

    #[test]
    fn test_png_round_trip_is_lossless_for_8bit_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let source = sample();

        save_raster(&source, &path, &OutputConfig::default()).unwrap();
        let loaded = load_raster(&path).unwrap();

        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded, source);
    }

    #[test]
    fn test_jpeg_keeps_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let output = OutputConfig { jpeg_quality: 50 };

        save_raster(&sample(), &path, &output).unwrap();
        let loaded = load_raster(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get(0, 0).unwrap().alpha(), 1.0);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.bmp");
        save_raster(&sample(), &path, &OutputConfig::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unknown_extension_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.unknownext");
        let err = save_raster(&sample(), &path, &OutputConfig::default()).unwrap_err();
        assert!(matches!(err, PixelworksError::Image(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(load_raster(dir.path().join("missing.png")).is_err());
    }
}
