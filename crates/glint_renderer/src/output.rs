//! Image file output.
//!
//! Plain-text PPM is written by hand; other formats go through the `image`
//! crate encoders.

use crate::renderer::{color_to_rgb, ImageBuffer};
use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Write the image as plain-text PPM (`P3`), one `r g b` line per pixel.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> Result<(), OutputError> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save the image, picking the encoder from the file extension.
///
/// Supported: `ppm`, `png`, `jpg`/`jpeg`, `bmp`, `tga`.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if extension == "ppm" {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    } else {
        let format = match extension.as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "bmp" => ImageFormat::Bmp,
            "tga" => ImageFormat::Tga,
            other => return Err(OutputError::UnsupportedFormat(other.to_string())),
        };

        let (width, height) = (image.width, image.height);
        let buffer = RgbImage::from_raw(width, height, image.to_rgb8()).ok_or_else(|| {
            OutputError::UnsupportedFormat(format!("{}x{} buffer", width, height))
        })?;
        buffer.save_with_format(path, format)?;
    }

    log::info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Color;

    fn gradient() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 1.0));
        image.set(0, 1, Color::ZERO);
        image.set(1, 1, Color::splat(0.25));
        image
    }

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        write_ppm(&gradient(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = "P3\n2 2\n255\n255 255 255\n127 0 255\n0 0 0\n127 127 127\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_save_png_and_ppm() {
        let dir = std::env::temp_dir().join(format!("glint_output_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let image = gradient();

        let png = dir.join("gradient.png");
        save_image(&image, &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [127, 0, 255]);

        let ppm = dir.join("gradient.PPM");
        save_image(&image, &ppm).unwrap();
        let text = std::fs::read_to_string(&ppm).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unsupported_extension() {
        let err = save_image(&gradient(), "render.exr").unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(ref ext) if ext == "exr"));

        let err = save_image(&gradient(), "render").unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(_)));
    }
}
