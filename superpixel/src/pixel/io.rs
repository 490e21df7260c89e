use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{Image, PixelFormat};
use crate::error::{Error, Result};

impl Image {
    /// Decodes an 8-bit gray, RGB or RGBA image. The container format is
    /// detected from the file contents.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Image> {
        let file = File::open(path.as_ref())?;
        let decoded = image::ImageReader::new(BufReader::new(file))
            .with_guessed_format()?
            .decode()?;

        let width = decoded.width() as usize;
        let height = decoded.height() as usize;

        let (format, bytes) = match decoded.color() {
            image::ColorType::L8 => (PixelFormat::Gray8, decoded.into_luma8().into_raw()),
            image::ColorType::Rgb8 => (PixelFormat::Rgb8, decoded.into_rgb8().into_raw()),
            image::ColorType::Rgba8 => (PixelFormat::Rgba8, decoded.into_rgba8().into_raw()),
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "color type {:?}, only 8-bit gray, RGB and RGBA are supported",
                    other
                )));
            }
        };

        Image::from_bytes(width, height, format, bytes)
    }

    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|os_str| os_str.to_str())
            .ok_or_else(|| Error::InvalidExtension("missing extension".to_string()))?
            .to_ascii_lowercase();

        let image_format = match extension.as_str() {
            "png" => image::ImageFormat::Png,
            "jpg" | "jpeg" => image::ImageFormat::Jpeg,
            _ => return Err(Error::InvalidExtension(extension)),
        };

        let color_type = match (self.format, image_format) {
            (PixelFormat::Gray8, _) => image::ColorType::L8,
            (PixelFormat::Rgb8, _) => image::ColorType::Rgb8,
            (PixelFormat::Rgba8, image::ImageFormat::Png) => image::ColorType::Rgba8,
            (PixelFormat::Rgba8, _) => {
                return Err(Error::UnsupportedFormat(format!(
                    "JPEG cannot store {}",
                    self.format
                )));
            }
        };

        image::save_buffer_with_format(
            path,
            &self.bytes,
            self.width as u32,
            self.height as u32,
            color_type,
            image_format,
        )?;

        Ok(())
    }
}
