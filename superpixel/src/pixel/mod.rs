//! Pixel buffer layer: channel-addressable access to 8-bit raster images.

mod io;


use crate::error::{Error, Result};

/// Sample layout of an [`Image`]. Only 8-bit channels are supported.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum PixelFormat {
    Gray8 = 1,
    Rgb8 = 3,
    #[default]
    Rgba8 = 4,
}

impl PixelFormat {
    #[inline]
    pub fn channel_count(&self) -> usize {
        *self as usize
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.channel_count() as u32 * 8
    }

    pub fn from_bits_per_pixel(bits: u32) -> Result<PixelFormat> {
        match bits {
            8 => Ok(PixelFormat::Gray8),
            24 => Ok(PixelFormat::Rgb8),
            32 => Ok(PixelFormat::Rgba8),
            _ => Err(Error::UnsupportedFormat(format!(
                "{} bits per pixel, only 8, 24 and 32 are supported",
                bits
            ))),
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::Gray8 => write!(f, "Gray8"),
            PixelFormat::Rgb8 => write!(f, "RGB8"),
            PixelFormat::Rgba8 => write!(f, "RGBA8"),
        }
    }
}

/// One pixel widened to four samples.
///
/// Gray sources report `r == g == b`; sources without alpha report `a == 255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    #[inline]
    pub fn channels(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_channels([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Euclidean distance in RGB space; alpha does not participate.
    #[inline]
    pub fn color_distance(&self, other: &Pixel) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Read/write access to a raster by `(x, y)` coordinates.
///
/// Implementations must reject coordinates outside `[0, width) x [0, height)`
/// with [`Error::IndexOutOfRange`].
pub trait PixelAccessor {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn format(&self) -> PixelFormat;
    fn get(&self, x: usize, y: usize) -> Result<Pixel>;
    fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<()>;

    fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }
}

/// Tightly packed, row-major 8-bit image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    format: PixelFormat,
    bytes: Vec<u8>,
}

impl Image {
    /// Creates a zeroed image.
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Image {
        Image {
            width,
            height,
            format,
            bytes: vec![0; width * height * format.channel_count()],
        }
    }

    pub fn from_bytes(
        width: usize,
        height: usize,
        format: PixelFormat,
        bytes: Vec<u8>,
    ) -> Result<Image> {
        let expected = width * height * format.channel_count();
        if bytes.len() != expected {
            return Err(Error::InvalidData(format!(
                "bytes length {} does not match expected size {} for {}x{} {}",
                bytes.len(),
                expected,
                width,
                height,
                format
            )));
        }

        Ok(Image {
            width,
            height,
            format,
            bytes,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, format: PixelFormat, mut f: F) -> Image
    where
        F: FnMut(usize, usize) -> Pixel,
    {
        let mut image = Image::new(width, height, format);
        for y in 0..height {
            for x in 0..width {
                let offset = image.offset_unchecked(x, y);
                image.write_at(offset, f(x, y));
            }
        }
        image
    }

    pub fn filled(width: usize, height: usize, format: PixelFormat, pixel: Pixel) -> Image {
        Image::from_fn(width, height, format, |_, _| pixel)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    fn offset_unchecked(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.format.channel_count()
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.offset_unchecked(x, y))
    }

    #[inline]
    fn read_at(&self, offset: usize) -> Pixel {
        let b = &self.bytes[offset..offset + self.format.channel_count()];
        match self.format {
            PixelFormat::Gray8 => Pixel::gray(b[0]),
            PixelFormat::Rgb8 => Pixel::rgb(b[0], b[1], b[2]),
            PixelFormat::Rgba8 => Pixel::rgba(b[0], b[1], b[2], b[3]),
        }
    }

    #[inline]
    fn write_at(&mut self, offset: usize, pixel: Pixel) {
        let channels = self.format.channel_count();
        let b = &mut self.bytes[offset..offset + channels];
        match self.format {
            PixelFormat::Gray8 => b[0] = pixel.r,
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => {
                b.copy_from_slice(&pixel.channels()[..channels]);
            }
        }
    }
}

impl PixelAccessor for Image {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> Result<Pixel> {
        let offset = self.offset(x, y)?;
        Ok(self.read_at(offset))
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.write_at(offset, pixel);
        Ok(())
    }
}

impl std::fmt::Display for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}
