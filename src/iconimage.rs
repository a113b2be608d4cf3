use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::io::{self, Read, Write};

//===========================================================================//

// Size limits for icon images:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

// Every variant is produced with the same filter, so output is reproducible
// for a given source image.
const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

//===========================================================================//

/// A decoded RGBA image; either the source artwork or one resized variant.
#[derive(Clone, Debug)]
pub struct IconImage {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl IconImage {
    /// Creates a new image with the given dimensions and RGBA data.  The
    /// `width` and `height` must be nonzero, and `rgba_data` must have `4 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Panics if the dimensions are out of range or if `rgba_data` is the
    /// wrong length.
    pub fn from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> IconImage {
        if width < MIN_WIDTH {
            panic!(
                "Invalid width (was {}, but must be at least {})",
                width, MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            panic!(
                "Invalid height (was {}, but must be at least {})",
                height, MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_data_len {
            panic!(
                "Invalid data length (was {}, but must be {} for {}x{} image)",
                rgba_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        IconImage { width, height, rgba_data }
    }

    /// Takes ownership of an already-decoded RGBA buffer.  Returns an error
    /// if the buffer has no pixels.
    pub fn from_rgba_image(image: RgbaImage) -> io::Result<IconImage> {
        let (width, height) = image.dimensions();
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            invalid_data!("Source image is empty ({}x{})", width, height);
        }
        Ok(IconImage::from_rgba_data(width, height, image.into_raw()))
    }

    /// Returns a new `size`x`size` copy of this image, resampled with a
    /// Lanczos filter.  The aspect ratio is not preserved; non-square
    /// sources are stretched.  Returns an error if `size` is zero.
    pub fn resized(&self, size: u32) -> io::Result<IconImage> {
        if size < MIN_WIDTH {
            invalid_input!(
                "Invalid icon size (was {}, but must be at least {})",
                size,
                MIN_WIDTH
            );
        }
        let view = match ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
            self.width,
            self.height,
            self.rgba_data.as_slice(),
        ) {
            Some(view) => view,
            None => invalid_data!(
                "RGBA buffer does not cover a {}x{} image",
                self.width,
                self.height
            ),
        };
        let resized = imageops::resize(&view, size, size, RESAMPLE_FILTER);
        Ok(IconImage {
            width: size,
            height: size,
            rgba_data: resized.into_raw(),
        })
    }

    pub(crate) fn read_png_info<R: Read>(
        reader: R,
    ) -> io::Result<png::Reader<R>> {
        let decoder = png::Decoder::new(reader);
        let png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => invalid_data!("Malformed PNG data: {}", error),
        };
        IconImage::validate_png_info(png_reader.info())?;
        Ok(png_reader)
    }

    fn validate_png_info(info: &png::Info) -> io::Result<()> {
        if info.width < MIN_WIDTH {
            invalid_data!(
                "Invalid PNG width (was {}, but must be at least {})",
                info.width,
                MIN_WIDTH
            );
        }
        if info.height < MIN_HEIGHT {
            invalid_data!(
                "Invalid PNG height (was {}, but must be at least {})",
                info.height,
                MIN_HEIGHT
            );
        }
        if info.bit_depth != png::BitDepth::Eight {
            invalid_data!("Unsupported PNG bit depth: {:?}", info.bit_depth);
        }
        Ok(())
    }

    /// Decodes an image from a PNG file.  Returns an error if the PNG data is
    /// malformed or can't be decoded.
    pub fn read_png<R: Read>(reader: R) -> io::Result<IconImage> {
        let mut png_reader = IconImage::read_png_info(reader)?;
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        if let Err(error) = png_reader.next_frame(&mut buffer) {
            invalid_data!("Malformed PNG data: {}", error);
        }
        let rgba_data = match png_reader.info().color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => {
                let mut rgba = Vec::with_capacity((buffer.len() / 3) * 4);
                for pixel in buffer.chunks_exact(3) {
                    rgba.extend_from_slice(pixel);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let mut rgba = Vec::with_capacity(buffer.len() * 2);
                for pixel in buffer.chunks_exact(2) {
                    let (gray, alpha) = (pixel[0], pixel[1]);
                    rgba.extend_from_slice(&[gray, gray, gray, alpha]);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(buffer.len() * 4);
                for gray in buffer.into_iter() {
                    rgba.extend_from_slice(&[gray, gray, gray, u8::MAX]);
                }
                rgba
            }
            png::ColorType::Indexed => {
                invalid_data!(
                    "Unsupported PNG color type: {:?}",
                    png_reader.info().color_type
                );
            }
        };
        Ok(IconImage::from_rgba_data(
            png_reader.info().width,
            png_reader.info().height,
            rgba_data,
        ))
    }

    /// Encodes the image as a PNG file.
    pub fn write_png<W: Write>(&self, writer: W) -> io::Result<()> {
        let _bits_per_pixel = self.write_png_internal(writer)?;
        Ok(())
    }

    /// Encodes the image as a PNG file and returns the bits-per-pixel.
    pub(crate) fn write_png_internal<W: Write>(
        &self,
        writer: W,
    ) -> io::Result<u16> {
        match self.write_png_internal_enc(writer) {
            Ok(bits_per_pixel) => Ok(bits_per_pixel),
            Err(png::EncodingError::IoError(error)) => Err(error),
            Err(png::EncodingError::Format(error)) => {
                invalid_input!("PNG format error: {}", error);
            }
            Err(png::EncodingError::LimitsExceeded) => {
                invalid_input!("PNG limits exceeded");
            }
            Err(png::EncodingError::Parameter(error)) => {
                invalid_input!("PNG parameter error: {}", error);
            }
        }
    }

    /// Encodes the image as an 8-bit RGBA PNG file and returns the
    /// bits-per-pixel (or the `png::EncodingError`).  The alpha channel is
    /// kept even when every pixel is opaque.
    fn write_png_internal_enc<W: Write>(
        &self,
        writer: W,
    ) -> Result<u16, png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.rgba_data)?;
        writer.finish()?;
        Ok(32)
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this image, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::IconImage;
    use std::io::ErrorKind;

    fn checkerboard(size: u32) -> IconImage {
        let mut rgba = Vec::new();
        for y in 0..size {
            for x in 0..size {
                let on = (x + y) % 2 == 0;
                rgba.extend_from_slice(&[
                    if on { 255 } else { 0 },
                    (x * 7) as u8,
                    (y * 13) as u8,
                    if on { 255 } else { 64 },
                ]);
            }
        }
        IconImage::from_rgba_data(size, size, rgba)
    }

    #[test]
    fn resize_down_and_up() {
        let image = checkerboard(40);
        for &size in &[1, 16, 30, 40, 71, 128] {
            let resized = image.resized(size).unwrap();
            assert_eq!(resized.width(), size);
            assert_eq!(resized.height(), size);
            assert_eq!(resized.rgba_data().len(), (4 * size * size) as usize);
        }
    }

    #[test]
    fn resize_non_square_source() {
        let rgba = vec![200u8; 4 * 30 * 10];
        let image = IconImage::from_rgba_data(30, 10, rgba);
        let resized = image.resized(20).unwrap();
        assert_eq!((resized.width(), resized.height()), (20, 20));
    }

    #[test]
    fn resize_to_zero_is_rejected() {
        let error = checkerboard(4).resized(0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn resize_is_deterministic() {
        let image = checkerboard(33);
        let first = image.resized(17).unwrap();
        let second = image.resized(17).unwrap();
        assert_eq!(first.rgba_data(), second.rgba_data());
    }

    #[test]
    fn resize_preserves_solid_color() {
        let rgba = [255u8, 0, 0, 255].repeat(24 * 24);
        let image = IconImage::from_rgba_data(24, 24, rgba);
        let resized = image.resized(10).unwrap();
        for pixel in resized.rgba_data().chunks_exact(4) {
            assert_eq!(pixel, &[255, 0, 0, 255]);
        }
    }

    #[test]
    fn empty_rgba_image_is_rejected() {
        let error =
            IconImage::from_rgba_image(image::RgbaImage::new(0, 0)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn png_round_trip_keeps_alpha() {
        let image = checkerboard(9);
        let mut data = Vec::<u8>::new();
        let bits_per_pixel = image.write_png_internal(&mut data).unwrap();
        assert_eq!(bits_per_pixel, 32);
        let decoded = IconImage::read_png(data.as_slice()).unwrap();
        assert_eq!(decoded.width(), 9);
        assert_eq!(decoded.rgba_data(), image.rgba_data());
    }

    #[test]
    fn opaque_png_keeps_alpha_channel() {
        let rgba = [10u8, 20, 30, 255].repeat(5 * 5);
        let image = IconImage::from_rgba_data(5, 5, rgba.clone());
        let mut data = Vec::<u8>::new();
        assert_eq!(image.write_png_internal(&mut data).unwrap(), 32);
        // IHDR color type 6 is truecolor with alpha.
        assert_eq!(&data[12..16], b"IHDR");
        assert_eq!(data[25], 6);
        let decoded = IconImage::read_png(data.as_slice()).unwrap();
        assert_eq!(decoded.rgba_data(), rgba.as_slice());
    }

    #[test]
    fn read_png_grayscale() {
        let input: &[u8] = b"\
            \x89\x50\x4e\x47\x0d\x0a\x1a\x0a\x00\x00\x00\x0d\x49\x48\x44\x52\
            \x00\x00\x00\x02\x00\x00\x00\x02\x08\x00\x00\x00\x00\x57\xdd\x52\
            \xf8\x00\x00\x00\x0e\x49\x44\x41\x54\x78\x9c\x63\xb4\x77\x60\xdc\
            \xef\x00\x00\x04\x08\x01\x81\x86\x2e\xc9\x8d\x00\x00\x00\x00\x49\
            \x45\x4e\x44\xae\x42\x60\x82";
        let image = IconImage::read_png(input).unwrap();
        let rgba: &[u8] = b"\
            \x3f\x3f\x3f\xff\x7f\x7f\x7f\xff\
            \xbf\xbf\xbf\xff\xff\xff\xff\xff";
        assert_eq!(image.rgba_data(), rgba);
    }

    #[test]
    fn read_malformed_png() {
        let error = IconImage::read_png(&b"\x89PNG not really"[..]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidData);
    }
}

//===========================================================================//
