//! Decoded bitmaps.

use crate::file::ase::{CelPixels, PixelFormat};

/// A decoded bitmap owned by an animation's image store.
///
/// Pixels are stored as raw samples in the file's pixel format: one palette
/// index per pixel for indexed images, value/alpha pairs for grayscale and
/// RGBA quadruplets for RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
	width: u16,
	height: u16,
	format: PixelFormat,
	pixels: Vec<u8>,
}

impl Image {
	/// Creates an image from raw samples.
	///
	/// # Panics
	///
	/// Panics if `pixels.len()` does not match `width × height × bytes per pixel`.
	pub fn new(width: u16, height: u16, format: PixelFormat, pixels: Vec<u8>) -> Self {
		let expected = width as usize * height as usize * format.bytes_per_pixel();
		assert_eq!(pixels.len(), expected, "Image pixel data size mismatch");
		Self {
			width,
			height,
			format,
			pixels,
		}
	}

	pub(crate) fn from_cel(cel: CelPixels, format: PixelFormat) -> Self {
		Self {
			width: cel.width,
			height: cel.height,
			format,
			pixels: cel.data,
		}
	}

	/// Returns the image width.
	#[inline]
	pub fn width(&self) -> u16 {
		self.width
	}

	/// Returns the image height.
	#[inline]
	pub fn height(&self) -> u16 {
		self.height
	}

	/// Returns the pixel format of the samples.
	#[inline]
	pub fn pixel_format(&self) -> PixelFormat {
		self.format
	}

	/// Returns the raw sample bytes.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Returns the number of pixels.
	#[inline]
	pub fn pixel_count(&self) -> usize {
		self.width as usize * self.height as usize
	}

	/// Returns the raw sample bytes of the pixel at `(x, y)`.
	pub fn sample(&self, x: u16, y: u16) -> Option<&[u8]> {
		if x >= self.width || y >= self.height {
			return None;
		}
		let bpp = self.format.bytes_per_pixel();
		let start = (y as usize * self.width as usize + x as usize) * bpp;
		self.pixels.get(start..start + bpp)
	}
}

impl std::fmt::Display for Image {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}×{} {}", self.width, self.height, self.format)
	}
}
