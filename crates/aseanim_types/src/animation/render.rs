//! Palette substitution for rendering consumers.
//!
//! Produces tightly packed RGBA8 buffers from decoded images. Opacity scales
//! every component, so the output is premultiplied when `opacity < 255`.

use crate::file::ase::{Palette, PixelFormat};

use super::Image;

/// Scales one component by `opacity / 255`, rounding to nearest.
#[inline]
fn scale(component: u8, opacity: u8) -> u8 {
	((u16::from(component) * u16::from(opacity) + 127) / 255) as u8
}

#[inline]
fn scale_rgba(rgba: [u8; 4], opacity: u8) -> [u8; 4] {
	if opacity == u8::MAX {
		return rgba;
	}
	rgba.map(|c| scale(c, opacity))
}

/// Substitutes palette colors into an indexed image.
///
/// Each pixel becomes `palette[sample]` scaled by `opacity / 255`; pixels equal
/// to `transparent_index` become fully transparent black. Images in other
/// pixel formats carry their own color and are converted with [`to_rgba`].
///
/// # Examples
///
/// ```
/// use aseanim_types::animation::{Image, render};
/// use aseanim_types::file::ase::{Color, Palette, PixelFormat};
///
/// let mut palette = Palette::new();
/// palette.set(1, Color::new(255, 0, 0, 255));
/// let image = Image::new(2, 1, PixelFormat::Indexed, vec![0, 1]);
///
/// let rgba = render::apply_palette(&image, &palette, 255, 0);
/// assert_eq!(rgba, vec![0, 0, 0, 0, 255, 0, 0, 255]);
/// ```
pub fn apply_palette(image: &Image, palette: &Palette, opacity: u8, transparent_index: u8) -> Vec<u8> {
	if image.pixel_format() != PixelFormat::Indexed {
		return to_rgba(image, palette, opacity, transparent_index);
	}

	let mut out = Vec::with_capacity(image.pixel_count() * 4);
	for &index in image.pixels() {
		if index == transparent_index {
			out.extend_from_slice(&[0; 4]);
		} else {
			out.extend_from_slice(&scale_rgba(palette.get(index).to_array(), opacity));
		}
	}
	out
}

/// Converts an image in any pixel format to RGBA8.
///
/// The palette and transparent index are consulted only for indexed images.
/// Grayscale value/alpha pairs expand to `(v, v, v, a)`.
pub fn to_rgba(image: &Image, palette: &Palette, opacity: u8, transparent_index: u8) -> Vec<u8> {
	match image.pixel_format() {
		PixelFormat::Indexed => apply_palette(image, palette, opacity, transparent_index),
		PixelFormat::Grayscale => image
			.pixels()
			.chunks_exact(2)
			.flat_map(|va| scale_rgba([va[0], va[0], va[0], va[1]], opacity))
			.collect(),
		PixelFormat::Rgba => image
			.pixels()
			.chunks_exact(4)
			.flat_map(|px| scale_rgba([px[0], px[1], px[2], px[3]], opacity))
			.collect(),
	}
}
