//! Palette substitution over decoded animations.

use aseanim_benches::{FrameBuilder, SpriteBuilder};
use aseanim_rs::prelude::*;

#[test]
fn test_apply_palette_on_decoded_cel() {
	let data = SpriteBuilder::indexed(3, 1)
		.transparent_index(3)
		.frame(
			FrameBuilder::new(10)
				.palette(0, &[[0, 0, 0, 255], [255, 255, 255, 255], [200, 0, 100, 255], [9, 9, 9, 255]])
				.layer(true, false, "a")
				.compressed_cel(0, (0, 0), 255, (3, 1), &[1, 2, 3]),
		)
		.build();
	let anim = Animation::from_bytes(&data).unwrap();
	let cel = anim.cel(0, 0).unwrap();
	let image = anim.image(cel).unwrap();

	let rgba = render::apply_palette(image, anim.palette(), cel.opacity, anim.transparent_index());
	assert_eq!(rgba, vec![255, 255, 255, 255, 200, 0, 100, 255, 0, 0, 0, 0]);

	let faded = render::apply_palette(image, anim.palette(), 51, anim.transparent_index());
	assert_eq!(&faded[..4], &[51, 51, 51, 51]);
	assert_eq!(&faded[8..], &[0, 0, 0, 0]);
}

#[test]
fn test_to_rgba_matches_apply_palette_for_indexed() {
	let data = SpriteBuilder::indexed(2, 2)
		.frame(
			FrameBuilder::new(10)
				.palette(0, &[[1, 2, 3, 4], [5, 6, 7, 8]])
				.layer(true, false, "a")
				.raw_cel(0, (0, 0), 255, (2, 2), &[0, 1, 1, 0]),
		)
		.build();
	let anim = Animation::from_bytes(&data).unwrap();
	let image = &anim.images()[0];

	assert_eq!(
		render::to_rgba(image, anim.palette(), 255, 9),
		render::apply_palette(image, anim.palette(), 255, 9)
	);
	assert_eq!(render::to_rgba(image, anim.palette(), 255, 9).len(), image.pixel_count() * 4);
}
