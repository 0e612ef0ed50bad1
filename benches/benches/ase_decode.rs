//! Benchmark suite for sprite file decoding
//!
//! Measures chunk-level decoding, full conversion into an animation, and
//! palette substitution over synthetic files.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use aseanim_benches::SyntheticSprite;
use aseanim_types::{
	animation::{Animation, render},
	file::RawFile,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn shapes() -> [(&'static str, SyntheticSprite); 3] {
	[
		("small", SyntheticSprite::small()),
		(
			"small_raw",
			SyntheticSprite {
				compressed: false,
				..SyntheticSprite::small()
			},
		),
		("large", SyntheticSprite::large()),
	]
}

/// Benchmark decoding to header + typed chunks
fn bench_raw_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("ase_raw_decode");

	for (name, shape) in shapes() {
		let data = shape.generate();
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("raw_file", name), &data, |b, data| {
			b.iter(|| black_box(RawFile::from_bytes(black_box(data))));
		});
	}

	group.finish();
}

/// Benchmark the full load including conversion and loop synthesis
fn bench_animation_load(c: &mut Criterion) {
	let mut group = c.benchmark_group("ase_animation_load");

	for (name, shape) in shapes() {
		let data = shape.generate();
		group.throughput(Throughput::Elements(shape.pixel_count()));
		group.bench_with_input(BenchmarkId::new("from_bytes", name), &data, |b, data| {
			b.iter(|| black_box(Animation::from_bytes(black_box(data))));
		});
	}

	group.finish();
}

/// Benchmark indexed to RGBA palette substitution
fn bench_apply_palette(c: &mut Criterion) {
	let mut group = c.benchmark_group("ase_apply_palette");

	let Ok(anim) = Animation::from_bytes(&SyntheticSprite::large().generate()) else {
		eprintln!("Warning: synthetic sprite failed to decode");
		return;
	};
	let Some(image) = anim.images().first() else {
		return;
	};

	group.throughput(Throughput::Elements(image.pixel_count() as u64));
	for opacity in [255u8, 128] {
		group.bench_with_input(BenchmarkId::new("indexed_to_rgba", opacity), &opacity, |b, &opacity| {
			b.iter(|| {
				black_box(render::apply_palette(
					image,
					anim.palette(),
					opacity,
					anim.transparent_index(),
				))
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_raw_decode, bench_animation_load, bench_apply_palette);
criterion_main!(benches);
