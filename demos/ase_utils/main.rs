//! Sprite animation CLI utility.
//!
//! Provides three subcommands:
//! - `info`: print header, layers, loops and slices (optionally as JSON)
//! - `loops`: print every synthesized playback sequence
//! - `export`: composite each frame from the visible layers and save PNGs
//!
//! # Usage
//!
//! ```bash
//! cargo run --example ase_utils -- info hero.aseprite
//! cargo run --example ase_utils -- info hero.aseprite --json --palette
//! cargo run --example ase_utils -- loops hero.aseprite
//! cargo run --example ase_utils -- -v export hero.aseprite -o frames/ --hide shadow
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use aseanim_rs::prelude::*;
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use serde::Serialize;

fn main() -> Result<()> {
	let cli = Cli::parse();

	let default_filter = if cli.verbose {
		"debug"
	} else {
		"info"
	};
	env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));

	match cli.command {
		Command::Info(args) => run_info(args),
		Command::Loops(args) => run_loops(args),
		Command::Export(args) => run_export(args),
	}
}

#[derive(Parser)]
#[command(name = "ase_utils")]
#[command(author = "aseanim-rs project")]
#[command(version)]
#[command(about = "Inspect and export layered sprite animation files", long_about = None)]
struct Cli {
	/// Enable debug logging (RUST_LOG overrides)
	#[arg(short, long, global = true, default_value_t = false)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display information about a sprite file
	Info(InfoArgs),
	/// Print the playback sequence of every loop
	Loops(InputArgs),
	/// Render every frame to a PNG image
	Export(ExportArgs),
}

#[derive(Args)]
struct InputArgs {
	/// Input sprite file
	#[arg(value_name = "FILE")]
	input: PathBuf,

	/// Reject files whose header size disagrees with the file length
	#[arg(long, default_value_t = false)]
	strict: bool,
}

#[derive(Args)]
struct InfoArgs {
	#[command(flatten)]
	file: InputArgs,

	/// Print a JSON document instead of text
	#[arg(long, default_value_t = false)]
	json: bool,

	/// Include the used palette entries
	#[arg(short, long, default_value_t = false)]
	palette: bool,
}

#[derive(Args)]
struct ExportArgs {
	#[command(flatten)]
	file: InputArgs,

	/// Output directory (defaults to `<input>_frames/`)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,

	/// Only export frames of this loop
	#[arg(short = 'l', long = "loop", value_name = "NAME")]
	loop_name: Option<String>,

	/// Layers to hide in addition to those hidden in the file
	#[arg(long, value_name = "LAYER")]
	hide: Vec<String>,

	/// Render layers hidden in the file as well
	#[arg(long, default_value_t = false)]
	show_hidden: bool,
}

fn load(args: &InputArgs) -> Result<Animation> {
	let config = if args.strict {
		DecodeConfig::strict()
	} else {
		DecodeConfig::default()
	};
	let data = fs::read(&args.input).with_context(|| format!("Failed to read {}", args.input.display()))?;
	let anim = Animation::from_bytes_with_config(&data, &config)
		.with_context(|| format!("Failed to decode {}", args.input.display()))?;
	anim.log();
	Ok(anim)
}

/// JSON view of a decoded animation
#[derive(Serialize)]
struct AnimationReport<'a> {
	width: u16,
	height: u16,
	pixel_format: PixelFormat,
	transparent_index: u8,
	durations: Vec<u16>,
	layers: Vec<LayerReport<'a>>,
	image_count: usize,
	loops: &'a [Loop],
	slices: &'a [Slice],
	#[serde(skip_serializing_if = "Option::is_none")]
	palette: Option<Vec<String>>,
}

#[derive(Serialize)]
struct LayerReport<'a> {
	name: &'a str,
	kind: LayerKind,
	visible: bool,
	blend_mode: BlendMode,
	opacity: u8,
	child_level: u16,
	cels: usize,
}

fn palette_hex(anim: &Animation) -> Vec<String> {
	let count = anim.header().palette_color_count();
	anim.palette().iter().take(count).map(|color| hex::encode(color.to_array())).collect()
}

fn run_info(args: InfoArgs) -> Result<()> {
	let anim = load(&args.file)?;

	if args.json {
		let report = AnimationReport {
			width: anim.width(),
			height: anim.height(),
			pixel_format: anim.pixel_format(),
			transparent_index: anim.transparent_index(),
			durations: anim.frames().iter().map(|f| f.duration).collect(),
			layers: anim
				.layers()
				.iter()
				.map(|layer| LayerReport {
					name: layer.name(),
					kind: layer.kind(),
					visible: layer.is_visible(),
					blend_mode: layer.blend_mode(),
					opacity: layer.opacity(),
					child_level: layer.child_level(),
					cels: layer.cels().iter().flatten().count(),
				})
				.collect(),
			image_count: anim.images().len(),
			loops: anim.loops(),
			slices: anim.slices(),
			palette: args.palette.then(|| palette_hex(&anim)),
		};
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("File: {}", args.file.input.display());
	println!("{}", anim.header());
	println!("{anim}");

	println!("\nLayers:");
	for (index, layer) in anim.layers().iter().enumerate() {
		let indent = "  ".repeat(layer.child_level() as usize);
		let marker = if layer.is_group() {
			"[G]"
		} else {
			"   "
		};
		println!(
			"  {marker} #{index:<3} {indent}{} (visible: {}, opacity: {}, blend: {}, cels: {})",
			layer.name(),
			layer.is_visible(),
			layer.opacity(),
			layer.blend_mode(),
			layer.cels().iter().flatten().count()
		);
	}

	println!("\nLoops:");
	for lp in anim.loops() {
		println!("  {lp}");
	}

	if !anim.slices().is_empty() {
		println!("\nSlices:");
		for slice in anim.slices() {
			println!(
				"  {} ({} keys, nine-patch: {}, pivot: {})",
				slice.name(),
				slice.keys().len(),
				slice.has_nine_patch(),
				slice.has_pivot()
			);
		}
	}

	if args.palette {
		println!("\nPalette:");
		for (index, hex) in palette_hex(&anim).iter().enumerate() {
			println!("  {index:>3}: #{hex}");
		}
	}

	Ok(())
}

fn run_loops(args: InputArgs) -> Result<()> {
	let anim = load(&args)?;
	for lp in anim.loops() {
		let name = if lp.name().is_empty() {
			"<default>"
		} else {
			lp.name()
		};
		let flat: Vec<String> = lp.sequence().to_flat().iter().map(i32::to_string).collect();
		println!("{name} [{}]: {}", lp.direction(), flat.join(","));
	}
	Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
	let anim = load(&args.file)?;

	let mut view = anim.view();
	if args.show_hidden {
		view.set_all_visible(true);
	}
	for name in &args.hide {
		if view.layer_index(name) < 0 {
			log::warn!("No layer named '{name}'");
		}
		view.set_visible(name, false);
	}

	let frames: Vec<usize> = match &args.loop_name {
		Some(name) => {
			let Some(lp) = anim.loop_by_name(name) else {
				bail!("No loop named '{name}'");
			};
			(usize::from(lp.from())..=usize::from(lp.to())).collect()
		}
		None => (0..anim.frame_count()).collect(),
	};

	let output_dir = args.output.unwrap_or_else(|| default_output_dir(&args.file.input));
	fs::create_dir_all(&output_dir)
		.with_context(|| format!("Failed to create {}", output_dir.display()))?;

	let count = frames.len();
	for frame in frames {
		let canvas = composite(&view, frame);
		let path = output_dir.join(format!("frame_{frame:03}.png"));
		canvas.save(&path).with_context(|| format!("Failed to write {}", path.display()))?;
		log::debug!("Wrote {}", path.display());
	}
	println!("Exported {count} frames to {}", output_dir.display());
	Ok(())
}

fn default_output_dir(input: &Path) -> PathBuf {
	let stem = input.file_stem().map_or_else(|| "sprite".into(), |s| s.to_string_lossy());
	input.with_file_name(format!("{stem}_frames"))
}

/// Draws the visible cels of one frame bottom-to-top onto a transparent canvas.
fn composite(view: &AnimationView<'_>, frame: usize) -> RgbaImage {
	let anim = view.animation();
	let mut canvas = RgbaImage::new(u32::from(anim.width()), u32::from(anim.height()));

	for (_, layer) in view.visible_layers() {
		let Some(cel) = layer.cel(frame) else {
			continue;
		};
		let Some(image) = anim.image(cel) else {
			continue;
		};
		let rgba = render::to_rgba(image, anim.palette(), u8::MAX, anim.transparent_index());
		let opacity = f32::from(cel.opacity) / 255.0 * f32::from(layer.opacity()) / 255.0;

		for (index, src) in rgba.chunks_exact(4).enumerate() {
			let x = i32::from(cel.x) + (index % image.width() as usize) as i32;
			let y = i32::from(cel.y) + (index / image.width() as usize) as i32;
			if x < 0 || y < 0 || x >= i32::from(anim.width()) || y >= i32::from(anim.height()) {
				continue;
			}
			let dst = canvas.get_pixel_mut(x as u32, y as u32);
			blend_over(&mut dst.0, src, opacity);
		}
	}
	canvas
}

/// Straight-alpha source-over blend.
fn blend_over(dst: &mut [u8; 4], src: &[u8], opacity: f32) {
	let sa = f32::from(src[3]) / 255.0 * opacity;
	if sa <= 0.0 {
		return;
	}
	let da = f32::from(dst[3]) / 255.0;
	let out_a = sa + da * (1.0 - sa);
	for c in 0..3 {
		let blended = (f32::from(src[c]) * sa + f32::from(dst[c]) * da * (1.0 - sa)) / out_a;
		dst[c] = blended.round().clamp(0.0, 255.0) as u8;
	}
	dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
