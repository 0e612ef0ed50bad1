//! Per-consumer layer visibility overlay.

use super::Animation;

/// Snapshot of layer visibility over an [`Animation`].
///
/// The view starts with the visibility stored in the file and can be toggled
/// freely; the underlying animation is never modified. Create one per render
/// call site rather than sharing it.
///
/// # Examples
///
/// ```no_run
/// use aseanim_types::animation::Animation;
///
/// let anim = Animation::open("character.aseprite")?;
/// let mut view = anim.view();
/// view.set_all_visible(false);
/// view.set_visible("body", true);
/// for (index, layer) in view.visible_layers() {
///     println!("{index}: {}", layer.name());
/// }
/// # Ok::<(), aseanim_types::file::DecodeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AnimationView<'a> {
	animation: &'a Animation,
	visible: Vec<bool>,
}

impl<'a> AnimationView<'a> {
	/// Creates a view with the file's layer visibility.
	pub fn new(animation: &'a Animation) -> Self {
		Self {
			animation,
			visible: animation.layers().iter().map(|layer| layer.is_visible()).collect(),
		}
	}

	/// Returns the animation this view overlays.
	pub fn animation(&self) -> &'a Animation {
		self.animation
	}

	/// Returns the index of the first layer named `name`, or `-1` if absent.
	pub fn layer_index(&self, name: &str) -> i32 {
		self.animation
			.layers()
			.iter()
			.position(|layer| layer.name() == name)
			.map_or(-1, |index| index as i32)
	}

	/// Sets the visibility of the layer named `name`.
	///
	/// Unknown names are ignored.
	pub fn set_visible(&mut self, name: &str, visible: bool) {
		if let Ok(index) = usize::try_from(self.layer_index(name)) {
			self.visible[index] = visible;
		}
	}

	/// Shows or hides every layer.
	pub fn set_all_visible(&mut self, visible: bool) {
		self.visible.fill(visible);
	}

	/// Returns the visibility of the layer at `index`; `false` if out of range.
	pub fn is_visible(&self, index: usize) -> bool {
		self.visible.get(index).copied().unwrap_or(false)
	}

	/// Returns the per-layer visibility flags.
	pub fn visibility(&self) -> &[bool] {
		&self.visible
	}

	/// Iterates over visible layers with their indices, in file order.
	pub fn visible_layers(&self) -> impl Iterator<Item = (usize, &'a super::Layer)> + '_ {
		self.animation
			.layers()
			.iter()
			.enumerate()
			.filter(move |(index, _)| self.visible[*index])
	}
}
