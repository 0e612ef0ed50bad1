//! Loop playback sequences.
//!
//! A [`Loop`] is the semantic form of a tag: a named frame range with a
//! direction, plus the flattened [`PlaybackSequence`] synthesized from it.
//! Every sequence ends with the sentinel step `(-1, 0)`.

use serde::Serialize;

use crate::file::ase::{LoopDirection, Tag};

/// One step of a playback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlaybackStep {
	/// Frame index, or `-1` for the terminating sentinel
	pub frame: i32,
	/// Display duration in milliseconds, `0` for the sentinel
	pub duration: u16,
}

impl PlaybackStep {
	/// The terminating step appended to every sequence.
	pub const SENTINEL: Self = Self {
		frame: -1,
		duration: 0,
	};

	/// Returns `true` for the terminating sentinel.
	pub fn is_sentinel(&self) -> bool {
		self.frame < 0
	}
}

/// Flattened playback timeline of one loop.
///
/// # Examples
///
/// ```
/// use aseanim_types::animation::PlaybackSequence;
/// use aseanim_types::file::ase::LoopDirection;
///
/// let durations = [100, 100, 50, 50, 50, 50];
/// let seq = PlaybackSequence::synthesize(2, 5, LoopDirection::PingPong, &durations);
/// assert_eq!(
///     seq.to_flat(),
///     vec![2, 50, 3, 50, 4, 50, 5, 50, 4, 50, 3, 50, 2, 50, -1, 0]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackSequence {
	entries: Vec<PlaybackStep>,
}

impl PlaybackSequence {
	/// Synthesizes the sequence for the range `from..=to` played in `direction`.
	///
	/// Durations come from `durations[frame]`; frames past the end of
	/// `durations` get a duration of zero. A range with `from > to` yields
	/// only the sentinel.
	///
	/// - forward: `from, from+1, …, to`
	/// - reverse: `to, to-1, …, from`
	/// - ping-pong: `from, …, to-1` then `to, …, from`, so both turning
	///   points appear once
	pub fn synthesize(from: u16, to: u16, direction: LoopDirection, durations: &[u16]) -> Self {
		let step = |frame: u16| PlaybackStep {
			frame: i32::from(frame),
			duration: durations.get(frame as usize).copied().unwrap_or(0),
		};

		let span = usize::from(to.saturating_sub(from)) + 1;
		let mut entries = Vec::with_capacity(match direction {
			LoopDirection::PingPong => span * 2,
			_ => span + 1,
		});

		match direction {
			LoopDirection::Forward => entries.extend((from..=to).map(step)),
			LoopDirection::Reverse => entries.extend((from..=to).rev().map(step)),
			LoopDirection::PingPong => {
				entries.extend((from..to).map(step));
				entries.extend((from..=to).rev().map(step));
			}
		}
		entries.push(PlaybackStep::SENTINEL);

		Self {
			entries,
		}
	}

	/// Returns the playable steps, excluding the sentinel.
	pub fn steps(&self) -> &[PlaybackStep] {
		&self.entries[..self.entries.len() - 1]
	}

	/// Returns all entries including the terminating sentinel.
	pub fn entries(&self) -> &[PlaybackStep] {
		&self.entries
	}

	/// Returns the number of playable steps.
	pub fn len(&self) -> usize {
		self.entries.len() - 1
	}

	/// Returns `true` if the sequence has no playable steps.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the sequence as `frame, duration, …, -1, 0`.
	pub fn to_flat(&self) -> Vec<i32> {
		self.entries.iter().flat_map(|step| [step.frame, i32::from(step.duration)]).collect()
	}

	/// Returns the sum of all step durations in milliseconds.
	pub fn total_duration(&self) -> u64 {
		self.entries.iter().map(|step| u64::from(step.duration)).sum()
	}
}

/// A named, synthesized playback loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loop {
	name: String,
	from: u16,
	to: u16,
	direction: LoopDirection,
	sequence: PlaybackSequence,
}

impl Loop {
	/// Builds a loop from a tag record.
	pub(crate) fn from_tag(tag: Tag, durations: &[u16]) -> Self {
		let sequence = PlaybackSequence::synthesize(tag.from, tag.to, tag.direction, durations);
		Self {
			name: tag.name,
			from: tag.from,
			to: tag.to,
			direction: tag.direction,
			sequence,
		}
	}

	/// Builds the default loop covering every frame forward.
	///
	/// `durations` must not be empty.
	pub(crate) fn default_for(durations: &[u16]) -> Self {
		let to = (durations.len() - 1) as u16;
		Self {
			name: String::new(),
			from: 0,
			to,
			direction: LoopDirection::Forward,
			sequence: PlaybackSequence::synthesize(0, to, LoopDirection::Forward, durations),
		}
	}

	/// Returns the loop name; the default loop is named `""`.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the first frame of the range.
	pub fn from(&self) -> u16 {
		self.from
	}

	/// Returns the last frame of the range.
	pub fn to(&self) -> u16 {
		self.to
	}

	/// Returns the playback direction.
	pub fn direction(&self) -> LoopDirection {
		self.direction
	}

	/// Returns the synthesized sequence.
	pub fn sequence(&self) -> &PlaybackSequence {
		&self.sequence
	}
}

impl std::fmt::Display for Loop {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"\"{}\" {}..={} {} ({} steps, {} ms)",
			self.name,
			self.from,
			self.to,
			self.direction,
			self.sequence.len(),
			self.sequence.total_duration()
		)
	}
}
