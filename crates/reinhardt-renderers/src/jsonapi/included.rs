//! Bookkeeping for sideloaded resources

use std::collections::HashMap;

use reinhardt_render_core::ResourceIdentifier;

use super::document::ResourceObject;

/// Tracks which resources a document already holds.
///
/// A resource is claimed before its relationships are walked, so a resource
/// reachable from itself is rendered once. Claiming also reserves the
/// resource's slot in `included`, which keeps resources in the order they
/// were first reached even though nested resources finish rendering first.
///
/// With an include depth limit, each resource remembers the shallowest depth
/// it was reached at. Reaching it again by a shorter path hands its slot back
/// so the relationships cut off at the deeper position can be walked again.
#[derive(Debug, Default)]
pub(crate) struct IncludedTracker {
	max_depth: Option<usize>,
	claimed: HashMap<ResourceIdentifier, Claimed>,
	slots: Vec<Option<ResourceObject>>,
}

#[derive(Debug, Clone, Copy)]
struct Claimed {
	depth: usize,
	// `None` for primary resources
	slot: Option<Slot>,
}

/// Handle to a reserved position in `included`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot(usize);

/// Outcome of [`IncludedTracker::claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Claim {
	/// First time the resource is reached.
	New(Slot),
	/// Reached again closer to the primary data; render it again into the
	/// same slot.
	Shallower(Slot),
	/// Already primary, included, or being rendered.
	Seen,
}

impl IncludedTracker {
	pub(crate) fn new(max_depth: Option<usize>) -> Self {
		Self {
			max_depth,
			..Self::default()
		}
	}

	/// Record a primary resource. Primary resources never go to `included`.
	pub(crate) fn mark_primary(&mut self, identifier: ResourceIdentifier) {
		self.claimed.insert(identifier, Claimed { depth: 0, slot: None });
	}

	/// Claim `identifier`, reached at `depth`, for inclusion.
	pub(crate) fn claim(&mut self, identifier: &ResourceIdentifier, depth: usize) -> Claim {
		let Some(claimed) = self.claimed.get_mut(identifier) else {
			self.slots.push(None);
			let slot = Slot(self.slots.len() - 1);
			self.claimed
				.insert(identifier.clone(), Claimed { depth, slot: Some(slot) });
			return Claim::New(slot);
		};

		match (self.max_depth, claimed.slot) {
			(Some(_), Some(slot)) if depth < claimed.depth => {
				claimed.depth = depth;
				Claim::Shallower(slot)
			}
			_ => Claim::Seen,
		}
	}

	pub(crate) fn fill(&mut self, slot: Slot, resource: ResourceObject) {
		self.slots[slot.0] = Some(resource);
	}

	/// Finished resources in first-reached order.
	pub(crate) fn into_included(self) -> Vec<ResourceObject> {
		self.slots.into_iter().flatten().collect()
	}
}
