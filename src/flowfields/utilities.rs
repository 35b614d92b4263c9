//! Useful structures and tools used by the graph and the fields
//!

use bevy::prelude::*;

/// Value of an [crate::prelude::IntegrationField] node which the breadth-first wavefront never reached
pub const UNREACHED_COST: u32 = u32::MAX;
/// Default squared distance the target must move before the fields are recomputed
pub const DEFAULT_RECOMPUTE_THRESHOLD_SQUARED: f32 = 1.0;

/// Find the index of the position closest to `point`, ties resolve to the lowest index. Returns `None` for an empty slice
pub fn nearest_position_index(positions: &[Vec3], point: Vec3) -> Option<usize> {
	let mut nearest = None;
	let mut nearest_distance = f32::INFINITY;
	for (i, position) in positions.iter().enumerate() {
		let distance = position.distance_squared(point);
		// strictly less so the first encountered wins a tie
		if distance < nearest_distance {
			nearest_distance = distance;
			nearest = Some(i);
		}
	}
	nearest
}

/// Unit direction from `from` towards `to`, coincident points produce [Vec3::ZERO]
pub fn direction_between(from: Vec3, to: Vec3) -> Vec3 {
	(to - from).normalize_or_zero()
}

/// Whether every component of a point is a real number
pub fn is_finite_point(point: Vec3) -> bool {
	point.is_finite()
}
