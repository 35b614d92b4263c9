//! Tunables shared by the graph builder and every [crate::prelude::FlowFieldEngine]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Configuration of graph construction and flow field recomputation. Inserted as a [Resource] by the plugin, changes are pushed into each engine during the `Tidy` set
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Resource, Reflect, Clone, Copy, Debug, PartialEq)]
#[reflect(Resource)]
pub struct FlowFieldConfig {
	/// Squared distance the target must move before the fields are recomputed
	pub recompute_threshold_squared: f32,
	/// Strip vertices which no triangle references from a built graph
	pub prune_unreferenced_nodes: bool,
}

impl Default for FlowFieldConfig {
	fn default() -> Self {
		FlowFieldConfig {
			recompute_threshold_squared: DEFAULT_RECOMPUTE_THRESHOLD_SQUARED,
			prune_unreferenced_nodes: true,
		}
	}
}

impl FlowFieldConfig {
	/// Create a config with a custom recompute threshold, given as a plain distance which is squared for storage
	pub fn with_recompute_distance(distance: f32) -> Self {
		FlowFieldConfig {
			recompute_threshold_squared: distance * distance,
			..default()
		}
	}
	/// From a `ron` file generate the [FlowFieldConfig]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavGraphError> {
		let contents = std::fs::read_to_string(path).map_err(|source| NavGraphError::Io {
			path: path.to_string(),
			source,
		})?;
		Ok(ron::de::from_str(&contents)?)
	}
}
