//! Logic for pushing changes of the [FlowFieldConfig] resource into every
//! live [FlowFieldEngine]
//!

use crate::prelude::*;
use bevy::prelude::*;

/// When the [FlowFieldConfig] changes update the recompute threshold of each [FlowFieldEngine]
#[cfg(not(tarpaulin_include))]
pub fn apply_config_changes(config: Res<FlowFieldConfig>, mut engine_q: Query<&mut FlowFieldEngine>) {
	if !config.is_changed() {
		return;
	}
	for mut engine in &mut engine_q {
		if engine.get_threshold_squared() != config.recompute_threshold_squared {
			engine.set_threshold_squared(config.recompute_threshold_squared);
		}
	}
	debug!(
		"Applied recompute threshold {} to flow field engines",
		config.recompute_threshold_squared
	);
}
