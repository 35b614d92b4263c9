//! Defines the Bevy [Plugin] for mesh based FlowFields
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod config_layer;
pub mod flow_layer;

/// Ordering of the plugin's systems within `FixedUpdate`
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FlowFieldSet {
	/// Housekeeping before any field is calculated
	Tidy,
	/// Engines are updated towards their targets
	Calculate,
}

/// Registers the [FlowFieldConfig] and drives every [FlowFieldEngine] once per fixed tick
pub struct FlowFieldMeshPlugin;

impl Plugin for FlowFieldMeshPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<FlowFieldConfig>()
			.init_resource::<FlowFieldConfig>()
			.add_event::<flow_layer::EventFlowFieldRecomputed>()
			.configure_sets(
				FixedUpdate,
				(FlowFieldSet::Tidy, FlowFieldSet::Calculate).chain(),
			)
			.add_systems(
				FixedUpdate,
				(
					config_layer::apply_config_changes.in_set(FlowFieldSet::Tidy),
					flow_layer::update_flow_fields.in_set(FlowFieldSet::Calculate),
				),
			);
	}
}
