//! Logic relating to driving each [FlowFieldEngine] towards its target
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Names the entity whose [GlobalTransform] a [FlowFieldEngine] on the same entity paths towards
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowFieldTarget(pub Entity);

impl FlowFieldTarget {
	/// Get the entity being tracked
	pub fn get(&self) -> Entity {
		self.0
	}
}

/// Published whenever an engine rebuilds its fields so steering logic can refresh any cached directions
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventFlowFieldRecomputed {
	/// Entity holding the [FlowFieldEngine]
	pub entity: Entity,
	/// Node nearest the target which the new fields lead to
	pub start_node: usize,
}

/// Once per fixed tick feed the position of each engine's target into [FlowFieldEngine::update]
#[cfg(not(tarpaulin_include))]
pub fn update_flow_fields(
	mut engine_q: Query<(Entity, &mut FlowFieldEngine, &FlowFieldTarget)>,
	target_q: Query<&GlobalTransform>,
	mut event_recomputed: EventWriter<EventFlowFieldRecomputed>,
) {
	for (entity, mut engine, target) in &mut engine_q {
		let Ok(tform) = target_q.get(target.get()) else {
			// target despawned or not yet spawned, keep the old fields
			debug!(
				"FlowFieldTarget {:?} of {:?} has no GlobalTransform",
				target.get(),
				entity
			);
			continue;
		};
		match engine.update(tform.translation()) {
			Ok(FieldUpdate::Recomputed { start_node }) => {
				event_recomputed.write(EventFlowFieldRecomputed { entity, start_node });
			}
			Ok(FieldUpdate::Throttled) | Ok(FieldUpdate::Skipped) => {}
			Err(e) => error!("FlowFieldEngine on {:?} failed to update: {}", entity, e),
		}
	}
}
