//! Defines a [Bundle] for spawning an attached [FlowFieldEngine] alongside the entity it paths towards
//!

use std::sync::Arc;

use crate::prelude::*;
use bevy::prelude::*;

/// An attached [FlowFieldEngine] paired with the entity it paths towards
#[derive(Bundle)]
pub struct FlowFieldBundle {
	engine: FlowFieldEngine,
	target: FlowFieldTarget,
}

impl FlowFieldBundle {
	/// Create a new instance of [FlowFieldBundle] attached to a shared [NavGraph], the fields are calculated on the first fixed tick
	pub fn new(graph: Arc<NavGraph>, target: Entity, config: &FlowFieldConfig) -> Self {
		let mut engine = FlowFieldEngine::with_config(config);
		engine.attach(graph);
		FlowFieldBundle {
			engine,
			target: FlowFieldTarget(target),
		}
	}
	/// Create a new instance of [FlowFieldBundle] by baking a series of [MeshPiece]s into a fresh [NavGraph]
	pub fn from_mesh_pieces(
		pieces: impl IntoIterator<Item = MeshPiece>,
		target: Entity,
		config: &FlowFieldConfig,
	) -> Self {
		let mut builder = NavGraphBuilder::with_config(config);
		builder.add_pieces(pieces);
		FlowFieldBundle::new(Arc::new(builder.build()), target, config)
	}
	/// Get a reference to the engine
	pub fn get_engine(&self) -> &FlowFieldEngine {
		&self.engine
	}
}
