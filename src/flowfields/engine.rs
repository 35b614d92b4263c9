//! The [FlowFieldEngine] keeps an [IntegrationField] and a [VectorField] in
//! step with a moving target over a shared [NavGraph].
//!
//! Recalculating the fields means a breadth-first pass over the whole graph
//! so it is throttled: [FlowFieldEngine::update] only recomputes once the
//! target has moved at least the configured squared distance from where it
//! was at the last recomputation. Between recomputations the fields are left
//! exactly as they were.
//!
//! A recomputation is built in a pair of scratch fields which are swapped in
//! once complete, readers never observe a half-written field.
//!

use std::sync::Arc;

use crate::prelude::*;
use bevy::prelude::*;

/// Outcome of a call to [FlowFieldEngine::update]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
	/// The target hasn't moved far enough, the fields are unchanged
	Throttled,
	/// The graph is empty or the target has no usable position, the fields are unchanged
	Skipped,
	/// The fields were rebuilt around `start_node`
	Recomputed {
		/// Node nearest the target which the wavefront expanded from
		start_node: usize,
	},
}

/// Maintains the flow field towards a single target over an attached [NavGraph]
#[derive(Component, Debug)]
pub struct FlowFieldEngine {
	/// Graph the fields describe, shared with any other engine on the same surface
	graph: Option<Arc<NavGraph>>,
	/// Hop count from each node to the start node
	integration_field: IntegrationField,
	/// Downhill direction of each node
	vector_field: VectorField,
	/// Scratch integration field a recomputation is written into
	pending_integration_field: IntegrationField,
	/// Scratch vector field a recomputation is written into
	pending_vector_field: VectorField,
	/// Target position of the most recent recomputation, `None` forces the next update to recompute
	last_target: Option<Vec3>,
	/// Squared distance the target must move to trigger a recomputation
	threshold_squared: f32,
}

impl Default for FlowFieldEngine {
	fn default() -> Self {
		FlowFieldEngine::new()
	}
}

impl FlowFieldEngine {
	/// Create a new instance of [FlowFieldEngine] with the default recompute threshold
	pub fn new() -> Self {
		FlowFieldEngine::with_config(&FlowFieldConfig::default())
	}
	/// Create a new instance of [FlowFieldEngine] using the threshold of a [FlowFieldConfig]
	pub fn with_config(config: &FlowFieldConfig) -> Self {
		FlowFieldEngine {
			graph: None,
			integration_field: IntegrationField::default(),
			vector_field: VectorField::default(),
			pending_integration_field: IntegrationField::default(),
			pending_vector_field: VectorField::default(),
			last_target: None,
			threshold_squared: config.recompute_threshold_squared,
		}
	}
	/// Bind the engine to a graph. The fields are only reallocated when the node count differs and the next [FlowFieldEngine::update] always recomputes
	pub fn attach(&mut self, graph: Arc<NavGraph>) {
		let len = graph.len();
		if self.integration_field.len() != len {
			debug!("Allocating flow fields for {} nodes", len);
			self.integration_field = IntegrationField::new(len);
			self.vector_field = VectorField::new(len);
			self.pending_integration_field.resize(len);
			self.pending_vector_field.resize(len);
		} else {
			// same size but possibly a different surface, stale costs would be misleading
			self.integration_field.clear();
			self.vector_field.reset();
		}
		self.graph = Some(graph);
		self.last_target = None;
	}
	/// Drop the graph and free the fields, reads fail with [FlowFieldError::NotAttached] until the next [FlowFieldEngine::attach]
	pub fn release(&mut self) {
		self.graph = None;
		self.integration_field = IntegrationField::default();
		self.vector_field = VectorField::default();
		self.pending_integration_field = IntegrationField::default();
		self.pending_vector_field = VectorField::default();
		self.last_target = None;
	}
	/// Recompute the fields towards `target` if it has moved far enough since the last recomputation
	pub fn update(&mut self, target: Vec3) -> Result<FieldUpdate, FlowFieldError> {
		if self.graph.is_none() {
			return Err(FlowFieldError::NotAttached);
		}
		if let Some(last) = self.last_target {
			if is_finite_point(target) && target.distance_squared(last) < self.threshold_squared {
				return Ok(FieldUpdate::Throttled);
			}
		}
		self.recompute(target)
	}
	/// Recompute the fields towards `target` regardless of how far it has moved
	pub fn recompute(&mut self, target: Vec3) -> Result<FieldUpdate, FlowFieldError> {
		let graph = self.graph.clone().ok_or(FlowFieldError::NotAttached)?;
		if graph.is_empty() {
			debug!("FlowFieldEngine graph has no nodes, nothing to calculate");
			return Ok(FieldUpdate::Skipped);
		}
		if !is_finite_point(target) {
			warn!("FlowFieldEngine target {:?} is not a finite position", target);
			return Ok(FieldUpdate::Skipped);
		}
		let start_node = graph.nearest_node(target).ok_or_else(|| {
			FlowFieldError::Internal(format!(
				"no start node found for target {:?} in a graph of {} nodes",
				target,
				graph.len()
			))
		})?;
		let pending_len = self.pending_integration_field.len();
		if pending_len != graph.len() {
			return Err(FlowFieldError::Internal(format!(
				"scratch fields hold {} nodes but the graph has {}",
				pending_len,
				graph.len()
			)));
		}
		self.pending_integration_field.reset(start_node);
		self.pending_integration_field
			.calculate_field(start_node, &graph);
		self.pending_vector_field.reset();
		self.pending_vector_field
			.calculate(&graph, &self.pending_integration_field);
		// publish the completed fields
		std::mem::swap(
			&mut self.integration_field,
			&mut self.pending_integration_field,
		);
		std::mem::swap(&mut self.vector_field, &mut self.pending_vector_field);
		self.last_target = Some(target);
		debug!(
			"Recomputed flow field of {} nodes towards node {}",
			graph.len(),
			start_node
		);
		Ok(FieldUpdate::Recomputed { start_node })
	}
	/// Get the direction an actor at `node` should move in, [Vec3::ZERO] at the start node or where no path exists
	pub fn direction_at(&self, node: usize) -> Result<Vec3, FlowFieldError> {
		self.check_node(node)?;
		Ok(self.vector_field.get_node_value(node))
	}
	/// Get the hop count from `node` to the start node, [UNREACHED_COST] where no path exists
	pub fn cost_at(&self, node: usize) -> Result<u32, FlowFieldError> {
		self.check_node(node)?;
		Ok(self.integration_field.get_node_value(node))
	}
	/// Whether the last recomputation found a path from `node`
	pub fn is_reachable(&self, node: usize) -> Result<bool, FlowFieldError> {
		self.check_node(node)?;
		Ok(self.integration_field.is_reached(node))
	}
	/// Ensure a graph is attached and `node` is one of its nodes
	fn check_node(&self, node: usize) -> Result<(), FlowFieldError> {
		let graph = self.graph.as_ref().ok_or(FlowFieldError::NotAttached)?;
		if node >= graph.len() {
			return Err(FlowFieldError::NodeOutOfBounds {
				index: node,
				len: graph.len(),
			});
		}
		Ok(())
	}
	/// Get a reference to the current [IntegrationField]
	pub fn get_integration_field(&self) -> &IntegrationField {
		&self.integration_field
	}
	/// Get a reference to the current [VectorField]
	pub fn get_vector_field(&self) -> &VectorField {
		&self.vector_field
	}
	/// Get the attached graph
	pub fn get_graph(&self) -> Option<&Arc<NavGraph>> {
		self.graph.as_ref()
	}
	/// Get the target position used by the most recent recomputation
	pub fn get_last_target(&self) -> Option<Vec3> {
		self.last_target
	}
	/// Whether a graph is attached
	pub fn is_attached(&self) -> bool {
		self.graph.is_some()
	}
	/// Get the squared distance the target must move to trigger a recomputation
	pub fn get_threshold_squared(&self) -> f32 {
		self.threshold_squared
	}
	/// Set the squared distance the target must move to trigger a recomputation
	pub fn set_threshold_squared(&mut self, threshold_squared: f32) {
		self.threshold_squared = threshold_squared;
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	/// 3x3 grid of unit spacing, 4-connected, row-major
	fn grid_3x3() -> Arc<NavGraph> {
		let mut positions = Vec::new();
		let mut adjacency = Vec::new();
		for row in 0..3usize {
			for column in 0..3usize {
				positions.push(Vec3::new(column as f32, row as f32, 0.0));
				let mut list = Vec::new();
				if row > 0 { list.push(((row - 1) * 3 + column) as u32); }
				if column < 2 { list.push((row * 3 + column + 1) as u32); }
				if row < 2 { list.push(((row + 1) * 3 + column) as u32); }
				if column > 0 { list.push((row * 3 + column - 1) as u32); }
				adjacency.push(list);
			}
		}
		Arc::new(NavGraph::from_adjacency(positions, &adjacency).unwrap())
	}
	#[test]
	fn unattached_reads_fail() {
		let mut engine = FlowFieldEngine::new();
		assert_eq!(Err(FlowFieldError::NotAttached), engine.update(Vec3::ZERO));
		assert_eq!(Err(FlowFieldError::NotAttached), engine.direction_at(0));
		assert_eq!(Err(FlowFieldError::NotAttached), engine.cost_at(0));
	}
	#[test]
	fn out_of_bounds_read_fails() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		assert_eq!(Err(FlowFieldError::NodeOutOfBounds { index: 9, len: 9 }), engine.cost_at(9));
		assert_eq!(Err(FlowFieldError::NodeOutOfBounds { index: 9, len: 9 }), engine.direction_at(9));
	}
	#[test]
	fn attached_before_update_is_unreached() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		assert_eq!(Ok(UNREACHED_COST), engine.cost_at(4));
		assert_eq!(Ok(Vec3::ZERO), engine.direction_at(4));
	}
	#[test]
	fn grid_centre_scenario() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		let result = engine.update(Vec3::new(1.1, 0.9, 0.0));
		assert_eq!(Ok(FieldUpdate::Recomputed { start_node: 4 }), result);
		assert_eq!(&[2,1,2,1,0,1,2,1,2], engine.get_integration_field().get());
		assert_eq!(Ok(Vec3::ZERO), engine.direction_at(4));
		// corners point at one of their two edge neighbours
		for (corner, options) in [(0, [Vec3::X, Vec3::Y]), (2, [Vec3::NEG_X, Vec3::Y]), (6, [Vec3::X, Vec3::NEG_Y]), (8, [Vec3::NEG_X, Vec3::NEG_Y])] {
			let direction = engine.direction_at(corner).unwrap();
			assert!(options.contains(&direction), "corner {} points {:?}", corner, direction);
		}
	}
	#[test]
	fn throttle_below_threshold() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		let costs = engine.get_integration_field().clone();
		let directions = engine.get_vector_field().clone();
		// closer to node 1 but only 0.9 units from the last target
		let result = engine.update(Vec3::new(0.9, 0.0, 0.0));
		assert_eq!(Ok(FieldUpdate::Throttled), result);
		assert_eq!(&costs, engine.get_integration_field());
		assert_eq!(&directions, engine.get_vector_field());
		assert_eq!(Some(Vec3::ZERO), engine.get_last_target());
	}
	#[test]
	fn threshold_boundary_recomputes() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		let result = engine.update(Vec3::X);
		assert_eq!(Ok(FieldUpdate::Recomputed { start_node: 1 }), result);
		assert_eq!(Ok(0), engine.cost_at(1));
		assert_eq!(Ok(1), engine.cost_at(0));
	}
	#[test]
	fn reattach_forces_recompute() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		engine.attach(grid_3x3());
		assert_eq!(None, engine.get_last_target());
		assert_eq!(Ok(FieldUpdate::Recomputed { start_node: 0 }), engine.update(Vec3::ZERO));
	}
	#[test]
	fn attach_resizes_fields() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		let line = NavGraph::from_adjacency(vec![Vec3::ZERO, Vec3::X], &[vec![1], vec![0]]).unwrap();
		engine.attach(Arc::new(line));
		assert_eq!(2, engine.get_integration_field().len());
		assert_eq!(2, engine.get_vector_field().len());
		assert_eq!(Ok(FieldUpdate::Recomputed { start_node: 1 }), engine.update(Vec3::X * 3.0));
		assert_eq!(&[1, 0], engine.get_integration_field().get());
		assert_eq!(Ok(Vec3::X), engine.direction_at(0));
	}
	#[test]
	fn release_detaches() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		engine.release();
		assert!(!engine.is_attached());
		assert_eq!(Err(FlowFieldError::NotAttached), engine.cost_at(0));
		assert!(engine.get_integration_field().is_empty());
	}
	#[test]
	fn empty_graph_is_skipped() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(Arc::new(NavGraph::default()));
		assert_eq!(Ok(FieldUpdate::Skipped), engine.update(Vec3::ZERO));
	}
	#[test]
	fn non_finite_target_is_skipped() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		let costs = engine.get_integration_field().clone();
		assert_eq!(Ok(FieldUpdate::Skipped), engine.update(Vec3::NAN));
		assert_eq!(&costs, engine.get_integration_field());
		assert_eq!(Some(Vec3::ZERO), engine.get_last_target());
	}
	#[test]
	fn custom_threshold() {
		let mut engine = FlowFieldEngine::with_config(&FlowFieldConfig::with_recompute_distance(3.0));
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		assert_eq!(Ok(FieldUpdate::Throttled), engine.update(Vec3::new(2.0, 2.0, 0.0)));
		engine.set_threshold_squared(0.0);
		assert_eq!(Ok(FieldUpdate::Recomputed { start_node: 8 }), engine.update(Vec3::new(2.0, 2.0, 0.0)));
	}
	#[test]
	fn forced_recompute_ignores_throttle() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(grid_3x3());
		engine.update(Vec3::ZERO).unwrap();
		assert_eq!(Ok(FieldUpdate::Recomputed { start_node: 0 }), engine.recompute(Vec3::new(0.1, 0.0, 0.0)));
		assert_eq!(Some(Vec3::new(0.1, 0.0, 0.0)), engine.get_last_target());
	}
	#[test]
	fn failed_recompute_keeps_attached_fields() {
		let mut engine = FlowFieldEngine::new();
		engine.attach(Arc::new(NavGraph::from_adjacency(vec![Vec3::ZERO, Vec3::X], &[vec![1], vec![0]]).unwrap()));
		engine.update(Vec3::ZERO).unwrap();
		// same length so the buffers are kept, no position can be nearest to anything
		let lost = NavGraph::from_adjacency(vec![Vec3::NAN, Vec3::NAN], &[vec![1], vec![0]]).unwrap();
		engine.attach(Arc::new(lost));
		let costs = engine.get_integration_field().clone();
		let directions = engine.get_vector_field().clone();
		assert!(matches!(engine.update(Vec3::ZERO), Err(FlowFieldError::Internal(_))));
		assert_eq!(&[UNREACHED_COST, UNREACHED_COST], engine.get_integration_field().get());
		assert_eq!(&costs, engine.get_integration_field());
		assert_eq!(&directions, engine.get_vector_field());
		assert_eq!(None, engine.get_last_target());
	}
	#[test]
	fn failed_recompute_keeps_previous_fields() {
		// every target other than the first node is infinitely far from both nodes
		let positions = vec![Vec3::new(f32::MAX, 0.0, 0.0), Vec3::new(-f32::MAX, 0.0, 0.0)];
		let graph = NavGraph::from_adjacency(positions, &[vec![1], vec![0]]).unwrap();
		let mut engine = FlowFieldEngine::new();
		engine.attach(Arc::new(graph));
		let first = Vec3::new(f32::MAX, 0.0, 0.0);
		assert_eq!(Ok(FieldUpdate::Recomputed { start_node: 0 }), engine.update(first));
		let costs = engine.get_integration_field().clone();
		let directions = engine.get_vector_field().clone();
		assert!(matches!(engine.update(Vec3::ZERO), Err(FlowFieldError::Internal(_))));
		assert_eq!(&[0, 1], engine.get_integration_field().get());
		assert_eq!(&costs, engine.get_integration_field());
		assert_eq!(&directions, engine.get_vector_field());
		assert_eq!(Some(first), engine.get_last_target());
	}
}
