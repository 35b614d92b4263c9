//! A [VectorField] holds one unit direction per node of a [NavGraph]. Each
//! direction points from a node towards the neighbour with the cheapest
//! [IntegrationField] cost, so an actor following the field walks downhill
//! to the start node. A steering pipeline/character controller should read
//! the direction of the node nearest an actor to provide movement.
//!
//! [Vec3::ZERO] is never a real direction, it marks the start node (the
//! actor has arrived) and any node with no cheaper neighbour, such as one
//! the wavefront never reached.
//!

use crate::prelude::*;
use bevy::prelude::*;

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorField(Vec<Vec3>);

impl Field<Vec3> for VectorField {
	/// Get a reference to the field array
	fn get(&self) -> &[Vec3] {
		&self.0
	}
	/// Retrieve a node value
	fn get_node_value(&self, node: usize) -> Vec3 {
		if node >= self.0.len() {
			panic!("Cannot get a VectorField value, index out of bounds. Asked for node {}, field length is {}", node, self.0.len())
		}
		self.0[node]
	}
	/// Set a node to a value
	fn set_node_value(&mut self, value: Vec3, node: usize) {
		if node >= self.0.len() {
			panic!("Cannot set a VectorField value, index out of bounds. Asked for node {}, field length is {}", node, self.0.len())
		}
		self.0[node] = value;
	}
}

impl VectorField {
	/// Creates a new [VectorField] of `len` nodes all set to [Vec3::ZERO]
	pub fn new(len: usize) -> Self {
		VectorField(vec![Vec3::ZERO; len])
	}
	/// Grow or shrink the field to `len` nodes
	pub fn resize(&mut self, len: usize) {
		self.0.resize(len, Vec3::ZERO);
	}
	/// Set every node to [Vec3::ZERO]
	pub fn reset(&mut self) {
		self.0.fill(Vec3::ZERO);
	}
	/// Calculate the [VectorField] from an [IntegrationField]. Every node apart from the start node points at its first neighbour with the strictly lowest cost, provided that cost is below its own
	pub fn calculate(&mut self, graph: &NavGraph, integration_field: &IntegrationField) {
		for (node, current_cost) in integration_field.get().iter().enumerate() {
			// the start node has arrived and unreached nodes have nowhere to go
			if *current_cost == 0 || *current_cost == UNREACHED_COST {
				continue;
			}
			// store the cheapest neighbour
			let mut cheapest_value = *current_cost;
			let mut cheapest_neighbour = None;
			for n in graph.get_neighbours(node) {
				let neighbour_cost = integration_field.get_node_value(*n as usize);
				if neighbour_cost < cheapest_value {
					cheapest_value = neighbour_cost;
					cheapest_neighbour = Some(*n as usize);
				}
			}
			if let Some(target) = cheapest_neighbour {
				let from = graph.get_positions()[node];
				let to = graph.get_positions()[target];
				self.set_node_value(direction_between(from, to), node);
			}
		}
	}
}
