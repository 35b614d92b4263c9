//! The IntegrationField contains one 32-bit value per node of a [NavGraph]
//! and records the number of hops from each node to the node nearest the
//! target, the start node.
//!
//! When the field is recalculated every node is reset to [UNREACHED_COST]
//! and the start node is set to `0`. A breadth-first wavefront then expands
//! from the start node:
//!
//! 1. Pop the oldest node from the queue
//! 2. Look up its neighbours from the flattened adjacency of the [NavGraph]
//! 3. Any neighbour whose cost is greater than the current cost `+ 1` is given that cost and pushed onto the queue
//! 4. Repeat until the queue is empty
//!
//! Every edge costs the same so the field is the minimum hop count, not the
//! metric distance. On a 3x3 grid with the start in the centre:
//!
//! ```text
//!  _________________
//! |     |     |     |
//! |  2  |  1  |  2  |
//! |_____|_____|_____|
//! |     |     |     |
//! |  1  |  0  |  1  |
//! |_____|_____|_____|
//! |     |     |     |
//! |  2  |  1  |  2  |
//! |_____|_____|_____|
//! ```
//!
//! Nodes in a part of the graph the wavefront can't reach keep [UNREACHED_COST].
//!

use std::collections::VecDeque;

use crate::prelude::*;

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegrationField(Vec<u32>);

impl Field<u32> for IntegrationField {
	/// Get a reference to the field array
	fn get(&self) -> &[u32] {
		&self.0
	}
	/// Retrieve a node value
	fn get_node_value(&self, node: usize) -> u32 {
		if node >= self.0.len() {
			panic!("Cannot get an IntegrationField value, index out of bounds. Asked for node {}, field length is {}", node, self.0.len())
		}
		self.0[node]
	}
	/// Set a node to a value
	fn set_node_value(&mut self, value: u32, node: usize) {
		if node >= self.0.len() {
			panic!("Cannot set an IntegrationField value, index out of bounds. Asked for node {}, field length is {}", node, self.0.len())
		}
		self.0[node] = value;
	}
}

impl IntegrationField {
	/// Creates a new [IntegrationField] of `len` nodes all set to [UNREACHED_COST]
	pub fn new(len: usize) -> Self {
		IntegrationField(vec![UNREACHED_COST; len])
	}
	/// Grow or shrink the field to `len` nodes, the values are left for the next [IntegrationField::reset]
	pub fn resize(&mut self, len: usize) {
		self.0.resize(len, UNREACHED_COST);
	}
	/// Set every node to [UNREACHED_COST]
	pub fn clear(&mut self) {
		self.0.fill(UNREACHED_COST);
	}
	/// Reset every node to [UNREACHED_COST] apart from the `start` node which is set to `0`
	pub fn reset(&mut self, start: usize) {
		self.clear();
		self.set_node_value(0, start);
	}
	/// From the `start` node expand a breadth-first wavefront across the `graph` so that every reachable node holds its minimum hop count to `start`
	pub fn calculate_field(&mut self, start: usize, graph: &NavGraph) {
		let mut queue = VecDeque::new();
		queue.push_back(start);
		while let Some(node) = queue.pop_front() {
			let next_cost = self.get_node_value(node) + 1;
			for neighbour in graph.get_neighbours(node) {
				let n = *neighbour as usize;
				// don't overwrite a node with a better cost
				if self.get_node_value(n) > next_cost {
					self.set_node_value(next_cost, n);
					queue.push_back(n);
				}
			}
		}
	}
	/// Whether the wavefront reached a node
	pub fn is_reached(&self, node: usize) -> bool {
		self.get_node_value(node) != UNREACHED_COST
	}
}
