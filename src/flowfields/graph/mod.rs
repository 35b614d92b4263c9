//! The [NavGraph] is the static description of a navigable surface. Every
//! retained mesh vertex becomes a node with a world-space position and the
//! undirected triangle edges of the mesh become its neighbours.
//!
//! Adjacency is flattened so that no node owns its own allocation. Node `i`
//! lists its neighbours in the window
//! `neighbours[neighbour_offsets[i]..neighbour_offsets[i] + neighbour_counts[i]]`:
//!
//! ```text
//!  node               0        1        2          3
//!  offsets          [ 0,       2,       5,         7 ]
//!  counts           [ 2,       3,       2,         1 ]
//!  neighbours       [ 1, 2,    0, 2, 3, 0, 1,      1 ]
//!                     |__|     |_____|  |__|       |
//! ```
//!
//! A graph is built once per surface (by [crate::prelude::NavGraphBuilder] or
//! loaded from disk) and is thereafter shared read-only behind an [std::sync::Arc]
//! by any number of [crate::prelude::FlowFieldEngine]s.
//!

pub mod builder;
pub mod mesh_piece;

use crate::prelude::*;
use bevy::prelude::*;

/// Immutable navigation graph of node positions and flattened symmetric adjacency
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NavGraphArrays"))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavGraph {
	/// World-space position of each node
	positions: Vec<Vec3>,
	/// Start index into `neighbours` of each node's adjacency
	neighbour_offsets: Vec<u32>,
	/// Number of neighbours of each node
	neighbour_counts: Vec<u32>,
	/// Every adjacency list laid end to end in node order
	neighbours: Vec<u32>,
}

/// Unchecked form of a [NavGraph] as it appears on disk, deserialising a [NavGraph] goes through [NavGraph::from_raw_parts] so that it's always validated
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "NavGraph")]
pub struct NavGraphArrays {
	/// World-space position of each node
	positions: Vec<Vec3>,
	/// Start index into `neighbours` of each node's adjacency
	neighbour_offsets: Vec<u32>,
	/// Number of neighbours of each node
	neighbour_counts: Vec<u32>,
	/// Every adjacency list laid end to end in node order
	neighbours: Vec<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<NavGraphArrays> for NavGraph {
	type Error = NavGraphError;
	fn try_from(arrays: NavGraphArrays) -> Result<Self, Self::Error> {
		NavGraph::from_raw_parts(
			arrays.positions,
			arrays.neighbour_offsets,
			arrays.neighbour_counts,
			arrays.neighbours,
		)
	}
}

impl NavGraph {
	/// Create a [NavGraph] from per-node adjacency lists, the lists are flattened in node order. Fails if the lists reference missing nodes, repeat a neighbour or are not symmetric
	pub fn from_adjacency(
		positions: Vec<Vec3>,
		adjacency: &[Vec<u32>],
	) -> Result<Self, NavGraphError> {
		if positions.len() != adjacency.len() {
			return Err(NavGraphError::LengthMismatch {
				positions: positions.len(),
				offsets: adjacency.len(),
				counts: adjacency.len(),
			});
		}
		let total = adjacency.iter().map(|list| list.len()).sum();
		let mut neighbour_offsets = Vec::with_capacity(adjacency.len());
		let mut neighbour_counts = Vec::with_capacity(adjacency.len());
		let mut neighbours = Vec::with_capacity(total);
		for list in adjacency.iter() {
			neighbour_offsets.push(neighbours.len() as u32);
			neighbour_counts.push(list.len() as u32);
			neighbours.extend_from_slice(list);
		}
		let graph = NavGraph {
			positions,
			neighbour_offsets,
			neighbour_counts,
			neighbours,
		};
		graph.validate()?;
		Ok(graph)
	}
	/// Create a [NavGraph] directly from its four arrays, validating them
	pub fn from_raw_parts(
		positions: Vec<Vec3>,
		neighbour_offsets: Vec<u32>,
		neighbour_counts: Vec<u32>,
		neighbours: Vec<u32>,
	) -> Result<Self, NavGraphError> {
		let graph = NavGraph {
			positions,
			neighbour_offsets,
			neighbour_counts,
			neighbours,
		};
		graph.validate()?;
		Ok(graph)
	}
	/// Check the array lengths agree, every adjacency window and neighbour index is in range, no list repeats a neighbour and every edge exists in both directions
	pub fn validate(&self) -> Result<(), NavGraphError> {
		let node_count = self.positions.len();
		if self.neighbour_offsets.len() != node_count || self.neighbour_counts.len() != node_count
		{
			return Err(NavGraphError::LengthMismatch {
				positions: node_count,
				offsets: self.neighbour_offsets.len(),
				counts: self.neighbour_counts.len(),
			});
		}
		for node in 0..node_count {
			let start = self.neighbour_offsets[node] as usize;
			let end = start + self.neighbour_counts[node] as usize;
			if end > self.neighbours.len() {
				return Err(NavGraphError::AdjacencyOutOfRange {
					node,
					start,
					end,
					len: self.neighbours.len(),
				});
			}
			let list = &self.neighbours[start..end];
			for (i, neighbour) in list.iter().enumerate() {
				if *neighbour as usize >= node_count {
					return Err(NavGraphError::NeighbourOutOfRange {
						node,
						neighbour: *neighbour,
						node_count,
					});
				}
				if list[..i].contains(neighbour) {
					return Err(NavGraphError::DuplicateNeighbour {
						node,
						neighbour: *neighbour,
					});
				}
			}
		}
		// reverse links can only be checked once every window is known to be in range
		for node in 0..node_count {
			for neighbour in self.get_neighbours(node) {
				if !self
					.get_neighbours(*neighbour as usize)
					.contains(&(node as u32))
				{
					return Err(NavGraphError::Asymmetric {
						node,
						neighbour: *neighbour,
					});
				}
			}
		}
		Ok(())
	}
	/// Number of nodes
	pub fn len(&self) -> usize {
		self.positions.len()
	}
	/// Whether the graph has no nodes
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}
	/// Get a reference to the node positions
	pub fn get_positions(&self) -> &[Vec3] {
		&self.positions
	}
	/// Get the position of a node
	pub fn get_position(&self, node: usize) -> Option<Vec3> {
		self.positions.get(node).copied()
	}
	/// Get a reference to the per-node adjacency start offsets
	pub fn get_neighbour_offsets(&self) -> &[u32] {
		&self.neighbour_offsets
	}
	/// Get a reference to the per-node neighbour counts
	pub fn get_neighbour_counts(&self) -> &[u32] {
		&self.neighbour_counts
	}
	/// Get a reference to the flat neighbour array
	pub fn get_flat_neighbours(&self) -> &[u32] {
		&self.neighbours
	}
	/// Get the neighbours of a node. Panics if `node` is out of bounds
	pub fn get_neighbours(&self, node: usize) -> &[u32] {
		if node >= self.positions.len() {
			panic!(
				"Cannot get NavGraph neighbours, index out of bounds. Asked for node {}, graph has {} nodes",
				node,
				self.positions.len()
			)
		}
		let start = self.neighbour_offsets[node] as usize;
		let end = start + self.neighbour_counts[node] as usize;
		&self.neighbours[start..end]
	}
	/// Find the node closest to `point`, ties resolve to the lowest index. `None` when the graph is empty
	pub fn nearest_node(&self, point: Vec3) -> Option<usize> {
		nearest_position_index(&self.positions, point)
	}
	/// Serialise the graph as a `ron` string
	#[cfg(feature = "ron")]
	pub fn to_ron_string(&self) -> Result<String, NavGraphError> {
		Ok(ron::ser::to_string_pretty(
			self,
			ron::ser::PrettyConfig::default(),
		)?)
	}
	/// Deserialise a graph from a `ron` string, inconsistent arrays are rejected
	#[cfg(feature = "ron")]
	pub fn from_ron_str(contents: &str) -> Result<Self, NavGraphError> {
		Ok(ron::de::from_str(contents)?)
	}
	/// From a `ron` file load the [NavGraph]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavGraphError> {
		let contents = std::fs::read_to_string(path).map_err(|source| NavGraphError::Io {
			path: path.to_string(),
			source,
		})?;
		let graph = NavGraph::from_ron_str(&contents)?;
		info!("Loaded NavGraph of {} nodes from {}", graph.len(), path);
		Ok(graph)
	}
	/// Write the [NavGraph] to a `ron` file
	#[cfg(feature = "ron")]
	pub fn save_ron(&self, path: &str) -> Result<(), NavGraphError> {
		let contents = self.to_ron_string()?;
		std::fs::write(path, contents).map_err(|source| NavGraphError::Io {
			path: path.to_string(),
			source,
		})
	}
}
