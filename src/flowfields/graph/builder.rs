//! Bakes a series of [MeshPiece]s into a single [NavGraph].
//!
//! Each retained piece claims a contiguous block of global node indices in
//! the order pieces were added, so the first vertex of the second piece is
//! numbered straight after the last vertex of the first:
//!
//! ```text
//!  piece A (3 verts)    piece B (excluded)    piece C (4 verts)
//!  [0, 1, 2]            -                     [3, 4, 5, 6]
//! ```
//!
//! Every triangle `(a, b, c)` contributes the undirected edges `a-b`, `a-c`
//! and `b-c`. An edge shared between two triangles is only recorded once per
//! node.
//!
//! Vertices which no triangle touches can optionally be pruned, the
//! remaining nodes are renumbered in their original order.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Build-time record of a node position and the averaged direction towards its neighbours, only used for debug drawing
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct NavVertex {
	/// World-space position of the node
	pub position: Vec3,
	/// Normalised sum of the unit vectors from the node to each neighbour, zero for an isolated node
	pub forward: Vec3,
}

/// Collects [MeshPiece]s and bakes them into a [NavGraph]
pub struct NavGraphBuilder {
	/// Pieces in processing order
	pieces: Vec<MeshPiece>,
	/// Remove vertices no triangle references
	prune_unreferenced_nodes: bool,
}

impl Default for NavGraphBuilder {
	fn default() -> Self {
		NavGraphBuilder::new()
	}
}

impl NavGraphBuilder {
	/// Create a new instance of [NavGraphBuilder] with default configuration
	pub fn new() -> Self {
		NavGraphBuilder::with_config(&FlowFieldConfig::default())
	}
	/// Create a new instance of [NavGraphBuilder] from a [FlowFieldConfig]
	pub fn with_config(config: &FlowFieldConfig) -> Self {
		NavGraphBuilder {
			pieces: Vec::new(),
			prune_unreferenced_nodes: config.prune_unreferenced_nodes,
		}
	}
	/// Queue a piece of surface
	pub fn add_piece(&mut self, piece: MeshPiece) -> &mut Self {
		self.pieces.push(piece);
		self
	}
	/// Queue several pieces of surface
	pub fn add_pieces(&mut self, pieces: impl IntoIterator<Item = MeshPiece>) -> &mut Self {
		self.pieces.extend(pieces);
		self
	}
	/// Bake the queued pieces into a [NavGraph]
	pub fn build(&self) -> NavGraph {
		let (positions, adjacency) = self.build_adjacency();
		finalise(positions, adjacency)
	}
	/// Bake the queued pieces into a [NavGraph] alongside a [NavVertex] for each node describing its averaged neighbour direction
	pub fn build_with_debug_flow(&self) -> (NavGraph, Vec<NavVertex>) {
		let (positions, adjacency) = self.build_adjacency();
		let debug_flow = calculate_debug_flow(&positions, &adjacency);
		(finalise(positions, adjacency), debug_flow)
	}
	/// Transform every retained vertex into world space and collect deduplicated per-node adjacency lists
	fn build_adjacency(&self) -> (Vec<Vec3>, Vec<Vec<u32>>) {
		let mut positions: Vec<Vec3> = Vec::new();
		let mut adjacency: Vec<Vec<u32>> = Vec::new();
		// whether any triangle touches a node
		let mut referenced: Vec<bool> = Vec::new();
		let mut skipped = 0;
		for (piece_index, piece) in self.pieces.iter().enumerate() {
			if piece.is_excluded() {
				debug!("Mesh piece {} is excluded from the NavGraph", piece_index);
				continue;
			}
			if let Err(e) = piece.validate() {
				warn!("Skipping mesh piece {}: {}", piece_index, e);
				skipped += 1;
				continue;
			}
			let base = positions.len() as u32;
			positions.extend(piece.world_vertices());
			adjacency.resize(positions.len(), Vec::new());
			referenced.resize(positions.len(), false);
			for [a, b, c] in piece.triangles() {
				let (a, b, c) = (a + base, b + base, c + base);
				referenced[a as usize] = true;
				referenced[b as usize] = true;
				referenced[c as usize] = true;
				add_edge(&mut adjacency, a, b);
				add_edge(&mut adjacency, a, c);
				add_edge(&mut adjacency, b, c);
			}
		}
		if self.prune_unreferenced_nodes {
			let before = positions.len();
			(positions, adjacency) = prune_unreferenced(positions, adjacency, &referenced);
			if positions.len() != before {
				debug!(
					"Pruned {} unreferenced vertices from the NavGraph",
					before - positions.len()
				);
			}
		}
		info!(
			"Built NavGraph with {} nodes from {} mesh pieces, {} skipped as invalid",
			positions.len(),
			self.pieces.len(),
			skipped
		);
		(positions, adjacency)
	}
}

/// Record an undirected edge, each direction is only stored if it isn't already present. Self-loops from degenerate triangles are ignored
fn add_edge(adjacency: &mut [Vec<u32>], a: u32, b: u32) {
	if a == b {
		return;
	}
	if !adjacency[a as usize].contains(&b) {
		adjacency[a as usize].push(b);
	}
	if !adjacency[b as usize].contains(&a) {
		adjacency[b as usize].push(a);
	}
}

/// Remove nodes no triangle referenced and renumber the rest in their original order
fn prune_unreferenced(
	positions: Vec<Vec3>,
	adjacency: Vec<Vec<u32>>,
	referenced: &[bool],
) -> (Vec<Vec3>, Vec<Vec<u32>>) {
	if referenced.iter().all(|r| *r) {
		return (positions, adjacency);
	}
	// old index -> new index
	let mut remap = vec![None; positions.len()];
	let mut next = 0;
	for (i, is_referenced) in referenced.iter().enumerate() {
		if *is_referenced {
			remap[i] = Some(next);
			next += 1;
		}
	}
	let mut kept_positions = Vec::with_capacity(next as usize);
	let mut kept_adjacency = Vec::with_capacity(next as usize);
	for (i, (position, list)) in positions.into_iter().zip(adjacency).enumerate() {
		if remap[i].is_some() {
			kept_positions.push(position);
			// an unreferenced node never gained an edge so every neighbour has a new index
			kept_adjacency.push(
				list.iter()
					.filter_map(|n| remap[*n as usize])
					.collect::<Vec<u32>>(),
			);
		}
	}
	(kept_positions, kept_adjacency)
}

/// Sum the unit vectors from each node to its neighbours and normalise the result
fn calculate_debug_flow(positions: &[Vec3], adjacency: &[Vec<u32>]) -> Vec<NavVertex> {
	positions
		.iter()
		.zip(adjacency)
		.map(|(position, list)| {
			let sum: Vec3 = list
				.iter()
				.map(|n| direction_between(*position, positions[*n as usize]))
				.sum();
			NavVertex {
				position: *position,
				forward: sum.normalize_or_zero(),
			}
		})
		.collect()
}

/// Flatten the lists into a [NavGraph]. [add_edge] and [prune_unreferenced] keep the lists symmetric and in range, a failure here is a bug in the builder: debug builds panic, release builds log it and produce an empty graph
fn finalise(positions: Vec<Vec3>, adjacency: Vec<Vec<u32>>) -> NavGraph {
	let result = NavGraph::from_adjacency(positions, &adjacency);
	debug_assert!(result.is_ok(), "Baked NavGraph failed validation: {:?}", result);
	match result {
		Ok(graph) => graph,
		Err(e) => {
			error!("Baked NavGraph failed validation: {}", e);
			NavGraph::default()
		}
	}
}
