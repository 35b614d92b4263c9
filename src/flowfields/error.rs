//! Errors raised while building, loading and querying navigation data
//!

use thiserror::Error;

/// Failures describing an inconsistent [crate::prelude::NavGraph] or an unreadable navigation file
#[derive(Debug, Error)]
pub enum NavGraphError {
	/// The per-node arrays disagree on the number of nodes
	#[error("NavGraph arrays disagree on node count: {positions} positions, {offsets} offsets, {counts} counts")]
	LengthMismatch {
		/// Length of the position array
		positions: usize,
		/// Length of the offset array
		offsets: usize,
		/// Length of the count array
		counts: usize,
	},
	/// A node's adjacency window runs past the end of the flat neighbour array
	#[error("Adjacency of node {node} spans {start}..{end} but only {len} neighbours exist")]
	AdjacencyOutOfRange {
		/// Node with the bad window
		node: usize,
		/// Start of the window
		start: usize,
		/// End of the window
		end: usize,
		/// Length of the flat neighbour array
		len: usize,
	},
	/// A neighbour index refers to a node which doesn't exist
	#[error("Node {node} lists neighbour {neighbour} but the graph only has {node_count} nodes")]
	NeighbourOutOfRange {
		/// Node owning the neighbour list
		node: usize,
		/// Offending neighbour index
		neighbour: u32,
		/// Number of nodes in the graph
		node_count: usize,
	},
	/// An edge only exists in one direction
	#[error("Node {node} lists neighbour {neighbour} but not the reverse")]
	Asymmetric {
		/// Node owning the neighbour list
		node: usize,
		/// Neighbour missing the reverse link
		neighbour: u32,
	},
	/// The same neighbour appears twice in one list
	#[error("Node {node} lists neighbour {neighbour} more than once")]
	DuplicateNeighbour {
		/// Node owning the neighbour list
		node: usize,
		/// Repeated neighbour
		neighbour: u32,
	},
	/// Reading or writing a graph or config file failed
	#[error("Failed accessing file '{path}': {source}")]
	Io {
		/// File path
		path: String,
		/// Underlying io error
		#[source]
		source: std::io::Error,
	},
	/// RON could not be parsed into a graph or config
	#[cfg(feature = "ron")]
	#[error("Failed deserializing RON: {0}")]
	Deserialize(#[from] ron::error::SpannedError),
	/// The graph could not be written as RON
	#[cfg(feature = "ron")]
	#[error("Failed serializing NavGraph: {0}")]
	Serialize(#[from] ron::Error),
}

/// Reasons a [crate::prelude::MeshPiece] cannot contribute to a [crate::prelude::NavGraph]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshPieceError {
	/// The piece has no vertices
	#[error("Mesh piece has no vertices")]
	NoVertices,
	/// The index buffer cannot be split into triangles
	#[error("Mesh piece index count {0} is not a multiple of 3")]
	NotTriangles(usize),
	/// A triangle refers to a vertex the piece doesn't have
	#[error("Mesh piece index {index} is out of range for {vertex_count} vertices")]
	IndexOutOfRange {
		/// Offending index
		index: u32,
		/// Number of vertices in the piece
		vertex_count: usize,
	},
	/// The Bevy mesh lacks a position attribute in `Float32x3` form
	#[error("Mesh has no Float32x3 position attribute")]
	MissingPositions,
	/// The Bevy mesh topology can't be read as triangles
	#[error("Mesh topology must be TriangleList or TriangleStrip, found {0}")]
	UnsupportedTopology(String),
}

/// Misuse of a [crate::prelude::FlowFieldEngine]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowFieldError {
	/// No [crate::prelude::NavGraph] has been attached, or it was released
	#[error("FlowFieldEngine has no NavGraph attached")]
	NotAttached,
	/// A node index beyond the attached graph was queried
	#[error("Node index {index} is out of bounds, the graph has {len} nodes")]
	NodeOutOfBounds {
		/// Requested node
		index: usize,
		/// Number of nodes in the graph
		len: usize,
	},
	/// Recomputation failed part way, the previous fields were kept
	#[error("Flow field recomputation failed: {0}")]
	Internal(String),
}
