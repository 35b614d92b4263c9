//! A [MeshPiece] is one chunk of navigable surface handed to the
//! [crate::prelude::NavGraphBuilder]: local-space vertices, a triangle index
//! buffer and the transform placing it in the world
//!

use crate::prelude::*;
use bevy::{
	prelude::*,
	render::mesh::{Indices, PrimitiveTopology},
};

/// Raw triangle geometry of part of a navigable surface
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default)]
pub struct MeshPiece {
	/// Vertex positions relative to `transform`
	vertices: Vec<Vec3>,
	/// Triangle list, three indices per triangle
	indices: Vec<u32>,
	/// Places the vertices in world space
	transform: Transform,
	/// Excluded pieces are skipped by the builder
	excluded: bool,
}

impl MeshPiece {
	/// Create a new instance of [MeshPiece]
	pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>, transform: Transform) -> Self {
		MeshPiece {
			vertices,
			indices,
			transform,
			excluded: false,
		}
	}
	/// Mark whether the builder should skip this piece
	pub fn with_excluded(mut self, excluded: bool) -> Self {
		self.excluded = excluded;
		self
	}
	/// Get the local-space vertices
	pub fn get_vertices(&self) -> &[Vec3] {
		&self.vertices
	}
	/// Get the triangle index buffer
	pub fn get_indices(&self) -> &[u32] {
		&self.indices
	}
	/// Get the world transform of the piece
	pub fn get_transform(&self) -> &Transform {
		&self.transform
	}
	/// Whether the builder skips this piece
	pub fn is_excluded(&self) -> bool {
		self.excluded
	}
	/// Number of vertices in the piece
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}
	/// Iterate over the vertices in world space
	pub fn world_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
		self.vertices
			.iter()
			.map(|vertex| self.transform.transform_point(*vertex))
	}
	/// Iterate over the triangles of the piece as local index triples
	pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
		self.indices
			.chunks_exact(3)
			.map(|tri| [tri[0], tri[1], tri[2]])
	}
	/// Check the piece has vertices, a whole number of triangles and that every index refers to a vertex
	pub fn validate(&self) -> Result<(), MeshPieceError> {
		if self.vertices.is_empty() {
			return Err(MeshPieceError::NoVertices);
		}
		if self.indices.len() % 3 != 0 {
			return Err(MeshPieceError::NotTriangles(self.indices.len()));
		}
		if let Some(index) = self
			.indices
			.iter()
			.find(|index| **index as usize >= self.vertices.len())
		{
			return Err(MeshPieceError::IndexOutOfRange {
				index: *index,
				vertex_count: self.vertices.len(),
			});
		}
		Ok(())
	}
	/// Extract a [MeshPiece] from a Bevy [Mesh]. `TriangleList` meshes may be indexed or not, `TriangleStrip` meshes are unrolled into a triangle list keeping a consistent winding
	pub fn from_mesh(mesh: &Mesh, transform: Transform) -> Result<Self, MeshPieceError> {
		let vertices: Vec<Vec3> = mesh
			.attribute(Mesh::ATTRIBUTE_POSITION)
			.and_then(|attribute| attribute.as_float3())
			.ok_or(MeshPieceError::MissingPositions)?
			.iter()
			.map(|v| Vec3::from_array(*v))
			.collect();
		// meshes without an index buffer draw their vertices in order
		let ordered: Vec<u32> = match mesh.indices() {
			Some(indices) => collect_indices(indices),
			None => (0..vertices.len() as u32).collect(),
		};
		let indices = match mesh.primitive_topology() {
			PrimitiveTopology::TriangleList => ordered,
			PrimitiveTopology::TriangleStrip => {
				if ordered.len() < 3 {
					warn!("A TriangleStrip mesh has insufficient vertices");
				}
				unroll_triangle_strip(&ordered)
			}
			other => {
				return Err(MeshPieceError::UnsupportedTopology(format!("{:?}", other)));
			}
		};
		Ok(MeshPiece::new(vertices, indices, transform))
	}
}

/// Read a Bevy index buffer as `u32`
fn collect_indices(indices: &Indices) -> Vec<u32> {
	indices.iter().map(|i| i as u32).collect()
}

/// Convert a triangle strip into a triangle list, every odd triangle has its first two indices swapped to preserve the winding
fn unroll_triangle_strip(strip: &[u32]) -> Vec<u32> {
	let mut list = Vec::with_capacity(strip.len().saturating_sub(2) * 3);
	for n in 0..strip.len().saturating_sub(2) {
		if n % 2 == 0 {
			list.extend_from_slice(&[strip[n], strip[n + 1], strip[n + 2]]);
		} else {
			list.extend_from_slice(&[strip[n + 1], strip[n], strip[n + 2]]);
		}
	}
	list
}
