//! Graph and mesh generators shared by the integration tests
//!

#![allow(dead_code)]

use std::collections::VecDeque;
use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_flowfield_mesh_plugin::prelude::*;
use rand::{rngs::StdRng, Rng};

/// A UV sphere with a single vertex at each pole. Vertex `0` is the north pole, the last vertex is the south pole and ring `k` (1-based from the north) occupies `1 + (k - 1) * segments..1 + k * segments`
pub fn uv_sphere(radius: f32, rings: u32, segments: u32, transform: Transform) -> MeshPiece {
	let mut vertices = vec![Vec3::new(0.0, radius, 0.0)];
	for ring in 1..rings {
		let phi = PI * ring as f32 / rings as f32;
		for segment in 0..segments {
			let theta = 2.0 * PI * segment as f32 / segments as f32;
			vertices.push(Vec3::new(
				radius * phi.sin() * theta.cos(),
				radius * phi.cos(),
				radius * phi.sin() * theta.sin(),
			));
		}
	}
	let south = vertices.len() as u32;
	vertices.push(Vec3::new(0.0, -radius, 0.0));
	let index = |ring: u32, segment: u32| 1 + (ring - 1) * segments + segment % segments;
	let mut indices = Vec::new();
	for segment in 0..segments {
		indices.extend_from_slice(&[0, index(1, segment + 1), index(1, segment)]);
	}
	for ring in 1..rings - 1 {
		for segment in 0..segments {
			let a = index(ring, segment);
			let b = index(ring, segment + 1);
			let c = index(ring + 1, segment);
			let d = index(ring + 1, segment + 1);
			indices.extend_from_slice(&[a, b, c, b, d, c]);
		}
	}
	for segment in 0..segments {
		indices.extend_from_slice(&[south, index(rings - 1, segment), index(rings - 1, segment + 1)]);
	}
	MeshPiece::new(vertices, indices, transform)
}

/// A connected graph of `n` nodes at random positions: a random spanning tree plus `extra` random edges
pub fn random_connected_graph(rng: &mut StdRng, n: usize, extra: usize) -> NavGraph {
	let positions: Vec<Vec3> = (0..n)
		.map(|_| {
			Vec3::new(
				rng.random_range(-100.0..100.0),
				rng.random_range(-100.0..100.0),
				rng.random_range(-100.0..100.0),
			)
		})
		.collect();
	let mut adjacency = vec![Vec::new(); n];
	for i in 1..n {
		let j = rng.random_range(0..i);
		link(&mut adjacency, i, j);
	}
	for _ in 0..extra {
		let i = rng.random_range(0..n);
		let j = rng.random_range(0..n);
		link(&mut adjacency, i, j);
	}
	NavGraph::from_adjacency(positions, &adjacency).unwrap()
}

/// Two random connected graphs side by side with no edge between them, the second is offset far along x
pub fn two_components(rng: &mut StdRng, n: usize, m: usize) -> NavGraph {
	let first = random_connected_graph(rng, n, n / 2);
	let second = random_connected_graph(rng, m, m / 2);
	let mut positions = first.get_positions().to_vec();
	positions.extend(second.get_positions().iter().map(|p| *p + Vec3::X * 1000.0));
	let mut adjacency: Vec<Vec<u32>> = (0..n).map(|i| first.get_neighbours(i).to_vec()).collect();
	for i in 0..m {
		adjacency.push(second.get_neighbours(i).iter().map(|j| j + n as u32).collect());
	}
	NavGraph::from_adjacency(positions, &adjacency).unwrap()
}

/// Add an undirected edge if it is new and not a self-loop
fn link(adjacency: &mut [Vec<u32>], i: usize, j: usize) {
	if i == j || adjacency[i].contains(&(j as u32)) {
		return;
	}
	adjacency[i].push(j as u32);
	adjacency[j].push(i as u32);
}

/// Hop counts from `start` by relaxing every edge until nothing changes
pub fn brute_force_hops(graph: &NavGraph, start: usize) -> Vec<u32> {
	let mut hops = vec![UNREACHED_COST; graph.len()];
	hops[start] = 0;
	let mut changed = true;
	while changed {
		changed = false;
		for i in 0..graph.len() {
			if hops[i] == UNREACHED_COST {
				continue;
			}
			for j in graph.get_neighbours(i) {
				if hops[*j as usize] > hops[i] + 1 {
					hops[*j as usize] = hops[i] + 1;
					changed = true;
				}
			}
		}
	}
	hops
}

/// Nodes reachable from `start` by walking the adjacency
pub fn component_of(graph: &NavGraph, start: usize) -> Vec<bool> {
	let mut seen = vec![false; graph.len()];
	let mut queue = VecDeque::from([start]);
	seen[start] = true;
	while let Some(i) = queue.pop_front() {
		for j in graph.get_neighbours(i) {
			if !seen[*j as usize] {
				seen[*j as usize] = true;
				queue.push_back(*j as usize);
			}
		}
	}
	seen
}

/// Assert every non-start reached node points at a neighbour exactly one hop cheaper and the start node has no direction
pub fn assert_descending(graph: &NavGraph, engine: &FlowFieldEngine, start: usize) {
	assert_eq!(Ok(Vec3::ZERO), engine.direction_at(start));
	for node in 0..graph.len() {
		let cost = engine.cost_at(node).unwrap();
		if node == start || cost == UNREACHED_COST {
			continue;
		}
		let direction = engine.direction_at(node).unwrap();
		let position = graph.get_positions()[node];
		let points_downhill = graph.get_neighbours(node).iter().any(|m| {
			engine.cost_at(*m as usize).unwrap() == cost - 1
				&& direction_between(position, graph.get_positions()[*m as usize]) == direction
		});
		assert!(points_downhill, "node {} with cost {} points {:?}", node, cost, direction);
	}
}
