//! Flowfields are a means of handling pathfinding for a crowd of actors.
//!
//! [Fixing Pathfinding Once and For All](https://web.archive.org/web/20150905073624/http://www.ai-blog.net/archives/000152.html)
//!
//! [jdxdev](https://www.jdxdev.com/blog/2020/05/03/flowfields/)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! Rather than a flat grid the surface is described by a navigation graph
//! baked from triangle meshes, which lets actors path across curved worlds
//! such as the surface of a planet. Each mesh vertex becomes a node and each
//! triangle edge connects two nodes.
//!
//! Definitions:
//!
//! * NavGraph - the immutable set of node positions and their flattened neighbour lists
//! * Start node - the node nearest the target, the wavefront expands from here
//! * Integration field - 32-bit hop count from each node to the start node, `u32::MAX` where the start node can't be reached
//! * Vector field - unit direction from each node towards its cheapest neighbour, zero at the start node and where there is no path
//! * Throttle threshold - squared distance the target must move before the fields are recalculated
//!
//! ```text
//!         o-----o-----o
//!        / \ 2 / \ 1 / \
//!       o-----o-----S-----o      S = start node (cost 0)
//!        \ 2 / \ 1 / \ 1 /
//!         o-----o-----o
//! ```
//!

pub mod config;
pub mod engine;
pub mod error;
pub mod fields;
pub mod graph;
pub mod utilities;
