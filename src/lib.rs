//! This is a plugin for Bevy game engine to calculate pathfinding FlowFields over the triangle meshes of arbitrary surfaces, such as planets
//!

pub mod bundle;
pub mod flowfields;
pub mod plugin;

pub mod prelude;
