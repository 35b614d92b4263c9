//! `use bevy_flowfield_mesh_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::flowfields::{
	config::*,
	engine::*,
	error::*,
	fields::{flow_field::*, integration_field::*, *},
	graph::{builder::*, mesh_piece::*, *},
	utilities::*,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{config_layer::*, flow_layer::*, *},
};
