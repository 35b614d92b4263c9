//! The kinds of fields used by the algorithm. Each field holds one value per
//! [crate::prelude::NavGraph] node in node index order
//!

pub mod flow_field;
pub mod integration_field;

/// Defines required access to field arrays
pub trait Field<T> {
	/// Get a reference to the field array
	fn get(&self) -> &[T];
	/// Retrieve a node value
	fn get_node_value(&self, node: usize) -> T;
	/// Set a node to a value
	fn set_node_value(&mut self, value: T, node: usize);
	/// Number of nodes covered by the field
	fn len(&self) -> usize {
		self.get().len()
	}
	/// Whether the field covers no nodes
	fn is_empty(&self) -> bool {
		self.get().is_empty()
	}
}
