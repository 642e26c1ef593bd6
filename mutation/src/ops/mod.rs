//! Mutation operation implementations.
//!
//! Each structural operation is implemented in its own module for better
//! organization and testability.

mod add_edge;
mod add_node;
mod delete_edge;
mod delete_node;
mod update_edge;
mod update_node;

pub use add_edge::execute_add_edge;
pub use add_node::execute_add_node;
pub use delete_edge::execute_delete_edge;
pub use delete_node::{execute_delete_node, CascadePolicy};
pub use update_edge::execute_update_edge;
pub use update_node::execute_update_node;
