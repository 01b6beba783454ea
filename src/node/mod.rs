pub mod node_model;
pub mod walker;
