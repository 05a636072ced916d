//! Port traits: the seams to configuration, bar retrieval and rendering.

pub mod config_port;
pub mod data_port;
pub mod render_port;
