//! tikrscope: indicator and chart-composition engine for a price viewer.
//!
//! Hexagonal architecture: pure computation in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], and the command line
//! front end in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
