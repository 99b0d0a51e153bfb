//! Set of traits for defining a graph abstraction.
//!
//! The module contains traits for exploring the edges of a directed road graph, filtering them
//! and reading node positions and edge geometry.
//!
mod graph;
mod spatial;

pub use graph::*;
pub use spatial::*;
