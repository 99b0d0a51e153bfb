use super::common::*;
use super::dynamic_graph::DynamicGraph;
use crate::graph::*;
use crate::spatial::Position;
use log::debug;
use serde::{Deserialize, Serialize};
use std::mem::size_of;

/// Graph which uses a compact memory layout for it's data. The graph is immutable and can be
/// shared between threads running independent searches.
#[derive(Clone, Serialize, Deserialize)]
pub struct CompactGraph {
  positions: Vec<Position>,
  edges: Vec<EdgeRecord>,
  // Offset of every node in `incident`, plus a sentinel at the end
  offsets: Vec<Idx>,
  // Ids of the edges incident to each node, stored contiguously
  incident: Vec<Idx>,
  // Pillar points of all edges. `geometry[e]` refers into it.
  points: Vec<Position>,
  geometry: Vec<RangeRef>,
}

impl GraphBase for CompactGraph {
  fn number_of_nodes(&self) -> usize {
    self.positions.len()
  }

  fn number_of_edges(&self) -> usize {
    self.edges.len()
  }
}

impl<'a> IntoEdges for &'a CompactGraph {
  type Edges = IncidentEdges<'a>;

  fn edges(self, node: NodeId, direction: Direction) -> Self::Edges {
    let start = self.offsets[node as usize] as usize;
    let end = self.offsets[node as usize + 1] as usize; // Safe to do +1 since we added a sentinel
    IncidentEdges::new(&self.edges, &self.incident[start..end], node, direction)
  }
}

impl NodeAccess for CompactGraph {
  fn position(&self, node: NodeId) -> Position {
    self.positions[node as usize]
  }
}

impl<'a> IntoGeometry for &'a CompactGraph {
  type Geometry = std::vec::IntoIter<Position>;

  fn geometry(self, edge: &EdgeRef) -> Self::Geometry {
    oriented_geometry(
      edge,
      self.positions[edge.base as usize],
      self.positions[edge.adj as usize],
      self.geometry[edge.edge as usize].slice(&self.points),
    )
  }
}

impl From<&DynamicGraph> for CompactGraph {
  fn from(graph: &DynamicGraph) -> Self {
    let num_nodes = graph.number_of_nodes();

    let mut positions = Vec::with_capacity(num_nodes);
    let mut offsets = Vec::with_capacity(num_nodes + 1);
    let mut incident = Vec::with_capacity(2 * graph.number_of_edges());
    for node in 0..num_nodes as Idx {
      positions.push(graph.position(node));
      offsets.push(incident.len() as Idx);
      incident.extend_from_slice(graph.incident(node));
    }
    offsets.push(incident.len() as Idx);

    let mut points = Vec::new();
    let mut geometry = Vec::with_capacity(graph.number_of_edges());
    for edge in 0..graph.number_of_edges() as Idx {
      let start = points.len() as Idx;
      points.extend_from_slice(graph.pillars(edge));
      geometry.push(RangeRef(start, points.len() as Idx));
    }

    CompactGraph {
      positions,
      edges: graph.records().to_vec(),
      offsets,
      incident,
      points,
      geometry,
    }
  }
}

impl CompactGraph {
  pub fn record(&self, edge: Idx) -> &EdgeRecord {
    &self.edges[edge as usize]
  }

  pub fn log_stats(&self) {
    log_vector_size("positions", &self.positions);
    log_vector_size("edges", &self.edges);
    log_vector_size("incident", &self.incident);
    log_vector_size("points", &self.points);
  }

  pub fn shrink(&mut self) {
    self.positions.shrink_to_fit();
    self.edges.shrink_to_fit();
    self.offsets.shrink_to_fit();
    self.incident.shrink_to_fit();
    self.points.shrink_to_fit();
    self.geometry.shrink_to_fit();
  }
}

fn log_vector_size<T>(name: &str, v: &Vec<T>) {
  debug!(
    "\t{}: count = {}/{}, element = {}, total = {} Mb",
    name,
    v.len(),
    v.capacity(),
    size_of::<T>(),
    v.capacity() * size_of::<T>() / 1024 / 1024
  );
}
