use super::common::*;
use crate::graph::*;
use crate::spatial::Position;

#[derive(Clone)]
struct Node {
  position: Position,
  // Ids of all edges which start or end at this node
  edges: Vec<Idx>,
}

/// Simple graph implementation which stores incident edge ids as a vector in each node. Not memory efficient. But allows adding nodes and edges dynamically - useful for testing and for building a [`CompactGraph`](super::CompactGraph).
#[derive(Default, Clone)]
pub struct DynamicGraph {
  nodes: Vec<Node>,
  edges: Vec<EdgeRecord>,
  pillars: Vec<Vec<Position>>,
}

impl DynamicGraph {
  pub fn new() -> Self {
    Self {
      nodes: Vec::new(),
      edges: Vec::new(),
      pillars: Vec::new(),
    }
  }

  /// Graph with `count` nodes, all located at `(0, 0)`
  pub fn with_nodes(count: usize) -> Self {
    Self {
      nodes: vec![
        Node {
          position: Position { x: 0.0, y: 0.0 },
          edges: Vec::new(),
        };
        count
      ],
      edges: Vec::new(),
      pillars: Vec::new(),
    }
  }

  pub fn add_node(&mut self, position: Position) -> Idx {
    let size = self.nodes.len();
    self.nodes.push(Node {
      position,
      edges: Vec::new(),
    });
    size as Idx
  }

  pub fn set_position(&mut self, node: Idx, position: Position) -> &mut Self {
    self.nodes[node as usize].position = position;
    self
  }

  /// Adds an edge usable in both directions, or only `base -> adj` if `oneway`
  pub fn add_edge(&mut self, base: Idx, adj: Idx, distance: f64, speed: f64, oneway: bool) -> Idx {
    let record = if oneway {
      EdgeRecord::oneway(base, adj, distance, speed)
    } else {
      EdgeRecord::new(base, adj, distance, speed)
    };
    self.add_record(record)
  }

  pub fn add_record(&mut self, record: EdgeRecord) -> Idx {
    let id = self.edges.len() as Idx;
    self.nodes[record.base as usize].edges.push(id);
    if record.adj != record.base {
      self.nodes[record.adj as usize].edges.push(id);
    }
    self.edges.push(record);
    self.pillars.push(Vec::new());
    id
  }

  /// Sets the intermediate points of an edge, ordered from its stored base to its adj node
  pub fn set_pillars(&mut self, edge: Idx, pillars: Vec<Position>) -> &mut Self {
    self.pillars[edge as usize] = pillars;
    self
  }

  pub fn record(&self, edge: Idx) -> &EdgeRecord {
    &self.edges[edge as usize]
  }

  pub fn record_mut(&mut self, edge: Idx) -> &mut EdgeRecord {
    &mut self.edges[edge as usize]
  }

  pub(crate) fn records(&self) -> &[EdgeRecord] {
    &self.edges
  }

  pub(crate) fn pillars(&self, edge: Idx) -> &[Position] {
    &self.pillars[edge as usize]
  }

  pub(crate) fn incident(&self, node: Idx) -> &[Idx] {
    &self.nodes[node as usize].edges
  }
}

impl GraphBase for DynamicGraph {
  fn number_of_nodes(&self) -> usize {
    self.nodes.len()
  }

  fn number_of_edges(&self) -> usize {
    self.edges.len()
  }
}

impl<'a> IntoEdges for &'a DynamicGraph {
  type Edges = IncidentEdges<'a>;

  fn edges(self, node: NodeId, direction: Direction) -> Self::Edges {
    IncidentEdges::new(&self.edges, &self.nodes[node as usize].edges, node, direction)
  }
}

impl NodeAccess for DynamicGraph {
  fn position(&self, node: NodeId) -> Position {
    self.nodes[node as usize].position
  }
}

impl<'a> IntoGeometry for &'a DynamicGraph {
  type Geometry = std::vec::IntoIter<Position>;

  fn geometry(self, edge: &EdgeRef) -> Self::Geometry {
    oriented_geometry(
      edge,
      self.position(edge.base),
      self.position(edge.adj),
      &self.pillars[edge.edge as usize],
    )
  }
}
