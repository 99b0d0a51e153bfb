use std::fmt::Debug;
use std::iter::Iterator;

// ====== Basic types =====

/// Node identifier, an index into the graph
pub type NodeId = u32;

/// Edge identifier, an index into the graph
pub type EdgeId = u32;

/// Direction of the edge exploration.
///
/// `Forward` explores the edges which can be traveled *out of* a node, `Backward` the edges
/// which can be traveled *into* a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
  Forward,
  Backward,
}

impl Direction {
  pub fn from_reverse(reverse: bool) -> Self {
    if reverse {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }

  pub fn is_reverse(self) -> bool {
    self == Direction::Backward
  }
}

/// A directed view on a stored edge, as returned by [`IntoEdges::edges`].
///
/// `base` is always the node which is being explored and `adj` the node on the other side of
/// the edge. All directional attributes are relative to this view: index `0` describes
/// traveling `base -> adj`, index `1` traveling `adj -> base`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeRef {
  pub edge: EdgeId,
  pub base: NodeId,
  pub adj: NodeId,
  /// Length in meters
  pub distance: f64,
  pub access: [bool; 2],
  /// Speed in km/h
  pub speed: [f64; 2],
  /// Original edge at the `base` end. Equals `edge` unless the edge stands for a sequence of
  /// original edges.
  pub orig_first: EdgeId,
  /// Original edge at the `adj` end.
  pub orig_last: EdgeId,
  /// True when `base`/`adj` are swapped compared to how the edge is stored
  pub against_storage: bool,
}

impl EdgeRef {
  pub fn new(edge: EdgeId, base: NodeId, adj: NodeId, distance: f64) -> Self {
    EdgeRef {
      edge,
      base,
      adj,
      distance,
      access: [true, true],
      speed: [0.0, 0.0],
      orig_first: edge,
      orig_last: edge,
      against_storage: false,
    }
  }

  pub fn access(&self, reverse: bool) -> bool {
    self.access[reverse as usize]
  }

  pub fn speed(&self, reverse: bool) -> f64 {
    self.speed[reverse as usize]
  }

  pub fn is_loop(&self) -> bool {
    self.base == self.adj
  }

  /// The same edge seen from the other end.
  pub fn reversed(&self) -> Self {
    EdgeRef {
      edge: self.edge,
      base: self.adj,
      adj: self.base,
      distance: self.distance,
      access: [self.access[1], self.access[0]],
      speed: [self.speed[1], self.speed[0]],
      orig_first: self.orig_last,
      orig_last: self.orig_first,
      against_storage: !self.against_storage,
    }
  }
}

// ====== Edge access =====

/// Defines the size of the graph
pub trait GraphBase {
  fn number_of_nodes(&self) -> usize;
  fn number_of_edges(&self) -> usize;
}

/// Trait for defining graph connectivity
///
/// - `edges(u, Direction::Forward)` must return a view from `u` of every edge which can be
/// traveled starting at `u`.
/// - `edges(u, Direction::Backward)` must return a view from `u` of every edge which can be
/// traveled ending at `u`.
///
/// The trait is meant to be implemented for references, so that a graph can be cheaply copied
/// into every search. The graph is never mutated by a search. Helper functions [`out_edges`]
/// and [`in_edges`] make the call sites shorter.
pub trait IntoEdges: GraphBase {
  type Edges: Iterator<Item = EdgeRef>;
  fn edges(self, node: NodeId, direction: Direction) -> Self::Edges;
}

/// Returns an iterator over all edges leaving the node
pub fn out_edges<G: IntoEdges>(graph: G, node: NodeId) -> G::Edges {
  graph.edges(node, Direction::Forward)
}

/// Returns an iterator over all edges entering the node
pub fn in_edges<G: IntoEdges>(graph: G, node: NodeId) -> G::Edges {
  graph.edges(node, Direction::Backward)
}

/// Returns the first edge which can be traveled from `from` to `to`
pub fn find_edge<G: IntoEdges>(graph: G, from: NodeId, to: NodeId) -> Option<EdgeRef> {
  out_edges(graph, from).find(|e| e.adj == to)
}

// ====== Edge filtering =====

/// Predicate over edges. Closures `Fn(&EdgeRef) -> bool` implement it.
pub trait EdgeFilter {
  fn accept(&self, edge: &EdgeRef) -> bool;

  /// Turn aware variant, `prev` is the edge traversed right before `edge`.
  fn accept_after(&self, edge: &EdgeRef, _prev: Option<EdgeId>) -> bool {
    self.accept(edge)
  }
}

impl<F: Fn(&EdgeRef) -> bool> EdgeFilter for F {
  fn accept(&self, edge: &EdgeRef) -> bool {
    self(edge)
  }
}

/// Accepts everything
#[derive(Copy, Clone, Debug, Default)]
pub struct AllEdges;

impl EdgeFilter for AllEdges {
  fn accept(&self, _edge: &EdgeRef) -> bool {
    true
  }
}

// ====== Blanket implementations =====

impl<'a, G: GraphBase> GraphBase for &'a G {
  fn number_of_nodes(&self) -> usize {
    (*self).number_of_nodes()
  }

  fn number_of_edges(&self) -> usize {
    (*self).number_of_edges()
  }
}

/// Requirements for a graph to be searched
pub trait RoutingGraph: Copy + IntoEdges {}
impl<T> RoutingGraph for T where T: Copy + IntoEdges {}
