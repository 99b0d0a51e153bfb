use crate::graph::{EdgeRef, GraphBase, NodeId};
use crate::spatial::Position;

/// Defines the position of graph nodes. Used by the beeline weight approximation.
pub trait NodeAccess: GraphBase {
  fn position(&self, node: NodeId) -> Position;
}

/// Defines how to obtain the geometry of an edge
///
/// The geometry is oriented like the given view: it starts at `edge.base` and ends at
/// `edge.adj`, both tower nodes included.
pub trait IntoGeometry: GraphBase {
  type Geometry: Iterator<Item = Position>;
  fn geometry(self, edge: &EdgeRef) -> Self::Geometry;
}

impl<'a, G: NodeAccess> NodeAccess for &'a G {
  fn position(&self, node: NodeId) -> Position {
    (*self).position(node)
  }
}
