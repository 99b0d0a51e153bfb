use crate::graph::{Direction, EdgeRef};
use crate::spatial::Position;
use crate::weighting::read_reverse;
use serde::{Deserialize, Serialize};

// Node or edge id
pub type Idx = u32;

/// An edge as it is stored: attributes are given for `base -> adj` (index 0) and
/// `adj -> base` (index 1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
  pub base: Idx,
  pub adj: Idx,
  pub distance: f64,
  pub access: [bool; 2],
  pub speed: [f64; 2],
}

impl EdgeRecord {
  /// Edge usable in both directions with the same speed
  pub fn new(base: Idx, adj: Idx, distance: f64, speed: f64) -> Self {
    EdgeRecord {
      base,
      adj,
      distance,
      access: [true, true],
      speed: [speed, speed],
    }
  }

  pub fn oneway(base: Idx, adj: Idx, distance: f64, speed: f64) -> Self {
    EdgeRecord {
      base,
      adj,
      distance,
      access: [true, false],
      speed: [speed, 0.0],
    }
  }

  /// View of the edge explored from `from`, which must be one of the edge's nodes.
  pub fn view(&self, id: Idx, from: Idx) -> EdgeRef {
    let edge = EdgeRef {
      edge: id,
      base: self.base,
      adj: self.adj,
      distance: self.distance,
      access: self.access,
      speed: self.speed,
      orig_first: id,
      orig_last: id,
      against_storage: false,
    };
    if from == self.base {
      edge
    } else {
      edge.reversed()
    }
  }
}

/// Iterator over the edges incident to a node which can be traveled in a given direction
pub struct IncidentEdges<'a> {
  records: &'a [EdgeRecord],
  ids: std::slice::Iter<'a, Idx>,
  node: Idx,
  reverse: bool,
}

impl<'a> IncidentEdges<'a> {
  pub fn new(records: &'a [EdgeRecord], ids: &'a [Idx], node: Idx, direction: Direction) -> Self {
    IncidentEdges {
      records,
      ids: ids.iter(),
      node,
      reverse: direction.is_reverse(),
    }
  }
}

impl<'a> Iterator for IncidentEdges<'a> {
  type Item = EdgeRef;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let id = *self.ids.next()?;
      let edge = self.records[id as usize].view(id, self.node);
      if edge.access(read_reverse(&edge, self.reverse)) {
        return Some(edge);
      }
    }
  }
}

/// Tower nodes plus pillar points of an edge, oriented like the given view
pub fn oriented_geometry(
  edge: &EdgeRef,
  base: Position,
  adj: Position,
  pillars: &[Position],
) -> std::vec::IntoIter<Position> {
  let mut points = Vec::with_capacity(pillars.len() + 2);
  points.push(base);
  if edge.against_storage {
    points.extend(pillars.iter().rev().cloned());
  } else {
    points.extend(pillars.iter().cloned());
  }
  points.push(adj);
  points.into_iter()
}

/// A  [start, end) range of elements in the contiguous array.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct RangeRef(pub Idx, pub Idx);

impl RangeRef {
  pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
    &items[self.0 as usize..self.1 as usize]
  }
}
