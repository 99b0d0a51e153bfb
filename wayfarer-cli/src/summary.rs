use serde::Serialize;
use wayfarer::graph::{IntoGeometry, NodeId};
use wayfarer::PathOutcome;

/// Result of a single query as printed by the command line tool
#[derive(Debug, PartialEq, Serialize)]
pub struct QuerySummary {
  pub algorithm: String,
  pub outcome: &'static str,
  pub visited_nodes: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weight: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time_ms: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distance: Option<f64>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub nodes: Vec<NodeId>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub geometry: Vec<[f64; 2]>,
}

impl QuerySummary {
  pub fn new<G: IntoGeometry + Copy>(algorithm: String, outcome: &PathOutcome, visited_nodes: usize, graph: G) -> Self {
    let mut summary = QuerySummary {
      algorithm,
      outcome: outcome.label(),
      visited_nodes,
      weight: None,
      time_ms: None,
      distance: None,
      nodes: Vec::new(),
      geometry: Vec::new(),
    };
    if let Some(path) = outcome.path() {
      summary.weight = Some(path.weight);
      summary.time_ms = Some(path.time);
      summary.distance = Some(path.distance);
      summary.nodes = path.nodes.clone();
      summary.geometry = path.geometry(graph).iter().map(|p| [p.x, p.y]).collect();
    }
    summary
  }
}
