use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use wayfarer::graph::{EdgeId, GraphBase, NodeId};
use wayfarer::graph_impl::{CompactGraph, DynamicGraph};
use wayfarer::spatial::{haversine_distance, Position};
use wayfarer::weighting::{ConditionalAccess, TimeWindow, TurnCostTable};

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeInput {
  pub from: NodeId,
  pub to: NodeId,
  /// Meters, the length of the geometry if omitted
  pub distance: Option<f64>,
  /// km/h in the `from -> to` direction
  pub speed: f64,
  /// km/h in the `to -> from` direction, defaults to `speed`
  pub backward_speed: Option<f64>,
  #[serde(default)]
  pub oneway: bool,
  /// Intermediate points as `[lon, lat]`, ordered from `from` to `to`
  #[serde(default)]
  pub geometry: Vec<[f64; 2]>,
  /// Times when the edge can not be entered
  #[serde(default)]
  pub closed: Vec<TimeWindow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TurnInput {
  pub from_edge: EdgeId,
  pub via: NodeId,
  pub to_edge: EdgeId,
  /// Seconds, a missing cost forbids the turn
  pub cost: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GraphInput {
  pub nodes: Vec<[f64; 2]>,
  pub edges: Vec<EdgeInput>,
  #[serde(default)]
  pub turn_restrictions: Vec<TurnInput>,
  #[serde(default)]
  pub turn_costs: Vec<TurnInput>,
}

/// Road graph together with the turn costs and time dependent access rules of its edges
pub struct LoadedGraph {
  pub graph: CompactGraph,
  pub turn_costs: TurnCostTable,
  pub access: ConditionalAccess,
}

fn position(coordinates: &[f64; 2]) -> Position {
  Position {
    x: coordinates[0],
    y: coordinates[1],
  }
}

fn line_length(points: &[Position]) -> f64 {
  points.windows(2).map(|w| haversine_distance(&w[0], &w[1])).sum()
}

pub fn build_graph(input: &GraphInput) -> Result<LoadedGraph> {
  let mut graph = DynamicGraph::new();
  for node in &input.nodes {
    graph.add_node(position(node));
  }
  let nodes = input.nodes.len();
  let mut access = ConditionalAccess::new();

  for (i, edge) in input.edges.iter().enumerate() {
    if edge.from as usize >= nodes || edge.to as usize >= nodes {
      bail!("edge {} connects {} and {}, but there are only {} nodes", i, edge.from, edge.to, nodes);
    }
    if edge.speed.is_nan() || edge.speed < 0.0 {
      bail!("edge {} has invalid speed {}", i, edge.speed);
    }
    let pillars: Vec<Position> = edge.geometry.iter().map(position).collect();
    if let Some(backward_speed) = edge.backward_speed {
      if backward_speed.is_nan() || backward_speed < 0.0 {
        bail!("edge {} has invalid backward speed {}", i, backward_speed);
      }
    }
    let distance = match edge.distance {
      Some(distance) if !distance.is_finite() || distance < 0.0 => {
        bail!("edge {} has invalid distance {}", i, distance)
      }
      Some(distance) => distance,
      None => {
        let mut points = vec![position(&input.nodes[edge.from as usize])];
        points.extend(pillars.iter().cloned());
        points.push(position(&input.nodes[edge.to as usize]));
        line_length(&points)
      }
    };

    let id = graph.add_edge(edge.from, edge.to, distance, edge.speed, edge.oneway);
    if !edge.oneway {
      if let Some(backward_speed) = edge.backward_speed {
        let record = graph.record_mut(id);
        record.speed[1] = backward_speed;
        record.access[1] = backward_speed > 0.0;
      }
    }
    if edge.speed == 0.0 {
      graph.record_mut(id).access[0] = false;
    }
    graph.set_pillars(id, pillars);
    for window in &edge.closed {
      access.close_during(id, window.clone());
    }
  }

  let edges = input.edges.len();
  let mut turn_costs = TurnCostTable::new();
  for turn in input.turn_restrictions.iter().chain(input.turn_costs.iter()) {
    if turn.from_edge as usize >= edges || turn.to_edge as usize >= edges {
      bail!("turn {} -> {} refers to an unknown edge", turn.from_edge, turn.to_edge);
    }
    match turn.cost {
      Some(cost) if cost.is_nan() || cost < 0.0 => {
        bail!("turn {} -> {} has invalid cost {}", turn.from_edge, turn.to_edge, cost)
      }
      Some(cost) => turn_costs.set_cost(turn.from_edge, turn.via, turn.to_edge, cost),
      None => turn_costs.restrict(turn.from_edge, turn.via, turn.to_edge),
    };
  }

  let mut graph = CompactGraph::from(&graph);
  graph.shrink();
  Ok(LoadedGraph {
    graph,
    turn_costs,
    access,
  })
}

pub fn load_graph(path: &str) -> Result<LoadedGraph> {
  let timer = Instant::now();
  let file = File::open(path).with_context(|| format!("Failed to open graph {}", path))?;
  let input: GraphInput =
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("Failed to parse graph {}", path))?;
  let loaded = build_graph(&input).with_context(|| format!("Invalid graph {}", path))?;
  info!(
    "Loaded graph with {} nodes and {} edges in {:.2} seconds",
    loaded.graph.number_of_nodes(),
    loaded.graph.number_of_edges(),
    timer.elapsed().as_secs_f32()
  );
  loaded.graph.log_stats();
  Ok(loaded)
}
