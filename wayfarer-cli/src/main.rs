use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{value_t, App, Arg, ArgMatches};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use wayfarer::algorithm::{RoutingAlgorithm, RoutingAlgorithmFactory, TdDijkstra};
use wayfarer::weighting::{
    FastestWeighting, ShortestWeighting, TimeDependentAccessWeighting, TurnWeighting, Weighting,
};
use wayfarer::AlgorithmOptions;
use wayfarer_cli::{load_graph, LoadedGraph, QuerySummary};

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("wayfarer-route")
        .about("Finds the best route between two nodes of a JSON road graph")
        .arg(Arg::with_name("graph").required(true).help("Graph in JSON format"))
        .arg(Arg::with_name("from").required(true).help("Source node"))
        .arg(Arg::with_name("to").required(true).help("Target node"))
        .arg(
            Arg::with_name("options")
                .long("options")
                .takes_value(true)
                .help("JSON file with algorithm options, overridden by the flags below"),
        )
        .arg(
            Arg::with_name("algorithm")
                .long("algorithm")
                .short("a")
                .takes_value(true)
                .help("dijkstra, dijkstrabi, dijkstranativebi, astar, astarbi or dijkstraonetomany"),
        )
        .arg(Arg::with_name("approximation").long("approximation").help("Plane distance for the beeline estimate"))
        .arg(Arg::with_name("edge_based").long("edge-based").help("Turn aware search"))
        .arg(Arg::with_name("max_visited").long("max-visited").takes_value(true))
        .arg(
            Arg::with_name("weighting")
                .long("weighting")
                .takes_value(true)
                .possible_values(&["fastest", "shortest"])
                .default_value("fastest"),
        )
        .arg(Arg::with_name("max_speed").long("max-speed").takes_value(true).default_value("130"))
        .arg(
            Arg::with_name("departure")
                .long("departure")
                .takes_value(true)
                .conflicts_with("arrival")
                .help("RFC 3339 departure time, runs a time dependent search"),
        )
        .arg(
            Arg::with_name("arrival")
                .long("arrival")
                .takes_value(true)
                .help("RFC 3339 arrival time, runs a time dependent search backwards"),
        )
        .arg(Arg::with_name("from_edge").long("from-edge").takes_value(true).conflicts_with_all(&["departure", "arrival"]))
        .arg(Arg::with_name("to_edge").long("to-edge").takes_value(true).conflicts_with_all(&["departure", "arrival"]))
}

fn read_options(matches: &ArgMatches) -> Result<AlgorithmOptions> {
    let mut options = match matches.value_of("options") {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open options {}", path))?;
            serde_json::from_reader(BufReader::new(file)).with_context(|| format!("Failed to parse options {}", path))?
        }
        None => AlgorithmOptions::default(),
    };
    if let Some(algorithm) = matches.value_of("algorithm") {
        options.algorithm = algorithm.to_string();
    }
    if matches.is_present("approximation") {
        options.approximation = true;
    }
    if matches.is_present("edge_based") {
        options.edge_based = true;
    }
    if matches.is_present("max_visited") {
        options.max_visited_nodes = value_t!(matches, "max_visited", usize)?;
    }
    Ok(options)
}

fn optional_edge(matches: &ArgMatches, name: &str) -> Result<Option<u32>> {
    if matches.is_present(name) {
        Ok(Some(value_t!(matches, name, u32)?))
    } else {
        Ok(None)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = app().get_matches();
    let options = read_options(&matches)?;
    let from = value_t!(matches, "from", u32)?;
    let to = value_t!(matches, "to", u32)?;
    let max_speed = value_t!(matches, "max_speed", f64)?;

    let graph_path = matches.value_of("graph").unwrap_or_default();
    let LoadedGraph {
        graph,
        turn_costs,
        access,
    } = load_graph(graph_path)?;

    let base: Box<dyn Weighting> = match matches.value_of("weighting") {
        Some("shortest") => Box::new(ShortestWeighting::new()),
        _ => Box::new(FastestWeighting::new(max_speed)),
    };
    let weighting: Box<dyn Weighting> = if options.edge_based {
        Box::new(TurnWeighting::new(base, turn_costs))
    } else {
        base
    };

    let query_timer = Instant::now();
    let time = matches.value_of("departure").or_else(|| matches.value_of("arrival"));
    let summary = match time {
        Some(time) => {
            let at = DateTime::parse_from_rfc3339(time).with_context(|| format!("Invalid time {}", time))?;
            let weighting = TimeDependentAccessWeighting::new(weighting, access);
            let mut algo = TdDijkstra::new(&graph, weighting, options.traversal_mode())?;
            algo.set_max_visited_nodes(options.max_visited_nodes);
            if matches.is_present("arrival") {
                algo.reverse();
            }
            let outcome = algo.calc_path(from, to, at.timestamp_millis())?;
            QuerySummary::new(algo.name(), &outcome, algo.visited_nodes(), &graph)
        }
        None => {
            let factory = RoutingAlgorithmFactory::from_options(&options);
            let mut algo = factory.create_algo(&graph, weighting);
            let from_edge = optional_edge(&matches, "from_edge")?;
            let to_edge = optional_edge(&matches, "to_edge")?;
            let outcome = algo.calc_path_between_edges(from, to, from_edge, to_edge)?;
            QuerySummary::new(algo.name(), &outcome, algo.visited_nodes(), &graph)
        }
    };
    info!(
        "{} query {} -> {} took {:.3} ms",
        summary.algorithm,
        from,
        to,
        query_timer.elapsed().as_secs_f64() * 1000.0
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
