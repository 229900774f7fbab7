use clap::{Args, Parser, Subcommand};
use floorpath::{
    classify::{Fingerprint, FloorPredictor},
    config::NavConfig,
    error::{NavError, Result},
    fs::Queries,
    search::{Navigator, RouteGraph, RouteQuery, WeightPolicy, route_many},
    statistics::Stats,
    store::{BoundingBox, BuildingData, MemoryFingerprintStore, MemoryGraphStore},
};
use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Instant};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Indoor navigation: WiFi floor classification and POI routing
#[derive(Parser, Debug)]
#[command(name = "floorpath")]
#[command(about = "Floor classification and indoor routing over stored building data", long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict the floor of a WiFi scan
    Floor(FloorArgs),
    /// Shortest route between two POIs
    Route(RouteArgs),
    /// Run a batch of route queries on a worker pool
    Routes(RoutesArgs),
}

#[derive(Args, Debug)]
struct FloorArgs {
    /// Radio map file (JSON Lines, one located reading per line)
    #[arg(short, long)]
    radio_map: PathBuf,

    /// Client scan file ({"wifi": [...]})
    #[arg(short, long)]
    scan: PathBuf,

    /// Search region as min_lat,min_lon,max_lat,max_lon
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    bbox: Vec<f64>,

    /// Number of best matching scans that vote (overrides the config file)
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Number of strongest MACs used to query the radio map (overrides the config file)
    #[arg(long)]
    strongest_macs: Option<usize>,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Building file ({"pois": [...], "connections": [...]})
    #[arg(short, long)]
    building: PathBuf,

    /// Source POI id
    #[arg(long)]
    from: String,

    /// Target POI id
    #[arg(long)]
    to: String,

    /// What to do with unparsable weights: zero, skip or reject (overrides the config file)
    #[arg(short, long)]
    weight_policy: Option<WeightPolicy>,
}

#[derive(Args, Debug)]
struct RoutesArgs {
    /// Building file ({"pois": [...], "connections": [...]})
    #[arg(short, long)]
    building: PathBuf,

    /// Query file (JSON array of {"from": .., "to": ..})
    #[arg(short, long)]
    queries: PathBuf,

    /// Number of threads to use (comma-separated list, e.g., "1,2,4,8")
    #[arg(short, long, value_delimiter = ',', default_value = "1")]
    threads: Vec<usize>,

    /// What to do with unparsable weights: zero, skip or reject (overrides the config file)
    #[arg(short, long)]
    weight_policy: Option<WeightPolicy>,
}

const BUILDING: &str = "building";

fn load_config(path: Option<&PathBuf>) -> Result<NavConfig> {
    match path {
        Some(path) => NavConfig::load(path),
        None => Ok(NavConfig::default()),
    }
}

fn run_floor(mut config: NavConfig, args: FloorArgs) -> Result<()> {
    if let Some(top_k) = args.top_k {
        config.classifier.top_k = top_k;
    }
    if let Some(strongest_macs) = args.strongest_macs {
        config.classifier.strongest_macs = strongest_macs;
    }

    let [min_lat, min_lon, max_lat, max_lon] = args.bbox[..] else {
        return Err(NavError::InvalidConfig(
            "bbox needs exactly four values".to_string(),
        ));
    };
    let bbox = BoundingBox::new(min_lat, min_lon, max_lat, max_lon);

    let store = MemoryFingerprintStore::load_from_jsonl(&args.radio_map)?;
    let fingerprint = Fingerprint::load_from_json(&args.scan)?;
    let mut stats = Stats::new();
    let classification =
        FloorPredictor::new(config.classifier)?.predict(&store, &fingerprint, &bbox, &mut stats)?;

    println!("floor: {}", classification.floor);
    println!("confident: {}", classification.confident);
    println!(
        "buckets scored: {}, readings examined: {}",
        stats.get_buckets_scored(),
        stats.get_readings_examined()
    );
    for (floor, count) in &classification.votes {
        println!("  {floor}: {count} votes");
    }
    Ok(())
}

fn run_route(config: NavConfig, args: RouteArgs) -> Result<()> {
    let policy = args.weight_policy.unwrap_or(config.router.weight_policy);
    let mut store = MemoryGraphStore::new();
    store.insert(BUILDING, BuildingData::load_from_json(&args.building)?);

    let route = Navigator::new(store, policy).route(BUILDING, &args.from, &args.to)?;
    if route.is_empty() {
        println!("no route from {} to {}", args.from, args.to);
    } else {
        println!("{}", serde_json::to_string_pretty(&route)?);
    }
    Ok(())
}

fn run_routes(config: NavConfig, args: RoutesArgs) -> Result<()> {
    let policy = args.weight_policy.unwrap_or(config.router.weight_policy);
    let building = BuildingData::load_from_json(&args.building)?;
    let graph = Arc::new(RouteGraph::build(
        &building.pois,
        &building.connections,
        policy,
    )?);
    let queries = Arc::new(Vec::<RouteQuery>::load_from_json(&args.queries)?);
    let num_queries = queries.len();

    println!(
        "Route graph loaded with {} vertices, {} queries",
        graph.len(),
        num_queries
    );

    for &num_threads in &args.threads {
        println!("\n==========");
        println!("Running with threads={num_threads}");
        println!("==========");

        let start_time = Instant::now();
        let (routes, stats) = route_many(Arc::clone(&graph), Arc::clone(&queries), num_threads);
        let elapsed = start_time.elapsed();

        let found = routes.iter().filter(|r| !r.is_empty()).count();
        let total_distance: f64 = routes.iter().filter_map(|r| r.total()).sum();
        let per_search = |count: usize| count as f64 / num_queries.max(1) as f64;
        println!(
            "Avg per search: {:.2} vertices settled, {:.2} edges relaxed",
            per_search(stats.get_vertices_settled()),
            per_search(stats.get_edges_relaxed())
        );
        println!("Routes found: {found}/{num_queries}, checksum: {total_distance:.3}");
        println!(
            "Completed {} searches in {:.2}s ({:.2} QPS)",
            num_queries,
            elapsed.as_secs_f64(),
            num_queries as f64 / elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Command::Floor(args) => run_floor(config, args),
        Command::Route(args) => run_route(config, args),
        Command::Routes(args) => run_routes(config, args),
    });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
