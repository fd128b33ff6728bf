use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadnet_cli::commands::route::{
    handle_route_command, RouteCommandArgs, DEFAULT_GOAL, DEFAULT_START,
};
use roadnet_cli::commands::stats::handle_stats_command;
use roadnet_cli::commands::load_engine;
use roadnet_cli::output::OutputFormat;
use roadnet_lib::{GraphBuildOptions, NodeId, RouteAlgorithm};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road network routing utilities")]
struct Cli {
    /// Directory containing edges.csv and heuristic.csv. Falls back to
    /// ROADNET_DATA_DIR, then the platform data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Reject edge files that are not grouped by start node.
    #[arg(long, global = true)]
    strict_grouping: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Breadth-first search (fewest road segments).
    Bfs(RouteArgs),
    /// Uniform-cost search (shortest distance).
    Ucs(RouteArgs),
    /// A* search toward one of the heuristic destinations.
    #[command(name = "astar", alias = "a-star")]
    AStar(RouteArgs),
    /// Report the size of the loaded network.
    Stats,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Starting node id.
    #[arg(long = "from", default_value_t = DEFAULT_START)]
    from: NodeId,
    /// Destination node id.
    #[arg(long = "to", default_value_t = DEFAULT_GOAL)]
    to: NodeId,
    /// Abort the search after this many node expansions.
    #[arg(long)]
    max_expansions: Option<usize>,
}

impl RouteArgs {
    fn into_command_args(self, algorithm: RouteAlgorithm) -> RouteCommandArgs {
        RouteCommandArgs {
            from: self.from,
            to: self.to,
            algorithm,
            max_expansions: self.max_expansions,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = GraphBuildOptions {
        require_grouped: cli.strict_grouping,
    };
    let engine = load_engine(cli.data_dir.as_deref(), &options)?;
    let mut stdout = io::stdout().lock();

    let (route, algorithm) = match cli.command {
        Command::Stats => return handle_stats_command(&engine, cli.format, &mut stdout),
        Command::Bfs(route) => (route, RouteAlgorithm::Bfs),
        Command::Ucs(route) => (route, RouteAlgorithm::Ucs),
        Command::AStar(route) => (route, RouteAlgorithm::AStar),
    };
    let args = route.into_command_args(algorithm);
    handle_route_command(&engine, &args, cli.format, &mut stdout)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
