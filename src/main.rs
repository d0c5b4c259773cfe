use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use connect_four_minimax::ai::{MinimaxAgent, TerminalScoring, WindowHeuristic};
use connect_four_minimax::arena::{self, AgentKind};
use connect_four_minimax::config::AppConfig;
use connect_four_minimax::game::{GameState, Player};

/// Connect Four with a minimax opponent.
#[derive(Parser)]
#[command(name = "c4", about = "Connect Four minimax engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "c4.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a headless match between two agents
    Match(MatchArgs),
    /// Pick a move for a position
    BestMove(BestMoveArgs),
    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(Args)]
struct MatchArgs {
    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Agent playing Red (moves first)
    #[arg(long, value_enum)]
    red: Option<AgentKind>,

    /// Agent playing Yellow
    #[arg(long, value_enum)]
    yellow: Option<AgentKind>,

    /// Seed for random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct BestMoveArgs {
    /// Moves played so far as 0-based column digits, e.g. "3342"
    #[arg(long, default_value = "")]
    moves: String,

    /// Side to search for; defaults to the player to move
    #[arg(long)]
    player: Option<Player>,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Score won positions by win distance instead of the heuristic
    #[arg(long)]
    win_aware: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Match(args) => run_match(&mut config, args),
        Command::BestMove(args) => best_move(&mut config, args),
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml()?);
            Ok(())
        }
    }
}

fn run_match(config: &mut AppConfig, args: MatchArgs) -> Result<()> {
    // Apply CLI overrides
    if let Some(games) = args.games {
        config.arena.games = games;
    }
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }
    if let Some(red) = args.red {
        config.arena.red = red;
    }
    if let Some(yellow) = args.yellow {
        config.arena.yellow = yellow;
    }
    if args.seed.is_some() {
        config.arena.seed = args.seed;
    }
    config.validate().context("invalid settings")?;

    tracing::info!(
        games = config.arena.games,
        depth = config.search.depth,
        red = config.arena.red.label(),
        yellow = config.arena.yellow.label(),
        "starting match"
    );
    let summary = arena::run_match(&config.arena, config.search, config.weights)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Red ({}) vs Yellow ({})", summary.red, summary.yellow);
        println!("  games:        {}", summary.games);
        println!(
            "  red wins:     {} ({:.1}%)",
            summary.red_wins,
            summary.red_win_rate() * 100.0
        );
        println!(
            "  yellow wins:  {} ({:.1}%)",
            summary.yellow_wins,
            summary.yellow_win_rate() * 100.0
        );
        println!(
            "  draws:        {} ({:.1}%)",
            summary.draws,
            summary.draw_rate() * 100.0
        );
        println!("  avg length:   {:.1} moves", summary.average_length());
    }
    Ok(())
}

fn best_move(config: &mut AppConfig, args: BestMoveArgs) -> Result<()> {
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }
    if args.win_aware {
        config.search.terminal_scoring = TerminalScoring::WinAware;
    }
    config.validate().context("invalid settings")?;

    let columns = parse_moves(&args.moves)?;
    let state = GameState::from_moves(&columns)
        .with_context(|| format!("cannot replay moves '{}'", args.moves))?;
    if state.is_terminal() {
        bail!("game is already over: {:?}", state.outcome());
    }
    let player = args.player.unwrap_or(state.current_player());

    let agent = MinimaxAgent::with_heuristic(
        config.search,
        Box::new(WindowHeuristic::new(config.weights)),
    );
    let report = agent.analyze(state.board(), player);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", state.board());
    println!();
    for (col, score) in report.scores.iter().enumerate() {
        match score {
            Some(score) => println!("  column {col}: {score}"),
            None => println!("  column {col}: full"),
        }
    }
    match report.column {
        Some(col) => println!("{} plays column {col} ({} nodes)", player.name(), report.nodes),
        None => println!("no legal move"),
    }
    Ok(())
}

/// Parse a move list such as "3342" or "3,3,4,2" into columns.
fn parse_moves(moves: &str) -> Result<Vec<usize>> {
    moves
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as usize)
                .with_context(|| format!("invalid column '{c}' in move list"))
        })
        .collect()
}
