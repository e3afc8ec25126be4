use std::path::Path;

use clap::{Parser, Subcommand};
use jigsnap_core::{format_edge_grid, generate_edge_grid, PuzzleRules};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

mod bot;

#[derive(Parser)]
#[command(name = "jigsnap", version, about = "Cut and solve jigsaw puzzles from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a generated edge grid, one line per row, sides as top/right/bottom/left.
    Edges {
        #[arg(long, default_value_t = 3)]
        rows: usize,
        #[arg(long, default_value_t = 3)]
        cols: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Cut a puzzle from an image and let the bot assemble it.
    Solve(bot::SolveArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("JIGSNAP_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Edges { rows, cols, seed } => {
            let mut rng = rng_from_seed(seed);
            let grid = generate_edge_grid(rows, cols, &mut rng)?;
            print!("{}", format_edge_grid(&grid));
        }
        Commands::Solve(args) => {
            let report = bot::run(args)?;
            println!("pieces: {}", report.pieces);
            println!("moves: {}", report.moves);
            println!("groups: {}", report.groups);
            println!("solved: {}", report.solved);
        }
    }
    Ok(())
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn load_rules(path: Option<&Path>) -> Result<PuzzleRules, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(PuzzleRules::default());
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|err| err_msg(format!("failed to read {}: {err}", path.display())))?;
    Ok(PuzzleRules::from_toml_str(&contents)?)
}

fn image_dimensions(path: &Path) -> Result<(u32, u32), Box<dyn std::error::Error>> {
    let size = imagesize::size(path)
        .map_err(|err| err_msg(format!("failed to read {}: {err}", path.display())))?;
    let width = u32::try_from(size.width)?;
    let height = u32::try_from(size.height)?;
    Ok((width, height))
}

fn err_msg(message: impl Into<String>) -> Box<dyn std::error::Error> {
    message.into().into()
}
