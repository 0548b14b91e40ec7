//! LIFEBOARD - CLI Entry Point
//!
//! Serve the board API or work with snapshot files locally.

use clap::{Parser, Subcommand};
use lifeboard::snapshot::BoardSnapshot;
use lifeboard::{benchmark, engine, patterns, Config, Grid};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lifeboard")]
#[command(version)]
#[command(about = "Conway's Game of Life boards with fixed-point and cycle detection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API
    Serve {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Override the bind address from the config
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Create a snapshot from a pattern, a plaintext file or a random fill
    New {
        /// Built-in pattern name
        #[arg(short, long, conflicts_with_all = ["file", "random"])]
        pattern: Option<String>,

        /// Plaintext pattern file (`O` alive, `.` dead, `!` comments)
        #[arg(short, long, conflicts_with = "random")]
        file: Option<PathBuf>,

        /// Fill at random instead of using a pattern
        #[arg(short, long)]
        random: bool,

        #[arg(long, default_value = "32")]
        width: usize,

        #[arg(long, default_value = "32")]
        height: usize,

        /// Live probability for random fills
        #[arg(long, default_value = "0.3")]
        density: f64,

        /// Random seed for reproducibility
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output snapshot
        #[arg(short, long, default_value = "board.bin")]
        output: PathBuf,
    },

    /// Advance a snapshot by a number of generations
    Run {
        /// Snapshot to start from
        input: PathBuf,

        /// Number of generations
        #[arg(short, long, default_value = "1")]
        steps: u32,

        /// Where to write the result (defaults to printing only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet mode (no board rendering)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Search a snapshot for its fixed point or cycle
    Final {
        /// Snapshot to start from
        input: PathBuf,

        /// Iteration cap (defaults to the config value)
        #[arg(short, long)]
        max_iterations: Option<u32>,

        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        quiet: bool,
    },

    /// Print a snapshot
    Inspect {
        /// Snapshot file
        input: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "200")]
        generations: u32,

        /// Board side length
        #[arg(short, long, default_value = "256")]
        size: usize,

        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, bind } => serve(config, bind),

        Commands::New {
            pattern,
            file,
            random,
            width,
            height,
            density,
            seed,
            output,
        } => {
            init_logging("info");
            new_board(pattern, file, random, width, height, density, seed, output)
        }

        Commands::Run {
            input,
            steps,
            output,
            quiet,
        } => {
            init_logging("info");
            run_steps(input, steps, output, quiet)
        }

        Commands::Final {
            input,
            max_iterations,
            config,
            output,
            quiet,
        } => {
            let config = load_config(&config)?;
            init_logging(&config.logging.log_level);
            let cap = max_iterations.unwrap_or(config.engine.max_iterations);
            run_final(input, cap, output, quiet)
        }

        Commands::Inspect { input } => {
            init_logging("info");
            inspect(input)
        }

        Commands::Benchmark {
            generations,
            size,
            seed,
        } => {
            init_logging("info");
            run_benchmark(generations, size, seed)
        }

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }
    }
}

/// `RUST_LOG` wins over the configured level
fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        Config::from_file(path)
    } else {
        Ok(Config::default())
    }
}

fn serve(config_path: PathBuf, bind: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&config_path)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    config.validate()?;

    init_logging(&config.logging.log_level);
    if config_path.exists() {
        log::info!("Loaded config from {:?}", config_path);
    } else {
        log::info!("Using default configuration");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(lifeboard::web::run_server(config))
}

#[allow(clippy::too_many_arguments)]
fn new_board(
    pattern: Option<String>,
    file: Option<PathBuf>,
    random: bool,
    width: usize,
    height: usize,
    density: f64,
    seed: u64,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let grid = if let Some(path) = file {
        let text = std::fs::read_to_string(&path)?;
        Grid::parse_plaintext(&text)?
    } else if random {
        if width == 0 || height == 0 {
            return Err("width and height must be > 0".into());
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(format!("density must be between 0 and 1, got {}", density).into());
        }
        patterns::random(width, height, density, seed)
    } else {
        let name = pattern.as_deref().unwrap_or("glider");
        let pattern = patterns::find(name).ok_or_else(|| {
            format!("unknown pattern '{}', expected one of: {}", name, patterns::names().join(", "))
        })?;
        if width == 0 || height == 0 {
            return Err("width and height must be > 0".into());
        }
        pattern.place(width, height)
    };

    let snapshot = BoardSnapshot::new(&grid, 0, false);
    snapshot.save(&output)?;
    log::info!(
        "Wrote {}x{} board with {} live cells to {:?}",
        grid.width(),
        grid.height(),
        grid.live_count(),
        output
    );
    Ok(())
}

fn run_steps(
    input: PathBuf,
    steps: u32,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = BoardSnapshot::load(&input)?;
    let result = if snapshot.is_final {
        log::info!("Board is already final, not advancing");
        lifeboard::SimulationResult {
            grid: snapshot.grid()?,
            generation: snapshot.generation,
            is_final: true,
        }
    } else {
        let start = Instant::now();
        let result = engine::advance(&snapshot.grid()?, snapshot.generation, steps);
        log::info!(
            "Advanced {} generations in {:.3}s",
            result.generation - snapshot.generation,
            start.elapsed().as_secs_f64()
        );
        result
    };

    report(&result, quiet);
    if let Some(path) = output {
        BoardSnapshot::from_result(&result).save(&path)?;
        println!("Saved: {:?}", path);
    }
    Ok(())
}

fn run_final(
    input: PathBuf,
    max_iterations: u32,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = BoardSnapshot::load(&input)?;
    let result = if snapshot.is_final {
        log::info!("Board is already final");
        lifeboard::SimulationResult {
            grid: snapshot.grid()?,
            generation: snapshot.generation,
            is_final: true,
        }
    } else {
        let start = Instant::now();
        let result = engine::find_final_state(&snapshot.grid()?, snapshot.generation, max_iterations)?;
        log::info!("Search finished in {:.3}s", start.elapsed().as_secs_f64());
        result
    };

    report(&result, quiet);
    if let Some(path) = output {
        BoardSnapshot::from_result(&result).save(&path)?;
        println!("Saved: {:?}", path);
    }
    Ok(())
}

fn report(result: &lifeboard::SimulationResult, quiet: bool) {
    println!("Generation: {}", result.generation);
    println!("Final: {}", result.is_final);
    println!("Live cells: {}", result.grid.live_count());
    if !quiet {
        println!();
        print!("{}", result.grid);
    }
}

fn inspect(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Snapshot ===");
    println!("File: {:?}", input);

    let snapshot = BoardSnapshot::load(&input)?;
    let grid = snapshot.grid()?;

    println!("Size: {}x{}", snapshot.width, snapshot.height);
    println!("Generation: {}", snapshot.generation);
    println!("Final: {}", snapshot.is_final);
    println!("Live cells: {}", grid.live_count());
    println!("Snapshot size: {} bytes", snapshot.size_bytes());
    println!();
    print!("{}", grid);

    Ok(())
}

fn run_benchmark(generations: u32, size: usize, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== LIFEBOARD Benchmark ===");
    println!("Generations: {}", generations);
    println!("Board: {}x{}", size, size);
    println!();

    let result = benchmark(generations, size, seed);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
