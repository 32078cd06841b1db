use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use house_score::calculator::{parse_amount, parse_multiplier, Calculator};
use house_score::config::{Config, DEFAULT_ANIMATION};
use house_score::scoring::{Catalog, ScoringEngine};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Per-round points table
    Table,
    /// Per-round rows: round, house, color, points
    Tsv,
    /// Every round report as JSON
    Json,
    /// Final board: each house with its items, cards and points
    Summary,
    /// Final board: itemized score of each house
    Breakdown,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive scoreboard (default if no subcommand)
    Board,
    /// Standalone calculator: (base + bonuses) x multiplier
    Calc {
        /// Base points
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        base: String,
        /// Bonus value as NAME=N (repeatable), e.g. --bonus grinch=17
        #[arg(long = "bonus", value_name = "NAME=N")]
        bonuses: Vec<String>,
        /// Multiplier (0 or unparsable means 1)
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        multiplier: String,
    },
    /// Apply a YAML script of board actions and print the scored rounds or the final board
    Replay {
        /// Path to the script
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Load and validate the config
    Check,
}

#[derive(Parser, Debug)]
#[command(name = "house-score")]
#[command(about = "Scoreboard for a house-decorating board game", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/house-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Board);
    let config_path = cli.config.map(PathBuf::from);

    // Init runs before loading so a broken config can be replaced
    if let Commands::Init { force } = command {
        match house_score::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Wrote default config to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let config = match house_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = house_score::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        let board = config.board();
        eprintln!(
            "Board: {} colors, {} item types, {} cards, {} houses",
            board.colors.len(),
            board.items.len(),
            board.cards.len(),
            board.houses.len()
        );
    }

    let code = match command {
        Commands::Init { .. } => EXIT_SUCCESS,
        Commands::Check => {
            println!("Config OK");
            EXIT_SUCCESS
        }
        Commands::Calc {
            base,
            bonuses,
            multiplier,
        } => run_calc(&config, &base, &bonuses, &multiplier),
        Commands::Replay { file, format } => run_replay(&config, &file, format, cli.verbose),
        Commands::Board => run_board(&config, cli.verbose).await,
    };

    std::process::exit(code);
}

fn build_engine(config: &Config) -> Result<ScoringEngine, i32> {
    match Catalog::from_config(&config.board()) {
        Ok(catalog) => Ok(ScoringEngine::new(catalog)),
        Err(errors) => {
            eprintln!("Board config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            Err(EXIT_CONFIG)
        }
    }
}

fn run_calc(config: &Config, base: &str, bonuses: &[String], multiplier: &str) -> i32 {
    let mut calc = Calculator::new(&config.calculator());
    calc.base = parse_amount(base);
    calc.multiplier = parse_multiplier(multiplier);

    for arg in bonuses {
        let Some((name, value)) = arg.split_once('=') else {
            eprintln!("Invalid --bonus '{}': expected NAME=N", arg);
            return EXIT_INPUT;
        };
        if !calc.set_bonus(name, parse_amount(value)) {
            let known: Vec<&str> = calc.bonuses.iter().map(|b| b.label.as_str()).collect();
            eprintln!("Unknown bonus '{}'. Known bonuses: {}", name, known.join(", "));
            return EXIT_INPUT;
        }
    }

    let use_colors = house_score::output::should_use_colors();
    println!("{}", house_score::output::format_calculator(&calc, use_colors));
    EXIT_SUCCESS
}

fn run_replay(config: &Config, file: &Path, format: Format, verbose: bool) -> i32 {
    let actions = match house_score::replay::load_script(file) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return EXIT_INPUT;
        }
    };
    let mut engine = match build_engine(config) {
        Ok(engine) => engine,
        Err(code) => return code,
    };

    let start_time = Instant::now();
    if verbose {
        eprintln!("Replaying {} actions from {}", actions.len(), file.display());
    }
    let reports = house_score::replay::run_script(&mut engine, &actions, verbose);
    if verbose {
        eprintln!(
            "Scored {} rounds in {:?}",
            reports.len(),
            start_time.elapsed()
        );
    }

    match format {
        Format::Table => {
            let use_colors = house_score::output::should_use_colors();
            let tables: Vec<String> = reports
                .iter()
                .map(|r| house_score::output::format_round_table(r, use_colors))
                .collect();
            if tables.is_empty() {
                println!("No rounds scored.");
            } else {
                println!("{}", tables.join("\n\n"));
            }
        }
        Format::Tsv => {
            for report in &reports {
                println!("{}", house_score::output::format_round_tsv(report));
            }
        }
        Format::Json => match house_score::output::format_rounds_json(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return EXIT_RUNTIME;
            }
        },
        Format::Summary => {
            let use_colors = house_score::output::should_use_colors();
            println!("{}", house_score::output::format_board_summary(&engine, use_colors));
        }
        Format::Breakdown => {
            let use_colors = house_score::output::should_use_colors();
            println!("{}", house_score::output::format_board_breakdown(&engine, use_colors));
        }
    }
    EXIT_SUCCESS
}

async fn run_board(config: &Config, verbose: bool) -> i32 {
    let engine = match build_engine(config) {
        Ok(engine) => engine,
        Err(code) => return code,
    };

    // Already validated; keep the default if it somehow fails to parse
    let animation = config.animation_duration().unwrap_or_else(|_| {
        humantime::parse_duration(DEFAULT_ANIMATION).unwrap_or_default()
    });
    let theme = house_score::tui::resolve_theme(config.theme);
    if verbose {
        eprintln!("Theme: {:?}, animation: {:?}", theme, animation);
    }

    let app = house_score::tui::App::new(
        engine,
        &config.calculator(),
        animation,
        theme.colors(),
        verbose,
    );

    match house_score::tui::run_tui(app).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("TUI error: {:#}", e);
            EXIT_RUNTIME
        }
    }
}
