use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use credit_sim::config::Config;
use credit_sim::output::{self, OutputFormat};
use credit_sim::scenario;
use credit_sim::scoring::{self, Consumer, ScenarioInterpreter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_SCORING: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_NOT_IN_GOOD_STANDING: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a monthly scenario file (YAML or JSON)
    Score {
        /// Scenario file: declare_account and month actions
        file: PathBuf,

        /// Output format (defaults to the config file setting)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Score a flat list of pay_bill, awarded_credit and missed_payment events
    Simple {
        file: PathBuf,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Check whether a balance is in good standing
    Standing {
        #[arg(long, allow_negative_numbers = true)]
        balance: f64,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "credit-sim")]
#[command(about = "Credit score simulator for bill-paying scenarios", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/credit-sim/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);
    let verbose = cli.verbose;

    let exit_code = match cli.command {
        Commands::Init { force } => run_init(config_path, force, verbose),
        Commands::Score { file, format } => {
            let config = load_config_or_exit(config_path, verbose);
            let use_colors = output::should_use_colors(config.color);
            run_score(&file, format.unwrap_or(config.format), &config, use_colors, verbose)
        }
        Commands::Simple { file, format } => {
            let config = load_config_or_exit(config_path, verbose);
            let use_colors = output::should_use_colors(config.color);
            run_simple(&file, format.unwrap_or(config.format), use_colors, verbose)
        }
        Commands::Standing { balance, format } => {
            let config = load_config_or_exit(config_path, verbose);
            let use_colors = output::should_use_colors(config.color);
            let consumer = Consumer::new(balance);
            print_or_exit(output::format_standing(
                &consumer,
                format.unwrap_or(config.format),
                use_colors,
            ));
            if consumer.good_standing() {
                EXIT_SUCCESS
            } else {
                EXIT_NOT_IN_GOOD_STANDING
            }
        }
    };

    if verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(exit_code);
}

fn load_config_or_exit(config_path: Option<PathBuf>, verbose: bool) -> Config {
    let config = match credit_sim::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if verbose {
        eprintln!(
            "Config: format={:?}, color={:?}, show_breakdown={}",
            config.format, config.color, config.show_breakdown
        );
    }

    config
}

fn run_init(config_path: Option<PathBuf>, force: bool, verbose: bool) -> i32 {
    let path = match config_path {
        Some(p) => p,
        None => match credit_sim::config::get_config_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                return EXIT_CONFIG;
            }
        },
    };

    if path.exists() && !force {
        eprintln!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
        return EXIT_CONFIG;
    }

    if let Err(e) = credit_sim::config::save_config(&path, &Config::default()) {
        eprintln!("Config error: {:#}", e);
        return EXIT_CONFIG;
    }

    if verbose {
        eprintln!("Wrote default config");
    }
    println!("Config written to {}", path.display());
    EXIT_SUCCESS
}

fn run_score(
    file: &Path,
    format: OutputFormat,
    config: &Config,
    use_colors: bool,
    verbose: bool,
) -> i32 {
    let scenario = match scenario::load_scenario(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    if verbose {
        eprintln!(
            "Loaded scenario from {}: {} actions ({} account declarations, {} months)",
            file.display(),
            scenario.actions.len(),
            scenario.declared_account_count(),
            scenario.month_count()
        );
    }

    let mut interpreter = ScenarioInterpreter::new();
    if let Err(e) = interpreter.run(&scenario) {
        eprintln!("Scoring error: {}", e);
        return EXIT_SCORING;
    }

    if verbose {
        for warning in interpreter.warnings() {
            eprintln!("  warning: {}", warning);
        }
        eprintln!(
            "Scoring {} months against {} accounts",
            interpreter.month_names().len(),
            interpreter.registry().len()
        );
    }

    let report = match interpreter.score_report() {
        Ok(r) => r,
        Err(e) => {
            // No partial score on failure
            eprintln!("Scoring error: {}", e);
            return EXIT_SCORING;
        }
    };

    if verbose {
        for month in &report.months {
            eprintln!(
                "  {}: {} (paid {}, missed {})",
                month.name,
                output::format_score(month.contribution),
                month.paid.len(),
                month.missed.len()
            );
        }
    }

    match format {
        OutputFormat::Text => {
            println!(
                "{}",
                output::format_report(&report, config.show_breakdown, use_colors)
            );
        }
        OutputFormat::Json => print_or_exit(output::format_report_json(&report)),
    }

    EXIT_SUCCESS
}

fn run_simple(file: &Path, format: OutputFormat, use_colors: bool, verbose: bool) -> i32 {
    let events = match scenario::load_events(file) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    if verbose {
        eprintln!("Loaded {} events from {}", events.len(), file.display());
        for event in &events {
            eprintln!("  {:?}: {}", event, output::format_score(scoring::event_points(event)));
        }
    }

    let score = scoring::simple_score(&events);
    print_or_exit(output::format_simple(score, events.len(), format, use_colors));
    EXIT_SUCCESS
}

fn print_or_exit(rendered: anyhow::Result<String>) {
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}
