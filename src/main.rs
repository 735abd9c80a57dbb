use clap::{Parser, Subcommand};
use hw_index::config::{self, SiteConfig};
use hw_index::inject::Injector;
use hw_index::output::{self, InjectMode};
use hw_index::{generate, pipeline, scan};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "hw-index")]
#[command(about = "Static index generator for homework folders")]
#[command(long_about = "\
Static index generator for homework folders

Every page in the homework folder gets a navigation bar (back to the index,
download as HTML), and an index page lists all pages in homework/question
order.

Layout:

  hw-index.toml                 # Optional config (see gen-config)
  index.html                    # Generated, rewritten on every build
  hw/
  ├── hw1_question1.html        # → \"Homework 1 - Question 1\"
  ├── hw1_question2.html        # → \"Homework 1 - Question 2\"
  └── hw2_question1.html        # → \"Homework 2 - Question 1\"

Pages that already carry the navigation bar are left alone, so builds can be
repeated safely.

Run 'hw-index gen-config' to print a documented hw-index.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./hw-index.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Homework folder, overrides `source_dir`
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory, overrides `output_dir`
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log per-page details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scan → inject → generate
    Build,
    /// List the pages that would appear in the index
    Scan {
        /// Print entries as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Add the navigation bar to every page, without writing the index
    Inject,
    /// Validate pages without writing anything
    Check,
    /// Print a stock hw-index.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Build => {
            println!("==> Building {}", config.source_dir.display());
            let report = pipeline::build(&config, generate::build_time_now())?;
            if let Some(injection) = &report.injection {
                output::print_inject_report(injection, InjectMode::Apply);
            }
            output::print_build_summary(&report, &config.mirror_dir());
            println!("==> Build complete");
        }
        Command::Scan { json } => {
            let files = scan::scan(&config)?;
            let entries = generate::order_entries(&files, &config.link_prefix);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                output::print_scan_output(&entries, &config.source_dir);
            }
        }
        Command::Inject => {
            let files = scan::scan(&config)?;
            let report = Injector::new(&config).inject_all(&config.source_dir, &files);
            output::print_inject_report(&report, InjectMode::Apply);
        }
        Command::Check => {
            println!("==> Checking {}", config.source_dir.display());
            let files = scan::scan(&config)?;
            let report = Injector::new(&config).check_all(&config.source_dir, &files);
            output::print_inject_report(&report, InjectMode::DryRun);
            if report.failed() > 0 {
                return Err(format!("{} page(s) cannot be injected", report.failed()).into());
            }
            println!("==> Pages are valid");
        }
        // Printed before config loading
        Command::GenConfig => {}
    }

    Ok(())
}

/// Layer CLI flags over the config file and validate the result.
fn resolve_config(cli: &Cli) -> Result<SiteConfig, config::ConfigError> {
    let mut overrides = toml::Table::new();
    if let Some(source) = &cli.source {
        overrides.insert("source_dir".into(), path_value(source));
    }
    if let Some(output) = &cli.output {
        overrides.insert("output_dir".into(), path_value(output));
    }
    match &cli.config {
        Some(path) => config::load_layered(path, true, overrides),
        None => config::load_layered(Path::new(config::CONFIG_FILE_NAME), false, overrides),
    }
}

fn path_value(path: &Path) -> toml::Value {
    toml::Value::String(path.to_string_lossy().into_owned())
}

/// Diagnostics go to stderr so stdout stays clean for `scan --json`.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
