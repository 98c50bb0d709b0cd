use clap::{Parser, Subcommand, ValueEnum};
use flowscribe::output::text_to_mermaid;
use flowscribe::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Turns detected diagram graphs into algorithm steps and scores them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract steps from one or more detector JSON files
    Parse {
        /// Detector output files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Optional pipeline configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Also write the bpmn steps as evaluator input to this path
        #[arg(long)]
        predictions: Option<PathBuf>,

        /// Understand BPMN shape classes such as StartEvent and ExclusiveGateway
        #[arg(long)]
        bpmn: bool,
    },
    /// Score a predictions file against a ground-truth text file
    Evaluate {
        predictions: PathBuf,
        ground_truth: PathBuf,

        /// Optional pipeline configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render "->"-separated step text as a Mermaid flowchart
    Render { text: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse {
            files,
            config,
            format,
            predictions,
            bpmn,
        } => run_parse(&files, config.as_deref(), format, predictions.as_deref(), bpmn),
        Command::Evaluate {
            predictions,
            ground_truth,
            config,
        } => run_evaluate(&predictions, &ground_truth, config.as_deref()),
        Command::Render { text } => println!("{}", text_to_mermaid(&text)),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> PipelineConfig {
    let config = match path {
        Some(path) => PipelineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => PipelineConfig::default(),
    };
    let config = config
        .with_env_overrides()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid environment override: {}", e)));
    if let Err(e) = config.validate() {
        exit_with_error(&format!("Invalid configuration: {}", e));
    }
    config
}

fn run_parse(
    files: &[PathBuf],
    config_path: Option<&Path>,
    format: OutputFormat,
    predictions_path: Option<&Path>,
    bpmn: bool,
) {
    let mut pipeline = Pipeline::new(load_config(config_path));
    if bpmn {
        pipeline = pipeline.with_bpmn_kinds();
    }

    let load_start = Instant::now();
    let inputs: Vec<(String, String)> = files
        .iter()
        .map(|path| {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
            });
            (file_name(path), json)
        })
        .collect();
    tracing::debug!(files = inputs.len(), elapsed = ?load_start.elapsed(), "Loaded inputs");

    let items = pipeline.process_many(&inputs);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&items)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize reports: {}", e)));
            println!("{}", json);
        }
        OutputFormat::Text => {
            for item in &items {
                println!("### {}", item.file().unwrap_or("<unnamed>"));
                match item {
                    BatchItem::Parsed(report) => print!("{}", report.algorithm_text),
                    BatchItem::Failed { error, .. } => println!("error: {}", error),
                }
                println!();
            }
        }
    }

    if let Some(path) = predictions_path {
        let predictions = predictions_from_reports(&items);
        let json = serde_json::to_string_pretty(&predictions)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize predictions: {}", e)));
        fs::write(path, json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
        });
    }

    let failed = items
        .iter()
        .filter(|item| matches!(item, BatchItem::Failed { .. }))
        .count();
    if failed > 0 {
        eprintln!("{} of {} file(s) could not be parsed", failed, items.len());
    }
}

fn run_evaluate(predictions_path: &Path, ground_truth_path: &Path, config_path: Option<&Path>) {
    let config = load_config(config_path);

    let predictions = flowscribe::evaluation::load_predictions(predictions_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load predictions: {}", e)));
    let ground_truth = GroundTruth::from_file(ground_truth_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load ground truth: {}", e)));

    let report = Evaluator::new(config.evaluation).evaluate(&predictions, &ground_truth);
    let json = serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize report: {}", e)));
    println!("{}", json);
}

/// Ground-truth sections are keyed by bare file name, so predictions are too.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
