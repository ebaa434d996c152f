//! drivelens-analyze: classify a recorded OBD log

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use drivelens_replay::report::{format_head, format_summary};
use drivelens_replay::{
    analyze_recordings, load_config, read_log, write_analyzed, Mode, Preset, ReplayOptions,
};

#[derive(Parser, Debug)]
#[command(name = "drivelens-analyze")]
#[command(about = "Analyze an OBD CSV log for driving style, road type and traffic", long_about = None)]
struct Args {
    /// OBD log CSV files; each one is classified as a separate drive
    #[arg(value_name = "CSV", required = true, num_args = 1..)]
    csv_paths: Vec<PathBuf>,

    /// Save the analyzed rows of every input to this CSV file
    #[arg(long, value_name = "PATH")]
    output_csv: Option<PathBuf>,

    /// JSON classifier configuration (fields left out use the default
    /// preset); takes precedence over --preset
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Built-in threshold set
    #[arg(long, value_enum, env = "DRIVELENS_PRESET", default_value_t = Preset::Default)]
    preset: Preset,

    /// Classify the whole file at once or sample by sample
    #[arg(long, value_enum, default_value_t = Mode::Batch)]
    mode: Mode,

    /// Keep rows in file order instead of sorting by timestamp
    #[arg(long)]
    no_sort: bool,

    /// Rows to print when no output file is given
    #[arg(long, default_value_t = 20)]
    head: usize,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => {
            log::info!("using {} instead of the {:?} preset", path.display(), args.preset);
            load_config(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => args.preset.config(),
    };

    let options = ReplayOptions {
        sort_by_timestamp: !args.no_sort,
    };
    let mut recordings = Vec::with_capacity(args.csv_paths.len());
    for path in &args.csv_paths {
        let samples =
            read_log(path, &options).with_context(|| format!("reading {}", path.display()))?;
        log::info!("loaded {} samples from {}", samples.len(), path.display());
        recordings.push(samples);
    }
    if recordings.iter().all(Vec::is_empty) {
        println!("No data to process after loading.");
        return Ok(());
    }

    let analysis = analyze_recordings(&recordings, config, args.mode)?;
    println!("{}", format_summary(&analysis.distribution));

    match &args.output_csv {
        Some(path) => {
            write_analyzed(path, &analysis.samples)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Analyzed data saved to {}", path.display());
        }
        None => {
            println!("--- First {} Rows of Analyzed Data ---", args.head);
            print!("{}", format_head(&analysis.samples, args.head));
        }
    }

    Ok(())
}
