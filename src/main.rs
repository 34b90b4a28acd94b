use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};

use prodscore::input::synthetic::generate_demo_table;
use prodscore::input::{load_json, load_score_table};
use prodscore::model::config::{AnalysisConfig, CenterMode, ThresholdMode};
use prodscore::pipeline::stage6_reweight::{GradientMap, update_weights_with};
use prodscore::pipeline::stage7_report::{
    RunError, build_report_context, run_analysis, write_reports,
};
use prodscore::report::{ReliabilityBand, format_f64_1, format_f64_3};
use prodscore::{OptimizerState, WeightVector};

#[derive(Debug, Parser)]
#[command(name = "prodscore", version, about = "Composite productivity scoring and monitoring")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a table, detect anomalies, estimate reliability and write reports.
    Run(RunArgs),
    /// Apply one Adam step to the weights from externally supplied gradients.
    Reweight(ReweightArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// JSON score table (entity x time step matrices per component).
    #[arg(long, required_unless_present = "demo", conflicts_with = "demo")]
    input: Option<PathBuf>,
    /// Use the seeded demo generator instead of an input file.
    #[arg(long)]
    demo: bool,
    #[arg(long, default_value_t = 100)]
    entities: usize,
    #[arg(long, default_value_t = 7)]
    days: usize,
    #[arg(long)]
    out: PathBuf,
    /// JSON analysis profile; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON weight vector.
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Mean/std normalization instead of median/IQR.
    #[arg(long)]
    classical: bool,
    /// Fixed CUSUM threshold around the mean.
    #[arg(long)]
    static_threshold: bool,
    #[arg(long)]
    n_bootstrap: Option<usize>,
    #[arg(long)]
    alpha: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct ReweightArgs {
    /// JSON object mapping each component to its gradient.
    #[arg(long)]
    gradients: PathBuf,
    /// Adam step number, starting at 1. Defaults to the state's next step.
    #[arg(long)]
    iteration: Option<u32>,
    /// JSON analysis profile supplying Adam hyperparameters and base weights.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON weight vector; overrides the profile's weights.
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Optimizer state from a previous step; cold start when omitted.
    #[arg(long)]
    state: Option<PathBuf>,
    /// Output JSON with the updated weights and optimizer state.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Serialize)]
struct ReweightOutput {
    weights: WeightVector,
    state: OptimizerState,
}

fn main() {
    let cli = Cli::parse();
    prodscore::tracing::init_tracing(cli.verbose);
    let result = match cli.command {
        Command::Run(args) => run(&args),
        Command::Reweight(args) => reweight(&args),
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), RunError> {
    let config = resolve_config(args)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let (table, input_source) = match &args.input {
        Some(path) => (load_score_table(path)?, path.display().to_string()),
        None => (
            generate_demo_table(args.entities, args.days, &mut rng)?,
            "demo".to_string(),
        ),
    };

    let output = run_analysis(&table, &config, &mut rng)?;
    let ctx = build_report_context(&output, &table, &config, &input_source);
    write_reports(&output, &table, &ctx, &args.out)?;

    println!("Reports written to {}", args.out.display());
    println!("Cronbach's alpha: {}", format_f64_3(output.cronbach_alpha));
    println!(
        "Interpretation: {}",
        ReliabilityBand::from_alpha(output.cronbach_alpha).label()
    );
    println!("Mean score: {}", format_f64_1(output.statistics.mean));
    println!(
        "Confidence interval: [{}, {}]",
        format_f64_1(output.confidence_interval.lower),
        format_f64_1(output.confidence_interval.upper)
    );
    println!("Anomalies detected: {}", output.anomalies.indices.len());
    Ok(())
}

fn resolve_config(args: &RunArgs) -> Result<AnalysisConfig, RunError> {
    let mut config = match &args.config {
        Some(path) => load_json::<AnalysisConfig>(path)?,
        None => AnalysisConfig::default_v1(),
    };
    if let Some(path) = &args.weights {
        config.weights = load_weights(path)?;
    }
    if args.classical {
        config.center_mode = CenterMode::Classical;
    }
    if args.static_threshold {
        config.threshold_mode = ThresholdMode::Static;
    }
    if let Some(n) = args.n_bootstrap {
        config.bootstrap.n_bootstrap = n;
    }
    if let Some(alpha) = args.alpha {
        config.bootstrap.alpha = alpha;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    info!(?config, "analysis profile");
    Ok(config)
}

fn load_weights(path: &Path) -> Result<WeightVector, RunError> {
    let weights: WeightVector = load_json(path)?;
    weights.validate()?;
    if (weights.sum() - 1.0).abs() > 1e-6 {
        warn!(
            sum = weights.sum(),
            path = %path.display(),
            "weights do not sum to 1; composite scores leave the 0-100 range"
        );
    }
    Ok(weights)
}

fn reweight(args: &ReweightArgs) -> Result<(), RunError> {
    let gradients: GradientMap = load_json(&args.gradients)?;
    let config = reweight_profile(args)?;
    let weights = match &args.weights {
        Some(path) => load_weights(path)?,
        None => config.weights,
    };
    let state = match &args.state {
        Some(path) => Some(load_json::<OptimizerState>(path)?),
        None => None,
    };
    let iteration = args
        .iteration
        .unwrap_or_else(|| state.map_or(1, |s| s.next_iteration()));

    let (weights, state) =
        update_weights_with(&weights, &gradients, iteration, state.as_ref(), &config.adam)?;

    let json = serde_json::to_string_pretty(&ReweightOutput { weights, state })?;
    fs::write(&args.out, json)?;

    println!(
        "Updated weights (iteration {iteration}): effort={}, duration={}, quality={}, goal={}",
        format_f64_3(weights.effort),
        format_f64_3(weights.duration),
        format_f64_3(weights.quality),
        format_f64_3(weights.goal)
    );
    Ok(())
}

fn reweight_profile(args: &ReweightArgs) -> Result<AnalysisConfig, RunError> {
    let config = match &args.config {
        Some(path) => load_json::<AnalysisConfig>(path)?,
        None => AnalysisConfig::default_v1(),
    };
    info!(adam = ?config.adam, "optimizer profile");
    Ok(config)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
