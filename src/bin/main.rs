//! RMNB Command Line Interface
//!
//! A command-line interface for training and applying Multinomial Naive
//! Bayes models on LibSVM-format sparse data.

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use rmnb::api::EvaluationMetrics;
use rmnb::core::{NBError, Result};
use rmnb::persistence::{SerializableModel, TrainingParams};
use rmnb::utils::{stats, validation};
use rmnb::{predict, Dataset, LibSVMDataset, NaiveBayesTrainer, PredictionReport};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rmnb")]
#[command(about = "A Rust implementation of Multinomial Naive Bayes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "RMNB Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model and save it
    Train(TrainArgs),
    /// Predict labels with a saved model and report accuracy
    Predict(PredictArgs),
    /// Display model information
    Info(InfoArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Training data file (LibSVM format)
    data: PathBuf,

    /// Output model file
    model: PathBuf,

    /// Smoothing constant
    #[arg(short, long, default_value = "1.0")]
    alpha: f64,
}

#[derive(Args)]
struct PredictArgs {
    /// Input data file (LibSVM format, labels are the ground truth)
    data: PathBuf,

    /// Trained model file
    model: PathBuf,

    /// Output predictions file (optional, prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include per-class log-likelihood scores
    #[arg(long)]
    scores: bool,

    /// Show per-class precision, recall and F1
    #[arg(long)]
    detailed: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// Model file
    model: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Train(args) => train_command(args),
        Commands::Predict(args) => predict_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn train_command(args: TrainArgs) -> Result<()> {
    info!("Training Multinomial Naive Bayes model...");
    info!("Data file: {:?}", args.data);
    info!("Parameters: alpha={}", args.alpha);

    let dataset = LibSVMDataset::from_file(&args.data)?;
    let summary = stats::sparse_vector_stats(dataset.samples());
    info!(
        "Loaded {} samples, max feature id {}, {:.1} non-zeros per sample",
        dataset.len(),
        dataset.dim().saturating_sub(1),
        summary.mean_nnz
    );
    for (label, count) in validation::class_distribution(&dataset) {
        info!("  class {label}: {count} samples");
    }

    let frequency = stats::feature_frequency(dataset.samples());
    if let Some((feature, docs)) = frequency
        .iter()
        .max_by_key(|&(&feature, &docs)| (docs, std::cmp::Reverse(feature)))
    {
        info!(
            "Vocabulary: {} features, most common is {feature} ({docs} documents)",
            frequency.len()
        );
    }

    let model = NaiveBayesTrainer::with_alpha(args.alpha).train(&dataset)?;
    info!(
        "Training completed: {} classes, {} features",
        model.n_classes(),
        model.n_features()
    );

    let serializable = SerializableModel::from_model(
        &model,
        TrainingParams {
            alpha: args.alpha,
            n_documents: dataset.len(),
        },
    );
    serializable.save_to_file(&args.model)?;
    info!("Model saved to: {:?}", args.model);

    // Quick evaluation on training data
    let report = predict(&dataset, &model)?;
    info!("Training accuracy: {:.4}%", report.accuracy);

    Ok(())
}

fn predict_command(args: PredictArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let model = SerializableModel::load_from_file(&args.model)?.into_model()?;

    info!("Loading prediction data from: {:?}", args.data);
    let dataset = LibSVMDataset::from_file(&args.data)?;

    info!(
        "Predicting {} samples with {} classes",
        dataset.len(),
        model.n_classes()
    );
    let report = predict(&dataset, &model)?;

    if let Some(output_path) = &args.output {
        let file = File::create(output_path).map_err(NBError::IoError)?;
        let mut writer = BufWriter::new(file);
        write_predictions(&mut writer, &report, args.scores)?;
        writer.flush().map_err(NBError::IoError)?;
        info!("Predictions saved to: {output_path:?}");
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        write_predictions(&mut writer, &report, args.scores)?;
    }

    println!("Accuracy {:8.4}%", report.accuracy);

    if args.detailed {
        let metrics = EvaluationMetrics::from_report(&dataset.get_labels(), &report);
        println!("\nPer-class Metrics:");
        println!("  {:>8} {:>10} {:>10} {:>10}", "class", "precision", "recall", "f1");
        for label in metrics.classes() {
            println!(
                "  {:>8} {:>10.4} {:>10.4} {:>10.4}",
                label,
                metrics.precision(label),
                metrics.recall(label),
                metrics.f1_score(label)
            );
        }
        println!("  Macro F1: {:.4}", metrics.macro_f1());
    }

    Ok(())
}

fn write_predictions<W: Write>(
    writer: &mut W,
    report: &PredictionReport,
    with_scores: bool,
) -> Result<()> {
    writeln!(writer, "# Predictions for {} samples", report.len()).map_err(NBError::IoError)?;
    if with_scores {
        let classes: Vec<String> = report.classes.iter().map(|c| c.to_string()).collect();
        writeln!(
            writer,
            "# Format: sample_index predicted_label scores[{}]",
            classes.join(" ")
        )
        .map_err(NBError::IoError)?;
    } else {
        writeln!(writer, "# Format: sample_index predicted_label").map_err(NBError::IoError)?;
    }

    for (i, (label, scores)) in report.labels.iter().zip(&report.scores).enumerate() {
        if with_scores {
            let scores: Vec<String> = scores.iter().map(|s| format!("{s:.6}")).collect();
            writeln!(writer, "{} {} {}", i, label, scores.join(" ")).map_err(NBError::IoError)?;
        } else {
            writeln!(writer, "{i} {label}").map_err(NBError::IoError)?;
        }
    }

    Ok(())
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading model from: {:?}", args.model);
    let serializable_model = SerializableModel::load_from_file(&args.model)?;
    let model = serializable_model.to_model()?;

    serializable_model.print_summary();

    println!("\nVocabulary Details:");
    println!("  Total: {}", model.n_features());

    let ids: Vec<_> = model.feature_log_probs().keys().take(10).collect();
    if !ids.is_empty() {
        println!("  First feature ids: {ids:?}");
        if model.n_features() > ids.len() {
            println!("    ... ({} more)", model.n_features() - ids.len());
        }
    }

    Ok(())
}
