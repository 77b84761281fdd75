use clap::Parser;

use feature_prep::config::PipelineConfig;
use feature_prep::pipeline;

/// Prepare the model-ready diabetes dataset: engineer features, validate,
/// and persist with lineage metadata.
#[derive(Parser, Debug)]
#[command(name = "feature-prep", version, about)]
struct Cli {
    /// Also write the dataset as CSV next to the Parquet output
    #[arg(long)]
    export_csv: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cfg = PipelineConfig::default();
    let summary = pipeline::run(&cfg, cli.export_csv)?;

    println!("ETL run complete.");
    println!("Saved: {}", summary.dataset_path.display());
    println!("Saved: {}", summary.metadata_path.display());
    Ok(())
}
