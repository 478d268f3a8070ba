use clap::{Parser, Subcommand};
use cli::{load_answers, load_assessment, WoundCliConfig, WoundReport};
use color_eyre::eyre::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};
use wound::{recommendations, AssessmentPipeline, Comparator};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a .toml or .json configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a wound photograph and write the assessment as JSON
    Analyze {
        /// Path to the wound photograph
        image: PathBuf,
        /// Output file name inside the configured output directory
        #[arg(short, long, default_value = "assessment.json")]
        output: String,
    },
    /// Compare two stored assessments of the same wound
    Compare {
        /// Assessment JSON of the most recent scan
        #[arg(long)]
        current: PathBuf,
        /// Assessment JSON of the earlier scan
        #[arg(long)]
        previous: PathBuf,
        /// Days elapsed between the two scans
        #[arg(long, default_value = "1")]
        days: u32,
        #[arg(short, long, default_value = "comparison.json")]
        output: String,
    },
    /// Generate care recommendations for a stored assessment
    Recommend {
        /// Assessment JSON to generate recommendations for
        #[arg(long)]
        assessment: PathBuf,
        /// Patient answers (.toml or .json)
        #[arg(long)]
        answers: Option<PathBuf>,
        #[arg(short, long, default_value = "recommendations.json")]
        output: String,
    },
    /// Analyze a photograph and generate recommendations in one report
    Report {
        /// Path to the wound photograph
        image: PathBuf,
        /// Patient answers (.toml or .json)
        #[arg(long)]
        answers: Option<PathBuf>,
        #[arg(short, long, default_value = "report.json")]
        output: String,
    },
    /// Write a configuration file with default values
    InitConfig {
        /// Destination of the TOML configuration
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => WoundCliConfig::from_file(path)?,
        None => WoundCliConfig::default(),
    };

    match &cli.command {
        Commands::Analyze { image, output } => {
            analyze(&config, image, output).await?;
        }
        Commands::Compare { current, previous, days, output } => {
            compare(&config, current, previous, *days, output)?;
        }
        Commands::Recommend { assessment, answers, output } => {
            recommend(&config, assessment, answers.as_deref(), output)?;
        }
        Commands::Report { image, answers, output } => {
            report(&config, image, answers.as_deref(), output).await?;
        }
        Commands::InitConfig { path } => {
            WoundCliConfig::default().to_toml_file(path)?;
            info!("Default configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn pipeline(config: &WoundCliConfig) -> AssessmentPipeline {
    AssessmentPipeline::builder()
        .with_config(config.engine.clone())
        .build()
}

fn write_output<T: Serialize>(config: &WoundCliConfig, file_name: &str, value: &T) -> Result<()> {
    let path = config.output_path(file_name)?;
    std::fs::write(&path, config.to_output_json(value)?)?;
    info!("Results saved to {:?}", path);
    Ok(())
}

async fn analyze(config: &WoundCliConfig, image: &Path, output: &str) -> Result<()> {
    info!("Analyzing wound photograph {:?}", image);
    let outcome = pipeline(config).evaluate_path(image).await;
    if outcome.is_fallback() {
        warn!("No assessable wound region in {:?}; baseline assessment written", image);
    }

    let record = outcome.into_record();
    info!(
        "Stage: {}, risk: {}, health: {}",
        record.healing_stage, record.risk_level, record.overall_health
    );
    write_output(config, output, &record)
}

fn compare(
    config: &WoundCliConfig,
    current: &Path,
    previous: &Path,
    days: u32,
    output: &str,
) -> Result<()> {
    let current = load_assessment(current)?;
    let previous = load_assessment(previous)?;

    let comparison = Comparator::new(config.engine.comparison.clone())
        .compare(&current, &previous, days);

    for warning in &comparison.warnings {
        warn!("{}", warning);
    }
    info!("Trend: {}, next scan: {}", comparison.trend, comparison.next_scan);
    write_output(config, output, &comparison)
}

fn recommend(
    config: &WoundCliConfig,
    assessment: &Path,
    answers: Option<&Path>,
    output: &str,
) -> Result<()> {
    let assessment = load_assessment(assessment)?;
    let answers = load_answers(answers)?;

    let care = recommendations::generate(&assessment, &answers, None);
    info!("Generated {} care recommendations", care.len());
    write_output(config, output, &care)
}

async fn report(
    config: &WoundCliConfig,
    image: &Path,
    answers: Option<&Path>,
    output: &str,
) -> Result<()> {
    let answers = load_answers(answers)?;
    let assessment = pipeline(config).analyze_path(image).await;
    let recommendations = recommendations::generate(&assessment, &answers, None);

    write_output(config, output, &WoundReport { assessment, recommendations })
}
