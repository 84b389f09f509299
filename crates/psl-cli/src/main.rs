use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use psl_core::advice::filter_for_gender;
use psl_core::{
    level_for, AdviceEngine, AdviceItem, Analyzer, Calibration, Gender, JitterSource, NoJitter,
    OverallResult, Point, Profile, PslLevel, RandomJitter,
};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "psl", about = "Score facial landmarks and suggest improvements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a landmark document and print the result with advice
    Analyze {
        /// Landmark JSON file, or "-" for stdin
        #[arg(short, long)]
        input: PathBuf,
        /// female or male
        #[arg(short, long)]
        gender: Gender,
        #[arg(short, long)]
        age: u32,
        /// Calibration TOML (overrides PSL_CALIBRATION)
        #[arg(long)]
        calibration: Option<PathBuf>,
        /// Jitter seed (overrides PSL_SEED)
        #[arg(long)]
        seed: Option<u64>,
        /// Disable detection-quality jitter
        #[arg(long)]
        no_jitter: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the advice catalog
    Catalog {
        /// Only rules that can fire for this gender
        #[arg(short, long)]
        gender: Option<Gender>,
    },
    /// Print the active calibration table as TOML
    Calibration {
        #[arg(long)]
        calibration: Option<PathBuf>,
    },
}

/// Landmark document produced by the external detector.
#[derive(Debug, Deserialize)]
struct DetectionInput {
    confidence: f32,
    landmarks: Vec<Point>,
}

#[derive(Serialize)]
struct Report<'a> {
    calibration: &'a str,
    result: OverallResult,
    level: &'static PslLevel,
    advice: Vec<AdviceItem>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Analyze {
            input,
            gender,
            age,
            calibration,
            seed,
            no_jitter,
            pretty,
        } => {
            let calibration = load_calibration(calibration.or(config.calibration_path))?;
            let analyzer = Analyzer::new(calibration).context("invalid calibration")?;
            let detection = read_input(&input)?;

            let mut jitter: Box<dyn JitterSource> = if no_jitter || !config.jitter_enabled {
                Box::new(NoJitter)
            } else {
                match seed.or(config.seed) {
                    Some(seed) => Box::new(RandomJitter::seeded(seed)),
                    None => Box::new(RandomJitter::from_entropy()),
                }
            };

            let result = analyzer
                .analyze_points(&detection.landmarks, detection.confidence, jitter.as_mut())
                .with_context(|| format!("cannot score {}", input.display()))?;
            let profile = Profile::new(gender, age);
            let report = Report {
                calibration: &analyzer.calibration().version,
                result,
                level: level_for(result.overall),
                advice: filter_for_gender(analyzer.advise(&result, &profile), gender),
            };
            print_json(&report, pretty)?;
        }
        Commands::Catalog { gender } => {
            print_json(&catalog_items(&AdviceEngine::default(), gender), true)?;
        }
        Commands::Calibration { calibration } => {
            let calibration = load_calibration(calibration.or(config.calibration_path))?;
            print!("{}", calibration.to_toml_string()?);
        }
    }

    Ok(())
}

/// Every catalog entry as an advice item, optionally narrowed to one gender.
fn catalog_items(engine: &AdviceEngine, gender: Option<Gender>) -> Vec<AdviceItem> {
    let items: Vec<AdviceItem> = engine.rules().iter().map(AdviceItem::from).collect();
    match gender {
        Some(gender) => filter_for_gender(items, gender),
        None => items,
    }
}

fn load_calibration(path: Option<PathBuf>) -> Result<Calibration> {
    match path {
        Some(path) => Ok(Calibration::load(&path)?),
        None => Ok(Calibration::default()),
    }
}

fn read_input(path: &Path) -> Result<DetectionInput> {
    tracing::debug!(path = %path.display(), "reading landmark document");
    let mut text = String::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    parse_input(&text).with_context(|| format!("bad landmark document {}", path.display()))
}

fn parse_input(text: &str) -> Result<DetectionInput> {
    Ok(serde_json::from_str(text)?)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
