use analytics::{KpiEngine, KpiParams, KpiReport};
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{load_config, load_config_from, ValuationConfig};
use core_types::{AppearanceCategory, ArtistDataset, MonthIndex, RevenueStream, SocialPlatform};
use forecast::{
    bound_prediction, predict_concert_value, predict_media_value, AlbumObservation,
    AlbumValueModel, AppearanceObservation, AppearanceValueModel, PredictionResult,
};
use risk::{classify, InvestmentTerms, RiskLevel};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use timeline::{aggregate, AggregationOutcome, Timeline};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Encore valuation engine.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate(args) => handle_evaluate(args),
        Commands::Forecast(args) => handle_forecast(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A valuation engine for artist activity: timelines, KPIs, risk, forecasts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the valuation timeline, KPI report, and risk rating for one artist.
    Evaluate(EvaluateArgs),
    /// Predict the value of a hypothetical future event.
    Forecast(ForecastArgs),
}

#[derive(Parser)]
struct EvaluateArgs {
    /// Path to the artist dataset JSON file.
    #[arg(long)]
    dataset: PathBuf,

    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// The month to treat as "current" (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Emit the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ForecastArgs {
    /// Path to the artist dataset JSON file.
    #[arg(long)]
    dataset: PathBuf,

    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// The month to treat as "current" (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// The kind of hypothetical event to value.
    #[arg(long, value_enum)]
    kind: EventKind,

    /// Track count of the hypothetical album (kind: album).
    #[arg(long)]
    track_count: Option<u32>,

    /// Number of hypothetical occurrences (kinds: concert, media, appearance).
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Platform whose post history backs the media forecast (kind: media).
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,

    /// Appearance category (kind: appearance).
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,

    /// Emit the prediction as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EventKind {
    Album,
    Concert,
    Media,
    Appearance,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Twitter,
    Youtube,
}

impl From<PlatformArg> for SocialPlatform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Twitter => SocialPlatform::Twitter,
            PlatformArg::Youtube => SocialPlatform::Youtube,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Broadcast,
    Variety,
    Radio,
    Festival,
}

impl From<CategoryArg> for AppearanceCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Broadcast => AppearanceCategory::Broadcast,
            CategoryArg::Variety => AppearanceCategory::Variety,
            CategoryArg::Radio => AppearanceCategory::Radio,
            CategoryArg::Festival => AppearanceCategory::Festival,
        }
    }
}

// ==============================================================================
// Evaluate Command Logic
// ==============================================================================

/// The machine-readable payload of one full evaluation.
#[derive(Serialize)]
struct EvaluationReport<'a> {
    timeline: &'a Timeline,
    kpi: &'a KpiReport,
    risk: &'a RiskLevel,
    skipped: &'a [timeline::SkippedEvent],
}

fn handle_evaluate(args: EvaluateArgs) -> Result<()> {
    let config = load_configuration(args.config.as_deref())?;
    let dataset = read_dataset(&args.dataset)?;

    let outcome = aggregate(&dataset, &config).context("Failed to aggregate the timeline")?;
    let (kpi, risk) = evaluate(&outcome, &config, args.as_of)?;

    if args.json {
        let report = EvaluationReport {
            timeline: &outcome.timeline,
            kpi: &kpi,
            risk: &risk,
            skipped: &outcome.skipped,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_kpi_table(&kpi);
    render_risk_table(&risk);
    if !outcome.skipped.is_empty() {
        println!(
            "Skipped {} record(s) with unusable dates; rerun with RUST_LOG=warn for details.",
            outcome.skipped.len()
        );
    }
    Ok(())
}

/// Runs the KPI and risk passes over an aggregated timeline.
fn evaluate(
    outcome: &AggregationOutcome,
    config: &ValuationConfig,
    as_of: Option<NaiveDate>,
) -> Result<(KpiReport, RiskLevel)> {
    let decay_rate = match config.valuation.decay_rate_override {
        Some(rate) => rate,
        None => decay::derived_decay_rate(config.valuation.residual_rate)?,
    };
    let params = KpiParams {
        calculation_start_date: config.valuation.calculation_start_date,
        decay_rate,
    };

    let current_index = resolve_current_index(&outcome.timeline, as_of);
    let kpi = KpiEngine::new()
        .calculate(&outcome.timeline, current_index, &outcome.albums, &params)
        .context("Failed to calculate KPIs")?;

    let terms = InvestmentTerms::from_config(&config.investment)?;
    let risk = classify(&terms, kpi.spectrum.spectrum, kpi.spectrum.spectrum_min)?;
    Ok((kpi, risk))
}

/// Clamps the requested "current" month into the timeline's covered range.
fn resolve_current_index(timeline: &Timeline, as_of: Option<NaiveDate>) -> usize {
    let month = MonthIndex::from_date(as_of.unwrap_or_else(|| Utc::now().date_naive()));
    match timeline.index_of(month) {
        Some(index) => index,
        None if month < timeline.start() => 0,
        None => timeline.len() - 1,
    }
}

fn render_kpi_table(kpi: &KpiReport) {
    let mut table = Table::new();
    table.set_header(vec!["KPI", "Value"]);
    table.add_row(vec!["Peak Value".to_string(), format!("{:.2}", kpi.peak_value)]);
    table.add_row(vec![
        "Peak Month".to_string(),
        kpi.peak_date.map_or_else(|| "-".to_string(), |d| d.to_string()),
    ]);
    table.add_row(vec![
        "Current Value".to_string(),
        format!("{:.2}", kpi.current_value),
    ]);
    table.add_row(vec![
        "Cumulative Value".to_string(),
        format!("{:.2}", kpi.cumulative_value),
    ]);
    table.add_row(vec![
        "Dominant Stream".to_string(),
        kpi.dominant_stream_label().unwrap_or("-").to_string(),
    ]);
    table.add_row(vec![
        "Active Revenue Avg".to_string(),
        format!("{:.2}", kpi.active_revenue_avg),
    ]);
    table.add_row(vec![
        "Activity Frequency".to_string(),
        format!("{:.2}", kpi.activity_frequency),
    ]);
    table.add_row(vec![
        "Expected Annual Revenue".to_string(),
        format!("{:.2}", kpi.expected_annual_revenue),
    ]);
    table.add_row(vec![
        "Revenue Spectrum".to_string(),
        format!("{:.4}", kpi.spectrum.spectrum),
    ]);
    table.add_row(vec![
        "Spectrum Range".to_string(),
        format!(
            "{:.2} .. {:.2}",
            kpi.spectrum.spectrum_min, kpi.spectrum.spectrum_max
        ),
    ]);
    table.add_row(vec![
        "Diversity Index".to_string(),
        format!("{:.4}", kpi.normalized_diversity_index),
    ]);
    println!("{table}");

    let mut streams = Table::new();
    streams.set_header(vec!["Stream", "Cumulative Total"]);
    for stream in RevenueStream::ALL {
        let total = kpi.stream_total(stream);
        if total > 0.0 {
            streams.add_row(vec![stream.label().to_string(), format!("{total:.2}")]);
        }
    }
    println!("{streams}");
}

fn render_risk_table(risk: &RiskLevel) {
    let mut table = Table::new();
    table.set_header(vec!["Risk", "Value"]);
    table.add_row(vec!["Rating".to_string(), risk.label.to_string()]);
    table.add_row(vec![
        "Percentage".to_string(),
        format!("{:.2}%", risk.percentage),
    ]);
    table.add_row(vec!["Description".to_string(), risk.description.to_string()]);
    println!("{table}");
}

// ==============================================================================
// Forecast Command Logic
// ==============================================================================

fn handle_forecast(args: ForecastArgs) -> Result<()> {
    let config = load_configuration(args.config.as_deref())?;
    let dataset = read_dataset(&args.dataset)?;

    let outcome = aggregate(&dataset, &config).context("Failed to aggregate the timeline")?;
    let (kpi, _) = evaluate(&outcome, &config, args.as_of)?;

    let predicted = match args.kind {
        EventKind::Album => {
            let track_count = args
                .track_count
                .context("--track-count is required for an album forecast")?;
            let history = unique_album_history(&outcome);
            let model = AlbumValueModel::train(&history)?;
            model.predict(track_count)?
        }
        EventKind::Concert => {
            let gross: Vec<f64> = dataset.concerts.iter().map(|c| c.gross_value).collect();
            predict_concert_value(&gross, args.count)?
        }
        EventKind::Media => {
            let platform: SocialPlatform = args
                .platform
                .context("--platform is required for a media forecast")?
                .into();
            let values: Vec<f64> = dataset
                .social_posts
                .iter()
                .filter(|p| p.platform == platform)
                .map(|p| p.engagement_value)
                .collect();
            predict_media_value(&values, args.count)?
        }
        EventKind::Appearance => {
            let category: AppearanceCategory = args
                .category
                .context("--category is required for an appearance forecast")?
                .into();
            let history: Vec<AppearanceObservation> = dataset
                .appearances
                .iter()
                .map(|a| AppearanceObservation {
                    category: a.category,
                    value: a.appearance_value,
                })
                .collect();
            let model = AppearanceValueModel::train(&history)?;
            model.predict(category, args.count)?
        }
    };

    let result = bound_prediction(predicted, kpi.spectrum.std, kpi.active_revenue_avg);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_prediction(&result);
    }
    Ok(())
}

/// Collects the unique historical albums (by title) as training observations.
fn unique_album_history(outcome: &AggregationOutcome) -> Vec<AlbumObservation> {
    let mut seen = BTreeSet::new();
    outcome
        .albums
        .iter()
        .filter(|album| seen.insert(album.title.clone()))
        .map(|album| AlbumObservation {
            track_count: album.track_count,
            total_value: album.total_value(),
        })
        .collect()
}

fn render_prediction(result: &PredictionResult) {
    let mut table = Table::new();
    table.set_header(vec!["Forecast", "Value"]);
    table.add_row(vec![
        "Predicted Value".to_string(),
        format!("{:.2}", result.predicted_value),
    ]);
    table.add_row(vec![
        "Min Expected Revenue".to_string(),
        format!("{:.2}", result.min_expected_revenue),
    ]);
    table.add_row(vec![
        "Max Expected Revenue".to_string(),
        format!("{:.2}", result.max_expected_revenue),
    ]);
    println!("{table}");
}

// ==============================================================================
// Shared Helpers
// ==============================================================================

fn load_configuration(path: Option<&Path>) -> Result<ValuationConfig> {
    let config = match path {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => load_config().context("Failed to load configuration from config.toml")?,
    };
    Ok(config)
}

fn read_dataset(path: &Path) -> Result<ArtistDataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file at {}", path.display()))?;
    let dataset: ArtistDataset =
        serde_json::from_reader(file).context("Failed to parse the artist dataset")?;
    if dataset.record_count() == 0 {
        bail!("The dataset contains no records");
    }
    Ok(dataset)
}
