//! Command-line driver: fetch or load a provider document, run the
//! extraction pipeline, and print the resulting device states.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use wxstate_core::{load_app_config_from_env, NormalizedValue, StateValue, UnitSystem};
use wxstate_extract::{Extraction, LocationExtractor};
use wxstate_wu::{catalog, freshness, WuClient};

#[derive(Debug, Parser)]
#[command(name = "wxstate-cli")]
#[command(about = "Extract typed device states from weather provider documents")]
struct Cli {
    /// Unit system override (standard|metric|mixed|mixed-si); defaults to
    /// WXSTATE_UNITS.
    #[arg(long, global = true)]
    units: Option<String>,

    /// Emit the state mapping and report as JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract states from a document already on disk.
    Extract {
        /// Path to the raw provider JSON.
        #[arg(long)]
        file: PathBuf,
        /// Which category's field catalog to apply.
        #[arg(long, value_enum, default_value = "current")]
        category: Category,
    },
    /// Fetch the current observation for a station and extract states.
    Fetch {
        /// Personal weather station ID, e.g. KMAHANOV10.
        #[arg(long)]
        station: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Category {
    Current,
    Forecast,
    Hourly,
    Almanac,
    Astronomy,
    Tide,
}

impl Category {
    fn specs(self) -> Vec<wxstate_extract::FieldSpec> {
        match self {
            Category::Current => catalog::current_conditions(),
            Category::Forecast => catalog::ten_day_forecast(),
            Category::Hourly => catalog::hourly_forecast(),
            Category::Almanac => catalog::almanac(),
            Category::Astronomy => catalog::astronomy(),
            Category::Tide => catalog::tide(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_app_config_from_env().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    let units = match &cli.units {
        Some(raw) => UnitSystem::parse(raw)
            .with_context(|| format!("unknown unit system '{raw}'"))?,
        None => config.units,
    };
    let extractor = LocationExtractor::new(units, config.display.clone());

    let (doc, specs) = match &cli.command {
        Commands::Extract { file, category } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let doc: serde_json::Value =
                serde_json::from_str(&raw).context("parsing document JSON")?;
            (doc, category.specs())
        }
        Commands::Fetch { station } => {
            let api_key = config
                .wu_api_key
                .as_deref()
                .context("WU_API_KEY is required for fetch")?;
            let client = WuClient::new(api_key, config.wu_request_timeout_secs)?
                .with_retry_policy(config.wu_max_retries, config.wu_retry_backoff_base_ms);
            let doc = client.current_conditions(station).await?;

            if let Some(epoch) = freshness::observation_epoch(&doc) {
                if !freshness::is_plausible_epoch(epoch, chrono::Utc::now()) {
                    tracing::warn!(epoch, "observation timestamp is implausible");
                }
            }
            (doc, catalog::current_conditions())
        }
    };

    let mut extraction = extractor.extract(&doc, &specs)?;

    // Live observations also get a rendered timestamp in the configured
    // date/time format.
    if matches!(cli.command, Commands::Fetch { .. }) {
        if let Some(rendered) = freshness::observation_epoch(&doc).and_then(|epoch| {
            freshness::observation_time_display(
                epoch,
                &config.display.date_format,
                &config.display.time_format,
            )
        }) {
            extraction.states.insert(
                "currentObservation24hr".to_string(),
                StateValue::new(NormalizedValue::Text(rendered.clone()), rendered),
            );
        }
    }

    if cli.json {
        print_json(&extraction)?;
    } else {
        print_table(&extraction);
    }
    Ok(())
}

fn print_table(extraction: &Extraction) {
    for (name, state) in &extraction.states {
        println!("{name:<28} {}", state.display);
    }
    if !extraction.report.is_empty() {
        eprintln!();
        for failure in &extraction.report.failures {
            eprintln!("warning: {} unavailable ({})", failure.field, failure.reason);
        }
    }
}

fn print_json(extraction: &Extraction) -> anyhow::Result<()> {
    let out = serde_json::json!({
        "states": extraction.states,
        "failures": extraction.report.failures,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
