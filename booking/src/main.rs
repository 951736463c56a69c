use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use venue_booking::application::{BookingRequestDto, QuoteBooking};
use venue_booking::domain::SystemClock;
use venue_booking::infrastructure::{init_logger, BookingConfig, JsonVenueCatalog};

/// Validate and price a booking request against a venue catalog
#[derive(Parser, Debug)]
#[command(name = "booking-quote", version, about)]
struct Cli {
    /// Venue catalog JSON file
    #[arg(short, long)]
    catalog: PathBuf,

    /// Booking request JSON file
    #[arg(short, long)]
    request: PathBuf,

    /// Optional TOML configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => BookingConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BookingConfig::default(),
    };
    tracing::debug!("Using {:?}", config);

    let catalog = JsonVenueCatalog::load_file(&cli.catalog)
        .await
        .with_context(|| format!("Failed to load catalog {}", cli.catalog.display()))?;

    let raw_request = tokio::fs::read_to_string(&cli.request)
        .await
        .with_context(|| format!("Failed to read request {}", cli.request.display()))?;
    let request: BookingRequestDto =
        serde_json::from_str(&raw_request).context("Malformed booking request")?;

    let availability = config.availability(SystemClock);
    let quote = QuoteBooking::new(&catalog, &availability)
        .with_pricing(config.pricing())
        .with_default_duration_hours(config.default_duration_hours)
        .with_language(&config.default_language)
        .execute_request(request)?;

    if quote.is_bookable() {
        tracing::info!("Booking is valid, total {:.2} {}", quote.breakdown.total, quote.breakdown.currency);
    } else {
        tracing::warn!("Booking has {} validation error(s)", quote.errors.len());
    }

    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
