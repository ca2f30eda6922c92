use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_itinerary::config::PlannerConfig;
use u_itinerary::export::IcsExporter;
use u_itinerary::models::{DaySchedule, TimeOfDay, Trip};
use u_itinerary::opening_hours::OpeningHoursChecker;
use u_itinerary::planner::{GenerationTask, ItineraryBuilder, ItinerarySummary, TripPlanner};
use u_itinerary::validation::validate_trip;

/// u-itinerary - trip itinerary planner
#[derive(Parser)]
#[command(name = "u-itinerary")]
#[command(about = "Plan multi-day trip itineraries and export them to iCalendar", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an itinerary for a trip
    Plan {
        /// Trip JSON file
        trip: PathBuf,

        /// Print the itinerary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate an itinerary and write it as an .ics file
    Export {
        /// Trip JSON file
        trip: PathBuf,

        /// Output path
        #[arg(short, long, default_value = "itinerary.ics")]
        out: PathBuf,

        /// Destination offset from UTC, e.g. "+01:00"
        #[arg(long, default_value = "+00:00")]
        utc_offset: FixedOffset,
    },
    /// Check whether a visit fits a place's opening hours
    Hours {
        /// Trip JSON file containing the place
        trip: PathBuf,

        /// Place id
        #[arg(long)]
        place: String,

        /// Visit date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Start time (HH:MM)
        #[arg(long)]
        time: TimeOfDay,

        /// Visit length in minutes
        #[arg(long, default_value_t = 60)]
        duration: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PlannerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PlannerConfig::default(),
    };

    match cli.command {
        Commands::Plan { trip, json } => plan_command(&config, &trip, json).await,
        Commands::Export {
            trip,
            out,
            utc_offset,
        } => export_command(&config, &trip, &out, utc_offset).await,
        Commands::Hours {
            trip,
            place,
            date,
            time,
            duration,
        } => hours_command(&config, &trip, &place, date, time, duration),
    }
}

fn load_trip(path: &Path) -> Result<Trip> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let trip: Trip =
        serde_json::from_str(&text).with_context(|| format!("failed to parse trip {}", path.display()))?;

    if let Err(errors) = validate_trip(&trip) {
        for error in errors {
            warn!(kind = ?error.kind, "{}", error.message);
        }
    }
    Ok(trip)
}

/// Generates the itinerary; Ctrl+C cancels without output.
async fn generate(config: &PlannerConfig, trip: Trip) -> Result<Vec<DaySchedule>> {
    let mut planner = TripPlanner::with_builder(trip, ItineraryBuilder::new(config));
    let task = GenerationTask::new().with_latency(Duration::ZERO);
    let token = task.cancel_token();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, cancelling generation");
            token.cancel();
        }
    });

    planner.generate_with(&task).await?;
    Ok(planner.schedule().to_vec())
}

async fn plan_command(config: &PlannerConfig, path: &Path, json: bool) -> Result<()> {
    let trip = load_trip(path)?;
    let places = trip.places.clone();
    let days = generate(config, trip).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    for day in &days {
        println!("Day {} ({})", day.day_index, day.date);
        for entry in &day.places {
            let start = entry.start_time.map_or_else(|| "--:--".to_string(), |t| t.to_string());
            let end = entry.end_time().map_or_else(|| "--:--".to_string(), |t| t.to_string());
            let travel = if entry.travel_minutes > 0 {
                format!("  (+{} min travel)", entry.travel_minutes)
            } else {
                String::new()
            };
            println!("  {start}-{end}  {}{travel}", entry.place.name);
        }
    }

    let checker = OpeningHoursChecker::from_config(&config.hours);
    let summary = ItinerarySummary::calculate(&days, &places, &checker);
    println!(
        "\n{} visits, {} min visiting, {} min travel",
        summary.scheduled_count, summary.visit_minutes, summary.travel_minutes
    );
    if !summary.is_complete() {
        println!("Not scheduled: {}", summary.unscheduled.join(", "));
    }
    for violation in &summary.violations {
        println!("Day {} {}: {}", violation.day_index, violation.place_id, violation.message);
    }
    Ok(())
}

async fn export_command(
    config: &PlannerConfig,
    path: &Path,
    out: &Path,
    utc_offset: FixedOffset,
) -> Result<()> {
    let trip = load_trip(path)?;
    let meta = trip.meta();
    let days = generate(config, trip).await?;

    let ics = IcsExporter::new()
        .with_utc_offset(utc_offset)
        .export(&meta, &days, Utc::now());
    fs::write(out, ics).with_context(|| format!("failed to write {}", out.display()))?;
    info!(path = %out.display(), days = days.len(), "wrote calendar");
    Ok(())
}

fn hours_command(
    config: &PlannerConfig,
    path: &Path,
    place_id: &str,
    date: NaiveDate,
    start: TimeOfDay,
    duration: u32,
) -> Result<()> {
    let trip = load_trip(path)?;
    let place = trip
        .place(place_id)
        .with_context(|| format!("place {place_id} not found in trip"))?;

    let check = OpeningHoursChecker::from_config(&config.hours).check(place, date, start, duration);
    let verdict = if check.is_open { "open" } else { "closed" };
    println!("{} on {date} at {start} for {duration} min: {verdict}", place.name);
    if let Some(warning) = &check.warning {
        println!("  {warning}");
    }
    if let Some(hours) = &check.hours {
        println!("  Hours: {hours}");
    }
    Ok(())
}
