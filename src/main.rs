mod entries;
mod error;
mod events;
mod fetch;
mod output;
mod race;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::{info, warn};

use events::EventListing;
use settings::Settings;

#[derive(Parser)]
#[command(name = "erg_racer", about = "Regatta entries scraper producing Concept2 race files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the events on a regatta's entries page
    Events {
        /// Regatta home page URL (must contain /regatta)
        url: String,
    },
    /// Scrape every event and write one .rac2 file per event with entries
    Run {
        /// Regatta home page URL (must contain /regatta)
        url: String,
        /// Output directory for race files
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Max events to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load();
    let client = Client::new();

    let result = match cli.command {
        Commands::Events { url } => {
            let listing = events::list_events(&client, &url).await?;
            print_listing(&listing);
            Ok(())
        }
        Commands::Run { url, out, limit } => {
            let listing = events::list_events(&client, &url).await?;
            if listing.events.is_empty() {
                println!("No events found.");
                return Ok(());
            }
            let out_dir = out.unwrap_or_else(|| PathBuf::from(&settings.out_dir));
            run_pipeline(&client, &settings, &listing, &out_dir, limit).await
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

struct RunCounts {
    written: usize,
    skipped: usize,
    errors: usize,
}

impl RunCounts {
    fn print(&self) {
        println!(
            "Done: {} race files written, {} events without entries, {} errors.",
            self.written, self.skipped, self.errors,
        );
    }
}

/// One event fully fetched, compiled and written before the next begins.
/// Per-event failures are logged and the loop moves on; only the listing
/// itself is fatal (handled by the caller before we get here).
async fn run_pipeline(
    client: &Client,
    settings: &Settings,
    listing: &EventListing,
    out_dir: &Path,
    limit: Option<usize>,
) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;

    let total = limit
        .unwrap_or(listing.events.len())
        .min(listing.events.len());
    println!(
        "{}: processing {} events into {}...",
        listing.regatta_title,
        total,
        out_dir.display()
    );

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")?
            .progress_chars("=> "),
    );

    let mut counts = RunCounts {
        written: 0,
        skipped: 0,
        errors: 0,
    };

    for event in listing.events.iter().take(total) {
        let names = match entries::fetch_entries(client, &settings.base_url, &event.link).await {
            Ok(names) => names,
            Err(e) => {
                warn!("Skipping event {:?}: {}", event.title, e);
                counts.errors += 1;
                pb.inc(1);
                continue;
            }
        };

        // Zero entries means no file at all, not an empty one.
        if names.is_empty() {
            counts.skipped += 1;
        } else {
            let compiled = race::compile(&names, &event.title, &listing.regatta_title);
            match output::write_race_file(out_dir, &compiled) {
                Ok(_) => counts.written += 1,
                Err(e) => {
                    warn!("Could not write race file for {:?}: {:#}", event.title, e);
                    counts.errors += 1;
                }
            }
        }

        info!("Processed event: {} with {} entries", event.title, names.len());
        pb.inc(1);
    }

    pb.finish_and_clear();
    counts.print();
    Ok(())
}

fn print_listing(listing: &EventListing) {
    if listing.events.is_empty() {
        println!("No events found.");
        return;
    }

    println!("{}", listing.regatta_title);
    println!("{}", "-".repeat(72));
    for (i, event) in listing.events.iter().enumerate() {
        println!("{:>3} | {:<45} | {}", i + 1, truncate(&event.title, 45), event.link);
    }
    println!("\n{} events", listing.events.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
