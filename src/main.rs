use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod analytics;
mod ingest;
mod models;
mod query;
mod rank;
mod report;
mod scoring;
mod table;

use analytics::AnalyticsCategory;
use table::Catalog;

#[derive(Parser)]
#[command(name = "ballroom-insights")]
#[command(about = "Who should have won: score-based rankings for a ballroom competition dataset", long_about = None)]
struct Cli {
    /// Contestant dataset (CSV)
    #[arg(
        long,
        global = true,
        env = "BALLROOM_DATA",
        default_value = "dancing_with_the_stars_dataset.csv"
    )]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Contestant details for names containing the query
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Contestant names containing the query
    Names {
        #[arg(default_value = "")]
        query: String,
    },
    /// Leaderboard of every professional partner
    Pros,
    /// Professional partner names containing the query
    ProNames {
        #[arg(default_value = "")]
        query: String,
    },
    /// Career history for professional partners matching the query
    Pro {
        #[arg(default_value = "")]
        query: String,
    },
    /// Robbed, overachievers, season stats and hall of fame
    Analytics {
        /// robbed, overachievers, seasons, hall-of-fame or all
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Best averages among contestants who danced their whole season
    FullSeason {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Mean judge average per season and week
    WeekAverages,
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let catalog = Catalog::load(&cli.data);

    match cli.command {
        Commands::Search { query } => print_json(&catalog.search(&query))?,
        Commands::Names { query } => print_json(&catalog.names(&query))?,
        Commands::Pros => print_json(&catalog.pros())?,
        Commands::ProNames { query } => print_json(&catalog.pro_names(&query))?,
        Commands::Pro { query } => print_json(&catalog.pro_details(&query))?,
        Commands::Analytics { category } => {
            print_json(&catalog.analytics(AnalyticsCategory::parse(&category)))?
        }
        Commands::FullSeason { limit } => print_json(&catalog.full_season_leaders(limit))?,
        Commands::WeekAverages => print_json(&catalog.week_averages())?,
        Commands::Report { out } => {
            let summary = catalog.analytics(AnalyticsCategory::All);
            let report = report::build_report(&summary, chrono::Utc::now().date_naive());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
