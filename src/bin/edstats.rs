//! Command-line view of the education statistics API.
//!
//! Every subcommand fetches through the dashboard slices and prints JSON on
//! stdout. Logs go to stderr and are controlled with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edstats::queries::{AssessmentQuery, DistrictYearQuery, LocationQuery, YearQuery};
use edstats::{AppConfig, Dashboard};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "edstats")]
#[command(about = "Query New Hampshire education statistics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL (overrides the configured one)
    #[arg(long, global = true, env = "EDSTATS_API_BASE_URL")]
    base_url: Option<String>,

    /// Re-fetch even when the result is already cached
    #[arg(long, global = true)]
    refresh: bool,

    /// Print compact instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List school districts
    Districts {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Staffing levels of one district
    Staff {
        district_id: i64,
        /// Defaults to the configured fiscal year
        #[arg(long)]
        year: Option<i32>,
        /// Sum the rows per staff type
        #[arg(long)]
        totals: bool,
    },
    /// Finance report of one district
    Finance {
        district_id: i64,
        /// Defaults to the configured fiscal year
        #[arg(long)]
        year: Option<i32>,
        /// Sum the report per entry type
        #[arg(long)]
        totals: bool,
    },
    /// Districts ranked by per-pupil expenditure
    Ranking {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Graduation outcomes for a district, or the state when no district is given
    Graduation {
        #[arg(long)]
        district_id: Option<i64>,
        #[arg(long)]
        year: Option<i32>,
        /// Print the rate-by-year series instead of the rows
        #[arg(long)]
        series: bool,
    },
    /// Assessment results of one district
    Assessments {
        district_id: i64,
        /// Defaults to the configured assessment year
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        subject: Option<String>,
        /// Compare against the state results for the same filters
        #[arg(long)]
        compare: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.base_url.clone())?;
    let dashboard = Dashboard::new(config).context("failed to start session")?;

    let output = run(&dashboard, cli.command, cli.refresh).await?;
    let rendered = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", rendered);
    Ok(())
}

fn load_config(base_url: Option<String>) -> Result<AppConfig> {
    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!(error = %err, "no config file, reading environment");
            AppConfig::from_env().context("failed to load configuration")?
        }
    };
    if let Some(base_url) = base_url {
        config.api.base_url = base_url;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn run(dashboard: &Dashboard, command: Command, refresh: bool) -> Result<Value> {
    let session = dashboard.session().clone();

    let value = match command {
        Command::Districts { year } => {
            let query = LocationQuery {
                year,
                ..LocationQuery::default()
            };
            let rows = dashboard.location().fetch_districts(&query, refresh).await?;
            serde_json::to_value(&*rows)?
        }
        Command::Staff {
            district_id,
            year,
            totals,
        } => {
            let query = DistrictYearQuery::new(district_id, year.unwrap_or(session.fiscal_year));
            let staff = dashboard.staff();
            if totals {
                staff.ensure_staff_types_loaded(false).await?;
                staff.fetch_district_staff_data(&query, refresh).await?;
                serde_json::to_value(&*staff.select_district_staff_totals(&query))?
            } else {
                serde_json::to_value(&*staff.fetch_district_staff_data(&query, refresh).await?)?
            }
        }
        Command::Finance {
            district_id,
            year,
            totals,
        } => {
            let query = DistrictYearQuery::new(district_id, year.unwrap_or(session.fiscal_year));
            let finance = dashboard.finance();
            let rows = finance.fetch_finance_report(&query, refresh).await?;
            if totals {
                serde_json::to_value(&*finance.select_entry_totals(&query))?
            } else {
                serde_json::to_value(&*rows)?
            }
        }
        Command::Ranking { year } => {
            let query = YearQuery {
                year: year.or(Some(session.fiscal_year)),
            };
            serde_json::to_value(&*dashboard.fetch_per_pupil_ranking(&query, refresh).await?)?
        }
        Command::Graduation {
            district_id,
            year,
            series,
        } => {
            let query = dashboard.graduation_query(district_id, year);
            let outcomes = dashboard.outcomes();
            match (district_id, series) {
                (Some(_), false) => {
                    serde_json::to_value(&*outcomes.fetch_district_graduation(&query, refresh).await?)?
                }
                (Some(_), true) => {
                    outcomes.fetch_district_graduation(&query, refresh).await?;
                    serde_json::to_value(&*outcomes.select_district_graduation_series(&query))?
                }
                (None, false) => {
                    serde_json::to_value(&*outcomes.fetch_state_graduation(&query, refresh).await?)?
                }
                (None, true) => {
                    outcomes.fetch_state_graduation(&query, refresh).await?;
                    serde_json::to_value(&*outcomes.select_state_graduation_series(&query))?
                }
            }
        }
        Command::Assessments {
            district_id,
            year,
            subject,
            compare,
        } => {
            let mut query =
                AssessmentQuery::district(district_id, year.unwrap_or(session.assessment_year));
            query.subject = subject;
            let assessments = dashboard.assessments();
            if compare {
                serde_json::to_value(&*assessments.fetch_district_comparison(&query, refresh).await?)?
            } else {
                serde_json::to_value(&*assessments.fetch_district_assessments(&query, refresh).await?)?
            }
        }
    };

    Ok(value)
}
