//! Foodshare CLI - Local food donation dashboard

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use foodshare::config::{self, FoodshareConfig};
use foodshare::filter::{Filters, Selection};
use foodshare::models::{ClaimStatus, NewClaim, NewProvider};
use foodshare::storage::{SqliteStore, TableName};
use foodshare::ui::{self, Icons};
use foodshare::views::{self, AnalysisQuery, FilterOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "foodshare")]
#[command(version)]
#[command(about = "Local food donation dashboard - providers list surplus food, receivers claim it")]
#[command(long_about = r#"
Foodshare tracks food-donation inventory in a local SQLite database:
  • Dashboard counters and recently added listings
  • Filterable listings by city, provider type, food type and meal type
  • Claim creation and provider administration
  • Aggregate analysis queries

Example usage:
  foodshare init
  foodshare browse --city Pune --meal-type Dinner
  foodshare claim --receiver 3 --food 12 --status Pending
  foodshare analysis "Claims Status %"
  foodshare table claims
  foodshare serve --port 8501
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for read commands
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema and a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Serve the dashboard API and UI over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show summary counters and recently added listings
    Dashboard,

    /// Browse food listings, optionally filtered
    Browse {
        #[arg(long, default_value = Selection::ALL)]
        city: String,

        #[arg(long, default_value = Selection::ALL)]
        provider_type: String,

        #[arg(long, default_value = Selection::ALL)]
        food_type: String,

        #[arg(long, default_value = Selection::ALL)]
        meal_type: String,
    },

    /// List the values each browse filter accepts
    Options,

    /// List receivers and food items that can be claimed
    Choices,

    /// Create a claim
    Claim {
        /// Receiver id
        #[arg(short, long)]
        receiver: i64,

        /// Food listing id
        #[arg(long)]
        food: i64,

        /// Pending, Completed or Cancelled
        #[arg(short, long, default_value = "Pending")]
        status: String,
    },

    /// Add a provider
    AddProvider {
        #[arg(long)]
        name: String,

        #[arg(long = "type")]
        provider_type: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        contact: String,
    },

    /// Print every row of a base table
    Table {
        /// providers, receivers, food_listings or claims
        name: String,
    },

    /// Run an analysis query (lists the menu when no name is given)
    Analysis {
        /// Analysis name or slug, e.g. "Claims Status %" or claims-status-percent
        name: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(err) = run(cli) {
        ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config = config::load_config(Some(&config_path))?.unwrap_or_default();
    let database = config.database_path(cli.database.clone());
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Init { force } => {
            config::ensure_db_dir(&database)?;
            let store = SqliteStore::create(&database)?;
            let summary = views::dashboard::summary(&store)?;

            if !config_path.exists() || force {
                let written = FoodshareConfig {
                    database: Some(database.to_string_lossy().to_string()),
                    ..FoodshareConfig::with_defaults()
                };
                config::write_config(&config_path, &written, force)?;
                ui::info("Config", &config_path.display().to_string());
            }

            ui::info("Database", &database.display().to_string());
            ui::success(&format!(
                "Schema ready ({} providers, {} receivers, {} listings, {} claims)",
                summary.providers, summary.receivers, summary.food_listings, summary.claims
            ));
        }

        Commands::Serve { port } => {
            let store = SqliteStore::open(&database)?;
            let port = config.port(port);
            let ui_dir = config.ui_dir();

            ui::header(Icons::GLOBE, &format!("Server running at http://0.0.0.0:{}", port));
            ui::info("Database", &database.display().to_string());
            if !ui_dir.exists() {
                ui::warn(&format!("UI directory {} not found; only /api routes are served", ui_dir.display()));
            }

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(foodshare::server::start_server(port, store, ui_dir))?;
        }

        Commands::Dashboard => {
            let store = SqliteStore::open(&database)?;
            let dashboard = views::dashboard(&store)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                ui::header(Icons::STATS, "Dashboard");
                let providers = dashboard.summary.providers.to_string();
                let receivers = dashboard.summary.receivers.to_string();
                let listings = dashboard.summary.food_listings.to_string();
                let claims = dashboard.summary.claims.to_string();
                println!(
                    "{}",
                    ui::stats_table(&[
                        ("Total Providers", &providers),
                        ("Total Receivers", &receivers),
                        ("Food Listings", &listings),
                        ("Claims", &claims),
                    ])
                );
                ui::section("Recently Added Listings");
                print_table(&dashboard.recent_listings);
            }
        }

        Commands::Browse { city, provider_type, food_type, meal_type } => {
            let store = SqliteStore::open(&database)?;
            let filters = Filters {
                city: Selection::parse(&city),
                provider_type: Selection::parse(&provider_type),
                food_type: Selection::parse(&food_type),
                meal_type: Selection::parse(&meal_type),
            };
            let listings = views::browse(&store, &filters)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            } else {
                ui::header(Icons::FOLDER, "Available Food Listings");
                ui::summary_row(
                    "Filters:",
                    &format!(
                        "city={} provider_type={} food_type={} meal_type={}",
                        filters.city, filters.provider_type, filters.food_type, filters.meal_type
                    ),
                );
                print_table(&listings);
                ui::summary_row("Rows:", &listings.len().to_string());
            }
        }

        Commands::Options => {
            let store = SqliteStore::open(&database)?;
            let options = views::filter_options(&store)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                ui::header(Icons::MAG, "Filter Options");
                for (label, values) in [
                    ("City", &options.cities),
                    ("Provider Type", &options.provider_types),
                    ("Food Type", &options.food_types),
                    ("Meal Type", &options.meal_types),
                ] {
                    ui::section(label);
                    println!("  {}", FilterOptions::with_all(values).join(", "));
                }
            }
        }

        Commands::Choices => {
            let store = SqliteStore::open(&database)?;
            let choices = views::claim_choices(&store)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&choices)?);
            } else {
                ui::header(Icons::HANDSHAKE, "Claim Choices");
                if !choices.is_available() {
                    ui::warn("A claim needs at least one receiver and one food listing.");
                }
                ui::section("Receivers");
                for (id, label) in choices.receivers.iter() {
                    println!("  {:>5}  {}", id, label);
                }
                ui::section("Food Items");
                for (id, label) in choices.food.iter() {
                    println!("  {:>5}  {}", id, label);
                }
                ui::section("Status");
                let statuses: Vec<String> = choices.statuses.iter().copied().map(ui::status).collect();
                println!("  {}", statuses.join(", "));
            }
        }

        Commands::Claim { receiver, food, status } => {
            let store = SqliteStore::open(&database)?;
            let status: ClaimStatus = status.parse()?;
            let claim = NewClaim { receiver_id: receiver, food_id: food, status };
            let id = views::create_claim(&store, &claim)?;

            if json {
                println!("{}", serde_json::json!({ "claim_id": id }));
            } else {
                ui::success(&format!("Claim {} created successfully!", id));
                ui::summary_row("Status:", &ui::status(status));
            }
        }

        Commands::AddProvider { name, provider_type, address, city, contact } => {
            let store = SqliteStore::open(&database)?;
            let provider = NewProvider { name, provider_type, address, city, contact };
            let id = views::add_provider(&store, &provider)?;

            if json {
                println!("{}", serde_json::json!({ "provider_id": id }));
            } else {
                ui::success(&format!("Provider {} added successfully!", id));
            }
        }

        Commands::Table { name } => {
            let table: TableName = name.parse()?;
            let store = SqliteStore::open(&database)?;
            let rows = store.load(table)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                ui::header(Icons::DATABASE, table.as_str());
                print_table(&rows);
                ui::summary_row("Rows:", &rows.len().to_string());
            }
        }

        Commands::Analysis { name } => {
            let Some(name) = name else {
                if json {
                    let menu: Vec<_> = AnalysisQuery::all()
                        .iter()
                        .map(|q| serde_json::json!({ "name": q.name(), "slug": q.slug() }))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&menu)?);
                } else {
                    ui::header(Icons::STATS, "Available Analyses");
                    for query in AnalysisQuery::all() {
                        ui::summary_row(query.name(), &ui::muted(query.slug()));
                    }
                }
                return Ok(());
            };

            let store = SqliteStore::open(&database)?;
            let query: AnalysisQuery = name.parse()?;
            let result = query.run(&store)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                ui::header(Icons::STATS, &format!("Analysis - {}", query.name()));
                print_table(&result);
            }
        }
    }

    Ok(())
}

fn print_table(table: &foodshare::Table) {
    if table.is_empty() {
        println!("  {}", ui::muted("(no rows)"));
    } else {
        println!("{}", ui::render_table(table));
    }
}
