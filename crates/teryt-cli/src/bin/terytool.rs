use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use teryt_cli::commands::{config_ops, parse_unit_type, search_ops};
use teryt_core::UnitType;

#[derive(Parser)]
#[command(name = "terytool", about = "Territorial unit lookup diagnostics")]
struct Cli {
    /// Custom settings TOML (replaces the built-in defaults)
    #[arg(long, global = true)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search units the way the report form does
    Search {
        /// Query text (at least two characters)
        query: String,
        /// Restrict to one unit type (wojewodztwo, powiat, gmina, miasto)
        #[arg(long = "type", value_parser = parse_unit_type)]
        unit_type: Option<UnitType>,
        /// Path to the dataset JSON (default: from settings)
        #[arg(long)]
        dataset: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List every unit of one type in dataset order
    List {
        /// Unit type (wojewodztwo, powiat, gmina, miasto)
        #[arg(value_parser = parse_unit_type)]
        unit_type: UnitType,
        /// Path to the dataset JSON (default: from settings)
        #[arg(long)]
        dataset: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the contact address for a unit name
    Contact {
        /// Unit name as shown in the dataset
        name: String,
        /// Unit type; without it the generic template is used for unknown names
        #[arg(long = "type", value_parser = parse_unit_type)]
        unit_type: Option<UnitType>,
        /// Path to the dataset JSON (default: from settings)
        #[arg(long)]
        dataset: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load the dataset and print per-type counts
    Stats {
        /// Path to the dataset JSON (default: from settings)
        #[arg(long)]
        dataset: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the settings file
        file: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(file) = cli.settings.as_deref() {
        if let Err(e) = config_ops::apply_settings_file(file) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    match cli.command {
        Command::Search {
            query,
            unit_type,
            dataset,
            json,
        } => search_ops::search(dataset.as_deref(), &query, unit_type, json).await,
        Command::List {
            unit_type,
            dataset,
            json,
        } => search_ops::list(dataset.as_deref(), unit_type, json).await,
        Command::Contact {
            name,
            unit_type,
            dataset,
            json,
        } => search_ops::contact(dataset.as_deref(), &name, unit_type, json).await,
        Command::Stats { dataset, json } => search_ops::stats(dataset.as_deref(), json).await,
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
