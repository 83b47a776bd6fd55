//! Helmbase CLI - Preview strongly typed Helm chart components offline

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "helmbase")]
#[command(author = "Helmbase Contributors")]
#[command(version)]
#[command(about = "Preview strongly typed Helm chart components offline", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Chart catalog file (default: <config dir>/helmbase/charts.yaml)
    #[arg(long, global = true, env = "HELMBASE_CATALOG")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Construct a chart component against an in-memory engine and print the registrations
    Preview {
        /// Type token of the chart component
        #[arg(value_name = "TYPE")]
        type_token: String,

        /// Component name
        name: String,

        /// Input file(s) to merge (YAML or JSON)
        #[arg(short = 'f', long = "inputs")]
        inputs: Vec<PathBuf>,

        /// Set inputs on command line (key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Stack name used in URNs
        #[arg(long, default_value = "dev")]
        stack: String,

        /// Project name used in URNs
        #[arg(long, default_value = "helmbase")]
        project: String,

        /// Output registrations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the chart catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List declared charts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Declare a chart variant
    Add {
        /// Type token, <package>:<module>:<name>
        #[arg(value_name = "TYPE")]
        type_token: String,

        /// Default chart name
        #[arg(long)]
        chart: String,

        /// Default repository URL
        #[arg(long)]
        repo: String,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a chart variant
    Remove {
        /// Type token of the chart to remove
        #[arg(value_name = "TYPE")]
        type_token: String,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let catalog = cli.catalog.as_deref();
    let result = match cli.command {
        Commands::Preview {
            type_token,
            name,
            inputs,
            set,
            stack,
            project,
            json,
        } => {
            commands::preview::run(commands::preview::PreviewOptions {
                type_token: &type_token,
                name: &name,
                input_files: &inputs,
                set: &set,
                catalog,
                stack: &stack,
                project: &project,
                json,
            })
            .await
        }

        Commands::Catalog { command } => match command {
            CatalogCommands::List { json } => commands::catalog::list(catalog, json),
            CatalogCommands::Add {
                type_token,
                chart,
                repo,
                description,
            } => commands::catalog::add(catalog, &type_token, &chart, &repo, description.as_deref()),
            CatalogCommands::Remove { type_token } => {
                commands::catalog::remove(catalog, &type_token)
            }
        },
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
