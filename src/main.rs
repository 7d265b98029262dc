//! `routegate` — inspect and watch gateway route tables.
//!
//! ```text
//! routegate check  routes.yaml          validate, print route count
//! routegate dump   routes.yaml [--json] print every route
//! routegate lookup routes.yaml /users   resolve one path
//! routegate watch  routes.yaml          reload on change / SIGHUP until ctrl-c
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use routegate::config::RouteSource;
use routegate::lifecycle::startup::{run_watch, WatchOptions};
use routegate::observability::logging::init_logging;
use routegate::Router;

#[derive(Parser)]
#[command(name = "routegate")]
#[command(about = "Inspect and hot-reload gateway route tables", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a route file
    Check { file: PathBuf },
    /// Print every route in a route file
    Dump {
        file: PathBuf,
        /// Print a JSON object keyed by path instead of text lines
        #[arg(long)]
        json: bool,
    },
    /// Resolve a single request path
    Lookup { file: PathBuf, path: String },
    /// Keep the route table live, reloading on file change and SIGHUP
    Watch {
        file: PathBuf,
        #[arg(long, default_value_t = 2)]
        poll_interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Check { file } => match Router::from_path(&file) {
            Ok(router) => {
                println!("{}: {} routes OK", file.display(), router.table().len());
            }
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Dump { file, json } => {
            let router = Router::from_path(file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&router.snapshot())?);
            } else {
                print!("{}", router.export_text());
            }
        }
        Commands::Lookup { file, path } => {
            let router = Router::from_path(file)?;
            match router.lookup(&path) {
                Some(entry) => println!("{} -> {}", path, entry),
                None => {
                    eprintln!("no route for {}", path);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Watch {
            file,
            poll_interval_secs,
        } => {
            tracing::info!("routegate v{} starting", env!("CARGO_PKG_VERSION"));
            run_watch(WatchOptions {
                source: RouteSource::new(file),
                poll_interval: Duration::from_secs(poll_interval_secs),
            })
            .await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
