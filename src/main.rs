use clap::Parser;
use rickdex::api::ResourceKind;
use rickdex::core::config::{self, CliOverrides, RickdexConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "rickdex", about = "Browse the Rick and Morty API from the terminal")]
struct Args {
    /// Resource to open first
    #[arg(short, long, value_enum)]
    resource: Option<ResourceKind>,

    /// Initial name filter
    #[arg(short, long)]
    search: Option<String>,

    /// API base URL (overrides RICKDEX_BASE_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to rickdex.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("rickdex.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        RickdexConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            resource: args.resource,
            search: args.search,
        },
    );

    log::info!("rickdex starting up: {:?}", resolved);

    rickdex::tui::run(resolved)
}
