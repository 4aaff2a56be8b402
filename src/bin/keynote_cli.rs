//! Listing front-end for the Keynote dashboard API.

use clap::Parser;

use keynoteapi::cli::{init_logging, CliArgs};
use keynoteapi::client::{KeynoteClient, KeynoteConfig};
use keynoteapi::error::Result;
use keynoteapi::listing;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let mut config = KeynoteConfig::default();
    if let Some(key) = args.apikey {
        config = config.with_api_key(key);
    }
    let mut client = KeynoteClient::new(config)?;

    if args.list_measurement_slots {
        listing::render_listing(&mut client, &mut std::io::stdout()).await?;
    } else {
        eprintln!("Nothing to do. Try --list-measurement-slots.");
    }
    Ok(())
}
