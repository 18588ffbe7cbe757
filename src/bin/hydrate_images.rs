use std::{env, fs};

use anyhow::Context;
use dotenv::dotenv;
use slatedeck::deck::{Deck, NavPolicy};
use slatedeck::media::{hydrate_deck, ImageSearchClient};
use slatedeck::snapshot::DeckSnapshot;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub struct Config {
    pub snapshot_path: String,
    pub output_path: Option<String>,
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let snapshot_path = args
        .next()
        .context("snapshot path is required; set PEXELS_API_KEY in the environment or a .env file to enable image search")?;
    let output_path = args.next();

    Ok(Config {
        snapshot_path,
        output_path,
    })
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = env::args().skip(1);

    let config = match parse_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: cargo run --bin hydrate_images <snapshot.json> [hydrated.json]");
            return Err(e);
        }
    };

    let raw = fs::read_to_string(&config.snapshot_path)
        .context(format!("could not read {}", config.snapshot_path))?;
    let snapshot = DeckSnapshot::parse(&raw)
        .context("the file does not contain a valid deck snapshot")?;

    let mut deck = Deck::new(NavPolicy::Wrap);
    snapshot.apply(&mut deck);

    let mut client = ImageSearchClient::from_env();
    let summary = hydrate_deck(&mut client, &mut deck);

    println!(
        "hydrated {BOLD}{}{RESET} images, {BOLD}{}{RESET} fell back to placeholders, {BOLD}{}{RESET} already settled",
        summary.hydrated, summary.failed, summary.skipped
    );

    if let Some(output_path) = &config.output_path {
        let hydrated = DeckSnapshot::capture(&deck).context("failed to capture hydrated deck")?;
        hydrated
            .write_to_file(output_path)
            .context(format!("failed to write {}", output_path))?;
        println!("wrote hydrated snapshot to {BOLD}{}{RESET}", output_path);
    }

    Ok(())
}
