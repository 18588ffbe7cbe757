use std::collections::BTreeMap;
use std::io::Write;
use std::{
    env,
    fs::{self, OpenOptions},
};

use anyhow::Context;
use serde::Serialize;
use slatedeck::deck::{Deck, NavPolicy, Slide};
use slatedeck::export::create_output_dir;
use slatedeck::snapshot::DeckSnapshot;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DEFAULT_OUTPUT_DIR: &str = "output/deck";

pub struct Config {
    pub snapshot_path: String,
    pub output_dir: String,
}

impl Config {
    pub fn new(snapshot_path: String, output_dir: &str) -> Self {
        Self {
            snapshot_path,
            output_dir: output_dir.to_string(),
        }
    }
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let snapshot_path = args
        .next()
        .context("snapshot path is required, save one from the deck with the Save button or the state store")?;
    let output_dir = args.next().unwrap_or(DEFAULT_OUTPUT_DIR.to_string());

    Ok(Config::new(snapshot_path, &output_dir))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = env::args().skip(1);

    let config = match parse_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: cargo run --bin export_deck <snapshot.json> [output_dir]");
            return Err(e);
        }
    };

    let raw = fs::read_to_string(&config.snapshot_path)
        .context(format!("could not read {}", config.snapshot_path))?;
    let snapshot = DeckSnapshot::parse(&raw)
        .context("the file does not contain a valid deck snapshot")?;

    let mut deck = Deck::new(NavPolicy::Wrap);
    snapshot.apply(&mut deck);

    create_output_dir(&config.output_dir).context("failed to create output directory")?;

    let deck_str = create_deck_metadata(&deck, &snapshot, &config.output_dir)
        .context("failed to create deck metadata")?;

    let mut slugger = github_slugger::Slugger::default();
    for (index, slide) in deck.slides().iter().enumerate() {
        let slug = slugger.slug(&slide.title_label(index));
        if let Err(e) = create_page(slide, index, &slug, &config.output_dir) {
            eprintln!("Error writing slide {}: {}", slug, e);
            return Err(e);
        }
    }

    println!("Loaded deck snapshot\n");
    println!("---");
    println!("{}", deck_str);
    println!("---\n");

    println!(
        "created {BOLD}{}{RESET} pages in {BOLD}{}{RESET}",
        deck.len(),
        &config.output_dir
    );

    Ok(())
}

fn create_deck_metadata(
    deck: &Deck,
    snapshot: &DeckSnapshot,
    output_dir: &str,
) -> anyhow::Result<String> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/deck.yaml", output_dir))
        .context("failed to open file for deck.yaml")?;

    let mut map = BTreeMap::<&str, DeckFrontmatter>::new();
    map.insert("version", DeckFrontmatter::Version(snapshot.version));
    map.insert("slide_count", DeckFrontmatter::SlideCount(deck.len()));
    map.insert(
        "active_slide",
        DeckFrontmatter::ActiveSlide(deck.active_index()),
    );
    map.insert("counter", DeckFrontmatter::Counter(deck.counter()));

    let content = serde_yaml_ng::to_string(&map).context("failed to serialize deck metadata")?;
    write!(file, "{}", content).context("failed to write deck metadata")?;

    Ok(content)
}

fn create_page(slide: &Slide, index: usize, slug: &str, output_dir: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/{}.md", output_dir, slug))
        .context(format!("failed to open file for {}", slug))?;

    let mut fm: BTreeMap<&str, SlideFrontmatter> = BTreeMap::new();
    let id = slide.slide_id(index);
    let stage = slide.stage_label(index);
    let title = slide.title_label(index);
    fm.insert("id", SlideFrontmatter::Id(&id));
    fm.insert("stage", SlideFrontmatter::Stage(&stage));
    fm.insert("title", SlideFrontmatter::Title(&title));
    fm.insert("order", SlideFrontmatter::Order(index));
    fm.insert(
        "activities",
        SlideFrontmatter::Activities(
            slide
                .activities()
                .map(|a| a.kind().as_str())
                .collect::<Vec<&str>>(),
        ),
    );

    writeln!(
        file,
        r#"---
{}---

{}"#,
        serde_yaml_ng::to_string(&fm)?,
        slide.content
    )
    .context(format!("failed to write slide {}", slug))?;

    Ok(())
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum DeckFrontmatter {
    Version(u32),
    SlideCount(usize),
    ActiveSlide(usize),
    Counter(String),
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum SlideFrontmatter<'a> {
    Id(&'a str),
    Stage(&'a str),
    Title(&'a str),
    Order(usize),
    Activities(Vec<&'a str>),
}
