//! PM Advisor CLI.
//!
//! Reads a project description, runs the assessment and RAID pipelines
//! against the configured model, prints both presentation surfaces, and
//! optionally writes the exported deck to disk.
//!
//! Usage: `pm-advisor <description-file> [output.pptx]`

use std::fs;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use pm_advisor::adapters::ai::{AnthropicClient, AnthropicConfig};
use pm_advisor::adapters::export::PptxExporter;
use pm_advisor::adapters::storage::FileStore;
use pm_advisor::application::{AssessmentHandler, RaidGenerationHandler};
use pm_advisor::config::AppConfig;
use pm_advisor::domain::deck::DeckViewer;
use pm_advisor::domain::raid::{render_table, RaidStore};
use pm_advisor::ports::DeckExporter;

const STATE_FILE: &str = ".pm-advisor/state.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(description_path) = args.next() else {
        eprintln!("usage: pm-advisor <description-file> [output.pptx]");
        std::process::exit(2);
    };
    let output_path = args.next();

    let config = AppConfig::load()?;
    config.validate()?;

    let description = fs::read_to_string(&description_path)?;

    let generator = Arc::new(AnthropicClient::new(AnthropicConfig::from_app_config(
        &config.ai,
    )));
    let storage = Arc::new(FileStore::open(STATE_FILE));

    // Assessment: description -> recommendation -> sections -> deck.
    let assess_handler = AssessmentHandler::new(
        generator.clone(),
        storage.clone(),
        config.assessment.clone(),
    );
    let assessment = assess_handler.assess(&description).await?;

    if assessment.is_empty() {
        println!("Nothing generated: the model response carried no recognizable sections.");
        println!("Raw response follows.\n\n{}", assessment.recommendation);
    } else {
        let mut viewer = DeckViewer::new(&assessment.deck);
        loop {
            let (position, total) = viewer.position();
            println!("--- Slide {} of {} ---", position, total);
            println!("{}", viewer.render_current());
            if !viewer.next() {
                break;
            }
        }
    }

    // RAID log: description -> tagged response -> records -> store.
    let raid_handler = RaidGenerationHandler::new(generator, config.assessment.clone());
    let generation = raid_handler.generate(&description).await?;

    let mut raid_store = RaidStore::load(storage);
    if generation.is_empty() {
        println!("No RAID items generated; add entries manually or retry.");
    } else {
        raid_store.bulk_replace(generation.records);
        println!("\nRAID Log\n{}", render_table(raid_store.items()));
    }

    if let Some(path) = output_path {
        let exported = PptxExporter::new().export(&assessment.deck)?;
        fs::write(&path, &exported.content)?;
        info!(path = %path, bytes = exported.content.len(), "deck exported");
        println!("Exported {} slides to {}", assessment.deck.len(), path);
    }

    Ok(())
}
