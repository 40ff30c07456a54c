//! Grantex CLI - extract structured grant data from PDF award documents.

use clap::Parser;
use grantex_cli::{ingest, output, Cli, CliError, Config, StatusLine};
use grantex_extractor::{EngineConfig, Extractor, GrantAssembler};
use grantex_llm::OpenAiProvider;
use grantex_store::SemanticIndex;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> grantex_cli::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.k == 0 {
        return Err(CliError::Input("k must be a positive integer".into()));
    }

    let status = StatusLine::new(!cli.no_color);

    // Load or create config, then let the environment and flags override
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });
    config.apply_env();
    if let Some(model) = cli.model.clone() {
        config.llm.model = model;
    }
    let llm_config = config.llm_config()?;

    let inputs = ingest::resolve_inputs(&cli.files, cli.folder.as_deref())?;
    println!("{}", status.info(&format!("Parsing {} PDF file(s)", inputs.len())));
    let pages = ingest::load_pages(&inputs)?;
    if pages.is_empty() {
        return Err(CliError::Input("No pages extracted from input files".into()));
    }

    println!("{}", status.info(&format!("Indexing {} page(s)", pages.len())));
    let embedder = config.embedder();
    let index = tokio::task::spawn_blocking(move || SemanticIndex::build(embedder, pages))
        .await
        .map_err(|e| CliError::Internal(format!("Index build task failed: {}", e)))??;
    let index = Arc::new(index);

    println!("{}", status.info("Running extraction tasks"));
    let provider = OpenAiProvider::new(llm_config);
    let extractor = Extractor::new(provider, EngineConfig::default());
    let assembler = GrantAssembler::new(index, extractor, cli.k);
    let record = assembler.run().await?;

    output::write_record(&record, &cli.output)?;
    println!(
        "{}",
        status.success(&format!("Finished writing to {}", cli.output.display()))
    );

    Ok(())
}
