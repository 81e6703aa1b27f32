// src/main.rs
mod document;
mod extractors;
mod report;
mod utils;

use clap::Parser;
use std::time::Instant;
use utils::AppError;

/// Command Line Interface for the report figure scanner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path or URL of the PDF report to scan
    input: String,

    /// Number of rows shown in the top-N result tables
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Emit results as JSON instead of formatted tables
    #[arg(long)]
    json: bool,

    /// Debug mode - save annotated page text for debugging
    #[arg(short, long)]
    debug: bool,

    /// Output directory for debug artifacts
    #[arg(short, long, default_value = "./output")]
    output_dir: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting scan for args: {:?}", args);

    if args.top == 0 {
        return Err(AppError::Config("--top must be at least 1".to_string()));
    }

    let started = Instant::now();

    // 3. Acquire the document and extract per-page text
    let pages: Vec<document::PageText> = if document::client::is_remote_input(&args.input) {
        let bytes = document::client::download_document(&args.input).await?;
        tracing::info!("Successfully downloaded document ({} bytes)", bytes.len());
        document::reader::read_pages_mem(&bytes)?
    } else {
        tracing::info!("Reading local document: {}", args.input);
        document::reader::read_pages(&args.input)?
    };

    // 4. Optionally dump annotated page text for debugging
    if args.debug {
        std::fs::create_dir_all(&args.output_dir)?;
        for page in &pages {
            let path = format!("{}/page_{:04}.txt", args.output_dir, page.number);
            if let Err(e) = utils::text_debug::save_debug_page(&page.text, &path) {
                tracing::warn!("Failed to save debug text for page {}: {}", page.number, e);
            }
        }
    }

    // 5. Run both scans over the pages
    let numbers =
        extractors::numbers::process_pages(pages.iter().map(|p| (p.number, p.text.as_str())));
    tracing::info!(
        "Found {} base literals; {} pages produced contextual records",
        numbers.base.len(),
        numbers.contextual.len()
    );

    // 6. Present the results
    if args.json {
        println!("{}", report::render_json(&numbers, args.top)?);
    } else {
        report::print_report(&numbers, args.top);
    }

    tracing::info!(
        "Total execution time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
