// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_harvest::{
    harvest, list_pages, resolve_api_key, AppError, Command, CommandLineInput, CrawlArgs,
    HarvestConfig, HarvestReport, NotionHttpClient, LOG_FILE_NAME,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Progress goes to stderr so `list-pages` output stays pipeable.
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Crawls the configured root into the corpus file.
async fn execute_crawl(token: Option<String>, args: CrawlArgs) -> Result<(), AppError> {
    let config = HarvestConfig::resolve(token, args)?;
    log::info!("Checking ID: {}", config.root);

    let client = NotionHttpClient::new(&config.api_key)?;
    let report = harvest(&client, &config).await?;
    report_completion(&config, &report);
    Ok(())
}

/// Prints every page visible to the integration.
async fn execute_list_pages(token: Option<String>) -> Result<(), AppError> {
    let api_key = resolve_api_key(token)?;
    let client = NotionHttpClient::new(&api_key)?;

    log::info!("Searching for pages visible to this integration...");
    let (pages, error) = list_pages(&client).await;
    for page in &pages {
        println!("{}", page);
    }
    log::info!("{} pages found", pages.len());

    match error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn report_completion(config: &HarvestConfig, report: &HarvestReport) {
    eprintln!("{}", report.stats);
    eprintln!(
        "Processed ids: {} ({} new this run), saved to {}",
        report.processed_total,
        report.newly_processed,
        config.state_path.display()
    );
    eprintln!(
        "Done. {} lines written to {}",
        report.output.lines_written,
        config.output_path.display()
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    match cli.command {
        Command::Crawl(args) => execute_crawl(cli.token, args).await?,
        Command::ListPages => execute_list_pages(cli.token).await?,
    }

    Ok(())
}
