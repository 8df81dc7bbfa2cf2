//! Batch builder for the word n-gram tables that feed a Markov-chain text
//! generator.
//!
//! Two Portuguese translations of the Alice books are read, normalized and
//! tokenized, then every n-gram order from 2 to 6 is tabulated along with a
//! list of seed words for the generator to start from. Results are written
//! out as JSON files.

mod config;
mod corpus;
mod ngrams;
mod output;
mod pipeline;
mod progress;
mod seeds;
mod text;

use crate::{config::Config, corpus::LoadError, progress::ProgressReport, text::Charset};
use clap::Parser;
use log::LevelFilter;
use std::{path::PathBuf, process::ExitCode};

/// Build Markov-chain n-gram tables and seed words from the Alice corpora
///
/// The two source texts (maravilha-limpo.txt and espelho-limpo.txt) are
/// looked up in a list of candidate directories, and the first directory that
/// contains both of them is used.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Directory where the source texts may be found
    ///
    /// Can be specified multiple times, in which case directories are tried
    /// in the order where they were specified. If unspecified, a built-in list
    /// of usual locations is tried.
    #[arg(short, long = "data-dir")]
    data_dirs: Vec<PathBuf>,

    /// Directory where output files will be written
    ///
    /// Per-order n-gram tables go into an "ngrams" subdirectory, which is
    /// created if needed.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Which characters count as word characters during text cleanup
    ///
    /// The default "ascii" class drops accented letters, which is what the
    /// downstream generator was tuned with. "unicode" keeps them.
    #[arg(long, value_enum, default_value_t = Charset::Ascii)]
    charset: Charset,

    /// Also emit a pruned "alice_fast.json" model
    ///
    /// This model only keeps contexts that were seen at least twice, and only
    /// the most popular of those, which makes it a lot faster to load.
    #[arg(long, default_value_t = false)]
    fast: bool,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        let args = Args::parse();
        for dir in &args.data_dirs {
            anyhow::ensure!(
                !dir.as_os_str().is_empty(),
                "data directories should not be empty paths"
            );
        }
        anyhow::ensure!(
            !args.output_dir.as_os_str().is_empty(),
            "output directory should not be an empty path"
        );
        Ok(args)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Set up logging, but don't let a missing syslog daemon stop us
    if let Err(e) = setup_logging() {
        eprintln!("warning: running without logs, syslog is unavailable ({e})");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(LoadError::SourceUnavailable { candidates }) = e.downcast_ref::<LoadError>()
            {
                println!("Could not load the source texts!");
                println!("Make sure that they are in one of these locations:");
                for dir in candidates.iter() {
                    println!("- {}", dir.display());
                }
                log::error!("{e}");
                ExitCode::from(2)
            } else {
                log::error!("{e:#}");
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}

/// Decode the configuration and run the processing pipeline
async fn run() -> Result<()> {
    let args = Args::parse_and_check()?;
    let config = Config::new(args);
    log::debug!("Running with {config:#?}");
    let report = ProgressReport::new();
    let summary = pipeline::run(&config, &report).await?;
    summary.print();
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Normalized word from the corpus, borrowed from the normalized text
pub type Token<'text> = &'text str;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
