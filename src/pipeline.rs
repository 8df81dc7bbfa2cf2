//! End-to-end processing, from source texts to output files

use crate::{
    config::{Config, NGRAM_ORDERS},
    corpus,
    ngrams::NgramTable,
    output::{self, CorpusStats, Model},
    progress::{ProgressConfig, ProgressReport, Work},
    seeds::{self, SeedProfile, WordFrequencies, FAST_FEATURED_WORDS, FEATURED_WORDS},
    text, Result, Token,
};
use std::path::PathBuf;

/// What a pipeline run produced, for display purposes
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    /// Corpus statistics
    pub stats: CorpusStats,

    /// Selected seed words
    pub seed_words: Box<[Box<str>]>,

    /// Number of distinct contexts for each n-gram order
    pub contexts_per_order: Box<[(usize, usize)]>,

    /// Files that were written
    pub files: Box<[PathBuf]>,
}
//
impl Summary {
    /// Display final statistics on stdout
    pub fn print(&self) {
        let Self {
            stats,
            seed_words,
            contexts_per_order,
            files,
        } = self;
        println!();
        println!("Final statistics:");
        println!("  Total tokens: {}", stats.total_tokens);
        println!("  Unique tokens: {}", stats.unique_tokens);
        for (n, contexts) in contexts_per_order.iter() {
            println!("  Distinct {n}-gram contexts: {contexts}");
        }
        println!("  Seed words: {}", seed_words.len());
        println!(
            "  Examples: {}",
            (seed_words.iter().take(10))
                .map(|word| &**word)
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
        println!("Generated files:");
        for file in files.iter() {
            println!("  - {}", file.display());
        }
    }
}

/// Load the corpus, tabulate it and write output files
///
/// Nothing is written if the source texts cannot be found.
pub async fn run(config: &Config, report: &ProgressReport) -> Result<Summary> {
    // Load the source texts
    let corpus = corpus::load(&config.data_dirs).await?;
    println!(
        "Loaded source texts from {} after {} failed attempt(s)",
        corpus.dir.display(),
        corpus.skipped.len()
    );
    println!("Full text: {} characters", corpus.text.chars().count());

    // Turn them into a token stream
    let normalized = text::normalize(&corpus.text, config.charset);
    let fast_normalized = config.fast.then(|| text::normalize_fast(&corpus.text));
    drop(corpus);
    let tokens = text::tokenize(&normalized);
    println!("Tokens: {}", tokens.len());

    // Pick seed words
    let frequencies = WordFrequencies::count(&tokens);
    let seed_words = SeedProfile::standard(config.charset).select(&frequencies);
    for &word in &seed_words {
        log::trace!("Seed word {word:?} occurs {} times", frequencies.get(word));
    }
    println!("Seed words: {}", seed_words.len());

    // Tabulate n-grams
    let tables = tabulate(&tokens, "Tabulating n-grams", report)?;
    for table in tables.iter().filter(|table| table.is_empty()) {
        log::warn!("Corpus is too short to contain any {}-gram", table.n());
    }

    // Collect everything that goes into the outputs
    let stats = CorpusStats {
        total_tokens: tokens.len(),
        unique_tokens: frequencies.unique_words(),
        featured_seed_words: seeds::count_featured(&seed_words, FEATURED_WORDS),
    };
    let model = Model {
        seed_words,
        tables,
        stats,
    };

    // The fast model has its own cleanup, so it is tabulated separately
    let fast_model = match &fast_normalized {
        Some(fast_normalized) => {
            let tokens = text::tokenize(fast_normalized);
            let frequencies = WordFrequencies::count(&tokens);
            let seed_words = SeedProfile::FAST.select(&frequencies);
            println!("Fast model seed words: {}", seed_words.len());
            let stats = CorpusStats {
                total_tokens: tokens.len(),
                unique_tokens: frequencies.unique_words(),
                featured_seed_words: seeds::count_featured(&seed_words, FAST_FEATURED_WORDS),
            };
            Some(Model {
                seed_words,
                tables: tabulate(&tokens, "Tabulating fast model n-grams", report)?,
                stats,
            })
        }
        None => None,
    };
    let fast = fast_model.as_ref().map(Model::fast).transpose()?;

    // Write output files
    let artifacts = output::render(config, &model, fast.as_ref())?;
    output::write_all(config, &artifacts, report).await?;
    for artifact in &artifacts {
        println!("Saved {}", artifact.path.display());
    }

    Ok(Summary {
        stats,
        seed_words: (model.seed_words.iter()).map(|&word| word.into()).collect(),
        contexts_per_order: (model.tables.iter())
            .map(|table| (table.n(), table.len()))
            .collect(),
        files: artifacts.into_iter().map(|artifact| artifact.path).collect(),
    })
}

/// Tabulate n-grams of every order that goes into the outputs
fn tabulate<'text>(
    tokens: &[Token<'text>],
    what: &'static str,
    report: &ProgressReport,
) -> Result<Vec<NgramTable<'text>>> {
    let orders = NGRAM_ORDERS;
    let tables_done = report.add(
        what,
        ProgressConfig::new(Work::Steps(orders.clone().count())).dont_show_rate_eta(),
    );
    NgramTable::build_all(tokens, orders, |table| {
        log::debug!(
            "{}-gram table holds {} continuations",
            table.n(),
            table.iter().map(|(_context, next)| next.len()).sum::<usize>()
        );
        tables_done.make_progress(1);
    })
}
