//! JSON output documents and their persistence
//!
//! Field names are those expected by the JavaScript generator that consumes
//! these files, hence the Portuguese.

use crate::{
    config::{Config, COMPACT_SAMPLES, FAST_MODEL_LIMITS, FAST_MODEL_MIN_OCCURENCES},
    ngrams::{NgramSample, NgramTable},
    progress::{ProgressConfig, ProgressReport, Work},
    Result, Token,
};
use anyhow::Context;
use serde::{ser::Serializer, Serialize};
use std::path::PathBuf;

/// Global statistics about the corpus
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct CorpusStats {
    /// Number of tokens
    pub total_tokens: usize,

    /// Number of distinct tokens
    #[serde(rename = "tokens_unicos")]
    pub unique_tokens: usize,

    /// Number of seed words that are main characters
    #[serde(rename = "palavras_alice")]
    pub featured_seed_words: usize,
}

/// Statistics in the abbreviated form used by the fast model
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct FastStats {
    #[serde(rename = "tokens")]
    pub total_tokens: usize,
    #[serde(rename = "unicos")]
    pub unique_tokens: usize,
    #[serde(rename = "alice_count")]
    pub featured_seed_words: usize,
}

impl From<CorpusStats> for FastStats {
    fn from(stats: CorpusStats) -> Self {
        let CorpusStats {
            total_tokens,
            unique_tokens,
            featured_seed_words,
        } = stats;
        Self {
            total_tokens,
            unique_tokens,
            featured_seed_words,
        }
    }
}

/// Everything that was learned from the corpus
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Model<'text> {
    /// Words that generation can start from, sorted
    pub seed_words: Vec<Token<'text>>,

    /// N-gram tables, by increasing order
    pub tables: Vec<NgramTable<'text>>,

    /// Corpus statistics
    pub stats: CorpusStats,
}
//
impl<'text> Model<'text> {
    /// N-gram table of a given order
    pub fn table(&self, n: usize) -> Result<&NgramTable<'text>> {
        (self.tables.iter())
            .find(|table| table.n() == n)
            .with_context(|| format!("no {n}-gram table was built"))
    }

    /// Document with every n-gram table in full
    pub fn complete(&self) -> CompleteDocument<'_, 'text> {
        CompleteDocument {
            seed_words: &self.seed_words,
            ngrams: ByOrder(self.tables.iter().map(|table| (table.n(), table)).collect()),
            stats: self.stats,
        }
    }

    /// Document with only the first entries of the low-order tables
    pub fn compact(&self) -> Result<CompactDocument<'_, 'text>> {
        let samples = (COMPACT_SAMPLES.iter())
            .map(|&(n, limit)| Ok((n, self.table(n)?.head(limit))))
            .collect::<Result<Vec<_>>>()?;
        Ok(CompactDocument {
            seed_words: &self.seed_words,
            stats: self.stats,
            samples: ByOrder(samples),
        })
    }

    /// Document with only the most popular entries of every table
    pub fn fast(&self) -> Result<FastDocument<'_, 'text>> {
        let ngrams = (FAST_MODEL_LIMITS.iter())
            .map(|&(n, limit)| {
                let sample = self.table(n)?.most_popular(FAST_MODEL_MIN_OCCURENCES, limit);
                log::debug!("Kept {} popular {n}-gram contexts for the fast model", sample.len());
                Ok((n, sample))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FastDocument {
            seed_words: &self.seed_words,
            stats: self.stats.into(),
            ngrams: ByOrder(ngrams),
        })
    }
}

/// Data keyed by n-gram order
///
/// Serializes as a map whose keys are the orders in decimal form, ordered
/// like the inner list.
#[derive(Clone, Debug)]
pub struct ByOrder<T>(Vec<(usize, T)>);
//
impl<T: Serialize> Serialize for ByOrder<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, data)| (n.to_string(), data)))
    }
}

/// Full dataset
#[derive(Clone, Debug, Serialize)]
pub struct CompleteDocument<'model, 'text> {
    #[serde(rename = "palavras_interessantes")]
    seed_words: &'model [Token<'text>],
    #[serde(rename = "ngramas")]
    ngrams: ByOrder<&'model NgramTable<'text>>,
    #[serde(rename = "estatisticas")]
    stats: CorpusStats,
}

/// Sample of the dataset, which is quick to load
#[derive(Clone, Debug, Serialize)]
pub struct CompactDocument<'model, 'text> {
    #[serde(rename = "palavras_interessantes")]
    seed_words: &'model [Token<'text>],
    #[serde(rename = "estatisticas")]
    stats: CorpusStats,
    #[serde(rename = "sample_ngramas")]
    samples: ByOrder<NgramSample<'model, 'text>>,
}

/// Pruned dataset
#[derive(Clone, Debug, Serialize)]
pub struct FastDocument<'model, 'text> {
    #[serde(rename = "palavras")]
    seed_words: &'model [Token<'text>],
    stats: FastStats,
    #[serde(rename = "ng")]
    ngrams: ByOrder<NgramSample<'model, 'text>>,
}

/// Output file, ready to be written
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    /// Destination
    pub path: PathBuf,

    /// JSON contents
    pub contents: Vec<u8>,
}

/// Serialize all output documents
///
/// The fast model is only rendered if it is provided.
pub fn render(
    config: &Config,
    model: &Model<'_>,
    fast: Option<&FastDocument<'_, '_>>,
) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::with_capacity(model.tables.len() + 3);
    artifacts.push(Artifact {
        path: config.compact_path(),
        contents: serde_json::to_vec_pretty(&model.compact()?)
            .context("serializing the compact document")?,
    });
    artifacts.push(Artifact {
        path: config.complete_path(),
        contents: serde_json::to_vec(&model.complete())
            .context("serializing the complete document")?,
    });
    for table in &model.tables {
        let n = table.n();
        artifacts.push(Artifact {
            path: config.ngrams_path(n),
            contents: serde_json::to_vec(table)
                .with_context(|| format!("serializing the {n}-gram table"))?,
        });
    }
    if let Some(fast) = fast {
        artifacts.push(Artifact {
            path: config.fast_path(),
            contents: serde_json::to_vec(fast).context("serializing the fast model")?,
        });
    }
    Ok(artifacts)
}

/// Write output files, overwriting any previous version
///
/// Output directories are created as needed.
pub async fn write_all(
    config: &Config,
    artifacts: &[Artifact],
    report: &ProgressReport,
) -> Result<()> {
    let ngrams_dir = config.ngrams_dir();
    tokio::fs::create_dir_all(&ngrams_dir)
        .await
        .with_context(|| format!("creating output directory {}", ngrams_dir.display()))?;

    let total_bytes = artifacts.iter().map(|artifact| artifact.contents.len()).sum();
    let bytes = report.add(
        "Writing output files",
        ProgressConfig::new(Work::Bytes(total_bytes)),
    );
    for Artifact { path, contents } in artifacts {
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {} bytes to {}", contents.len(), path.display());
        bytes.make_progress(contents.len() as u64);
    }
    Ok(())
}
