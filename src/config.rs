//! Processing pipeline configuration

use crate::{text::Charset, Args};
use std::{path::PathBuf, sync::Arc};

/// Names of the two source texts, in concatenation order
pub const SOURCE_FILES: [&str; 2] = ["maravilha-limpo.txt", "espelho-limpo.txt"];

/// Directories where the source texts are looked up by default, in order
pub const DEFAULT_DATA_DIRS: [&str; 3] = ["public_html/estocastico/markov_lero/data/", "data/", "./"];

/// N-gram orders that are tabulated
pub const NGRAM_ORDERS: std::ops::RangeInclusive<usize> = 2..=6;

/// Number of leading entries of each n-gram table that go into the compact
/// output, for the orders that are sampled at all
pub const COMPACT_SAMPLES: [(usize, usize); 3] = [(2, 100), (3, 100), (4, 50)];

/// Number of entries kept for each n-gram order in the fast model
pub const FAST_MODEL_LIMITS: [(usize, usize); 5] =
    [(2, 800), (3, 600), (4, 400), (5, 200), (6, 100)];

/// Minimal continuation count for a context to enter the fast model
pub const FAST_MODEL_MIN_OCCURENCES: usize = 2;

/// Output file names, relative to the output directory
pub const COMPACT_OUTPUT: &str = "markov_data_compact.json";
pub const COMPLETE_OUTPUT: &str = "markov_data_complete.json";
pub const FAST_OUTPUT: &str = "alice_fast.json";
pub const NGRAMS_SUBDIR: &str = "ngrams";

/// Final process configuration
///
/// This is the result of digesting [`Args`]. Please refer to [`Args`] to know
/// more about individual fields.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Directories where the source texts may be found, in order of priority
    pub data_dirs: Box<[PathBuf]>,

    /// Root directory of the output files
    pub output_dir: PathBuf,

    /// Word character class used during text cleanup
    pub charset: Charset,

    /// Truth that the pruned fast model should be written too
    pub fast: bool,
}
//
impl Config {
    /// Determine process configuration from CLI arguments
    pub(crate) fn new(args: Args) -> Arc<Self> {
        let Args {
            data_dirs,
            output_dir,
            charset,
            fast,
        } = args;
        let data_dirs = if data_dirs.is_empty() {
            DEFAULT_DATA_DIRS.iter().map(PathBuf::from).collect()
        } else {
            data_dirs.into_boxed_slice()
        };
        Arc::new(Self {
            data_dirs,
            output_dir,
            charset,
            fast,
        })
    }

    /// Location of the compact output file
    pub fn compact_path(&self) -> PathBuf {
        self.output_dir.join(COMPACT_OUTPUT)
    }

    /// Location of the complete output file
    pub fn complete_path(&self) -> PathBuf {
        self.output_dir.join(COMPLETE_OUTPUT)
    }

    /// Location of the fast model output file
    pub fn fast_path(&self) -> PathBuf {
        self.output_dir.join(FAST_OUTPUT)
    }

    /// Directory where per-order n-gram tables are written
    pub fn ngrams_dir(&self) -> PathBuf {
        self.output_dir.join(NGRAMS_SUBDIR)
    }

    /// Location of the n-gram table of order `n`
    pub fn ngrams_path(&self, n: usize) -> PathBuf {
        self.ngrams_dir().join(format!("ngrams_{n}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(data_dirs: Vec<PathBuf>) -> Args {
        Args {
            data_dirs,
            output_dir: PathBuf::from("out"),
            charset: Charset::Ascii,
            fast: false,
        }
    }

    #[test]
    fn default_data_dirs() {
        let config = Config::new(args(Vec::new()));
        assert_eq!(config.data_dirs.len(), DEFAULT_DATA_DIRS.len());
        assert_eq!(config.data_dirs[0], Path::new(DEFAULT_DATA_DIRS[0]));
        assert_eq!(config.data_dirs[1], Path::new("data/"));
    }

    #[test]
    fn explicit_data_dirs_replace_defaults() {
        let config = Config::new(args(vec!["b".into(), "a".into()]));
        assert_eq!(&config.data_dirs[..], &[PathBuf::from("b"), PathBuf::from("a")]);
    }

    #[test]
    fn output_paths() {
        let config = Config::new(args(Vec::new()));
        assert_eq!(config.compact_path(), Path::new("out/markov_data_compact.json"));
        assert_eq!(config.complete_path(), Path::new("out/markov_data_complete.json"));
        assert_eq!(config.fast_path(), Path::new("out/alice_fast.json"));
        assert_eq!(config.ngrams_path(4), Path::new("out/ngrams/ngrams_4.json"));
    }
}
