//! Location and loading of the source texts

use crate::config::SOURCE_FILES;
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Reasons why the source texts could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    /// None of the candidate directories contains both source texts
    #[error("source texts not found in any of the {} candidate directories", .candidates.len())]
    SourceUnavailable { candidates: Box<[PathBuf]> },
}

/// Raw text of both source files, joined together
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Corpus {
    /// Directory from which the source texts were loaded
    pub dir: PathBuf,

    /// Concatenation of both texts, separated by a single space
    pub text: String,

    /// Candidate directories that were tried before, in order
    pub skipped: Box<[PathBuf]>,
}

/// Load the source texts from the first candidate directory that has both
///
/// A directory where only one of the texts can be read is skipped entirely.
/// Every skipped directory is reported on stdout as the search goes.
pub async fn load(candidates: &[PathBuf]) -> Result<Corpus, LoadError> {
    for (idx, dir) in candidates.iter().enumerate() {
        match load_from(dir).await {
            Ok(text) => {
                log::info!("Loaded source texts from {}", dir.display());
                return Ok(Corpus {
                    dir: dir.clone(),
                    text,
                    skipped: candidates[..idx].into(),
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Source texts are not in {}: {e}", dir.display());
            }
            Err(e) => {
                log::warn!("Failed to read source texts from {}: {e}", dir.display());
            }
        }
        println!("Source texts not found in {}", dir.display());
    }
    Err(LoadError::SourceUnavailable {
        candidates: candidates.into(),
    })
}

/// Read and join both source texts from a given directory
async fn load_from(dir: &Path) -> io::Result<String> {
    let [first, second] = SOURCE_FILES;
    let mut text = tokio::fs::read_to_string(dir.join(first)).await?;
    let second = tokio::fs::read_to_string(dir.join(second)).await?;
    text.reserve(second.len() + 1);
    text.push(' ');
    text.push_str(&second);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_sources(dir: &Path, first: Option<&str>, second: Option<&str>) {
        if let Some(first) = first {
            fs::write(dir.join(SOURCE_FILES[0]), first).unwrap();
        }
        if let Some(second) = second {
            fs::write(dir.join(SOURCE_FILES[1]), second).unwrap();
        }
    }

    #[tokio::test]
    async fn loads_from_first_complete_directory() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write_sources(first.path(), Some("maravilha"), Some("espelho"));
        write_sources(second.path(), Some("other"), Some("texts"));

        let candidates = [first.path().to_owned(), second.path().to_owned()];
        let corpus = load(&candidates).await.unwrap();
        assert_eq!(corpus.dir, first.path());
        assert_eq!(corpus.text, "maravilha espelho");
        assert!(corpus.skipped.is_empty());
    }

    #[tokio::test]
    async fn falls_back_to_second_directory() {
        let empty = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        write_sources(full.path(), Some("a\nb"), Some("c"));

        let candidates = [empty.path().to_owned(), full.path().to_owned()];
        let corpus = load(&candidates).await.unwrap();
        assert_eq!(corpus.dir, full.path());
        assert_eq!(corpus.text, "a\nb c");
        assert_eq!(&corpus.skipped[..], [empty.path().to_owned()]);
    }

    #[tokio::test]
    async fn half_populated_directory_is_skipped() {
        let only_first = tempfile::tempdir().unwrap();
        let only_second = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        write_sources(only_first.path(), Some("first"), None);
        write_sources(only_second.path(), None, Some("second"));
        write_sources(full.path(), Some("x"), Some("y"));

        let candidates = [
            only_first.path().to_owned(),
            only_second.path().to_owned(),
            full.path().to_owned(),
        ];
        let corpus = load(&candidates).await.unwrap();
        assert_eq!(corpus.dir, full.path());
        assert_eq!(corpus.text, "x y");
        assert_eq!(&corpus.skipped[..], &candidates[..2]);
    }

    #[tokio::test]
    async fn reports_all_candidates_when_nothing_is_found() {
        let only_first = tempfile::tempdir().unwrap();
        write_sources(only_first.path(), Some("first"), None);
        let missing = only_first.path().join("missing");

        let candidates = [only_first.path().to_owned(), missing];
        let LoadError::SourceUnavailable { candidates: tried } =
            load(&candidates).await.unwrap_err();
        assert_eq!(&tried[..], &candidates[..]);
    }

    #[tokio::test]
    async fn empty_files_still_count_as_present() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path(), Some(""), Some(""));
        let corpus = load(&[dir.path().to_owned()]).await.unwrap();
        assert_eq!(corpus.text, " ");
    }
}
