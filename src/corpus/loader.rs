//! Loading labeled and unlabeled corpora.
//!
//! A labeled corpus has one directory per class under a common root. Every
//! file name carries a numeric id (the first run of ASCII digits, so
//! `cv123_4567.txt` has id 123). Files whose id is below the split index are
//! training documents; the others are test documents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::classification::document::{Document, DocumentGroups};
use crate::error::{PolarityError, Result};

/// Default split index: files numbered 0..900 train, the rest test.
pub const DEFAULT_SPLIT_INDEX: u64 = 900;

/// Group key used for an unlabeled prediction directory.
pub const UNLABELED_GROUP: &str = "test";

/// Corpus location and train/test split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Root directory with one sub-directory per class.
    pub root: Option<PathBuf>,

    /// Files with an id below this value are used for training.
    pub split_index: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        CorpusConfig {
            root: None,
            split_index: DEFAULT_SPLIT_INDEX,
        }
    }
}

/// Directory each document group was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDirectories(BTreeMap<String, PathBuf>);

impl SourceDirectories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, P: Into<PathBuf>>(&mut self, group: K, directory: P) {
        self.0.insert(group.into(), directory.into());
    }

    /// Directory of `group`.
    pub fn directory(&self, group: &str) -> Option<&Path> {
        self.0.get(group).map(PathBuf::as_path)
    }

    /// Full path of document `id` in `group`.
    pub fn path_of(&self, group: &str, id: &str) -> Option<PathBuf> {
        self.directory(group).map(|dir| dir.join(id))
    }
}

/// A labeled corpus split into training and test groups.
#[derive(Debug, Clone)]
pub struct CorpusSplit {
    pub train: DocumentGroups,
    pub test: DocumentGroups,
    pub sources: SourceDirectories,
}

/// Documents read from a single unlabeled directory.
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub groups: DocumentGroups,
    pub sources: SourceDirectories,
}

/// Reads corpora from disk.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    root: PathBuf,
    split_index: u64,
}

impl CorpusLoader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        CorpusLoader {
            root: root.into(),
            split_index: DEFAULT_SPLIT_INDEX,
        }
    }

    /// Create a loader from a configuration; fails if no root is set.
    pub fn from_config(config: &CorpusConfig) -> Result<Self> {
        let root = config
            .root
            .clone()
            .ok_or_else(|| PolarityError::invalid_config("corpus root is not set"))?;
        Ok(Self::new(root).with_split_index(config.split_index))
    }

    pub fn with_split_index(mut self, split_index: u64) -> Self {
        self.split_index = split_index;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn split_index(&self) -> u64 {
        self.split_index
    }

    /// Read `<root>/<class>/` for every class and split by file id.
    ///
    /// Every class directory gets a group in both halves, in class order,
    /// even when one half ends up empty.
    pub fn load_split(&self, classes: &[String]) -> Result<CorpusSplit> {
        let mut train = DocumentGroups::new();
        let mut test = DocumentGroups::new();
        let mut sources = SourceDirectories::new();

        for class in classes {
            let directory = self.root.join(class);
            if !directory.is_dir() {
                return Err(PolarityError::corpus(format!(
                    "class directory not found: {}",
                    directory.display()
                )));
            }

            let mut train_docs = Vec::new();
            let mut test_docs = Vec::new();
            for (name, path) in list_files(&directory)? {
                let Some(id) = file_number(&name) else {
                    warn!("Skipping {}: no numeric id in file name", path.display());
                    continue;
                };
                let document = read_document(&name, &path)?;
                if id < self.split_index {
                    train_docs.push(document);
                } else {
                    test_docs.push(document);
                }
            }

            debug!(
                "Class '{class}': {} training and {} test documents",
                train_docs.len(),
                test_docs.len()
            );
            train.insert(class.as_str(), train_docs);
            test.insert(class.as_str(), test_docs);
            sources.insert(class.as_str(), directory);
        }

        info!(
            "Loaded corpus {}: {} training, {} test documents (split at {})",
            self.root.display(),
            train.total_documents(),
            test.total_documents(),
            self.split_index
        );

        Ok(CorpusSplit {
            train,
            test,
            sources,
        })
    }

    /// Read every file of `directory` into a single group named `test`.
    pub fn load_unlabeled<P: AsRef<Path>>(directory: P) -> Result<LoadedCorpus> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(PolarityError::corpus(format!(
                "prediction directory not found: {}",
                directory.display()
            )));
        }

        let documents = list_files(directory)?
            .into_iter()
            .map(|(name, path)| read_document(&name, &path))
            .collect::<Result<Vec<_>>>()?;
        info!(
            "Loaded {} unlabeled documents from {}",
            documents.len(),
            directory.display()
        );

        let mut sources = SourceDirectories::new();
        sources.insert(UNLABELED_GROUP, directory);

        Ok(LoadedCorpus {
            groups: DocumentGroups::new().with_group(UNLABELED_GROUP, documents),
            sources,
        })
    }
}

/// The first run of ASCII digits in a file name.
pub fn file_number(name: &str) -> Option<u64> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Regular, non-hidden files of `directory` sorted by name.
fn list_files(directory: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("failed to read directory {}", directory.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        files.push((name, entry.path()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

fn read_document(name: &str, path: &Path) -> Result<Document> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read document {}", path.display()))?;
    Ok(Document::new(name, String::from_utf8_lossy(&bytes)))
}
