use {
    crate::error::{Error, IoContext, Result},
    rand::prelude::*,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    tracing::info,
};

pub const TRAIN_FILE: &str = "train.txt";
pub const VALID_FILE: &str = "valid.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    pub train: PathBuf,
    pub valid: PathBuf,
    pub train_documents: usize,
    pub valid_documents: usize,
}

/// Per-document clean texts, skipping the combined datasets.
fn clean_documents(clean_dir: &Path) -> Result<Vec<PathBuf>> {
    if !clean_dir.is_dir() {
        return Err(Error::MissingInput(clean_dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(clean_dir).at(clean_dir)? {
        let path = entry.at(clean_dir)?.path();
        let is_text = path.extension().map(|ext| ext == "txt").unwrap_or(false);
        let is_combined = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with("combined_"))
            .unwrap_or(false);
        if path.is_file() && is_text && !is_combined {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Number of training documents out of `n`; never zero for a non-empty corpus.
pub fn train_count(n: usize, ratio: f64) -> usize {
    ((ratio * n as f64).ceil() as usize).clamp(n.min(1), n)
}

/// Shuffle the clean documents with `seed` and write them as a train and a
/// validation file.
pub fn split_corpus(clean_dir: &Path, out_dir: &Path, ratio: f64, seed: u64) -> Result<SplitSummary> {
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(Error::InvalidRatio(ratio));
    }
    let mut files = clean_documents(clean_dir)?;
    if files.is_empty() {
        return Err(Error::EmptyCorpus(clean_dir.to_path_buf()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    files.shuffle(&mut rng);
    let n_train = train_count(files.len(), ratio);
    let (train, valid) = files.split_at(n_train);

    let read_all = |paths: &[PathBuf]| -> Result<String> {
        let texts = paths
            .iter()
            .map(|path| fs::read_to_string(path).at(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(texts.join("\n"))
    };

    fs::create_dir_all(out_dir).at(out_dir)?;
    let train_path = out_dir.join(TRAIN_FILE);
    let valid_path = out_dir.join(VALID_FILE);
    fs::write(&train_path, read_all(train)?).at(&train_path)?;
    fs::write(&valid_path, read_all(valid)?).at(&valid_path)?;
    info!(
        "split {} documents: {} train, {} validation",
        files.len(),
        train.len(),
        valid.len()
    );

    Ok(SplitSummary {
        train: train_path,
        valid: valid_path,
        train_documents: train.len(),
        valid_documents: valid.len(),
    })
}
