use {
    crate::{
        clean::{clean_text, CleanOptions},
        config::Config,
        error::{Error, IoContext, Result},
        extract::{extractor_for, Extractor},
        source::SourceKind,
    },
    indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle},
    rayon::prelude::*,
    serde::Serialize,
    std::{
        collections::HashMap,
        fs,
        path::{Path, PathBuf},
    },
    tracing::{error, info, warn},
};

/// Clean text of one source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    pub source: PathBuf,
    pub text: String,
}

#[derive(Debug, Serialize)]
struct MetadataRow<'a> {
    filename: &'a str,
    character_count: usize,
    word_count: usize,
    line_count: usize,
}

impl<'a> From<&'a Document> for MetadataRow<'a> {
    fn from(document: &'a Document) -> Self {
        MetadataRow {
            filename: &document.key,
            character_count: document.text.chars().count(),
            word_count: document.text.split_whitespace().count(),
            line_count: document.text.split('\n').count(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorpusStats {
    pub files: usize,
    pub characters: usize,
    pub words: usize,
}

impl CorpusStats {
    pub fn avg_characters(&self) -> f64 {
        if self.files == 0 {
            return 0.0;
        }
        self.characters as f64 / self.files as f64
    }

    pub fn avg_words(&self) -> f64 {
        if self.files == 0 {
            return 0.0;
        }
        self.words as f64 / self.files as f64
    }

    pub fn log(&self, label: impl std::fmt::Display) {
        info!("{label} corpus summary:");
        info!("- files: {}", self.files);
        info!("- characters: {}", self.characters);
        info!("- words: {}", self.words);
        info!("- characters per file: {:.0}", self.avg_characters());
        info!("- words per file: {:.0}", self.avg_words());
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub kind: SourceKind,
    pub stats: CorpusStats,
    pub combined: PathBuf,
    pub metadata: PathBuf,
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
    {
        bar.set_style(style);
    }
    bar
}

/// Extract and clean every `kind` document below `input_dir`. Files that fail
/// or come out empty are logged and skipped; the rest keep discovery order.
pub fn extract_documents(
    extractor: &dyn Extractor,
    input_dir: &Path,
    options: CleanOptions,
) -> Result<Vec<Document>> {
    let kind = extractor.kind();
    let files = kind.discover(input_dir)?;
    info!("found {} {kind} files in {input_dir:?}", files.len());

    let bar = progress_bar(files.len());
    bar.set_message(kind.to_string());
    let documents = files
        .par_iter()
        .progress_with(bar.clone())
        .filter_map(|path| {
            let raw = match extractor.extract(path) {
                Ok(raw) => raw,
                Err(err) => {
                    error!("failed to read {path:?}: {err}");
                    return None;
                }
            };
            let text = clean_text(&raw, options);
            if text.is_empty() {
                warn!("could not extract text from {path:?}");
                return None;
            }
            info!("extracted {} characters from {path:?}", text.chars().count());
            Some(Document {
                key: kind.document_key(input_dir, path),
                source: path.clone(),
                text,
            })
        })
        .collect::<Vec<_>>();
    bar.finish_and_clear();
    Ok(dedupe_keys(documents))
}

/// Keep one document per key: the last one found wins, in the position of the
/// first.
fn dedupe_keys(documents: Vec<Document>) -> Vec<Document> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Document> = Vec::with_capacity(documents.len());
    for document in documents {
        match positions.get(&document.key).copied() {
            Some(index) => {
                warn!(
                    "{:?} and {:?} share the key {:?}, keeping the latter",
                    unique[index].source, document.source, document.key
                );
                unique[index] = document;
            }
            None => {
                positions.insert(document.key.clone(), unique.len());
                unique.push(document);
            }
        }
    }
    unique
}

/// Write each document to `<out_dir>/<key>.txt`.
pub fn save_documents(documents: &[Document], out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).at(out_dir)?;
    for document in documents {
        let path = out_dir.join(format!("{}.txt", document.key));
        fs::write(&path, &document.text).at(&path)?;
        info!("saved {path:?}");
    }
    Ok(())
}

pub fn combined_text(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|document| format!("=== {} ===\n{}\n", document.key, document.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn write_combined(documents: &[Document], out_dir: &Path, kind: SourceKind) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).at(out_dir)?;
    let path = out_dir.join(kind.combined_file_name());
    fs::write(&path, combined_text(documents)).at(&path)?;
    info!("wrote combined dataset {path:?}");
    Ok(path)
}

pub fn write_metadata(
    documents: &[Document],
    out_dir: &Path,
    kind: SourceKind,
) -> Result<(PathBuf, CorpusStats)> {
    fs::create_dir_all(out_dir).at(out_dir)?;
    let path = out_dir.join(kind.metadata_file_name());
    let mut writer = csv::Writer::from_path(&path)?;
    let mut stats = CorpusStats::default();
    for document in documents {
        let row = MetadataRow::from(document);
        stats.files += 1;
        stats.characters += row.character_count;
        stats.words += row.word_count;
        writer.serialize(row)?;
    }
    writer.flush().at(&path)?;
    info!("wrote metadata {path:?}");
    Ok((path, stats))
}

/// Full extraction of one source kind as configured.
pub fn run_extraction(kind: SourceKind, input_dir: &Path, config: &Config) -> Result<Report> {
    info!("extracting {kind} files from {input_dir:?}");
    let extractor = extractor_for(kind);
    let documents = extract_documents(extractor.as_ref(), input_dir, config.clean_options())?;
    if documents.is_empty() {
        return Err(Error::NothingExtracted(kind));
    }

    save_documents(&documents, &config.clean_dir)?;
    let combined = write_combined(&documents, &config.clean_dir, kind)?;
    let (metadata, stats) = write_metadata(&documents, &config.clean_dir, kind)?;
    stats.log(kind);
    info!("finished {kind} extraction");

    Ok(Report {
        kind,
        stats,
        combined,
        metadata,
    })
}

/// Run several extractions in order. When there is more than one job, a kind
/// that yields no text is skipped; every other error aborts the run.
pub fn extract_all(jobs: &[(SourceKind, PathBuf)], config: &Config) -> Result<Vec<Report>> {
    let mut reports = Vec::with_capacity(jobs.len());
    let mut skipped = None;
    for (kind, input_dir) in jobs {
        match run_extraction(*kind, input_dir, config) {
            Ok(report) => reports.push(report),
            Err(Error::NothingExtracted(kind)) if jobs.len() > 1 => {
                warn!("no {kind} document yielded text, skipping");
                skipped.get_or_insert(kind);
            }
            Err(err) => return Err(err),
        }
    }
    match skipped {
        Some(kind) if reports.is_empty() => Err(Error::NothingExtracted(kind)),
        _ => Ok(reports),
    }
}
