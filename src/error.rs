use {
    crate::source::SourceKind,
    std::{io, path::PathBuf},
    thiserror::Error,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid docx archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed document.xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("pdf error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("input directory {0:?} does not exist")]
    MissingInput(PathBuf),

    #[error("could not extract text from any {0} file")]
    NothingExtracted(SourceKind),

    #[error("no documents found in {0:?}")]
    EmptyCorpus(PathBuf),

    #[error("train ratio must be in (0, 1], got {0}")]
    InvalidRatio(f64),
}

/// Attach the offending path to an io error.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
