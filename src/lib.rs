pub mod clean;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod source;
pub mod split;

pub use config::Config;
pub use corpus::{extract_all, run_extraction, CorpusStats, Document, Report};
pub use error::{Error, Result};
pub use source::SourceKind;
pub use split::{split_corpus, SplitSummary};

pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";
