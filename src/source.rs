use {
    crate::error::{Error, IoContext, Result},
    serde::{Deserialize, Serialize},
    std::{
        fmt,
        fs,
        path::{Path, PathBuf},
    },
};

/// The raw document formats the corpus is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Docx,
    Html,
    Pdf,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Docx, SourceKind::Html, SourceKind::Pdf];

    /// Directory below the raw root holding files of this kind.
    pub fn raw_subdir(self) -> &'static str {
        match self {
            SourceKind::Docx => "docx",
            SourceKind::Html => "htm",
            SourceKind::Pdf => "pdf",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            SourceKind::Docx => &["docx"],
            SourceKind::Html => &["htm", "html"],
            SourceKind::Pdf => &["pdf"],
        }
    }

    /// Docx sources are only picked up at the top level of their directory.
    pub fn recursive(self) -> bool {
        !matches!(self, SourceKind::Docx)
    }

    pub fn combined_file_name(self) -> &'static str {
        match self {
            SourceKind::Docx => "combined_novel_text.txt",
            SourceKind::Html => "combined_html_novel_text.txt",
            SourceKind::Pdf => "combined_pdf_novel_text.txt",
        }
    }

    pub fn metadata_file_name(self) -> &'static str {
        match self {
            SourceKind::Docx => "metadata.csv",
            SourceKind::Html => "html_metadata.csv",
            SourceKind::Pdf => "pdf_metadata.csv",
        }
    }

    fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }

    /// All source files of this kind below `input_dir`, sorted by path.
    pub fn discover(self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        if !input_dir.is_dir() {
            return Err(Error::MissingInput(input_dir.to_path_buf()));
        }
        let mut files = Vec::new();
        let mut pending = vec![input_dir.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).at(&dir)? {
                let path = entry.at(&dir)?.path();
                if path.is_dir() {
                    if self.recursive() {
                        pending.push(path);
                    }
                } else if self.matches(&path) {
                    files.push(path);
                }
            }
        }
        files.sort();
        Ok(files)
    }

    /// Name under which the clean text of `path` is stored.
    pub fn document_key(self, input_dir: &Path, path: &Path) -> String {
        let stem = || {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        match self {
            SourceKind::Docx => stem(),
            SourceKind::Html | SourceKind::Pdf => {
                let Ok(relative) = path.strip_prefix(input_dir) else {
                    return stem();
                };
                let relative = relative.with_extension("");
                relative
                    .to_string_lossy()
                    .chars()
                    .map(|c| if c == '/' || c == '\\' { '_' } else { c })
                    .collect()
            }
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Docx => "docx",
            SourceKind::Html => "HTML",
            SourceKind::Pdf => "PDF",
        })
    }
}
