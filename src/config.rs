use {
    crate::{
        clean::CleanOptions,
        error::{IoContext, Result},
        source::SourceKind,
    },
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        fs::{self, File},
        io::{BufReader, BufWriter, Write},
        path::{Path, PathBuf},
    },
    tracing::warn,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root holding one subdirectory per source kind.
    pub raw_dir: PathBuf,
    pub clean_dir: PathBuf,
    pub split_dir: PathBuf,
    /// Input directories that replace `<raw_dir>/<kind>` for single kinds.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<SourceKind, PathBuf>,
    pub keep_newlines: bool,
    pub train_ratio: f64,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            raw_dir: "data/raw".into(),
            clean_dir: "data/clean".into(),
            split_dir: "data/split".into(),
            inputs: BTreeMap::new(),
            keep_newlines: false,
            train_ratio: 0.9,
            seed: 0,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path).at(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path).at(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().at(path)
    }

    pub fn input_dir(&self, kind: SourceKind) -> PathBuf {
        self.inputs
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| self.raw_dir.join(kind.raw_subdir()))
    }

    /// Resolve which directories an extraction reads. For a single kind,
    /// `input_dir` is that kind's directory; otherwise it is the raw root and
    /// kinds without a directory are skipped. The choice is recorded in `self`
    /// so a saved config reproduces the run.
    pub fn extract_jobs(
        &mut self,
        kind: Option<SourceKind>,
        input_dir: Option<PathBuf>,
    ) -> Vec<(SourceKind, PathBuf)> {
        match kind {
            Some(kind) => {
                if let Some(dir) = input_dir {
                    self.inputs.insert(kind, dir);
                }
                vec![(kind, self.input_dir(kind))]
            }
            None => {
                if let Some(raw_dir) = input_dir {
                    self.raw_dir = raw_dir;
                    self.inputs.clear();
                }
                SourceKind::ALL
                    .into_iter()
                    .map(|kind| (kind, self.input_dir(kind)))
                    .filter(|(kind, dir)| {
                        let present = dir.is_dir();
                        if !present {
                            warn!("no {kind} directory at {dir:?}, skipping");
                        }
                        present
                    })
                    .collect()
            }
        }
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            keep_newlines: self.keep_newlines,
        }
    }
}
