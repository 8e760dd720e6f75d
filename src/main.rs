use {
    anyhow::{Context, Result},
    clap::{Parser, Subcommand, ValueEnum},
    std::{path::PathBuf, process::ExitCode},
    tracing::error,
    tracing_subscriber::EnvFilter,
    vn_corpus::{extract_all, split_corpus, Config, SourceKind, BOLD, RESET},
};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load(&path).with_context(|| format!("failed to load config {path:?}"))
        }
        None => Ok(Config::default()),
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract {
            kind,
            input_dir,
            output_dir,
            config,
            keep_newlines,
        } => {
            let mut config = load_config(config)?;
            // cli options override the config file
            if let Some(output_dir) = output_dir {
                config.clean_dir = output_dir;
            }
            config.keep_newlines |= keep_newlines;

            let jobs = config.extract_jobs(kind.and_then(KindArg::source_kind), input_dir);
            anyhow::ensure!(
                !jobs.is_empty(),
                "no source directories found below {:?}",
                config.raw_dir
            );

            let reports = extract_all(&jobs, &config)?;
            for report in &reports {
                println!(
                    "{BOLD}{}:{RESET} {} documents, {} words -> {:?}",
                    report.kind, report.stats.files, report.stats.words, report.combined
                );
            }

            let config_path = config.clean_dir.join("config.json");
            config
                .save(&config_path)
                .with_context(|| format!("failed to save {config_path:?}"))?;
        }
        Commands::Split {
            input_dir,
            output_dir,
            ratio,
            seed,
            config,
        } => {
            let config = load_config(config)?;
            let clean_dir = input_dir.unwrap_or(config.clean_dir);
            let split_dir = output_dir.unwrap_or(config.split_dir);
            let ratio = ratio.unwrap_or(config.train_ratio);
            let seed = seed.unwrap_or(config.seed);

            let summary = split_corpus(&clean_dir, &split_dir, ratio, seed)
                .with_context(|| format!("failed to split {clean_dir:?}"))?;
            println!(
                "{BOLD}split:{RESET} {} train -> {:?}, {} validation -> {:?}",
                summary.train_documents, summary.train, summary.valid_documents, summary.valid
            );
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Build a clean Vietnamese text corpus from raw documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Docx,
    Html,
    Pdf,
    All,
}

impl KindArg {
    fn source_kind(self) -> Option<SourceKind> {
        match self {
            KindArg::Docx => Some(SourceKind::Docx),
            KindArg::Html => Some(SourceKind::Html),
            KindArg::Pdf => Some(SourceKind::Pdf),
            KindArg::All => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and clean text from raw documents
    Extract {
        /// Source format (defaults to all)
        #[arg(value_enum)]
        kind: Option<KindArg>,
        /// Input directory (the raw root when extracting all formats)
        #[arg(short, long, value_name = "PATH")]
        input_dir: Option<PathBuf>,
        #[arg(short, long, value_name = "PATH")]
        output_dir: Option<PathBuf>,
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Keep line breaks in the cleaned text
        #[arg(short, long)]
        keep_newlines: bool,
    },
    /// Shuffle clean documents into train and validation files
    Split {
        #[arg(short, long, value_name = "PATH")]
        input_dir: Option<PathBuf>,
        #[arg(short, long, value_name = "PATH")]
        output_dir: Option<PathBuf>,
        /// Share of documents used for training
        #[arg(short, long)]
        ratio: Option<f64>,
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}
