use anyhow::{Context, Result};
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::embedding::{resolve_model, DEFAULT_MODEL};

pub type Number = f32;

pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

/// Raw values read from `pdfseek_config.*` and `PDFSEEK_*` environment variables.
#[derive(Deserialize, Default)]
pub struct SeekConfig {
    pub upload_folder: Option<String>,
    pub chunk_size: Option<usize>,
    pub top_k: Option<usize>,
    pub model: Option<String>,
    pub model_cache_dir: Option<String>,
    pub batch_size: Option<usize>,
    pub preview_chars: Option<usize>,
    pub verbose: Option<bool>,
}

impl SeekConfig {
    pub fn load() -> Result<Self> {
        Config::builder()
            .add_source(ConfigFile::with_name("pdfseek_config").required(false))
            .add_source(Environment::with_prefix("PDFSEEK").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration values")
    }
}

/// Values given on the command line. Each one wins over the config file and environment.
#[derive(Default, Clone)]
pub struct Overrides {
    pub upload_folder: Option<PathBuf>,
    pub chunk_size: Option<usize>,
    pub top_k: Option<usize>,
    pub model: Option<String>,
    pub verbose: bool,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub upload_folder: PathBuf,
    pub chunk_size: usize,
    pub top_k: usize,
    pub model: String,
    pub model_cache_dir: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub preview_chars: usize,
    pub verbose: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            upload_folder: PathBuf::from(DEFAULT_UPLOAD_FOLDER),
            chunk_size: DEFAULT_CHUNK_SIZE,
            top_k: DEFAULT_TOP_K,
            model: DEFAULT_MODEL.to_string(),
            model_cache_dir: None,
            batch_size: None,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            verbose: false,
        }
    }
}

impl State {
    pub fn new(overrides: Overrides) -> Result<Self> {
        let file_config = SeekConfig::load()?;
        Self::resolve(file_config, overrides)
    }

    pub fn resolve(file_config: SeekConfig, overrides: Overrides) -> Result<Self> {
        let defaults = State::default();

        let upload_folder = overrides
            .upload_folder
            .or_else(|| file_config.upload_folder.map(PathBuf::from))
            .unwrap_or(defaults.upload_folder);

        let chunk_size = overrides
            .chunk_size
            .or(file_config.chunk_size)
            .unwrap_or(defaults.chunk_size);

        let top_k = overrides.top_k.or(file_config.top_k).unwrap_or(defaults.top_k);

        let model = overrides
            .model
            .or(file_config.model)
            .unwrap_or(defaults.model);

        let preview_chars = file_config.preview_chars.unwrap_or(defaults.preview_chars);

        let verbose = overrides.verbose || file_config.verbose.unwrap_or(false);

        if chunk_size == 0 {
            anyhow::bail!("chunk_size must be greater than zero.");
        }
        if preview_chars == 0 {
            anyhow::bail!("preview_chars must be greater than zero.");
        }
        if file_config.batch_size == Some(0) {
            anyhow::bail!("batch_size must be greater than zero when set.");
        }
        resolve_model(&model).context("Unsupported model in configuration")?;

        Ok(Self {
            upload_folder,
            chunk_size,
            top_k,
            model,
            model_cache_dir: file_config.model_cache_dir.map(PathBuf::from),
            batch_size: file_config.batch_size,
            preview_chars,
            verbose,
        })
    }

    pub fn print_config(&self) {
        println!("upload_folder={}", self.upload_folder.display());
        println!("chunk_size={}", self.chunk_size);
        println!("top_k={}", self.top_k);
        println!("model={}", self.model);
        println!(
            "model_cache_dir={}",
            self.model_cache_dir
                .as_ref()
                .map_or_else(|| "<default>".to_string(), |p| p.display().to_string())
        );
        println!(
            "batch_size={}",
            self.batch_size
                .map_or_else(|| "<default>".to_string(), |n| n.to_string())
        );
        println!("preview_chars={}", self.preview_chars);
        println!("verbose={}", self.verbose);
    }
}

/// Install the stderr tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
