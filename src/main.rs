use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use pdfseek::config::{self, Overrides, State};
use pdfseek::embedding::FastEmbedGenerator;
use pdfseek::indexer::{build_index, collect_chunks, IndexOptions, DEFAULT_BATCH_SIZE};
use pdfseek::loader::PdfExtractor;
use pdfseek::{repl, SearchEngine};

#[derive(Parser)]
#[command(name = "pdfseek")]
#[command(version = "0.1")]
#[command(about = "Semantic search over a folder of PDF documents", long_about = None)]
struct Cli {
    /// Folder scanned for .pdf files
    #[arg(long, global = true)]
    folder: Option<PathBuf>,

    /// Chunk length in characters
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    /// Results per query
    #[arg(long, global = true)]
    top_k: Option<usize>,

    /// Embedding model name
    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the folder, then answer questions until an empty line
    Interactive,
    /// Index the folder and answer a single query
    Query {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Print every chunk as filename, offset and length
    List,
    /// Print the effective configuration
    Config,
}

fn build_engine(state: &State) -> Result<SearchEngine> {
    eprintln!("Loading PDFs from '{}'...", state.upload_folder.display());
    let embedder = FastEmbedGenerator::new(&state.model, state.model_cache_dir.clone())?;
    let options = IndexOptions {
        chunk_size: state.chunk_size,
        batch_size: state.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        show_progress: true,
    };
    let (index, stats) = build_index(&state.upload_folder, &PdfExtractor, &embedder, &options)
        .with_context(|| format!("Failed to index '{}'", state.upload_folder.display()))?;
    eprintln!(
        "Indexed {} chunks from {} documents",
        stats.chunks, stats.documents
    );
    Ok(SearchEngine::new(Box::new(embedder), index))
}

fn interactive_command(state: &State) -> Result<()> {
    let engine = build_engine(state)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(
        &engine,
        state.top_k,
        state.preview_chars,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;
    Ok(())
}

fn query_command(state: &State, text: &str, json: bool) -> Result<()> {
    let engine = build_engine(state)?;
    let (results, _) = engine.search(text, state.top_k)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        repl::write_json_results(&mut out, text, engine.index().len(), &results, state.top_k)?;
    } else {
        repl::write_results(&mut out, &results, state.preview_chars)?;
    }
    Ok(())
}

fn list_command(state: &State) -> Result<()> {
    let (_, chunks) = collect_chunks(&state.upload_folder, state.chunk_size, &PdfExtractor)
        .with_context(|| format!("Failed to read '{}'", state.upload_folder.display()))?;
    let stdout = io::stdout();
    repl::write_chunk_list(&mut stdout.lock(), &chunks)?;
    Ok(())
}

fn config_command(state: &State) -> Result<()> {
    state.print_config();
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let state = State::new(Overrides {
        upload_folder: args.folder,
        chunk_size: args.chunk_size,
        top_k: args.top_k,
        model: args.model,
        verbose: args.verbose,
    })?;
    config::init_logging(state.verbose);

    match args.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => interactive_command(&state)?,
        Commands::Query { text, json } => query_command(&state, &text, json)?,
        Commands::List => list_command(&state)?,
        Commands::Config => config_command(&state)?,
    }
    Ok(())
}
