use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use log::{error, info};
use word_frequency_engine::{Encoding, EngineConfig, ExportFormat, FrequencyEngine};

/// Count word frequencies across text files.
///
/// Example:
///   wordfreq --min-word-length 3 --top 5 --export vocab.json notes/*.txt
#[derive(Parser, Debug)]
#[command(name = "wordfreq", version, about)]
struct Cli {
    /// Text files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Drop words shorter than this many characters
    #[arg(short = 'm', long, default_value_t = 2)]
    min_word_length: usize,

    /// Encodings to try, in order (repeatable). Defaults to utf-8 then latin-1
    #[arg(short, long = "encoding")]
    encodings: Vec<Encoding>,

    /// How many words to list
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// Write the per-file tables to this path
    #[arg(short = 'o', long)]
    export: Option<PathBuf>,

    /// Export format: json or cbor
    #[arg(short, long, default_value_t = ExportFormat::Json)]
    format: ExportFormat,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::new().with_min_word_length(self.min_word_length);
        if self.encodings.is_empty() {
            config
        } else {
            config.with_encodings(self.encodings.iter().copied())
        }
    }
}

fn run(cli: Cli) -> word_frequency_engine::Result<()> {
    let program_start = Instant::now();
    let mut engine = FrequencyEngine::with_config(cli.engine_config())?;

    let load_start = Instant::now();
    let added = engine.ingest_files(&cli.files)?;
    info!(
        "[time] loaded {} files in {:.2}ms",
        added,
        load_start.elapsed().as_secs_f64() * 1000.0
    );

    for (word, count) in engine.top_n(cli.top) {
        println!("{count}\t{word}");
    }
    println!("{}", engine.statistics());

    if let Some(path) = &cli.export {
        engine.export_as(path, cli.format)?;
    }

    info!(
        "[time] program_total={:.2}ms",
        program_start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
