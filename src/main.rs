use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tweetnet::{init_tracing_with_default, Cleaner, NdjsonSink, PipelineConfig};

/// Clean and filter social-media posts (one JSON object per line) into corpus text.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Post file (.ndjson/.jsonl/.json/.zst) or a directory of them
    #[arg(long, short, env = "TWEETNET_INPUT")]
    input: PathBuf,

    /// Write `{"message": ...}` lines here instead of stdout
    #[arg(long, short, env = "TWEETNET_OUTPUT")]
    output: Option<PathBuf>,

    /// Archive file for longer cleaned posts (default: TWEETNET_ARCHIVE, else <home>/tweetnet/data/dump.txt)
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Do not write the archive at all (also TWEETNET_NO_ARCHIVE)
    #[arg(long)]
    no_archive: bool,

    /// Language code to admit (default: TWEETNET_LANG, else "en")
    #[arg(long)]
    lang: Option<String>,

    /// Keep only posts whose hashtags match the topic vocabulary (also TWEETNET_TOPIC_SELECTOR)
    #[arg(long)]
    topics: bool,

    /// Worker threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Input files processed concurrently
    #[arg(long, default_value = "1")]
    file_concurrency: usize,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing_with_default(&args.log_level);

    // environment first, then explicit flags on top
    let mut cfg = PipelineConfig::from_env()
        .with_file_concurrency(args.file_concurrency)
        .with_progress(args.progress);
    if let Some(lang) = &args.lang {
        cfg = cfg.with_target_language(lang);
    }
    if args.topics {
        cfg = cfg.with_topic_selector(true);
    }
    if let Some(path) = &args.archive {
        cfg = cfg.with_archive_path(path);
    }
    if args.no_archive {
        cfg = cfg.without_archive();
    }
    if let Some(n) = args.threads {
        cfg = cfg.with_parallelism(n);
    }

    let sink = NdjsonSink::for_config(args.output.as_deref(), &cfg)?;
    let cleaner = Cleaner::new(cfg);

    let stats = cleaner.run(&args.input, &sink)?;
    sink.finish()?;

    eprintln!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
