#![forbid(unsafe_code)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fennec_es::PushResult;
use fennec_es::core::{DEFAULT_INDEX, PushConfig};
use fennec_es::index::ElasticsearchIndexer;
use fennec_es::push_cmd;

#[derive(Parser, Debug)]
#[command(name = "fennec-es")]
#[command(about = "Push Fennec triage image results in JSONL format to Elasticsearch", long_about = None)]
struct Cli {
    /// Elasticsearch URL (ex. http://127.0.0.1:9200)
    #[arg(value_name = "ES_URL")]
    es_url: String,

    /// Path to Fennec triage image
    #[arg(value_name = "PATH")]
    path: std::path::PathBuf,

    /// Elasticsearch index
    #[arg(short, long, default_value = DEFAULT_INDEX)]
    index: String,

    /// Write machine-readable JSON run report to this file
    #[arg(long)]
    json: Option<std::path::PathBuf>,

    /// Enable verbose logging (or set FENNEC_ES_LOG)
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("FENNEC_ES_LOG").unwrap_or_else(|_| {
        if verbose { "fennec_es=debug".to_string() } else { "fennec_es=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn run(cli: Cli) -> PushResult<()> {
    let config = PushConfig::new(&cli.es_url, cli.path, cli.index)?;
    let indexer = ElasticsearchIndexer::new(config.es_url.clone())?;
    push_cmd::run(config, &indexer, cli.json)?;
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
