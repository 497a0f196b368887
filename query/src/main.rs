use anyhow::Result;
use clap::Parser;
use sitesearch_core::persist::load_artifact;
use sitesearch_core::search;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sitesearch-query")]
#[command(about = "Run a query against a site search index artifact", long_about = None)]
struct Args {
    /// Index artifact path
    #[arg(long, default_value = "./search-index.json")]
    index: String,
    /// Maximum number of hits to print
    #[arg(long, default_value_t = 10)]
    limit: usize,
    /// Print results as a JSON array
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Query string
    query: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // A missing or unreadable artifact disables search; it is not a crash.
    let built = match load_artifact(Path::new(&args.index)) {
        Ok(built) => built,
        Err(err) => {
            eprintln!("search unavailable: {err:#}");
            std::process::exit(2);
        }
    };

    tracing::info!(num_docs = built.index.num_docs, index = %args.index, "artifact loaded");

    let hits = search(&args.query, &built.index, &built.store);
    let shown = &hits[..hits.len().min(args.limit)];

    if args.json {
        println!("{}", serde_json::to_string(shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("no results for \"{}\"", args.query);
        return Ok(());
    }
    for hit in shown {
        println!("{:>8.3}  {}  {}", hit.score, hit.title, hit.url);
        println!("          {}", hit.snippet);
    }
    Ok(())
}
