use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use sitesearch_core::persist::save_artifact;
use sitesearch_core::{build_index, Document, TokenizerConfig, DEFAULT_TITLE_BOOST};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

/// Corpus record as emitted by the site generator. `content` arrives with
/// markup already stripped; this tool never parses HTML or templates.
#[derive(Debug, Deserialize)]
struct InputDoc {
    id: u32,
    title: String,
    content: String,
    url: String,
}

impl From<InputDoc> for Document {
    fn from(d: InputDoc) -> Self {
        Document {
            id: d.id,
            title: d.title,
            content: d.content,
            url: d.url,
        }
    }
}

#[derive(Parser)]
#[command(name = "sitesearch-indexer")]
#[command(about = "Build the site search index artifact", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from corpus JSON/JSONL files or a directory of them
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output artifact path
        #[arg(long)]
        output: String,
        /// Weight applied to title occurrences when scoring
        #[arg(long, default_value_t = DEFAULT_TITLE_BOOST)]
        title_boost: f32,
        /// Index Latin tokens unstemmed
        #[arg(long, default_value_t = false)]
        no_stem: bool,
        /// Index English stopwords instead of dropping them
        #[arg(long, default_value_t = false)]
        keep_stopwords: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            title_boost,
            no_stem,
            keep_stopwords,
        } => {
            let config = TokenizerConfig {
                stem: !no_stem,
                strip_stopwords: !keep_stopwords,
                ..TokenizerConfig::default()
            };
            run_build(&input, &output, config, title_boost)
        }
    }
}

fn run_build(input: &str, output: &str, config: TokenizerConfig, title_boost: f32) -> Result<()> {
    let documents = collect_documents(Path::new(input))?;
    tracing::info!(num_docs = documents.len(), input, "corpus loaded");

    let built = build_index(&documents, config, title_boost)?;

    let created_at = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    save_artifact(Path::new(output), &built, &created_at)?;
    tracing::info!(output, "index artifact written");
    Ok(())
}

/// Gather corpus records from a single file or every .json/.jsonl file under
/// a directory. Order follows the provider's file order; ids, not positions,
/// identify documents.
fn collect_documents(input: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file()
                && matches!(
                    p.extension().and_then(|s| s.to_str()),
                    Some("json") | Some("jsonl")
                )
            {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else {
        files.push(input.to_path_buf());
    }

    let mut documents = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut documents)?;
        } else {
            read_json(&file, &mut documents)?;
        }
    }
    Ok(documents)
}

fn read_jsonl(file: &Path, out: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for line in BufReader::new(f).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("parsing record in {}", file.display()))?;
        out.push(doc.into());
    }
    Ok(())
}

fn read_json(file: &Path, out: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)
                    .with_context(|| format!("parsing record in {}", file.display()))?;
                out.push(doc.into());
            }
        }
        other => {
            let doc: InputDoc = serde_json::from_value(other)
                .with_context(|| format!("parsing record in {}", file.display()))?;
            out.push(doc.into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesearch_core::persist::load_artifact;
    use sitesearch_core::search;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn collects_json_and_jsonl_from_a_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id":1,"title":"Rust Error Handling","content":"thiserror macro","url":"/post/1"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("b.jsonl"),
            "{\"id\":2,\"title\":\"Shell Tips\",\"content\":\"grep and awk\",\"url\":\"/post/2\"}\n\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = collect_documents(dir.path()).unwrap();
        let mut ids: Vec<u32> = docs.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn build_writes_an_artifact_that_answers_queries() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("corpus.json");
        fs::write(
            &corpus,
            r#"[{"id":1,"title":"Rust Error Handling","content":"thiserror macro for errors","url":"/post/1"},
               {"id":2,"title":"Shell Tips","content":"grep and awk usage","url":"/post/2"}]"#,
        )
        .unwrap();
        let artifact = dir.path().join("search-index.json");

        run_build(
            corpus.to_str().unwrap(),
            artifact.to_str().unwrap(),
            TokenizerConfig::default(),
            DEFAULT_TITLE_BOOST,
        )
        .unwrap();

        let built = load_artifact(&artifact).unwrap();
        let hits = search("error", &built.index, &built.store);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, 1);
        assert_eq!(hits[0].url, "/post/1");
    }

    #[test]
    fn malformed_record_fails_the_build() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("bad.json");
        fs::write(&corpus, r#"[{"id":"not-a-number","title":"x"}]"#).unwrap();
        let artifact = dir.path().join("out.json");

        let err = run_build(
            corpus.to_str().unwrap(),
            artifact.to_str().unwrap(),
            TokenizerConfig::default(),
            DEFAULT_TITLE_BOOST,
        );
        assert!(err.is_err());
        assert!(!artifact.exists());
    }
}
