use sitesearch_core::persist::{from_json, load_artifact, save_artifact, to_json, FORMAT_VERSION};
use sitesearch_core::{build_index, search, Document, TokenizerConfig, DEFAULT_TITLE_BOOST};
use tempfile::tempdir;

fn corpus() -> Vec<Document> {
    vec![
        Document {
            id: 1,
            title: "Rust Error Handling".into(),
            content: "thiserror macro for errors".into(),
            url: "/post/1".into(),
        },
        Document {
            id: 2,
            title: "Shell Tips".into(),
            content: "grep and awk usage".into(),
            url: "/post/2".into(),
        },
    ]
}

#[test]
fn round_trip_preserves_query_results() {
    let built = build_index(&corpus(), TokenizerConfig::default(), DEFAULT_TITLE_BOOST).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("search-index.json");
    save_artifact(&path, &built, "2026-01-01T00:00:00Z").unwrap();
    let loaded = load_artifact(&path).unwrap();

    for query in ["error", "shell", "rust error", "xyz123", ""] {
        let before = search(query, &built.index, &built.store);
        let after = search(query, &loaded.index, &loaded.store);
        assert_eq!(before.len(), after.len(), "query {query:?}");
        for (a, b) in before.iter().zip(&after) {
            assert_eq!(a.doc_id, b.doc_id);
            assert_eq!(a.score, b.score);
            assert_eq!(a.snippet, b.snippet);
        }
    }
}

#[test]
fn round_trip_keeps_tokenizer_config() {
    let config = TokenizerConfig {
        stem: false,
        strip_stopwords: false,
        cjk_bigrams: true,
    };
    let built = build_index(&corpus(), config, DEFAULT_TITLE_BOOST).unwrap();
    let loaded = from_json(&to_json(&built, "t").unwrap()).unwrap();
    assert_eq!(loaded.index.tokenizer, config);
}

#[test]
fn unknown_version_fails_closed() {
    let built = build_index(&corpus(), TokenizerConfig::default(), DEFAULT_TITLE_BOOST).unwrap();
    let json = to_json(&built, "t").unwrap();
    let bumped = json.replacen(
        &format!("\"version\":{FORMAT_VERSION}"),
        "\"version\":999",
        1,
    );
    assert_ne!(json, bumped, "version field should have been rewritten");
    let err = from_json(&bumped).unwrap_err().to_string();
    assert!(err.contains("version 999"), "{err}");
}

#[test]
fn garbage_artifact_is_an_error_not_a_panic() {
    assert!(from_json("not json at all").is_err());
    assert!(from_json("{}").is_err());
    assert!(from_json("{\"version\":1}").is_err());
}

#[test]
fn missing_artifact_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_artifact(&dir.path().join("absent.json")).is_err());
}
