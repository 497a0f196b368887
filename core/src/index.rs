use crate::tokenizer::{FieldKind, Tokenizer, TokenizerConfig};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type DocId = u32;

/// Default weight applied to title occurrences at scoring time.
pub const DEFAULT_TITLE_BOOST: f32 = 10.0;

/// One corpus record as produced by the site generator: markup already
/// stripped, id unique and stable across rebuilds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub content: String,
    pub url: String,
}

/// One entry in a term's postings list. Raw per-field occurrence counts are
/// stored unmultiplied; the boost factor lives on the index so every score
/// can be recomputed from what is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf_title: u32,
    pub tf_content: u32,
}

/// Immutable inverted index plus the corpus statistics scoring needs.
/// Built once per corpus snapshot; read-only afterwards. BTreeMaps keep the
/// serialized form identical across rebuilds of the same corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    /// term -> postings sorted by doc_id, one entry per (term, doc) pair.
    pub postings: BTreeMap<String, Vec<Posting>>,
    /// doc_id -> total token count (title + content).
    pub doc_lengths: BTreeMap<DocId, u32>,
    pub num_docs: u32,
    pub avg_doc_length: f32,
    pub title_boost: f32,
    /// Analyzer settings the corpus was tokenized with. Queries must reuse
    /// them, so they travel with the index.
    pub tokenizer: TokenizerConfig,
}

impl Index {
    /// Number of distinct documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.postings.get(term).map_or(0, |p| p.len() as u32)
    }

    pub fn document_length(&self, doc_id: DocId) -> u32 {
        self.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }
}

/// Per-document metadata for rendering results without re-parsing anything.
/// Content is carried along for snippet extraction at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDoc {
    pub title: String,
    pub url: String,
    pub content: String,
}

pub type DocumentStore = BTreeMap<DocId, StoredDoc>;

/// The index and its document store, built together and persisted together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltIndex {
    pub index: Index,
    pub store: DocumentStore,
}

/// Build an immutable index over `documents`. Pure function of its input:
/// the same corpus always yields a byte-identical serialized index.
///
/// A duplicate document id is a build-time error; the Document Provider
/// guarantees uniqueness and silently overwriting would corrupt statistics.
/// An empty corpus builds an empty (valid) index.
pub fn build_index(
    documents: &[Document],
    config: TokenizerConfig,
    title_boost: f32,
) -> Result<BuiltIndex> {
    let tokenizer = Tokenizer::new(config);

    let mut postings: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
    let mut doc_lengths: BTreeMap<DocId, u32> = BTreeMap::new();
    let mut store: DocumentStore = BTreeMap::new();

    for doc in documents {
        if let Some(prev) = store.get(&doc.id) {
            bail!(
                "duplicate document id {} (\"{}\" vs \"{}\")",
                doc.id,
                prev.title,
                doc.title
            );
        }

        let title_tokens = tokenizer.tokenize(&doc.title, FieldKind::Title);
        let content_tokens = tokenizer.tokenize(&doc.content, FieldKind::Content);
        doc_lengths.insert(doc.id, (title_tokens.len() + content_tokens.len()) as u32);

        // term -> (tf_title, tf_content) for this document
        let mut counts: BTreeMap<String, (u32, u32)> = BTreeMap::new();
        for token in title_tokens {
            counts.entry(token.term).or_default().0 += 1;
        }
        for token in content_tokens {
            counts.entry(token.term).or_default().1 += 1;
        }

        for (term, (tf_title, tf_content)) in counts {
            postings.entry(term).or_default().push(Posting {
                doc_id: doc.id,
                tf_title,
                tf_content,
            });
        }

        store.insert(
            doc.id,
            StoredDoc {
                title: doc.title.clone(),
                url: doc.url.clone(),
                content: doc.content.clone(),
            },
        );
    }

    // Input order is arbitrary; postings lists are doc_id-ordered by contract.
    for plist in postings.values_mut() {
        plist.sort_by_key(|p| p.doc_id);
    }

    let num_docs = documents.len() as u32;
    if num_docs == 0 {
        tracing::warn!("building index over an empty corpus; all queries will return nothing");
    }
    let total_len: u64 = doc_lengths.values().map(|&l| l as u64).sum();
    let avg_doc_length = if num_docs == 0 {
        0.0
    } else {
        total_len as f32 / num_docs as f32
    };

    tracing::info!(
        num_docs,
        num_terms = postings.len(),
        avg_doc_length,
        "index built"
    );

    Ok(BuiltIndex {
        index: Index {
            postings,
            doc_lengths,
            num_docs,
            avg_doc_length,
            title_boost,
            tokenizer: config,
        },
        store,
    })
}
