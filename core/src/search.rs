use crate::highlight::{highlight, DEFAULT_WINDOW};
use crate::index::{DocId, DocumentStore, Index};
use crate::score::score_posting;
use crate::tokenizer::{FieldKind, Tokenizer};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// One ranked search result, ready for a rendering layer to consume.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub score: f32,
}

/// Execute `query` against an immutable index. Total over all inputs: any
/// string in, a (possibly empty) ranked Vec out, never an error.
///
/// The query is tokenized with the analyzer settings persisted in the index,
/// candidates are unioned across distinct terms (partial matches rank lower,
/// they are not excluded), per-term scores add up, and ties break on
/// ascending doc_id so results are deterministic.
pub fn search(query: &str, index: &Index, store: &DocumentStore) -> Vec<SearchHit> {
    let tokenizer = Tokenizer::new(index.tokenizer);
    let terms: BTreeSet<String> = tokenizer
        .tokenize(query, FieldKind::Content)
        .into_iter()
        .map(|t| t.term)
        .collect();

    // Punctuation-only or empty input: the caller's signal to show the
    // default view instead of a result list.
    if terms.is_empty() {
        return Vec::new();
    }

    let mut scores: HashMap<DocId, f32> = HashMap::new();
    for term in &terms {
        if let Some(plist) = index.postings.get(term) {
            let df = plist.len() as u32;
            for posting in plist {
                *scores.entry(posting.doc_id).or_insert(0.0) +=
                    score_posting(posting, df, index);
            }
        }
    }

    let mut ranked: Vec<(DocId, f32)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    // Surface forms of the query, for case-insensitive highlighting against
    // the original (unstemmed, original-case) content.
    let raw_terms: Vec<String> = query.split_whitespace().map(|s| s.to_string()).collect();

    let mut hits = Vec::with_capacity(ranked.len());
    for (doc_id, score) in ranked {
        let Some(meta) = store.get(&doc_id) else {
            // Postings reference only stored docs by construction; a miss
            // would mean a corrupt artifact, so skip rather than panic.
            tracing::warn!(doc_id, "posting references unknown document");
            continue;
        };
        hits.push(SearchHit {
            doc_id,
            title: meta.title.clone(),
            url: meta.url.clone(),
            snippet: highlight(&meta.content, &raw_terms, DEFAULT_WINDOW),
            score,
        });
    }

    tracing::debug!(query, hits = hits.len(), "search executed");
    hits
}
