use crate::index::{Index, Posting};

/// TF-IDF contribution of one (term, document) posting.
///
/// `(tf_title * title_boost + tf_content) * ln(1 + N / df)`. Smoothed IDF so
/// a term occurring in every document keeps a positive weight; raw per-field
/// counts are combined with the boost here, at score time, never baked into
/// the posting.
pub fn score_posting(posting: &Posting, document_frequency: u32, index: &Index) -> f32 {
    if document_frequency == 0 {
        // Unseen terms never reach here: no postings list means no candidates.
        return 0.0;
    }
    let tf = posting.tf_title as f32 * index.title_boost + posting.tf_content as f32;
    let idf = (1.0 + index.num_docs as f32 / document_frequency as f32).ln();
    tf * idf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{build_index, Document, DEFAULT_TITLE_BOOST};
    use crate::tokenizer::TokenizerConfig;

    #[test]
    fn title_occurrence_outscores_equal_content_occurrence() {
        let docs = vec![
            Document {
                id: 1,
                title: "zebra".into(),
                content: "filler words here".into(),
                url: "/1".into(),
            },
            Document {
                id: 2,
                title: "filler".into(),
                content: "zebra words here".into(),
                url: "/2".into(),
            },
        ];
        let built = build_index(&docs, TokenizerConfig::default(), DEFAULT_TITLE_BOOST).unwrap();
        let plist = &built.index.postings["zebra"];
        let df = built.index.document_frequency("zebra");
        let s1 = score_posting(&plist[0], df, &built.index);
        let s2 = score_posting(&plist[1], df, &built.index);
        assert!(s1 > s2);
    }
}
