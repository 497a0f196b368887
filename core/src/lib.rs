//! Full-text search for a static site: build-time indexing of
//! `{id, title, content, url}` records into an immutable inverted index,
//! persisted as a versioned JSON artifact, queried with TF-IDF scoring and
//! snippet highlighting.

pub mod highlight;
pub mod index;
pub mod persist;
pub mod score;
pub mod search;
pub mod tokenizer;

pub use index::{
    build_index, BuiltIndex, DocId, Document, DocumentStore, Index, Posting, StoredDoc,
    DEFAULT_TITLE_BOOST,
};
pub use search::{search, SearchHit};
pub use tokenizer::{FieldKind, Token, Tokenizer, TokenizerConfig};
