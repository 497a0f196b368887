use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Which document field a token came from. Title tokens are boosted at
/// scoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Title,
    Content,
}

/// A normalized term with its ordinal position in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub position: usize,
    pub field: FieldKind,
}

/// Analyzer settings. Persisted inside the index artifact so queries are
/// tokenized exactly the way the corpus was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Stem Latin tokens with the English Snowball stemmer.
    pub stem: bool,
    /// Drop English stopwords from Latin tokens.
    pub strip_stopwords: bool,
    /// Segment CJK runs into character bigrams.
    pub cjk_bigrams: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            stem: true,
            strip_stopwords: true,
            cjk_bigrams: true,
        }
    }
}

/// Tokenizer selected explicitly per corpus at build time. Never a global:
/// the same value (rebuilt from the persisted config) runs at query time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    /// Tokenize `text` into normalized, positioned terms. NFKC-normalizes and
    /// lowercases, splits Latin script on non-alphanumeric boundaries, and
    /// segments CJK runs into bigrams (a one-character run yields a unigram).
    /// Positions are token ordinals, continuous across script runs. Empty
    /// input yields an empty Vec.
    pub fn tokenize(&self, text: &str, field: FieldKind) -> Vec<Token> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        let mut position = 0usize;

        let mut word = String::new();
        let mut cjk_run: Vec<char> = Vec::new();

        for c in normalized.chars() {
            if is_cjk(c) {
                self.flush_word(&mut word, field, &mut position, &mut tokens);
                cjk_run.push(c);
            } else if c.is_alphanumeric() || c == '_' || c == '\'' {
                self.flush_cjk(&mut cjk_run, field, &mut position, &mut tokens);
                word.push(c);
            } else {
                self.flush_word(&mut word, field, &mut position, &mut tokens);
                self.flush_cjk(&mut cjk_run, field, &mut position, &mut tokens);
            }
        }
        self.flush_word(&mut word, field, &mut position, &mut tokens);
        self.flush_cjk(&mut cjk_run, field, &mut position, &mut tokens);

        tokens
    }

    fn flush_word(
        &self,
        word: &mut String,
        field: FieldKind,
        position: &mut usize,
        out: &mut Vec<Token>,
    ) {
        if word.is_empty() {
            return;
        }
        let raw = std::mem::take(word);
        if self.config.strip_stopwords && STOPWORDS.contains(raw.as_str()) {
            return;
        }
        let term = if self.config.stem {
            STEMMER.stem(&raw).to_string()
        } else {
            raw
        };
        out.push(Token {
            term,
            position: *position,
            field,
        });
        *position += 1;
    }

    fn flush_cjk(
        &self,
        run: &mut Vec<char>,
        field: FieldKind,
        position: &mut usize,
        out: &mut Vec<Token>,
    ) {
        if run.is_empty() {
            return;
        }
        let chars = std::mem::take(run);
        if !self.config.cjk_bigrams || chars.len() == 1 {
            let term: String = chars.into_iter().collect();
            out.push(Token {
                term,
                position: *position,
                field,
            });
            *position += 1;
            return;
        }
        for pair in chars.windows(2) {
            out.push(Token {
                term: pair.iter().collect(),
                position: *position,
                field,
            });
            *position += 1;
        }
    }
}

/// CJK codepoints that carry no whitespace word boundaries: Han ideographs
/// (unified + extension A + compatibility), kana, and Hangul syllables.
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}'     // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}'   // CJK Unified Ideographs
        | '\u{F900}'..='\u{FAFF}'   // CJK Compatibility Ideographs
        | '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}'   // Katakana
        | '\u{AC00}'..='\u{D7AF}'   // Hangul Syllables
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = Tokenizer::default().tokenize("Running, runner's run!", FieldKind::Content);
        assert!(t.iter().any(|tok| tok.term == "run"));
    }

    #[test]
    fn cjk_run_becomes_bigrams() {
        let t = Tokenizer::default().tokenize("中文搜索", FieldKind::Content);
        let terms: Vec<&str> = t.iter().map(|tok| tok.term.as_str()).collect();
        assert_eq!(terms, vec!["中文", "文搜", "搜索"]);
    }
}
