use regex::{Regex, RegexBuilder};

/// Characters kept on each side of the first match.
pub const DEFAULT_WINDOW: usize = 80;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Extract a bounded snippet of `content` around the first occurrence of any
/// query term and wrap every match inside the window in `<mark>` markers.
///
/// Matching is case-insensitive over the surface forms, so the snippet keeps
/// the original casing. Overlapping matches are merged into one span, and a
/// span that already sits inside markers is left alone, so re-highlighting
/// output is a no-op. When nothing matches (a document found via its title
/// alone), a truncated unmarked prefix comes back instead.
pub fn highlight(content: &str, query_terms: &[String], window: usize) -> String {
    let regexes: Vec<Regex> = query_terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .filter_map(|t| {
            RegexBuilder::new(&regex::escape(t))
                .case_insensitive(true)
                .build()
                .ok()
        })
        .collect();

    let first = regexes
        .iter()
        .filter_map(|re| re.find(content))
        .min_by_key(|m| m.start());

    let Some(first) = first else {
        return truncate_chars(content, window * 2).to_string();
    };

    // Window bounds are measured in characters, then mapped back to byte
    // offsets to stay on UTF-8 boundaries.
    let chars: Vec<usize> = content.char_indices().map(|(i, _)| i).collect();
    let start_char = byte_to_char(&chars, first.start());
    let end_char = byte_to_char(&chars, first.end());
    let lo_char = start_char.saturating_sub(window);
    let hi_char = (end_char + window).min(chars.len());
    let lo = chars[lo_char];
    let hi = if hi_char == chars.len() {
        content.len()
    } else {
        chars[hi_char]
    };
    let snippet = &content[lo..hi];

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for re in &regexes {
        for m in re.find_iter(snippet) {
            ranges.push((m.start(), m.end()));
        }
    }
    ranges.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    let mut out = String::with_capacity(snippet.len() + merged.len() * 16);
    let mut cursor = 0;
    for (s, e) in merged {
        out.push_str(&snippet[cursor..s]);
        let already_marked =
            snippet[..s].ends_with(MARK_OPEN) && snippet[e..].starts_with(MARK_CLOSE);
        if !already_marked {
            out.push_str(MARK_OPEN);
        }
        out.push_str(&snippet[s..e]);
        if !already_marked {
            out.push_str(MARK_CLOSE);
        }
        cursor = e;
    }
    out.push_str(&snippet[cursor..]);
    out
}

/// Char index of the char starting at `byte` (or one past the end).
fn byte_to_char(char_starts: &[usize], byte: usize) -> usize {
    char_starts.partition_point(|&b| b < byte)
}

fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
