//! Sentence-aware text chunking with word-aligned overlap.
//!
//! Text is split into fragments after every `.`, `!` or `?`, and fragments
//! are packed greedily into chunks of at most `max_chars` characters joined
//! by single spaces. A fragment longer than `max_chars` is cut into
//! `max_chars`-sized slices with no regard for words.
//!
//! With a non-zero overlap, every chunk after the first is prefixed with the
//! longest run of whole words from the end of the previous (already
//! prefixed) chunk that fits in `overlap` characters, counting one joining
//! space per word.

use folio_core::{ChunkConfig, FolioResult};

/// Splits cleaned text into bounded, overlapping chunks.
#[derive(Debug, Clone)]
pub struct TextChunker {
    config: ChunkConfig,
}

impl TextChunker {
    /// Create a chunker. Fails if `max_chars` is zero.
    pub fn new(config: ChunkConfig) -> FolioResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the chunk config.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Chunk `text`.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chunks = self.pack(text);

        let chunks = if self.config.overlap > 0 && chunks.len() > 1 {
            apply_overlap(chunks, self.config.overlap)
        } else {
            chunks
        };

        tracing::debug!(
            chars = text.chars().count(),
            chunks = chunks.len(),
            max_chars = self.config.max_chars,
            overlap = self.config.overlap,
            "Chunked text"
        );
        chunks
    }

    /// Greedy packing pass. Every returned chunk has at most `max_chars`
    /// characters.
    fn pack(&self, text: &str) -> Vec<String> {
        let max_chars = self.config.max_chars;
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for fragment in sentence_fragments(text) {
            let fragment_len = fragment.chars().count();

            if current_len + fragment_len + 1 <= max_chars {
                if current.is_empty() {
                    current_len = fragment_len;
                } else {
                    current.push(' ');
                    current_len += fragment_len + 1;
                }
                current.push_str(fragment);
                continue;
            }

            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }

            if fragment_len > max_chars {
                chunks.extend(hard_split(fragment, max_chars));
                current_len = 0;
            } else {
                current.push_str(fragment);
                current_len = fragment_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}

/// Chunk `text` with the given limits.
pub fn chunk_text(text: &str, max_chars: usize, overlap: usize) -> FolioResult<Vec<String>> {
    Ok(TextChunker::new(ChunkConfig::new(max_chars, overlap))?.chunk(text))
}

/// Trimmed, non-empty fragments ending at `.`, `!` or `?` (or end of text).
fn sentence_fragments(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
}

/// Cut `fragment` into slices of exactly `size` chars (the last may be shorter).
fn hard_split(fragment: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = fragment.chars().collect();
    chars.chunks(size).map(|slice| slice.iter().collect()).collect()
}

fn apply_overlap(chunks: Vec<String>, overlap: usize) -> Vec<String> {
    let mut output: Vec<String> = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let combined = match output.last() {
            None => chunk,
            Some(previous) => {
                let prefix = overlap_prefix(previous, overlap);
                format!("{} {}", prefix, chunk).trim().to_string()
            }
        };
        output.push(combined);
    }
    output
}

/// Longest whole-word suffix of `text` whose words plus one space each fit
/// in `overlap` chars, joined by single spaces.
fn overlap_prefix(text: &str, overlap: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut budget_used = 0;
    let mut start = words.len();

    for (index, word) in words.iter().enumerate().rev() {
        let cost = word.chars().count() + 1;
        if budget_used + cost > overlap {
            break;
        }
        budget_used += cost;
        start = index;
    }

    words[start..].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, max_chars: usize, overlap: usize) -> Vec<String> {
        chunk_text(text, max_chars, overlap).unwrap()
    }

    #[test]
    fn test_tiny_sentences_each_alone() {
        // "A. B." is 5 chars, over the limit of 4.
        assert_eq!(chunk("A. B. C.", 4, 0), vec!["A.", "B.", "C."]);
    }

    #[test]
    fn test_packs_sentences_up_to_limit() {
        assert_eq!(chunk("A. B. C.", 5, 0), vec!["A. B.", "C."]);
        assert_eq!(chunk("A. B. C.", 8, 0), vec!["A. B. C."]);
    }

    #[test]
    fn test_join_space_counts_against_limit() {
        // "Hi. Yo." is exactly 7 chars.
        assert_eq!(chunk("Hi. Yo.", 7, 0), vec!["Hi. Yo."]);
        assert_eq!(chunk("Hi. Yo.", 6, 0), vec!["Hi.", "Yo."]);
        assert_eq!(chunk("Hello.", 6, 0), vec!["Hello."]);
    }

    #[test]
    fn test_terminators_stay_attached() {
        assert_eq!(
            chunk("Really? Yes! Fine.", 8, 0),
            vec!["Really?", "Yes!", "Fine."]
        );
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        assert_eq!(chunk("One. two three", 100, 0), vec!["One. two three"]);
    }

    #[test]
    fn test_whitespace_only_and_empty() {
        assert!(chunk("", 10, 0).is_empty());
        assert!(chunk("   \n\t ", 10, 3).is_empty());
    }

    #[test]
    fn test_oversized_sentence_is_hard_split() {
        let chunks = chunk("Hi. abcdefghij.", 4, 0);
        assert_eq!(chunks, vec!["Hi.", "abcd", "efgh", "ij."]);
    }

    #[test]
    fn test_accumulation_restarts_after_hard_split() {
        let chunks = chunk("abcdefgh. A. B.", 4, 0);
        assert_eq!(chunks, vec!["abcd", "efgh", ".", "A.", "B."]);
    }

    #[test]
    fn test_hard_split_counts_chars() {
        let chunks = chunk("ééééé", 2, 0);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn test_overlap_chains_whole_words() {
        let text = "One two three. Four five six. Seven eight nine.";
        let chunks = chunk(text, 20, 10);
        assert_eq!(
            chunks,
            vec![
                "One two three.",
                "three. Four five six.",
                "five six. Seven eight nine.",
            ]
        );
    }

    #[test]
    fn test_overlap_too_small_for_any_word() {
        let chunks = chunk("Alpha. Beta.", 6, 3);
        assert_eq!(chunks, vec!["Alpha.", "Beta."]);
    }

    #[test]
    fn test_overlap_ignored_for_single_chunk() {
        assert_eq!(chunk("Just one.", 100, 50), vec!["Just one."]);
    }

    #[test]
    fn test_overlap_prefix_budget() {
        assert_eq!(overlap_prefix("a bb ccc", 4), "ccc");
        assert_eq!(overlap_prefix("a bb ccc", 7), "bb ccc");
        assert_eq!(overlap_prefix("a bb ccc", 9), "a bb ccc");
        assert_eq!(overlap_prefix("a bb ccc", 3), "");
        assert_eq!(overlap_prefix("", 10), "");
    }

    #[test]
    fn test_zero_max_chars_rejected() {
        assert!(chunk_text("text", 0, 0).is_err());
        assert!(TextChunker::new(ChunkConfig::new(0, 5)).is_err());
    }
}
