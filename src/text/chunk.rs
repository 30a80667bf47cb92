/// Split text into contiguous groups of at most `max_words`
/// whitespace-delimited words, preserving word order.
///
/// This is a word-level split: rejoining the chunks with single spaces
/// reproduces the token sequence, not the original whitespace runs.
pub fn split_words(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_words("hello world", 1000);
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_words("", 1000).is_empty());
        assert!(split_words("   \n\t ", 1000).is_empty());
    }

    #[test]
    fn chunk_count_is_ceil_of_word_count() {
        let text = (0..2500).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let chunks = split_words(&text, 1000);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].split_whitespace().count(), 1000);
        assert_eq!(chunks[1].split_whitespace().count(), 1000);
        assert_eq!(chunks[2].split_whitespace().count(), 500);
    }

    #[test]
    fn rejoining_chunks_reproduces_word_sequence() {
        let text = "one  two\tthree\nfour five six seven";
        let chunks = split_words(text, 3);
        assert_eq!(chunks.join(" "), "one two three four five six seven");
    }
}
