//! Fixed-size sliding-window text splitter

/// Split text into chunks of at most `chunk_size` characters, with `overlap`
/// characters shared between consecutive chunks so no boundary is lost at a
/// chunk edge. Whitespace-only chunks are discarded.
///
/// Sizes are in characters, not bytes, so multi-byte text never splits
/// inside a code point.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if chunk_size == 0 {
        return Vec::new();
    }
    // Config validation enforces overlap < chunk_size; clamp anyway so the
    // window always advances
    let step = chunk_size.saturating_sub(overlap).max(1);

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunks = split_text("hello world", 750, 50);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_text("", 750, 50).is_empty());
        assert!(split_text("   \n\t  ", 750, 50).is_empty());
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let text = "a".repeat(2000);
        let chunks = split_text(&text, 750, 50);
        assert!(chunks.iter().all(|c| c.chars().count() <= 750));
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text: String = (0..200).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = split_text(&text, 100, 20);
        assert!(chunks.len() >= 2);
        let first_tail: String = chunks[0].chars().skip(80).collect();
        let second_head: String = chunks[1].chars().take(20).collect();
        assert_eq!(first_tail, second_head);
    }

    #[test]
    fn test_full_text_is_covered() {
        let text = "x".repeat(1701);
        let chunks = split_text(&text, 750, 50);
        // Window advances by 700 per step: 0..750, 700..1450, 1400..1701
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].chars().count(), 301);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "日本語のテキスト".repeat(100);
        let chunks = split_text(&text, 100, 10);
        let reassembled_len: usize = chunks.iter().map(|c| c.chars().count()).sum();
        assert!(reassembled_len >= text.chars().count());
    }

    #[test]
    fn test_degenerate_overlap_still_advances() {
        // overlap >= chunk_size is rejected by config validation; the
        // splitter itself must still terminate if handed such values
        let chunks = split_text(&"y".repeat(50), 10, 10);
        assert!(!chunks.is_empty());
    }
}
