/// Split a slice into consecutive, non-overlapping chunks of at most
/// `chunk_size` elements. The last chunk may be shorter; an empty input
/// yields no chunks.
///
/// Panics if `chunk_size` is zero. Callers obtain the size from validated
/// configuration, so a zero here is a programming error.
pub fn chunked<T>(items: &[T], chunk_size: usize) -> Vec<&[T]> {
    assert!(chunk_size > 0, "chunk_size must be positive");
    items.chunks(chunk_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_concatenate_back_to_input() {
        let items: Vec<u32> = (0..25).collect();
        let chunks = chunked(&items, 10);

        let rejoined: Vec<u32> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(rejoined, items);
    }

    #[test]
    fn test_all_chunks_within_cap_and_only_last_shorter() {
        let items: Vec<u32> = (0..25).collect();
        let chunks = chunked(&items, 10);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[1].len(), 10);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn test_exact_multiple_has_no_short_chunk() {
        let items: Vec<u32> = (0..20).collect();
        let chunks = chunked(&items, 10);

        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let items: Vec<u32> = Vec::new();
        assert!(chunked(&items, 10).is_empty());
    }

    #[test]
    fn test_chunk_size_one() {
        let items = vec!["a", "b", "c"];
        let chunks = chunked(&items, 1);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], &["b"]);
    }

    #[test]
    #[should_panic(expected = "chunk_size must be positive")]
    fn test_zero_chunk_size_panics() {
        let items = vec![1, 2, 3];
        chunked(&items, 0);
    }
}
