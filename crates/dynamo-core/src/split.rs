//! Character-budget text splitting.
//!
//! Splits transcript text into chunks of at most `chunk_size` characters,
//! preferring to break at paragraph, line, and word boundaries before
//! falling back to a hard character cut. No overlap between chunks.

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Boundary preference, strongest first. The empty separator means
/// "cut anywhere".
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Split `text` into chunks of at most `chunk_size` characters.
///
/// Whitespace-only chunks are dropped. Returns an empty Vec for empty or
/// whitespace-only input.
pub fn split_text(text: &str, chunk_size: usize) -> Vec<String> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        if rest.chars().count() <= chunk_size {
            push_chunk(&mut chunks, rest);
            break;
        }

        let cut = best_cut(rest, chunk_size);
        let (head, tail) = rest.split_at(cut);
        push_chunk(&mut chunks, head);
        rest = tail.trim_start();
    }

    chunks
}

/// Find the byte offset to cut at: the last occurrence of the strongest
/// separator within the first `chunk_size` characters.
fn best_cut(text: &str, chunk_size: usize) -> usize {
    // Byte index of the character just past the budget.
    let limit = text
        .char_indices()
        .nth(chunk_size)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let window = &text[..limit];

    for sep in SEPARATORS {
        if sep.is_empty() {
            break;
        }
        if let Some(idx) = window.rfind(sep) {
            if idx > 0 {
                return idx;
            }
        }
    }

    limit
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
