//! Recursive character chunker
//!
//! Splits page units into overlapping chunks along a priority-ordered
//! separator list. Each page is split independently, so a chunk's
//! provenance always names a single page.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};

use crate::domain::models::{Chunk, ChunkingConfig, PageUnit};

/// Character-count chunker with recursive separator fallback
///
/// The first separator found in the text is used to split it; pieces
/// that still exceed `chunk_size` are split again with the remaining
/// separators. An empty-string separator splits on characters. A piece
/// no remaining separator can break is kept whole: coherence wins over
/// the strict size bound.
pub struct RecursiveChunker {
    config: ChunkingConfig,
}

impl RecursiveChunker {
    /// Create a new chunker, validating the configuration
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid chunking config: {}", e))?;

        Ok(Self { config })
    }

    /// Split page units into chunks, copying each unit's provenance
    ///
    /// Blank units are discarded before splitting; blank chunks are
    /// discarded after.
    pub fn split_units(&self, units: &[PageUnit]) -> Vec<Chunk> {
        units
            .iter()
            .filter(|unit| !unit.is_blank())
            .flat_map(|unit| {
                self.split_text(&unit.content)
                    .into_iter()
                    .map(move |content| Chunk::from_unit(content, unit))
            })
            .collect()
    }

    /// Split a single text into trimmed, non-blank chunks
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.config.separators)
            .into_iter()
            .filter_map(|piece| {
                let trimmed = piece.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect()
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let (separator, rest) = select_separator(text, separators);
        let pieces = split_on(text, &separator);

        let mut output = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in pieces {
            if char_len(&piece) <= self.config.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                output.extend(self.merge_pieces(&pending, &separator));
                pending.clear();
            }

            if rest.is_empty() {
                // atomic piece with no separator left to try
                output.push(piece);
            } else {
                output.extend(self.split_recursive(&piece, rest));
            }
        }

        if !pending.is_empty() {
            output.extend(self.merge_pieces(&pending, &separator));
        }

        output
    }

    /// Greedily pack pieces into chunks of at most `chunk_size` chars,
    /// carrying up to `chunk_overlap` trailing chars into the next chunk
    fn merge_pieces(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let chunk_size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;
        let sep_len = char_len(separator);

        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let piece_len = char_len(piece);
            let joined = if window.is_empty() { 0 } else { sep_len };

            if total + piece_len + joined > chunk_size && !window.is_empty() {
                chunks.push(join_pieces(&window, separator));

                // shed leading pieces until the retained tail fits the
                // overlap budget and leaves room for the next piece
                while total > overlap
                    || (total + piece_len + if window.is_empty() { 0 } else { sep_len }
                        > chunk_size
                        && total > 0)
                {
                    match window.pop_front() {
                        Some(first) => {
                            total -= char_len(first)
                                + if window.is_empty() { 0 } else { sep_len };
                        }
                        None => break,
                    }
                }
            }

            window.push_back(piece.as_str());
            total += piece_len + if window.len() > 1 { sep_len } else { 0 };
        }

        if !window.is_empty() {
            chunks.push(join_pieces(&window, separator));
        }

        chunks
    }
}

/// First separator present in the text wins; the rest are retried on
/// oversize pieces. An empty-string entry always matches (char split).
fn select_separator<'a>(text: &str, separators: &'a [String]) -> (String, &'a [String]) {
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() || text.contains(sep.as_str()) {
            return (sep.clone(), &separators[i + 1..]);
        }
    }

    // nothing matched: split degenerates to the whole text as one piece
    (
        separators.last().cloned().unwrap_or_default(),
        &separators[separators.len()..],
    )
}

fn split_on(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        text.chars().map(String::from).collect()
    } else {
        text.split(separator)
            .filter(|piece| !piece.is_empty())
            .map(String::from)
            .collect()
    }
}

fn join_pieces(window: &VecDeque<&str>, separator: &str) -> String {
    window
        .iter()
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
