//! Chunker — splits normalized text into bounded, word-respecting chunks.
//!
//! Chunk boundaries are a pure function of `(text, max_chunk_size)`, so the ids
//! `"<source_label>_chunk_<index>"` are reproducible across runs on the same input.

use serde::{Deserialize, Serialize};

/// Chunk size for resume text, in characters.
pub const RESUME_CHUNK_SIZE: usize = 1024;
/// Chunk size for the job description. Smaller, since job text is short.
pub const JOB_CHUNK_SIZE: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub source_label: String,
    pub index: usize,
}

pub fn chunk_id(source_label: &str, index: usize) -> String {
    format!("{source_label}_chunk_{index}")
}

/// Lazy chunk sequence. Cloning it restarts from the current position; a fresh
/// call to [`chunk_text`] always restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text: &'a str,
    max_chunk_size: usize,
    source_label: &'a str,
    offset: usize,
    next_index: usize,
}

/// Splits `text` into chunks of at most `max_chunk_size` characters.
///
/// The tentative end is `offset + max_chunk_size`. When that is before the end of
/// the text, the end backs off to the last space at or before it, provided that
/// space lies strictly after `offset`; otherwise the hard cut is kept.
pub fn chunk_text<'a>(text: &'a str, max_chunk_size: usize, source_label: &'a str) -> Chunks<'a> {
    Chunks {
        text,
        max_chunk_size: max_chunk_size.max(1),
        source_label,
        offset: 0,
        next_index: 0,
    }
}

impl<'a> Chunks<'a> {
    fn chunk_end(&self) -> usize {
        let rest = &self.text[self.offset..];
        let hard_end = match rest.char_indices().nth(self.max_chunk_size) {
            Some((idx, _)) => self.offset + idx,
            None => return self.text.len(),
        };

        // A space sitting exactly at the cut also counts.
        if self.text.as_bytes()[hard_end] == b' ' {
            return hard_end;
        }
        match self.text[..hard_end].rfind(' ') {
            Some(space) if space > self.offset => space,
            _ => hard_end,
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        while self.offset < self.text.len() {
            let end = self.chunk_end();
            let piece = self.text[self.offset..end].trim();

            let rest = &self.text[end..];
            self.offset = end + (rest.len() - rest.trim_start().len());

            if piece.is_empty() {
                continue;
            }

            let index = self.next_index;
            self.next_index += 1;
            return Some(Chunk {
                id: chunk_id(self.source_label, index),
                text: piece.to_string(),
                source_label: self.source_label.to_string(),
                index,
            });
        }
        None
    }
}
