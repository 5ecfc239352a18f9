//! Recursive character splitting.
//!
//! Tries the separators in order: paragraph breaks first, then lines, then
//! sentences, then words, finally single characters. Fragments that are
//! still too large are re-split with the next separator down, and the
//! resulting pieces are merged back greedily into chunks of at most
//! `chunk_size` characters with `chunk_overlap` characters carried over
//! between consecutive chunks.
//!
//! Every chunk is a literal subslice of the input text, so the reported
//! start index is an exact byte offset into the document's content. Sizes
//! are measured in characters, offsets in bytes.

use std::collections::VecDeque;

use crate::document::{Chunk, Document};

/// Configuration consumed by [`RecursiveSplitter`].
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Maximum chunk length, in characters.
    pub chunk_size: usize,
    /// Characters carried over from the end of one chunk into the next.
    pub chunk_overlap: usize,
    /// Separators tried in order; an empty string splits between characters.
    pub separators: Vec<String>,
    /// Trim whitespace from chunk edges, dropping chunks that become empty.
    pub strip_whitespace: bool,
    /// Record each chunk's byte offset within its document.
    pub track_start_index: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
            separators: ["\n\n", "\n", ".", " ", ""]
                .map(String::from)
                .to_vec(),
            strip_whitespace: true,
            track_start_index: true,
        }
    }
}

/// Splits documents into overlapping chunks.
#[derive(Debug, Default)]
pub struct RecursiveSplitter {
    config: SplitterConfig,
}

impl RecursiveSplitter {
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Splits every document, carrying its metadata onto each chunk.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| {
                self.split_text(&doc.content)
                    .into_iter()
                    .map(|(start, content)| Chunk {
                        content: content.to_string(),
                        metadata: doc.metadata.clone(),
                        start_index: self.config.track_start_index.then_some(start),
                    })
            })
            .collect()
    }

    /// Splits raw text into `(byte offset, chunk)` pairs.
    pub fn split_text<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        let mut pieces = Vec::new();
        self.split_spans(text, 0, text.len(), 0, &mut pieces);
        self.merge_spans(text, &pieces)
    }

    /// Recursively splits `text[start..end]` into spans of at most
    /// `chunk_size` characters, separator boundaries permitting.
    fn split_spans(
        &self,
        text: &str,
        start: usize,
        end: usize,
        sep_idx: usize,
        out: &mut Vec<(usize, usize)>,
    ) {
        if start == end {
            return;
        }
        if char_len(&text[start..end]) <= self.config.chunk_size {
            out.push((start, end));
            return;
        }
        let Some(sep) = self.config.separators.get(sep_idx) else {
            // No separators left; keep the oversized span whole.
            out.push((start, end));
            return;
        };
        if sep.is_empty() {
            for (i, c) in text[start..end].char_indices() {
                out.push((start + i, start + i + c.len_utf8()));
            }
            return;
        }

        let fragments = split_keeping_separator(text, start, end, sep);
        if fragments.len() <= 1 {
            self.split_spans(text, start, end, sep_idx + 1, out);
            return;
        }
        for (frag_start, frag_end) in fragments {
            if char_len(&text[frag_start..frag_end]) <= self.config.chunk_size {
                out.push((frag_start, frag_end));
            } else {
                self.split_spans(text, frag_start, frag_end, sep_idx + 1, out);
            }
        }
    }

    /// Greedily merges adjacent spans into chunks, keeping up to
    /// `chunk_overlap` trailing characters when a chunk is flushed.
    fn merge_spans<'a>(&self, text: &'a str, spans: &[(usize, usize)]) -> Vec<(usize, &'a str)> {
        let mut chunks = Vec::new();
        // Spans are contiguous, so the window is (front index, running char total).
        let mut window: VecDeque<(usize, usize)> = VecDeque::new();
        let mut window_len = 0usize;

        for &(start, end) in spans {
            let span_len = char_len(&text[start..end]);
            if !window.is_empty() && window_len + span_len > self.config.chunk_size {
                self.push_chunk(text, &window, &mut chunks);
                while window_len > self.config.chunk_overlap
                    || (window_len + span_len > self.config.chunk_size && window_len > 0)
                {
                    let (front_start, front_end) = window.pop_front().unwrap_or_default();
                    window_len -= char_len(&text[front_start..front_end]);
                }
            }
            window.push_back((start, end));
            window_len += span_len;
        }
        if !window.is_empty() {
            self.push_chunk(text, &window, &mut chunks);
        }
        chunks
    }

    fn push_chunk<'a>(
        &self,
        text: &'a str,
        window: &VecDeque<(usize, usize)>,
        chunks: &mut Vec<(usize, &'a str)>,
    ) {
        let (Some(&(start, _)), Some(&(_, end))) = (window.front(), window.back()) else {
            return;
        };
        let slice = &text[start..end];
        if self.config.strip_whitespace {
            let trimmed = slice.trim();
            if trimmed.is_empty() {
                return;
            }
            let leading = slice.len() - slice.trim_start().len();
            chunks.push((start + leading, trimmed));
        } else {
            chunks.push((start, slice));
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Splits `text[start..end]` at each occurrence of `sep`, keeping the
/// separator attached to the preceding fragment so the spans stay
/// contiguous.
fn split_keeping_separator(
    text: &str,
    start: usize,
    end: usize,
    sep: &str,
) -> Vec<(usize, usize)> {
    let piece = &text[start..end];
    let mut spans = Vec::new();
    let mut frag_start = 0;
    for (idx, _) in piece.match_indices(sep) {
        let frag_end = idx + sep.len();
        spans.push((start + frag_start, start + frag_end));
        frag_start = frag_end;
    }
    if frag_start < piece.len() {
        spans.push((start + frag_start, end));
    }
    spans
}
