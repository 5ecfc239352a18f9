/// Provenance carried by every document and chunk.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Metadata {
    /// Base name of the file the text came from.
    pub source: String,
    /// Title reported by the markdown conversion.
    pub title: String,
}

/// Full converted text of one input file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Document {
    pub content: String,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(content: String, source: String, title: String) -> Self {
        Self {
            content,
            metadata: Metadata { source, title },
        }
    }
}

/// A bounded substring of a document's text, the unit of retrieval.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chunk {
    pub content: String,
    pub metadata: Metadata,
    /// Byte offset of the chunk within its document's content.
    /// `None` when start-index tracking is disabled on the splitter.
    pub start_index: Option<usize>,
}
