/// Embedding of a chunk of text.
#[derive(Clone, Debug, PartialEq)]
pub struct Embedding {
    /// A unique identifier for the embedding.
    pub id: String,
    /// The numerical embedding vector of the text.
    pub embedded_data: Vec<f64>,
    /// The raw text the embedding was generated from.
    pub raw_data: String,
}
