//! Trait definitions for external backends
//!
//! These traits define the boundaries between the pipeline and its
//! network backends. Infrastructure implementations live in other crates.

/// Trait for language-model completion backends
///
/// Implemented by the infrastructure layer (grantex-llm)
pub trait LlmProvider {
    /// Error type for completion operations
    type Error;

    /// Generate a text completion for the given prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for text-embedding backends
///
/// Implemented by the infrastructure layer (grantex-llm for the network
/// backend, grantex-store for the deterministic test model)
pub trait EmbeddingBackend {
    /// Error type for embedding operations
    type Error;

    /// Compute the embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error>;

    /// Dimension of the vectors this backend produces
    fn dimension(&self) -> usize;
}
