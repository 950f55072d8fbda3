//! Answer generation port
//!
//! Prompt templating and LLM invocation live outside this core. The
//! collaborator consumes ordered grounding passages plus the query and
//! produces an answer string that is opaque here.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::ContextPassage;

/// Collaborator interface for grounded answer generation
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate an answer to `query` grounded in the given passages
    async fn generate(&self, query: &str, passages: &[ContextPassage]) -> Result<String>;
}
