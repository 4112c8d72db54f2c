//! Text generation seam and fallback handling.

use async_trait::async_trait;
use log::error;

use crate::error::Result;

/// Reply sent whenever generation fails, whatever the cause.
pub const FALLBACK_MESSAGE: &str =
    "Desculpe, tive um problema ao processar sua mensagem. Por favor, tente novamente mais tarde.";

/// Remote text generation endpoint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a reply for `prompt` in a single attempt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generates a reply, mapping any failure to [`FALLBACK_MESSAGE`].
pub async fn generate_reply(generator: &dyn TextGenerator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!("Error calling generation API: {e}");
            FALLBACK_MESSAGE.to_string()
        }
    }
}
